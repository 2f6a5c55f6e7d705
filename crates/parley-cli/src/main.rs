//! parley - terminal frontend for a streaming chat backend

mod attachment;
mod commands;
mod config;
mod ui;

use std::sync::Arc;

use clap::Parser;
use parley_api::ChatClient;
use parley_session::{HttpTransport, Reconciler, SessionConfig, SessionEvent, SubmitError};
use tokio::sync::broadcast;

use attachment::FilePicker;
use commands::CommandResult;

/// parley - streaming chat client
#[derive(Parser, Debug)]
#[command(name = "parley")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Backend base URL (overrides the configured deployment mode)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Credential forwarded to the backend (default: PARLEY_API_KEY)
    #[arg(short, long)]
    api_key: Option<String>,

    /// Model forwarded with each exchange (server default if unset)
    #[arg(short, long)]
    model: Option<String>,

    /// Developer (system) prompt override
    #[arg(long)]
    developer_prompt: Option<String>,

    /// Send a single message and exit
    #[arg(short = 'c', long)]
    command: Option<String>,

    /// Skip the startup health probe
    #[arg(long)]
    no_health_check: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Initialize config file
    #[arg(long)]
    init_config: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Setup tracing
    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("parley=debug")
            .init();
    }

    // Initialize config and exit
    if args.init_config {
        match config::Config::init() {
            Ok(path) => {
                println!("Config file created at: {}", path.display());
                println!("\nExample config:\n{}", config::example_config());
            }
            Err(e) => {
                eprintln!("Error creating config: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    // Load config file; CLI args take precedence
    let cfg = config::Config::load();

    let base_url = match args.base_url.clone().or_else(|| cfg.base_url()) {
        Some(url) => url,
        None => anyhow::bail!(
            "remote mode needs remote_base_url in the config file (or pass --base-url)"
        ),
    };

    let api_key = match args.api_key.clone().or_else(|| cfg.get_api_key()) {
        Some(key) => key,
        None => {
            eprintln!("Error: no credential found");
            eprintln!();
            eprintln!("Set your key with: export PARLEY_API_KEY=your-key");
            eprintln!("Or add it to the config file: parley --init-config");
            std::process::exit(1);
        }
    };

    let client = ChatClient::new(&base_url);

    // Startup connectivity probe; failures are advisory, not fatal
    if !args.no_health_check {
        match client.health().await {
            Ok(health) if health.is_ok() => tracing::debug!("backend healthy"),
            Ok(health) => eprintln!("Warning: backend reports status: {}", health.status),
            Err(e) => eprintln!("Warning: backend unreachable at {}: {}", base_url, e.detail()),
        }
    }

    let mut session_config = SessionConfig::default();
    if let Some(prompt) = args.developer_prompt.clone().or_else(|| cfg.developer_prompt.clone()) {
        session_config.developer_prompt = prompt;
    }
    session_config.model = args.model.clone().or_else(|| cfg.model.clone());

    let mut reconciler = Reconciler::new(session_config, Arc::new(HttpTransport::new(client)));

    // A second client for the /health command; the first moved into the
    // reconciler's transport
    let health_client = ChatClient::new(&base_url);

    // Non-interactive mode
    if let Some(ref message) = args.command {
        return run_once(&mut reconciler, message, &api_key).await;
    }

    run_interactive(&mut reconciler, &health_client, &api_key, &base_url).await
}

/// Submit one message and render the streamed response, then exit.
async fn run_once(
    reconciler: &mut Reconciler,
    message: &str,
    api_key: &str,
) -> anyhow::Result<()> {
    let mut events = reconciler.subscribe();
    let mut renderer = ui::Renderer::new();

    submit_and_render(reconciler, &mut events, &mut renderer, message, api_key).await;
    Ok(())
}

/// Interactive read-eval loop: each non-empty line is a submission, slash
/// commands drive collaborator-only state.
async fn run_interactive(
    reconciler: &mut Reconciler,
    health_client: &ChatClient,
    api_key: &str,
    base_url: &str,
) -> anyhow::Result<()> {
    use std::io::{self, Write};

    let mut picker = FilePicker::new();
    let mut events = reconciler.subscribe();
    let mut renderer = ui::Renderer::new();

    // Show minimal startup info (only if TTY)
    if std::io::IsTerminal::is_terminal(&io::stderr()) {
        eprintln!("parley ({})", base_url);
        eprintln!("Type a message, or /help for commands.");
        eprintln!();
    }

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            // EOF
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        // Handle slash commands
        if input.starts_with('/') {
            if let Some(result) = commands::execute_command(input, &mut picker) {
                match result {
                    CommandResult::Clear => match reconciler.clear() {
                        Ok(()) => println!("Cleared transcript."),
                        Err(_) => println!("Cannot clear while a response is streaming."),
                    },
                    CommandResult::Health => match health_client.health().await {
                        Ok(health) if health.is_ok() => println!("Backend is healthy."),
                        Ok(health) => println!("Backend reports status: {}", health.status),
                        Err(e) => println!("Health check failed: {}", e.detail()),
                    },
                    CommandResult::Message(msg) => {
                        println!("{}", msg);
                    }
                    CommandResult::Exit => {
                        break;
                    }
                    CommandResult::Unknown(cmd) => {
                        println!("Unknown command: /{}", cmd);
                        println!("Type /help for available commands.");
                    }
                }
                println!();
                continue;
            }
        }

        println!();
        submit_and_render(reconciler, &mut events, &mut renderer, input, api_key).await;
        println!();
    }

    Ok(())
}

/// Drive one submission to completion, rendering events as they arrive.
///
/// The submit future and the event receiver are polled together so streamed
/// text reaches the terminal while the body is still open.
async fn submit_and_render(
    reconciler: &mut Reconciler,
    events: &mut broadcast::Receiver<SessionEvent>,
    renderer: &mut ui::Renderer,
    message: &str,
    api_key: &str,
) {
    let result = {
        let mut submit = std::pin::pin!(reconciler.submit(message, api_key));
        loop {
            tokio::select! {
                biased;

                result = &mut submit => break result,

                event = events.recv() => {
                    if let Ok(event) = event {
                        renderer.handle(&event);
                    }
                }
            }
        }
    };

    // Render events emitted after the future completed
    while let Ok(event) = events.try_recv() {
        renderer.handle(&event);
    }

    match result {
        Ok(()) => {}
        // Guarded by the caller's non-empty check; nothing to report
        Err(SubmitError::EmptyInput) => {}
        Err(SubmitError::Busy) => eprintln!("A response is still streaming; try again."),
    }
}
