//! Slash commands for interactive mode

use std::path::Path;

use crate::attachment::FilePicker;

/// Result of executing a slash command
pub enum CommandResult {
    /// Clear the conversation
    Clear,
    /// Show a message to the user (not submitted)
    Message(String),
    /// Probe the backend health endpoint
    Health,
    /// Exit the application
    Exit,
    /// Unknown command
    Unknown(String),
}

/// Parse and execute a slash command
pub fn execute_command(input: &str, picker: &mut FilePicker) -> Option<CommandResult> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let parts: Vec<&str> = input[1..].splitn(2, ' ').collect();
    let command = parts[0].to_lowercase();
    let args = parts.get(1).map(|s| s.trim()).unwrap_or("");

    Some(match command.as_str() {
        "help" | "h" | "?" => CommandResult::Message(help_message()),

        "clear" | "c" => CommandResult::Clear,

        "quit" | "exit" | "q" => CommandResult::Exit,

        "health" => CommandResult::Health,

        "attach" | "a" => {
            if args.is_empty() {
                match picker.selected() {
                    Some(file) => CommandResult::Message(format!(
                        "Attached: {} ({})",
                        file.name,
                        file.size_display()
                    )),
                    None => CommandResult::Message(
                        "No file attached. Usage: /attach <path-to-pdf>".to_string(),
                    ),
                }
            } else {
                match picker.select(Path::new(args)) {
                    Ok(file) => CommandResult::Message(format!(
                        "Attached: {} ({})",
                        file.name,
                        file.size_display()
                    )),
                    Err(e) => CommandResult::Message(format!("Cannot attach: {}", e)),
                }
            }
        }

        "detach" | "d" => match picker.remove() {
            Some(file) => CommandResult::Message(format!("Removed: {}", file.name)),
            None => CommandResult::Message("No file attached.".to_string()),
        },

        _ => CommandResult::Unknown(command),
    })
}

fn help_message() -> String {
    r#"Available commands:
  /help, /h, /?         Show this help message
  /attach, /a [path]    Attach a PDF document (or show the current one)
  /detach, /d           Remove the attached document
  /health               Check that the backend is reachable
  /clear, /c            Clear the transcript
  /quit, /exit, /q      Exit parley

Anything else you type is sent as a chat message."#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_command_input_passes_through() {
        let mut picker = FilePicker::new();
        assert!(execute_command("hello there", &mut picker).is_none());
    }

    #[test]
    fn test_quit_aliases() {
        let mut picker = FilePicker::new();
        for cmd in ["/quit", "/exit", "/q"] {
            assert!(matches!(
                execute_command(cmd, &mut picker),
                Some(CommandResult::Exit)
            ));
        }
    }

    #[test]
    fn test_unknown_command() {
        let mut picker = FilePicker::new();
        match execute_command("/frobnicate", &mut picker) {
            Some(CommandResult::Unknown(cmd)) => assert_eq!(cmd, "frobnicate"),
            _ => panic!("expected Unknown"),
        }
    }

    #[test]
    fn test_attach_rejects_non_pdf() {
        let mut picker = FilePicker::new();
        match execute_command("/attach notes.txt", &mut picker) {
            Some(CommandResult::Message(msg)) => assert!(msg.starts_with("Cannot attach")),
            _ => panic!("expected Message"),
        }
        assert!(picker.selected().is_none());
    }

    #[test]
    fn test_detach_without_selection() {
        let mut picker = FilePicker::new();
        match execute_command("/detach", &mut picker) {
            Some(CommandResult::Message(msg)) => assert_eq!(msg, "No file attached."),
            _ => panic!("expected Message"),
        }
    }
}
