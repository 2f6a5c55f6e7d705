//! Event-driven stdout renderer

use std::io::{self, Write};

use parley_session::{Role, SessionEvent};

/// Renders session events to stdout as they arrive.
///
/// Transcript updates carry the cumulative response text, not a diff, so the
/// renderer tracks how many characters it has already written and prints
/// only the new suffix of each update.
pub struct Renderer {
    printed_chars: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Self { printed_chars: 0 }
    }

    /// Handle one session event
    pub fn handle(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::SessionStart => {
                self.printed_chars = 0;
            }
            SessionEvent::StreamStart => {}
            SessionEvent::TranscriptUpdate { entry } if entry.role == Role::Assistant => {
                let suffix = new_suffix(&entry.text, self.printed_chars);
                if !suffix.is_empty() {
                    print!("{}", suffix);
                    io::stdout().flush().ok();
                }
                self.printed_chars = entry.text.chars().count();
            }
            // User entries are already visible as the typed input line
            SessionEvent::TranscriptUpdate { .. } => {}
            SessionEvent::SessionEnd { .. } => {
                println!();
            }
            // Fire-and-forget reveal hint; a line terminal just flushes
            SessionEvent::ScrollToLatest => {
                io::stdout().flush().ok();
            }
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// The characters of `text` past the first `printed` ones.
///
/// Counted in chars, not bytes: updates grow by whole characters, and byte
/// offsets would split multi-byte characters.
fn new_suffix(text: &str, printed: usize) -> String {
    text.chars().skip(printed).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_of_growing_text() {
        assert_eq!(new_suffix("Hi there", 2), " there");
        assert_eq!(new_suffix("Hi", 0), "Hi");
        assert_eq!(new_suffix("Hi", 2), "");
    }

    #[test]
    fn test_suffix_counts_chars_not_bytes() {
        // "café" is 4 chars but 5 bytes
        assert_eq!(new_suffix("café au lait", 4), " au lait");
    }
}
