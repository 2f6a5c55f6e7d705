//! Transcript state: the ordered message log and its two mutation primitives.

use serde::{Deserialize, Serialize};

/// Who authored a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One message in the transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub role: Role,
    pub text: String,
    /// Milliseconds since epoch at append time
    #[serde(default)]
    pub timestamp: i64,
}

impl Entry {
    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Ordered, append-and-patch message log.
///
/// Entries are append-only; only the tail entry may be mutated, and only
/// while it is an assistant entry still receiving streamed increments.
/// Appending a user entry implicitly closes the previous assistant entry.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<Entry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new entry at the tail.
    ///
    /// The entry is immutable once appended, except that an assistant entry
    /// at the tail remains patchable via [`patch_tail`](Self::patch_tail).
    pub fn append(&mut self, role: Role, text: impl Into<String>) -> &Entry {
        self.entries.push(Entry::new(role, text));
        &self.entries[self.entries.len() - 1]
    }

    /// Replace the tail entry's text if it is an assistant entry; otherwise
    /// append a new assistant entry carrying `text`.
    ///
    /// This single rule implements "create on first chunk, replace on each
    /// subsequent chunk": the first streamed increment of an exchange finds
    /// a user entry at the tail and opens the assistant entry, every later
    /// increment replaces that entry's text. Entries are never reordered.
    pub fn patch_tail(&mut self, text: impl Into<String>) -> &Entry {
        match self.entries.last_mut() {
            Some(tail) if tail.role == Role::Assistant => tail.text = text.into(),
            _ => self.entries.push(Entry::new(Role::Assistant, text)),
        }
        &self.entries[self.entries.len() - 1]
    }

    /// Owned copy of the ordered entries, reflecting state at call time.
    ///
    /// Mutating the returned vector does not affect the store.
    pub fn snapshot(&self) -> Vec<Entry> {
        self.entries.clone()
    }

    /// The most recently appended entry
    pub fn tail(&self) -> Option<&Entry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries. Callers must not clear while a session is streaming
    /// into the tail; the reconciler only exposes this when idle.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut t = Transcript::new();
        t.append(Role::User, "one");
        t.append(Role::Assistant, "two");
        t.append(Role::User, "three");

        let roles: Vec<Role> = t.snapshot().iter().map(|e| e.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
    }

    #[test]
    fn test_patch_tail_on_user_appends_assistant() {
        let mut t = Transcript::new();
        t.append(Role::User, "Hello");
        t.patch_tail("Hi");

        let entries = t.snapshot();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].role, Role::User);
        assert_eq!(entries[0].text, "Hello");
        assert_eq!(entries[1].role, Role::Assistant);
        assert_eq!(entries[1].text, "Hi");
    }

    #[test]
    fn test_patch_tail_replaces_open_assistant() {
        let mut t = Transcript::new();
        t.append(Role::User, "Hello");
        t.patch_tail("Hi");
        t.patch_tail("Hi there");

        let entries = t.snapshot();
        assert_eq!(entries.len(), 2, "patching must not grow the transcript");
        assert_eq!(entries[1].text, "Hi there");
    }

    #[test]
    fn test_patch_tail_never_mutates_user_entry() {
        let mut t = Transcript::new();
        t.append(Role::User, "Hello");
        t.patch_tail("reply");
        assert_eq!(t.snapshot()[0].text, "Hello");
    }

    #[test]
    fn test_patch_tail_on_empty_transcript_appends() {
        let mut t = Transcript::new();
        t.patch_tail("orphan");

        let entries = t.snapshot();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].role, Role::Assistant);
    }

    #[test]
    fn test_new_user_entry_closes_previous_assistant() {
        let mut t = Transcript::new();
        t.append(Role::User, "first");
        t.patch_tail("answer");
        t.append(Role::User, "second");
        // The next patch must open a fresh assistant entry, not touch "answer"
        t.patch_tail("new answer");

        let entries = t.snapshot();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[1].text, "answer");
        assert_eq!(entries[3].text, "new answer");
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut t = Transcript::new();
        t.append(Role::User, "Hello");

        let mut snap = t.snapshot();
        snap[0].text = "mutated".into();
        snap.clear();

        assert_eq!(t.len(), 1);
        assert_eq!(t.tail().map(|e| e.text.as_str()), Some("Hello"));
    }

    #[test]
    fn test_clear_empties_log() {
        let mut t = Transcript::new();
        t.append(Role::User, "Hello");
        t.patch_tail("Hi");
        t.clear();
        assert!(t.is_empty());
    }
}
