//! File attachment state for the chat frontend
//!
//! The picker collects a document for a future upload surface; it is display
//! state only and is never folded into the chat request payload.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Why a file could not be attached
#[derive(Error, Debug)]
pub enum AttachError {
    /// Only .pdf documents pass the type filter
    #[error("only .pdf files can be attached")]
    NotPdf,

    /// The path could not be read
    #[error("cannot read file: {0}")]
    Unreadable(#[from] std::io::Error),
}

/// A locally selected document: display name, byte size, and path
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub size_bytes: u64,
    pub path: PathBuf,
}

impl SelectedFile {
    /// Size formatted the way the picker displays it
    pub fn size_display(&self) -> String {
        format!("{:.1} MB", self.size_bytes as f64 / 1024.0 / 1024.0)
    }
}

/// Holds at most one selected file, replaced on each new selection
#[derive(Debug, Default)]
pub struct FilePicker {
    selected: Option<SelectedFile>,
}

impl FilePicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a file, replacing any previous selection.
    ///
    /// The only validation is the type filter; the content is never parsed.
    pub fn select(&mut self, path: &Path) -> Result<&SelectedFile, AttachError> {
        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if !is_pdf {
            return Err(AttachError::NotPdf);
        }

        let size_bytes = fs::metadata(path)?.len();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(self.selected.insert(SelectedFile {
            name,
            size_bytes,
            path: path.to_path_buf(),
        }))
    }

    /// Discard the current selection, if any
    pub fn remove(&mut self) -> Option<SelectedFile> {
        self.selected.take()
    }

    /// The current selection
    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }
}
