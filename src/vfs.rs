use crate::{
    classify::SourceLine,
    parser::Entry,
    template::{resolve, TemplateDescriptor},
};
use std::path::PathBuf;

/// What a [`VirtualEntry`] turns into once applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    /// A file together with its fully rendered contents.
    File { content: String },
}

/// A directory or file staged in memory before anything touches the disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualEntry {
    /// The input line this entry was parsed from, kept for error reporting.
    pub line: SourceLine,
    /// Absolute target path.
    pub destination: PathBuf,
    pub kind: EntryKind,
}
impl VirtualEntry {
    pub fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File { .. })
    }
}

/// The ordered list of operations a run performs. Order is parse order, so a directory is
/// always staged before anything nested beneath it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VirtualFS {
    pub entries: Vec<VirtualEntry>,
}
impl VirtualFS {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn folder_count(&self) -> usize {
        self.entries.iter().filter(|entry| !entry.is_file()).count()
    }

    pub fn file_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_file()).count()
    }
}

/// Stages every parsed entry, rendering file contents through the descriptor.
pub fn build_vfs(entries: Vec<Entry>, descriptor: Option<&TemplateDescriptor>) -> VirtualFS {
    let mut vfs = VirtualFS::new();

    for entry in entries {
        let kind = if entry.is_directory {
            EntryKind::Directory
        } else {
            EntryKind::File {
                content: resolve(descriptor, &entry),
            }
        };

        vfs.entries.push(VirtualEntry {
            line: entry.line,
            destination: entry.path,
            kind,
        });
    }

    vfs
}
