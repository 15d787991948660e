use crate::errors::{FileOperation, IoError};
use std::path::{Path, PathBuf};

pub const REPORT_FILE_NAME: &str = "folder_structure_report.md";

/// Wraps the structure description, verbatim, in a small Markdown document.
pub fn report_markdown(input: &str) -> String {
    format!("# Folder Structure Report\n\n```\n{}\n```", input)
}

/// Writes the report for `input` into `root` and returns where it was written.
pub fn write_report(root: &Path, input: &str) -> Result<PathBuf, IoError> {
    let path = root.join(REPORT_FILE_NAME);

    std::fs::write(&path, report_markdown(input))
        .map_err(|error| IoError::new(FileOperation::Write, path.clone(), error))?;

    log::debug!("wrote report to '{}'", path.display());

    Ok(path)
}
