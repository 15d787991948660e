use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum FileOperation {
    #[error("reading a file")]
    Read,
    #[error("writing a file")]
    Write,
    #[error("creating a directory")]
    Mkdir,
}
#[derive(Debug, Error, Diagnostic)]
#[error("I/O error: {operation} on path '{path}'")]
#[diagnostic(
    code(sprout::io),
    help("Check file permissions, disk space, or that the path is correct.")
)]
pub struct IoError {
    pub operation: FileOperation,
    pub path: std::path::PathBuf,
    #[source]
    pub source: std::io::Error,
}
impl IoError {
    pub fn new(operation: FileOperation, path: std::path::PathBuf, error: std::io::Error) -> Self {
        Self {
            operation,
            path,
            source: error,
        }
    }
}

/// A descriptor file that is not valid JSON.
#[derive(Debug, Error, Diagnostic)]
#[error("Invalid JSON in '{path}'")]
#[diagnostic(
    code(sprout::parse),
    help("Fix the JSON syntax, or remove the file to write every file empty")
)]
pub struct ParseError {
    pub path: std::path::PathBuf,
    #[source]
    pub source: serde_json::Error,
}
impl ParseError {
    pub fn new(path: std::path::PathBuf, error: serde_json::Error) -> Self {
        Self {
            path,
            source: error,
        }
    }
}
