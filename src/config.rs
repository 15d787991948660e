use crate::{
    errors::{FileOperation, IoError},
    prompt::{self, PromptError},
};
use std::{
    io::Read,
    path::{Path, PathBuf},
};

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum InputError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Prompt(#[from] PromptError),
}

/// Where the structure description is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Opened in `$EDITOR`, pre-filled with a commented starter text.
    Editor,
    Stdin,
    File(PathBuf),
}
impl InputSource {
    /// `-` stands for stdin, anything else is a path; no value opens the editor.
    pub fn from_arg(value: Option<&str>) -> Self {
        match value {
            None => Self::Editor,
            Some("-") => Self::Stdin,
            Some(path) => Self::File(PathBuf::from(path)),
        }
    }

    pub fn read(&self) -> Result<String, InputError> {
        match self {
            Self::Editor => Ok(prompt::edit_structure()?),
            Self::Stdin => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .map_err(|error| IoError::new(FileOperation::Read, PathBuf::from("-"), error))?;
                Ok(text)
            }
            Self::File(path) => Ok(std::fs::read_to_string(path)
                .map_err(|error| IoError::new(FileOperation::Read, path.clone(), error))?),
        }
    }
}

/// Everything `sprout create` was asked to do.
#[derive(Debug, Clone)]
pub struct CreateConfig {
    pub destination: PathBuf,
    pub input: InputSource,
    /// Descriptor to use instead of `template.json` in the destination.
    pub template: Option<PathBuf>,
    /// Skip the confirmation and the follow-up prompt.
    pub assume_yes: bool,
    /// Stop after the preview.
    pub dry_run: bool,
    /// Write the report once the structure exists.
    pub report: bool,
}
impl CreateConfig {
    pub fn new(destination: impl AsRef<Path>) -> Self {
        Self {
            destination: destination.as_ref().to_path_buf(),
            input: InputSource::Editor,
            template: None,
            assume_yes: false,
            dry_run: false,
            report: false,
        }
    }

    /// Prompts are only shown when the user has not answered them up front.
    pub fn is_interactive(&self) -> bool {
        !self.assume_yes
    }
}
