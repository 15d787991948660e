use inquire::{Confirm, Editor, InquireError, Select};
use miette::Diagnostic;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum PromptError {
    #[error("Prompt was canceled")]
    #[diagnostic(code(sprout::prompt::canceled))]
    Canceled,

    #[error("Unable to prompt for input")]
    #[diagnostic(
        code(sprout::prompt::inquire),
        help("Run from an interactive terminal, or pass --input and --yes")
    )]
    Inquire(#[source] InquireError),
}
impl From<InquireError> for PromptError {
    fn from(error: InquireError) -> Self {
        match error {
            InquireError::OperationCanceled | InquireError::OperationInterrupted => Self::Canceled,
            other => Self::Inquire(other),
        }
    }
}

/// Text the editor opens with. Every line is a comment, so it can be left in place.
pub const STARTER_TEXT: &str = "\
# Describe the folder structure to create below this header.
# Lines starting with # and blank lines are ignored.
#
# Tree notation:
# src
# ├── app
# │   ├── layout.tsx
# │   └── page.tsx
# └── components
#     └── ExpenseForm.tsx
#
# Indented notation (a trailing / on folders is optional):
# src/
#     app/
#         layout.tsx
#         page.tsx
#     components/
#         ExpenseForm.tsx
#
# Names containing a dot become files, everything else becomes a folder.
# Add a match string for template lookup with `name.ts\\extra\\match-string`.
#
# File contents come from template.json in the destination folder, if present:
#   content          text written to every file
#   useFileName      { findText, replaceWith } applied once to the name
#   customTemplates  [{ fileName, body, requestBody, responseBody, match }]
# Tokens in content: {{fileName}} {{fileNamePascalCase}} {{fileNameCamelCase}} {{body}}

";

/// Opens `$EDITOR` with [`STARTER_TEXT`] and returns whatever was saved.
pub fn edit_structure() -> Result<String, PromptError> {
    let text = Editor::new("Folder structure:")
        .with_predefined_text(STARTER_TEXT)
        .with_file_extension(".txt")
        .with_help_message("Save and close the editor to continue")
        .prompt()?;

    Ok(text)
}

/// Asks whether the previewed structure should be created.
pub fn apply_changes() -> Result<bool, PromptError> {
    let answer = Confirm::new("Create this structure?")
        .with_default(true)
        .prompt()?;

    Ok(answer)
}

/// What to do once the structure exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    GenerateReport,
    Done,
}
impl fmt::Display for NextAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GenerateReport => write!(f, "Generate report"),
            Self::Done => write!(f, "Done"),
        }
    }
}

pub fn next_action() -> Result<NextAction, PromptError> {
    let choices = vec![NextAction::GenerateReport, NextAction::Done];

    let answer = Select::new("What next?", choices).prompt()?;

    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;

    #[test]
    fn test_starter_text_describes_nothing() {
        assert!(classify(STARTER_TEXT).lines.is_empty());
    }

    #[test]
    fn test_cancel_is_not_an_inquire_failure() {
        assert!(matches!(
            PromptError::from(InquireError::OperationCanceled),
            PromptError::Canceled
        ));
        assert!(matches!(
            PromptError::from(InquireError::NotTTY),
            PromptError::Inquire(_)
        ));
    }
}
