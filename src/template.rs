use crate::{
    errors::{FileOperation, IoError, ParseError},
    parser::Entry,
    utils::{stem_before_first_dot, to_camel_case, to_pascal_case},
};
use miette::Diagnostic;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the descriptor looked up in the destination root.
pub const TEMPLATE_FILE_NAME: &str = "template.json";

const FILE_NAME_TOKEN: &str = "{{fileName}}";
const PASCAL_CASE_TOKEN: &str = "{{fileNamePascalCase}}";
const CAMEL_CASE_TOKEN: &str = "{{fileNameCamelCase}}";
const BODY_TOKEN: &str = "{{body}}";

#[derive(Debug, Error, Diagnostic)]
pub enum TemplateLoadError {
    #[error("I/O error within template domain")]
    #[diagnostic(code(sprout::template::io))]
    Io(#[from] IoError),

    #[error("Template descriptor could not be parsed")]
    #[diagnostic(code(sprout::template::parse))]
    Parse(#[from] ParseError),
}
impl TemplateLoadError {
    fn is_missing_file(&self) -> bool {
        matches!(self, Self::Io(error) if error.source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// `template.json` as written by users. Every field may be left out.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDescriptor {
    content: Option<String>,
    #[serde(alias = "replace")]
    use_file_name: Option<RawUseFileName>,
    custom_templates: Option<Vec<CustomTemplate>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUseFileName {
    #[serde(alias = "text")]
    find_text: Option<String>,
    #[serde(alias = "with")]
    replace_with: Option<String>,
}

/// A literal substitution applied once to a file name before it is interpolated.
///
/// Both sides default to the empty string, which leaves names untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UseFileName {
    pub find_text: String,
    pub replace_with: String,
}

/// One candidate for the `{{body}}` token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTemplate {
    pub file_name: Option<String>,
    pub body: Option<String>,
    pub request_body: Option<String>,
    pub response_body: Option<String>,
    #[serde(rename = "match")]
    pub match_string: Option<String>,
}
impl CustomTemplate {
    fn matches(&self, entry: &Entry) -> bool {
        let by_file_name = self.file_name.as_deref().is_some_and(|file_name| {
            stem_before_first_dot(file_name) == stem_before_first_dot(&entry.safe_name)
        });

        let by_match_string = match (self.match_string.as_deref(), entry.match_string.as_deref()) {
            (Some(expected), Some(actual)) => {
                expected.trim().to_lowercase() == actual.trim().to_lowercase()
            }
            _ => false,
        };

        by_file_name || by_match_string
    }

    /// Picks the request, response or plain body from the entry's name. A missing variant
    /// renders as nothing; there is no fallback to the other variants.
    fn body_for(&self, safe_name: &str) -> &str {
        let variant = if safe_name.contains("request") {
            &self.request_body
        } else if safe_name.contains("response") {
            &self.response_body
        } else {
            &self.body
        };

        variant.as_deref().unwrap_or_default()
    }
}

/// Declarative description of the content written into every created file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateDescriptor {
    pub content: String,
    pub use_file_name: UseFileName,
    pub custom_templates: Vec<CustomTemplate>,
}

impl From<RawDescriptor> for TemplateDescriptor {
    fn from(raw: RawDescriptor) -> Self {
        let use_file_name = raw
            .use_file_name
            .map(|replace| UseFileName {
                find_text: replace.find_text.unwrap_or_default(),
                replace_with: replace.replace_with.unwrap_or_default(),
            })
            .unwrap_or_default();

        Self {
            content: raw.content.unwrap_or_default(),
            use_file_name,
            custom_templates: raw.custom_templates.unwrap_or_default(),
        }
    }
}

impl TemplateDescriptor {
    pub fn from_json(path: &Path, json: &str) -> Result<Self, TemplateLoadError> {
        let raw: RawDescriptor = serde_json::from_str(json)
            .map_err(|error| ParseError::new(path.to_path_buf(), error))?;

        Ok(raw.into())
    }

    /// Reads and validates a descriptor file.
    pub fn load_from(path: &Path) -> Result<Self, TemplateLoadError> {
        let json = std::fs::read_to_string(path)
            .map_err(|error| IoError::new(FileOperation::Read, path.to_path_buf(), error))?;

        Self::from_json(path, &json)
    }

    /// Reads `template.json` from the destination root.
    pub fn load(root: &Path) -> Result<Self, TemplateLoadError> {
        Self::load_from(&root.join(TEMPLATE_FILE_NAME))
    }

    /// Like [`TemplateDescriptor::load_from`], but a missing or broken descriptor only gets
    /// logged and every file is written empty instead.
    pub fn load_or_none(path: &Path) -> Option<Self> {
        match Self::load_from(path) {
            Ok(descriptor) => {
                log::info!(
                    "using template '{}' with {} custom template(s)",
                    path.display(),
                    descriptor.custom_templates.len()
                );
                Some(descriptor)
            }
            Err(error) if error.is_missing_file() => {
                log::debug!("no template at '{}', files will be empty", path.display());
                None
            }
            Err(error) => {
                log::warn!("ignoring template '{}': {:?}", path.display(), error);
                None
            }
        }
    }

    fn find_custom_template(&self, entry: &Entry) -> Option<&CustomTemplate> {
        self.custom_templates
            .iter()
            .find(|template| template.matches(entry))
    }

    /// Renders the content of the file described by `entry`.
    pub fn render(&self, entry: &Entry) -> String {
        let replaced_name = entry.safe_name.replacen(
            &self.use_file_name.find_text,
            &self.use_file_name.replace_with,
            1,
        );

        let body = self
            .find_custom_template(entry)
            .map(|template| template.body_for(&entry.safe_name))
            .unwrap_or_default();

        let replacements = [
            (FILE_NAME_TOKEN, replaced_name.clone()),
            (PASCAL_CASE_TOKEN, to_pascal_case(&replaced_name)),
            (CAMEL_CASE_TOKEN, to_camel_case(&replaced_name)),
            (BODY_TOKEN, body.to_string()),
        ];

        interpolate(&self.content, &replacements)
    }
}

/// Replaces the first occurrence of each token in `content`.
///
/// Token positions are taken from `content` itself, so text coming from a replacement is never
/// scanned for further tokens. Later occurrences of the same token are left as they are.
fn interpolate(content: &str, replacements: &[(&str, String)]) -> String {
    let mut found: Vec<(usize, &str, &str)> = replacements
        .iter()
        .filter_map(|(token, value)| {
            content
                .find(token)
                .map(|position| (position, *token, value.as_str()))
        })
        .collect();

    found.sort_by_key(|(position, _, _)| *position);

    let mut rendered = String::with_capacity(content.len());
    let mut cursor = 0;

    for (position, token, value) in found {
        rendered.push_str(&content[cursor..position]);
        rendered.push_str(value);
        cursor = position + token.len();
    }

    rendered.push_str(&content[cursor..]);

    rendered
}

/// Content for `entry`, or nothing when there is no descriptor.
pub fn resolve(descriptor: Option<&TemplateDescriptor>, entry: &Entry) -> String {
    descriptor
        .map(|descriptor| descriptor.render(entry))
        .unwrap_or_default()
}

/// Where a run looks for its descriptor: an explicit path, or `template.json` in `root`.
pub fn descriptor_path(root: &Path, explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(|| root.join(TEMPLATE_FILE_NAME), Path::to_path_buf)
}
