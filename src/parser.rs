use crate::{
    classify::{ClassifiedInput, Grammar, SourceLine, VERTICAL},
    errors::IoError,
};
use miette::Diagnostic;
use regex::Regex;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum StructureError {
    #[error("line {line} does not name a file or folder: '{text}'")]
    #[diagnostic(
        code(sprout::structure::empty_name),
        help("Every line needs a name after its indentation or tree connector")
    )]
    EmptyName { line: usize, text: String },

    #[error("failed to create the entry on line {line}: '{text}'")]
    #[diagnostic(
        code(sprout::structure::filesystem),
        help("Entries listed before this line were created and left in place")
    )]
    Filesystem {
        line: usize,
        text: String,
        #[source]
        #[diagnostic_source]
        source: IoError,
    },
}
impl StructureError {
    pub fn filesystem(line: &SourceLine, source: IoError) -> Self {
        Self::Filesystem {
            line: line.number,
            text: line.text.clone(),
            source,
        }
    }
}

/// Separates the on-disk name from the optional extra and match segments:
/// `name\extra\match`.
const ESCAPE_DELIMITER: char = '\\';

/// The name as a path relative to its parent. Roots, prefixes, `.` and `..` are dropped so an
/// entry always lands inside its parent directory.
fn relative_name(safe_name: &str) -> PathBuf {
    Path::new(safe_name)
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}

/// One line of input resolved to a file or directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub line: SourceLine,
    pub raw_name: String,
    pub safe_name: String,
    pub match_string: Option<String>,
    pub depth: usize,
    pub is_directory: bool,
    pub path: PathBuf,
}

/// A directory that later entries may be nested under. The root frame has no depth and is
/// never popped.
#[derive(Debug, Clone)]
struct ParseStackFrame {
    path: PathBuf,
    depth: Option<usize>,
}

/// Extracts the nesting depth and the name from one line of a particular notation.
pub trait LineGrammar {
    /// Returns `None` when the line carries no entry at all.
    fn extract<'a>(&self, line: &'a str) -> Option<(usize, &'a str)>;
}

pub struct TreeGrammar;

pub struct IndentedGrammar;

lazy_static::lazy_static! {
    static ref CONNECTOR_PREFIX: Regex =
        Regex::new(r"^[│\s]*[└├]──\s*").expect("a valid regex pattern");
}

impl LineGrammar for TreeGrammar {
    fn extract<'a>(&self, line: &'a str) -> Option<(usize, &'a str)> {
        // lines made of verticals only are spacers between branches
        let (column, first) = line
            .chars()
            .enumerate()
            .find(|(_, c)| !c.is_whitespace() && *c != VERTICAL)?;

        // a connector sits one level below a bare name written at the same column
        let depth = match first {
            '├' | '└' => column + 1,
            _ => column,
        };

        let name = match CONNECTOR_PREFIX.find(line) {
            Some(prefix) => &line[prefix.end()..],
            None => line,
        };

        Some((depth, name.trim()))
    }
}

impl LineGrammar for IndentedGrammar {
    fn extract<'a>(&self, line: &'a str) -> Option<(usize, &'a str)> {
        let name = line.trim_start();
        let depth = line[..line.len() - name.len()].chars().count();

        Some((depth, name.trim_end()))
    }
}

/// Parses classified input into entries rooted at `root`, dispatching on the detected grammar.
///
/// # Errors
///
/// Returns [`StructureError::EmptyName`] for the first line whose name resolves to nothing.
pub fn parse(root: &Path, input: &ClassifiedInput) -> Result<Vec<Entry>, StructureError> {
    match input.grammar {
        Grammar::Tree => parse_with(&TreeGrammar, root, &input.lines),
        Grammar::Indented => parse_with(&IndentedGrammar, root, &input.lines),
    }
}

/// Walks `lines` with a stack of open directories.
///
/// Before placing an entry, every frame at the same depth or deeper is closed, so an entry at
/// the depth of an open directory becomes its sibling rather than its child.
pub fn parse_with<G: LineGrammar>(
    grammar: &G,
    root: &Path,
    lines: &[SourceLine],
) -> Result<Vec<Entry>, StructureError> {
    let mut stack = vec![ParseStackFrame {
        path: root.to_path_buf(),
        depth: None,
    }];
    let mut entries = Vec::with_capacity(lines.len());

    for line in lines {
        let Some((depth, name)) = grammar.extract(&line.text) else {
            log::debug!("line {} carries no entry, skipping", line.number);
            continue;
        };

        let raw_name = name.strip_suffix('/').unwrap_or(name).to_string();

        let mut segments = raw_name.split(ESCAPE_DELIMITER);
        let safe_name = segments.next().unwrap_or_default().trim().to_string();
        let match_string = segments.nth(1).map(|segment| segment.trim().to_string());

        let relative = relative_name(&safe_name);

        if relative.as_os_str().is_empty() {
            return Err(StructureError::EmptyName {
                line: line.number,
                text: line.text.clone(),
            });
        }

        while stack.len() > 1 && stack.last().is_some_and(|top| top.depth >= Some(depth)) {
            stack.pop();
        }

        let path = stack
            .last()
            .map_or_else(|| root.join(&relative), |top| top.path.join(&relative));

        let is_directory = !safe_name.contains('.');

        log::debug!(
            "line {}: depth {} {} '{}'",
            line.number,
            depth,
            if is_directory { "dir" } else { "file" },
            path.display()
        );

        if is_directory {
            stack.push(ParseStackFrame {
                path: path.clone(),
                depth: Some(depth),
            });
        }

        entries.push(Entry {
            line: line.clone(),
            raw_name,
            safe_name,
            match_string,
            depth,
            is_directory,
            path,
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{classify::classify, errors::FileOperation};

    fn relative(entries: &[Entry]) -> Vec<(String, bool)> {
        entries
            .iter()
            .map(|entry| {
                let rel = entry.path.strip_prefix("/root").expect("entry under root");
                (rel.to_string_lossy().replace('\\', "/"), entry.is_directory)
            })
            .collect()
    }

    fn parse_str(input: &str) -> Vec<Entry> {
        parse(Path::new("/root"), &classify(input)).expect("input parses")
    }

    #[test]
    fn test_indented_nesting() {
        let entries =
            parse_str("src\n    app\n        page.tsx\n    components\n        Form.tsx\n");

        assert_eq!(
            relative(&entries),
            vec![
                ("src".to_string(), true),
                ("src/app".to_string(), true),
                ("src/app/page.tsx".to_string(), false),
                ("src/components".to_string(), true),
                ("src/components/Form.tsx".to_string(), false),
            ]
        );
    }

    #[test]
    fn test_tree_matches_indented() {
        let tree = parse_str("src\n├── app\n│   └── page.tsx\n└── components\n    └── Form.tsx\n");
        let indented =
            parse_str("src/\n    app/\n        page.tsx\n    components/\n        Form.tsx\n");

        assert_eq!(relative(&tree), relative(&indented));
    }

    #[test]
    fn test_tree_siblings_share_depth() {
        let entries = parse_str("src\n├── app\n│   ├── layout.tsx\n│   └── page.tsx\n└── lib\n");

        assert_eq!(entries[1].depth, entries[4].depth);
        assert_eq!(entries[2].depth, entries[3].depth);
        assert!(entries[0].depth < entries[1].depth);
        assert!(entries[1].depth < entries[2].depth);
    }

    #[test]
    fn test_tree_without_root_line() {
        let entries = parse_str("├── app\n│   └── page.tsx\n└── README.md\n");

        assert_eq!(
            relative(&entries),
            vec![
                ("app".to_string(), true),
                ("app/page.tsx".to_string(), false),
                ("README.md".to_string(), false),
            ]
        );
    }

    #[test]
    fn test_equal_depth_is_a_sibling_not_a_child() {
        let entries = parse_str("a\nb\n  c\n  d\n");

        assert_eq!(
            relative(&entries),
            vec![
                ("a".to_string(), true),
                ("b".to_string(), true),
                ("b/c".to_string(), true),
                ("b/d".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_dedent_to_root_closes_all_frames() {
        let entries = parse_str("src\n├── app\n│   └── nested\n│       └── deep.ts\nREADME.md\n");

        let last = entries.last().expect("at least one entry");
        assert_eq!(last.path, PathBuf::from("/root/README.md"));

        let indented = parse_str("a\n  b\n    c\nd\n");
        assert_eq!(indented[3].path, PathBuf::from("/root/d"));
    }

    #[test]
    fn test_dedent_to_middle_level() {
        let entries = parse_str("a\n  b\n    c\n      x.ts\n    d\n  e\n");

        assert_eq!(
            relative(&entries),
            vec![
                ("a".to_string(), true),
                ("a/b".to_string(), true),
                ("a/b/c".to_string(), true),
                ("a/b/c/x.ts".to_string(), false),
                ("a/b/d".to_string(), true),
                ("a/e".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_files_do_not_open_a_frame() {
        let entries = parse_str("index.ts\n    orphan.ts\n");

        assert_eq!(entries[1].path, PathBuf::from("/root/orphan.ts"));
    }

    #[test]
    fn test_escape_suffix_is_split_off() {
        let entries = parse_str("api\n    file-name.ts\\extra\\/api/v1/azure\n");
        let file = &entries[1];

        assert_eq!(file.safe_name, "file-name.ts");
        assert_eq!(file.match_string.as_deref(), Some("/api/v1/azure"));
        assert_eq!(file.path, PathBuf::from("/root/api/file-name.ts"));
        assert!(!file.is_directory);
    }

    #[test]
    fn test_escape_without_match_segment() {
        let entries = parse_str("file.ts\\only-extra\n");

        assert_eq!(entries[0].safe_name, "file.ts");
        assert_eq!(entries[0].match_string, None);
    }

    #[test]
    fn test_trailing_slash_is_stripped_in_both_grammars() {
        let tree = parse_str("src/\n└── app/\n");

        assert_eq!(tree[1].raw_name, "app");
        assert_eq!(tree[1].path, PathBuf::from("/root/src/app"));
    }

    #[test]
    fn test_dotted_directory_is_classified_as_file() {
        let entries = parse_str(".config\n");

        assert!(!entries[0].is_directory);
    }

    #[test]
    fn test_vertical_spacer_lines_are_skipped() {
        let entries = parse_str("src\n├── a\n│\n└── b\n");

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2].path, PathBuf::from("/root/src/b"));
    }

    #[test]
    fn test_empty_name_is_rejected_with_line_number() {
        let result = parse(Path::new("/root"), &classify("src\n├── \\x\\y\n"));

        match result {
            Err(StructureError::EmptyName { line, text }) => {
                assert_eq!(line, 2);
                assert_eq!(text, "├── \\x\\y");
            }
            other => panic!("expected an empty name error, got {:?}", other),
        }
    }

    #[test]
    fn test_absolute_names_stay_inside_their_parent() {
        let entries = parse_str("src\n    /lib\n        //deep/mod.rs\n");

        assert_eq!(entries[1].path, PathBuf::from("/root/src/lib"));
        assert_eq!(entries[2].path, PathBuf::from("/root/src/lib/deep/mod.rs"));

        let top = parse_str("/src\n");
        assert_eq!(top[0].path, PathBuf::from("/root/src"));
    }

    #[test]
    fn test_parent_components_are_dropped() {
        let entries = parse_str("src\n    ../../etc/passwd.txt\n");

        assert_eq!(entries[1].path, PathBuf::from("/root/src/etc/passwd.txt"));
    }

    #[test]
    fn test_name_of_only_separators_or_dots_is_rejected() {
        let result = parse(Path::new("/root"), &classify("src\n    ..\n"));

        assert!(matches!(result, Err(StructureError::EmptyName { line: 2, .. })));
    }

    #[test]
    fn test_filesystem_error_forwards_io_diagnostic() {
        let line = SourceLine {
            number: 4,
            text: "    app".to_string(),
        };
        let error = StructureError::filesystem(
            &line,
            IoError::new(
                FileOperation::Mkdir,
                PathBuf::from("/root/app"),
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            ),
        );

        let inner = error
            .diagnostic_source()
            .expect("the I/O diagnostic is forwarded");

        assert_eq!(
            inner.help().map(|help| help.to_string()).as_deref(),
            Some("Check file permissions, disk space, or that the path is correct.")
        );
    }

    #[test]
    fn test_bare_connector_is_rejected() {
        let result = parse(Path::new("/root"), &classify("src\n└──\n"));

        assert!(matches!(result, Err(StructureError::EmptyName { line: 2, .. })));
    }
}
