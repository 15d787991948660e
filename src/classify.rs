//! Decides which grammar a structure description is written in and drops the lines that carry
//! no structure (comments and blanks).

/// Connector glyphs that only appear in the tree notation.
pub const BRANCH: &str = "├──";
pub const LAST_BRANCH: &str = "└──";
pub const VERTICAL: char = '│';

/// The two notations a structure can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// `├── name` / `└── name` connectors with `│` verticals.
    Tree,
    /// Nesting expressed purely through leading whitespace.
    Indented,
}

/// A line that survived classification, remembered with its position in the raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based line number in the raw input.
    pub number: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedInput {
    pub grammar: Grammar,
    pub lines: Vec<SourceLine>,
}

fn is_ignored(line: &str) -> bool {
    let trimmed = line.trim();

    trimmed.is_empty() || trimmed.starts_with('#')
}

fn has_tree_glyphs(line: &str) -> bool {
    line.contains(BRANCH) || line.contains(LAST_BRANCH) || line.contains(VERTICAL)
}

pub fn classify(input: &str) -> ClassifiedInput {
    let lines: Vec<SourceLine> = input
        .lines()
        .enumerate()
        .filter(|(_, line)| !is_ignored(line))
        .map(|(index, line)| SourceLine {
            number: index + 1,
            text: line.to_string(),
        })
        .collect();

    let grammar = if lines.iter().any(|line| has_tree_glyphs(&line.text)) {
        Grammar::Tree
    } else {
        Grammar::Indented
    };

    log::debug!("classified {} line(s) as {:?}", lines.len(), grammar);

    ClassifiedInput { grammar, lines }
}
