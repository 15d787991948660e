use crate::vfs::VirtualFS;
use colored::Colorize;
use std::collections::HashMap;
use std::path::Path;

/// Represents a node in the preview tree (either file or directory).
#[derive(Debug)]
struct TreeNode {
    name: String,
    children: Vec<usize>,
    is_file: bool,
}
impl TreeNode {
    fn new(name: String, is_file: bool) -> Self {
        Self {
            name,
            children: Vec::new(),
            is_file,
        }
    }
}

/// Nodes live in an arena; index 0 is the destination directory itself.
#[derive(Debug)]
struct Tree {
    nodes: Vec<TreeNode>,
}

const ROOT: usize = 0;

/// Links every staged entry under its parent. Entries are in parse order, so a parent is
/// always known before its children.
fn build_tree(vfs: &VirtualFS, destination: &Path) -> Tree {
    let root_name = destination
        .file_name()
        .map(|os| os.to_string_lossy().to_string())
        .unwrap_or_else(|| destination.display().to_string());

    let mut tree = Tree {
        nodes: vec![TreeNode::new(root_name, false)],
    };

    let mut lookup: HashMap<&Path, usize> = HashMap::new();
    lookup.insert(destination, ROOT);

    for entry in &vfs.entries {
        let Some(parent_path) = entry.destination.parent() else {
            continue;
        };

        let Some(&parent) = lookup.get(parent_path) else {
            // e.g. `a/b.ts` written as a single name: its parent was never staged
            log::debug!(
                "parent: {}, not found for path: {}",
                parent_path.display(),
                entry.destination.display()
            );
            continue;
        };

        let child_name = entry
            .destination
            .file_name()
            .map(|os| os.to_string_lossy().to_string())
            .unwrap_or_else(|| entry.destination.display().to_string());

        let index = tree.nodes.len();
        tree.nodes.push(TreeNode::new(child_name, entry.is_file()));
        tree.nodes[parent].children.push(index);

        lookup.insert(entry.destination.as_path(), index);
    }

    tree
}

/// Renders the tree with the same connectors the tree notation uses.
fn render_tree(tree: &Tree, index: usize, prefix: &str, is_last: bool, out: &mut Vec<String>) {
    let node = &tree.nodes[index];

    let connector = if is_last { "└── " } else { "├── " };
    let name = if node.is_file {
        node.name.green()
    } else {
        node.name.blue()
    };
    out.push(format!("{}{}{}", prefix.yellow(), connector.yellow(), name));

    let child_prefix = if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    };

    let len = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        render_tree(tree, *child, &child_prefix, i == len - 1, out);
    }
}

/// The preview as plain lines, one per node, starting with the destination.
pub fn tree_lines(vfs: &VirtualFS, destination: &Path) -> Vec<String> {
    let tree = build_tree(vfs, destination);
    let mut out = Vec::with_capacity(tree.nodes.len());

    render_tree(&tree, ROOT, "", true, &mut out);

    out
}

pub fn preview_as_tree(vfs: &VirtualFS, destination: &Path) {
    println!(
        "Legend: {} = (directory), {} = (file)",
        "blue".blue(),
        "green".green()
    );

    let fancy_prompt = format!(
        "{} {}\n",
        "┌─".bold().bright_blue(),
        "Preview".bold().bright_blue(),
    );

    println!("{}", fancy_prompt);

    for line in tree_lines(vfs, destination) {
        println!("{}", line);
    }

    println!(
        "\n{} {} folder(s), {} file(s)\n",
        "└─".bold().bright_blue(),
        vfs.folder_count(),
        vfs.file_count()
    );
}
