use crate::{
    classify::classify,
    config::{CreateConfig, InputError, InputSource},
    errors::IoError,
    materialize::{apply_vfs, DiskFileSystem, FileSystem, RunResult},
    parser::{self, StructureError},
    preview::preview_as_tree,
    prompt::{self, NextAction, PromptError},
    report,
    template::{descriptor_path, TemplateDescriptor},
    vfs::{build_vfs, VirtualFS},
};
use colored::Colorize;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum SproutError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Structure(#[from] StructureError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Prompt(#[from] PromptError),
}

/// Parses `input` and stages everything a run rooted at `root` would create, without touching
/// the disk.
///
/// The template descriptor is read from `template`, or from `template.json` inside `root` when
/// no path is given. A missing or unreadable descriptor is logged and every file is staged
/// empty.
///
/// # Errors
///
/// Returns a [`SproutError`] if a line does not name a file or folder.
pub fn plan_structure(
    root: &Path,
    input: &str,
    template: Option<&Path>,
) -> Result<VirtualFS, SproutError> {
    let classified = classify(input);

    let descriptor = TemplateDescriptor::load_or_none(&descriptor_path(root, template));

    let entries = parser::parse(root, &classified)?;

    Ok(build_vfs(entries, descriptor.as_ref()))
}

/// Applies a staged structure through `fs`.
///
/// # Errors
///
/// Returns a [`SproutError`] for the first operation that fails; earlier operations are kept.
pub fn apply_structure<F: FileSystem>(
    vfs: &VirtualFS,
    fs: &mut F,
) -> Result<RunResult, SproutError> {
    Ok(apply_vfs(vfs, fs)?)
}

/// Creates the directories and files described by `input` under `root`.
///
/// # Errors
///
/// Returns a [`SproutError`] if:
///
/// - A line does not name a file or folder.
/// - A directory or file cannot be created or written to. Entries created before the failing
///   line stay on disk.
pub fn create_folder_structure(root: &Path, input: &str) -> Result<RunResult, SproutError> {
    let vfs = plan_structure(root, input, None)?;

    log::debug!(
        "applying {} operation(s) under '{}'",
        vfs.entries.len(),
        root.display()
    );

    apply_structure(&vfs, &mut DiskFileSystem::quiet())
}

/// Writes `folder_structure_report.md` with the verbatim `input` into `root`.
///
/// # Errors
///
/// Returns a [`SproutError`] if the report cannot be written.
pub fn render_report(root: &Path, input: &str) -> Result<PathBuf, SproutError> {
    Ok(report::write_report(root, input)?)
}

/// Runs `sprout create`: reads the description, previews it, asks for confirmation, creates it
/// and optionally writes the report.
///
/// Returns `None` when nothing was created (a dry run or a declined confirmation).
///
/// # Errors
///
/// Returns a [`SproutError`] if:
///
/// - The description cannot be read or the editor session fails.
/// - A line does not name a file or folder.
/// - A directory or file cannot be created or written to.
/// - A prompt fails or is canceled.
pub fn run_create(config: &CreateConfig) -> Result<Option<RunResult>, SproutError> {
    let input = config.input.read()?;

    let vfs = plan_structure(&config.destination, &input, config.template.as_deref())?;

    preview_as_tree(&vfs, &config.destination);

    if config.dry_run {
        println!(
            "Dry run: {} folders and {} files would be created.",
            vfs.folder_count(),
            vfs.file_count()
        );
        return Ok(None);
    }

    if config.is_interactive() && !prompt::apply_changes()? {
        println!("{}", "Nothing was created.".yellow());
        return Ok(None);
    }

    // the destination itself is not an entry and is not counted
    DiskFileSystem::quiet().create_dir_all(&config.destination)?;

    let result = apply_structure(&vfs, &mut DiskFileSystem::new())?;

    println!(
        "{}\n{} folders and {} files were created.",
        "Folder structure created successfully!".green().bold(),
        result.folder_count,
        result.file_count
    );

    let wants_report = config.report
        || (config.is_interactive() && prompt::next_action()? == NextAction::GenerateReport);

    if wants_report {
        let path = render_report(&config.destination, &input)?;
        println!("{} {}", "report".green(), path.display());
    }

    Ok(Some(result))
}

/// Runs `sprout report` for an already described structure.
///
/// # Errors
///
/// Returns a [`SproutError`] if the description cannot be read or the report cannot be written.
pub fn run_report(destination: &Path, input: &InputSource) -> Result<PathBuf, SproutError> {
    let text = input.read()?;

    render_report(destination, &text)
}
