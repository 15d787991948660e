use crate::{
    errors::{FileOperation, IoError},
    parser::StructureError,
    vfs::{EntryKind, VirtualFS},
};
use colored::Colorize;
use std::path::Path;

/// The two side effects a run needs from the filesystem.
pub trait FileSystem {
    /// Creates `path` and any missing ancestors. An existing directory is not an error.
    fn create_dir_all(&mut self, path: &Path) -> Result<(), IoError>;

    /// Writes `contents` to `path`, replacing whatever is there.
    fn write_file(&mut self, path: &Path, contents: &str) -> Result<(), IoError>;
}

/// [`FileSystem`] backed by [`std::fs`], echoing every operation to stdout.
#[derive(Debug, Default)]
pub struct DiskFileSystem {
    quiet: bool,
}
impl DiskFileSystem {
    pub fn new() -> Self {
        Self { quiet: false }
    }

    /// A disk filesystem that does not print anything.
    pub fn quiet() -> Self {
        Self { quiet: true }
    }

    fn echo(&self, action: &str, path: &Path) {
        if !self.quiet {
            println!("{} {}", action.green(), path.display());
        }
    }
}

impl FileSystem for DiskFileSystem {
    fn create_dir_all(&mut self, path: &Path) -> Result<(), IoError> {
        std::fs::create_dir_all(path)
            .map_err(|error| IoError::new(FileOperation::Mkdir, path.to_path_buf(), error))?;

        self.echo("mkdir ", path);

        Ok(())
    }

    fn write_file(&mut self, path: &Path, contents: &str) -> Result<(), IoError> {
        std::fs::write(path, contents)
            .map_err(|error| IoError::new(FileOperation::Write, path.to_path_buf(), error))?;

        self.echo("create", path);

        Ok(())
    }
}

/// What a completed run created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunResult {
    pub folder_count: usize,
    pub file_count: usize,
}

/// Applies the staged operations in order.
///
/// Nothing is rolled back: when an operation fails, everything created before it stays on
/// disk and the remaining operations are not attempted.
///
/// # Errors
///
/// Returns [`StructureError::Filesystem`] naming the input line whose operation failed.
pub fn apply_vfs<F: FileSystem>(vfs: &VirtualFS, fs: &mut F) -> Result<RunResult, StructureError> {
    let mut result = RunResult::default();

    for entry in &vfs.entries {
        match &entry.kind {
            EntryKind::Directory => {
                fs.create_dir_all(&entry.destination)
                    .map_err(|error| StructureError::filesystem(&entry.line, error))?;

                result.folder_count += 1;
            }
            EntryKind::File { content } => {
                fs.write_file(&entry.destination, content)
                    .map_err(|error| StructureError::filesystem(&entry.line, error))?;

                result.file_count += 1;
            }
        }
    }

    log::info!(
        "created {} folder(s) and {} file(s)",
        result.folder_count,
        result.file_count
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{classify::classify, parser::parse, vfs::build_vfs};
    use std::path::PathBuf;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Mkdir(PathBuf),
        Write(PathBuf, String),
    }

    /// Records calls and fails the call with the given index.
    #[derive(Default)]
    struct RecordingFs {
        calls: Vec<Call>,
        fail_at: Option<usize>,
    }
    impl RecordingFs {
        fn check(&self, operation: FileOperation, path: &Path) -> Result<(), IoError> {
            if self.fail_at == Some(self.calls.len()) {
                return Err(IoError::new(
                    operation,
                    path.to_path_buf(),
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                ));
            }
            Ok(())
        }
    }
    impl FileSystem for RecordingFs {
        fn create_dir_all(&mut self, path: &Path) -> Result<(), IoError> {
            self.check(FileOperation::Mkdir, path)?;
            self.calls.push(Call::Mkdir(path.to_path_buf()));
            Ok(())
        }

        fn write_file(&mut self, path: &Path, contents: &str) -> Result<(), IoError> {
            self.check(FileOperation::Write, path)?;
            self.calls
                .push(Call::Write(path.to_path_buf(), contents.to_string()));
            Ok(())
        }
    }

    fn staged(input: &str) -> VirtualFS {
        build_vfs(
            parse(Path::new("/root"), &classify(input)).expect("input parses"),
            None,
        )
    }

    #[test]
    fn test_operations_run_in_parse_order() {
        let mut fs = RecordingFs::default();
        let result = apply_vfs(&staged("src\n├── app\n│   └── page.tsx\n└── lib\n"), &mut fs)
            .expect("run succeeds");

        assert_eq!(
            result,
            RunResult {
                folder_count: 3,
                file_count: 1
            }
        );
        assert_eq!(
            fs.calls,
            vec![
                Call::Mkdir(PathBuf::from("/root/src")),
                Call::Mkdir(PathBuf::from("/root/src/app")),
                Call::Write(PathBuf::from("/root/src/app/page.tsx"), String::new()),
                Call::Mkdir(PathBuf::from("/root/src/lib")),
            ]
        );
    }

    #[test]
    fn test_first_failure_stops_the_run() {
        let mut fs = RecordingFs {
            fail_at: Some(2),
            ..RecordingFs::default()
        };
        let result = apply_vfs(&staged("src\n    app\n        page.tsx\n    lib\n"), &mut fs);

        match result {
            Err(StructureError::Filesystem { line, text, source }) => {
                assert_eq!(line, 3);
                assert_eq!(text, "        page.tsx");
                assert_eq!(source.path, PathBuf::from("/root/src/app/page.tsx"));
            }
            other => panic!("expected a filesystem error, got {:?}", other),
        }

        // earlier operations are kept, later ones never attempted
        assert_eq!(fs.calls.len(), 2);
    }

    #[test]
    fn test_disk_filesystem_overwrites_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("a.txt");
        let mut fs = DiskFileSystem::quiet();

        fs.write_file(&path, "first").expect("write");
        fs.write_file(&path, "second").expect("overwrite");
        fs.create_dir_all(dir.path()).expect("existing dir is fine");

        assert_eq!(std::fs::read_to_string(&path).expect("read"), "second");
    }

    #[test]
    fn test_disk_filesystem_reports_missing_parent() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut fs = DiskFileSystem::quiet();

        let error = fs
            .write_file(&dir.path().join("missing/a.txt"), "")
            .expect_err("parent does not exist");

        assert!(matches!(error.operation, FileOperation::Write));
    }
}
