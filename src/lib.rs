//! Turns a drawn (`├──` / `└──`) or indented description of a folder tree into real
//! directories and files, optionally filling each file from a `template.json` descriptor.
//!
//! ```no_run
//! let result = sprout::create_folder_structure(
//!     std::path::Path::new("/tmp/project"),
//!     "src\n├── app\n│   └── page.tsx\n└── components\n    └── Form.tsx\n",
//! )?;
//!
//! assert_eq!((result.folder_count, result.file_count), (3, 2));
//! # Ok::<(), sprout::SproutError>(())
//! ```
pub mod api;
pub mod classify;
pub mod config;
pub mod errors;
pub mod materialize;
pub mod parser;
pub mod preview;
pub mod prompt;
pub mod report;
pub mod template;
pub mod utils;
pub mod vfs;

pub use api::{
    apply_structure, create_folder_structure, plan_structure, render_report, run_create,
    run_report, SproutError,
};
pub use classify::{classify, ClassifiedInput, Grammar, SourceLine};
pub use materialize::{DiskFileSystem, FileSystem, RunResult};
pub use parser::{Entry, StructureError};
pub use template::{TemplateDescriptor, TemplateLoadError};
pub use vfs::VirtualFS;
