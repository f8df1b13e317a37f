use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::OutputPresenter;
use std::path::{Path, PathBuf};

/// Where the rendered report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterType {
    Stdout,
    File(PathBuf),
}

impl PresenterType {
    /// Resolves the report destination from the command line choices
    ///
    /// `--stdout` wins over everything. Otherwise an explicit output path
    /// is used, falling back to `metadata.json` (or `metadata.md`) in the
    /// directory holding the archive.
    pub fn resolve(
        stdout: bool,
        output: Option<PathBuf>,
        archive_path: &Path,
        format: OutputFormat,
    ) -> Self {
        if stdout {
            return PresenterType::Stdout;
        }
        match output {
            Some(path) => PresenterType::File(path),
            None => {
                let dir = archive_path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or_else(|| Path::new("."));
                PresenterType::File(dir.join(format.default_file_name()))
            }
        }
    }
}

/// Factory for creating output presenters
pub struct PresenterFactory;

impl PresenterFactory {
    /// Creates a presenter instance for the specified type
    ///
    /// # Examples
    /// ```
    /// use qkview_analyzer::application::factories::{PresenterFactory, PresenterType};
    ///
    /// let presenter = PresenterFactory::create(PresenterType::Stdout);
    /// ```
    pub fn create(presenter_type: PresenterType) -> Box<dyn OutputPresenter> {
        match presenter_type {
            PresenterType::Stdout => Box::new(StdoutPresenter::new()),
            PresenterType::File(path) => Box::new(FileSystemWriter::new(path)),
        }
    }
}
