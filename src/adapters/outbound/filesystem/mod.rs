/// Filesystem adapters for file I/O operations
mod file_writer;
mod log_file_scanner;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use log_file_scanner::{is_binary, LogFileScanner, ScanOptions};
