/// ProgressReporter port for user-facing feedback during a run
///
/// Separate from diagnostic `tracing` output: this is what an operator
/// watching the terminal sees while an archive is unpacked and scanned.
pub trait ProgressReporter {
    /// Reports a stage message
    ///
    /// # Arguments
    /// * `message` - The progress message to report
    fn report(&self, message: &str);

    /// Reports position within a counted stage (e.g. log files scanned)
    ///
    /// # Arguments
    /// * `current` - Items processed so far
    /// * `total` - Items expected
    /// * `message` - Optional item label, such as the current file name
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Ends a counted stage started with `report_progress`
    fn finish_progress(&self) {}

    /// Reports a non-fatal problem
    ///
    /// # Arguments
    /// * `message` - The error/warning message
    fn report_error(&self, message: &str);

    /// Reports completion of the run
    ///
    /// # Arguments
    /// * `message` - Completion message
    fn report_completion(&self, message: &str);
}
