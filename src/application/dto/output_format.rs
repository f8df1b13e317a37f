/// Report encoding selected on the command line or in the config file
///
/// Lives in the application layer because the CLI, the config loader and
/// the formatter factory all need to agree on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// camelCase JSON report (default)
    #[default]
    Json,
    /// Human-readable Markdown report
    Markdown,
}

impl OutputFormat {
    /// File name used when no output path is given
    pub fn default_file_name(&self) -> &'static str {
        match self {
            OutputFormat::Json => "metadata.json",
            OutputFormat::Markdown => "metadata.md",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'json' or 'markdown'",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}
