use console::style;
use std::fmt;
use std::path::Path;

/// Error with context and suggestions for the user
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.context {
            Some(context) => write!(f, "{}: {}", self.message, context),
            None => write!(f, "{}", self.message),
        }
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Input file does not exist
pub fn file_not_found(kind: &str, path: &Path, command: &str) -> CliError {
    CliError::new(format!("{} file not found", kind))
        .with_context(format!("Path: {}", path.display()))
        .with_suggestion("Check the file path and try again")
        .with_suggestion("Use an absolute path or a path relative to the current directory")
        .with_help(format!("Run: geostyle {} --help", command))
}

/// Layer options could not be parsed
pub fn invalid_layer_options(path: &Path, reason: impl fmt::Display) -> CliError {
    CliError::new("Invalid layer options")
        .with_context(format!("{}\n\nFile: {}", reason, path.display()))
        .with_suggestion("Layer options are TOML, or JSON when the file ends in .json")
        .with_suggestion("Rules need a [rules.check] table with property, operation and value")
        .with_help("Run: geostyle check <FILE>")
}

/// Styles could not be built, usually an icon symbol or a color
pub fn style_build_failed(reason: impl fmt::Display, asset_dir: &Path) -> CliError {
    CliError::new("Failed to build layer styles")
        .with_context(format!("{}\n\nAsset directory: {}", reason, asset_dir.display()))
        .with_suggestion("Check that icon symbols exist under the asset directory")
        .with_suggestion("Set --asset-dir or GEOSTYLE_ASSET_DIR to point elsewhere")
        .with_suggestion("Colors are hex, rgb()/rgba() or named palette colors")
        .with_help("Run: geostyle check <FILE>")
}
