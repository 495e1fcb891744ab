use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

/// User-facing messages on stdout/stderr, coloured in human mode and one
/// JSON object per message otherwise
pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => println!("{} {}", "✓".green(), msg.as_ref().green()),
            OutputFormat::Json | OutputFormat::JsonPretty => self.message("success", msg.as_ref()),
        }
    }

    /// Always shown, even in quiet mode
    pub fn error(&self, msg: impl AsRef<str>) {
        match self.format {
            OutputFormat::Human => eprintln!("{} {}", "✗".red(), msg.as_ref().red()),
            OutputFormat::Json | OutputFormat::JsonPretty => self.message("error", msg.as_ref()),
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => println!("{} {}", "⚠".yellow(), msg.as_ref().yellow()),
            OutputFormat::Json | OutputFormat::JsonPretty => self.message("warning", msg.as_ref()),
        }
    }

    /// A line of report output; printed in white, never suppressed
    pub fn table_line(&self, line: impl AsRef<str>) {
        println!("{}", line.as_ref().white());
    }

    pub fn json(&self, data: &serde_json::Value) {
        self.print_json(data);
    }

    fn message(&self, kind: &str, msg: &str) {
        let json = json!({
            "type": kind,
            "message": msg
        });
        self.print_json(&json);
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(data).unwrap_or_default());
            }
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
            OutputFormat::Human => {
                println!("{}", data);
            }
        }
    }
}
