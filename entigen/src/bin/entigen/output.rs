use anyhow::Result;
use clap::ValueEnum;
use comfy_table::{Attribute, Cell, Color as TableColor, Table};
use serde::Serialize;
use std::io::Write;

use crate::theme::{BULLET, Tone};

/// Output format options for CLI commands
#[derive(Clone, Debug, ValueEnum, Default, PartialEq)]
pub enum OutputFormat {
    /// Formatted table output (default)
    #[default]
    Table,
    /// JSON output for scripting
    Json,
    /// Compact single-line output
    Compact,
}

/// Global CLI options that affect output and behavior
#[derive(Clone, Debug, Default)]
pub struct GlobalOptions {
    pub output_format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    pub no_color: bool,
}

/// Data that can be displayed as a table
pub trait TableDisplay {
    fn to_table(&self, options: &GlobalOptions) -> Table;
    fn to_compact(&self) -> String;
}

/// Output manager handles formatting and display
pub struct OutputManager {
    pub options: GlobalOptions,
}

impl OutputManager {
    pub fn new(options: GlobalOptions) -> Self {
        Self { options }
    }

    pub fn is_json(&self) -> bool {
        self.options.output_format == OutputFormat::Json
    }

    /// Display data according to the configured output format
    pub fn display<T>(&self, data: &T) -> Result<()>
    where
        T: Serialize + TableDisplay,
    {
        if self.options.quiet {
            return Ok(());
        }

        match self.options.output_format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(data)?;
                println!("{json}");
            }
            OutputFormat::Table => {
                let table = data.to_table(&self.options);
                println!("{table}");
            }
            OutputFormat::Compact => {
                println!("{}", data.to_compact());
            }
        }
        Ok(())
    }

    pub fn success(&self, message: &str) {
        self.status(Tone::Success, message);
    }

    /// Errors are shown even in quiet mode
    pub fn error(&self, message: &str) {
        eprintln!("{}", self.line(Tone::Error, message));
    }

    pub fn warning(&self, message: &str) {
        self.status(Tone::Warning, message);
    }

    pub fn info(&self, message: &str) {
        self.status(Tone::Info, message);
    }

    /// Only shown with --verbose
    pub fn verbose(&self, message: &str) {
        if self.options.verbose && !self.options.quiet {
            eprintln!("{}", self.line(Tone::Muted, message));
        }
    }

    pub fn heading(&self, text: &str) {
        if self.suppressed() {
            return;
        }
        if self.use_color() {
            println!("\n{}", Tone::Heading.paint(text, true));
        } else {
            println!("\n{text}\n{}", "=".repeat(text.chars().count()));
        }
    }

    pub fn key_value(&self, key: &str, value: &str) {
        if self.suppressed() {
            return;
        }
        let color = self.use_color();
        println!("{}: {}", Tone::Key.paint(key, color), Tone::Value.paint(value, color));
    }

    pub fn bullet(&self, text: &str) {
        if self.suppressed() {
            return;
        }
        println!("  {} {text}", Tone::Muted.paint(BULLET, self.use_color()));
    }

    pub fn progress(&self, message: &str) {
        if self.suppressed() {
            return;
        }
        print!("\r{}...", self.line(Tone::Progress, message));
        std::io::stdout().flush().ok();
    }

    /// Clear the current line (useful after progress indicators)
    pub fn clear_line(&self) {
        if self.suppressed() {
            return;
        }
        print!("\r{}\r", " ".repeat(80));
        std::io::stdout().flush().ok();
    }

    fn status(&self, tone: Tone, message: &str) {
        if !self.suppressed() {
            println!("{}", self.line(tone, message));
        }
    }

    /// Icon and message, both in the tone's color
    fn line(&self, tone: Tone, message: &str) -> String {
        let color = self.use_color();
        format!("{} {}", tone.paint(tone.icon(), color), tone.paint(message, color))
    }

    fn use_color(&self) -> bool {
        !self.options.no_color
    }

    /// Human-readable lines are skipped in quiet and JSON modes
    fn suppressed(&self) -> bool {
        self.options.quiet || self.is_json()
    }
}

/// Table with the CLI's preset and a bold header row
pub fn themed_table(options: &GlobalOptions, headers: &[&str]) -> Table {
    let mut table = Table::new();
    if options.no_color {
        table.load_preset(comfy_table::presets::ASCII_FULL);
    } else {
        table.load_preset(comfy_table::presets::UTF8_FULL_CONDENSED);
    }

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|header| {
            let cell = Cell::new(header).add_attribute(Attribute::Bold);
            if options.no_color { cell } else { cell.fg(TableColor::Cyan) }
        })
        .collect();
    table.set_header(header_cells);
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct TestData {
        name: String,
        value: i32,
    }

    impl TableDisplay for TestData {
        fn to_table(&self, options: &GlobalOptions) -> Table {
            let mut table = themed_table(options, &["Name", "Value"]);
            table.add_row(vec![Cell::new(&self.name), Cell::new(self.value.to_string())]);
            table
        }

        fn to_compact(&self) -> String {
            format!("{}={}", self.name, self.value)
        }
    }

    #[test]
    fn test_output_manager_json() {
        let manager = OutputManager::new(GlobalOptions {
            output_format: OutputFormat::Json,
            ..Default::default()
        });
        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };
        assert!(manager.is_json());
        assert!(manager.display(&data).is_ok());
    }

    #[test]
    fn test_output_manager_quiet() {
        let manager = OutputManager::new(GlobalOptions {
            quiet: true,
            ..Default::default()
        });
        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };
        assert!(manager.display(&data).is_ok());
    }

    #[test]
    fn test_plain_status_line() {
        let manager = OutputManager::new(GlobalOptions {
            no_color: true,
            ..Default::default()
        });
        assert_eq!(manager.line(Tone::Warning, "No tables matched"), "⚠ No tables matched");
        assert_eq!(manager.line(Tone::Muted, "Output directory: out"), "→ Output directory: out");
    }

    #[test]
    fn test_themed_table_header() {
        let options = GlobalOptions {
            no_color: true,
            ..Default::default()
        };
        let rendered = themed_table(&options, &["Table", "Column"]).to_string();
        assert!(rendered.contains("Table"));
        assert!(rendered.contains("Column"));
    }
}
