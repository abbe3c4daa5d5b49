//! Colored output helpers for CLI
//!
//! Provides consistent, colored terminal output for the chorus CLI.

use crate::pipeline::PipelineReport;
use crate::types::QueryResult;
use owo_colors::OwoColorize;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the startup line
    pub fn banner(&self, backends: usize) {
        let version = format!("v{}", env!("CARGO_PKG_VERSION"));
        let summary = format!("{} backends", backends);
        if self.colored {
            println!(
                "\n  {} {} {}\n",
                "chorus".bright_cyan().bold(),
                version.dimmed(),
                summary.dimmed()
            );
        } else {
            println!("\n  chorus {} ({})\n", version, summary);
        }
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            println!("  [WARN] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print a header for a section
    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    /// Print a key-value pair
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    /// Print one backend's answer, or its failure
    pub fn backend_result(&self, result: &QueryResult) {
        match (&result.text, &result.error) {
            (Some(text), None) => {
                if self.colored {
                    println!(
                        "  {} {}",
                        format!("Bot {}:", result.backend_name).cyan().bold(),
                        text
                    );
                } else {
                    println!("  Bot {}: {}", result.backend_name, text);
                }
            }
            (_, error) => {
                let error = error.as_deref().unwrap_or("no response");
                self.warning(&format!("{} failed: {}", result.backend_name, error));
            }
        }
    }

    /// Print the full outcome of a run
    pub fn report(&self, report: &PipelineReport) {
        self.header("Responses");
        for result in &report.record.results {
            self.backend_result(result);
        }

        self.header("Message");
        match &report.message {
            Ok(reply) => {
                self.kv("AI Message", reply.ai_message.as_deref().unwrap_or("-"));
                let score = reply
                    .ai_score
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".to_string());
                self.kv("AI Score", &score);
            }
            Err(e) => self.error(&format!("Failed to send message: {}", e)),
        }

        self.header("Memory");
        match &report.memory {
            Ok(ack) => self.success(&format!("Memory created successfully: {}", ack)),
            Err(e) => self.error(&format!("Failed to create memory: {}", e)),
        }

        let failures = report.backend_failures();
        if failures > 0 {
            self.warning(&format!(
                "{} of {} backends failed",
                failures,
                report.record.results.len()
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_new() {
        let output = Output::new();
        assert!(output.colored);
    }

    #[test]
    fn test_output_no_color() {
        let output = Output::no_color();
        assert!(!output.colored);
    }

    #[test]
    fn test_output_default() {
        let output = Output::default();
        assert!(output.colored);
    }

    #[test]
    fn test_output_methods_no_panic() {
        // Smoke test - ensure none of the output methods panic
        for output in [Output::no_color(), Output::new()] {
            output.banner(3);
            output.success("test success");
            output.info("test info");
            output.warning("test warning");
            output.error("test error");
            output.header("Test Header");
            output.kv("key", "value");
            output.backend_result(&QueryResult::success("gpt2", "hello"));
            output.backend_result(&QueryResult::failure("gpt2", "timed out"));
        }
    }
}
