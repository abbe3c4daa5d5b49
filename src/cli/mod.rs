//! CLI module for chorus
//!
//! Provides command-line interface parsing for the chorus binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod output;

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Question shown when no prompt is passed on the command line
pub const QUESTION_PROMPT: &str = "Enter your question: ";

/// chorus - ask every configured model the same question
///
/// Queries each backend in order, prints the answers, and stores the whole
/// conversation in the Personal AI memory stack.
#[derive(Parser, Debug)]
#[command(
    name = "chorus",
    version,
    about = "Ask every configured model the same question and store the answers as a memory",
    after_help = "EXAMPLES:\n    \
                  chorus                              # Ask interactively\n    \
                  chorus --prompt \"What is Rust?\"     # Ask without prompting\n    \
                  chorus --config my.toml --concurrent # Custom backends, queried at once\n\n\
                  ENVIRONMENT:\n    \
                  PERSONAL_AI_API_KEY        Memory service key (required)\n    \
                  HUGGINGFACEHUB_API_TOKEN   Needed for Hugging Face backends"
)]
pub struct Cli {
    /// Path to the configuration file (built-in backends are used if absent)
    #[arg(short, long, default_value = "chorus.toml")]
    pub config: PathBuf,

    /// Question to ask; read from standard input when omitted
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Query all backends concurrently
    #[arg(long)]
    pub concurrent: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Show [`QUESTION_PROMPT`] and read one line from `input`.
///
/// Returns `None` on end of input. The trailing newline is removed.
pub fn read_question<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<String>> {
    write!(out, "{}", QUESTION_PROMPT)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
