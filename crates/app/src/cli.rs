//! Command-line arguments for the `postline` binary.

use std::path::PathBuf;

use clap::Parser;

/// List a project's requests and optionally send one.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// Project file to open; the sample project is used when omitted
    pub project: Option<PathBuf>,

    /// Request to send, by id or by name
    #[arg(short, long, value_name = "REQUEST")]
    pub send: Option<String>,
}
