//! Command-line arguments

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "signup-form",
    version,
    about = "Validate registration payloads and record accepted submissions"
)]
pub struct Cli {
    /// Defaults to `submit` reading stdin
    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Cmd {
    /// Validate and submit one form payload (JSON object)
    Submit {
        /// Payload file; stdin when omitted or `-`
        payload: Option<PathBuf>,
    },
    /// Print stored submissions
    List,
}

impl Cli {
    pub fn into_cmd(self) -> Cmd {
        self.cmd.unwrap_or(Cmd::Submit { payload: None })
    }
}
