//! depotkey - resolve Steam depot decryption keys into Lua unlock
//! scripts.

pub mod cmd;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line interface definition.
#[derive(Parser)]
#[command(name = "depotkey")]
#[command(
    author,
    version,
    about = "Resolve Steam depot decryption keys into Lua unlock scripts"
)]
pub struct Cli {
    /// Load the source catalog from a TOML file instead of the built-in one
    #[arg(long, global = true, env = "DEPOTKEY_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve an app id and write <appid>.lua (or <appid>_branch.zip)
    Fetch {
        /// Steam application id (decimal digits only)
        appid: String,
        /// Directory to write the output file into
        #[arg(long, short = 'o', default_value = ".")]
        output_dir: PathBuf,
    },
    /// List the cataloged sources in scan order
    Sources,
}
