use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The toolchain multiplexer.
///
/// Link this binary under a tool's name to run that tool from the selected
/// toolchain: `moon +dev build` runs `moon` from the `dev` toolchain.
#[derive(Parser, Debug)]
#[command(version, name = "lunik")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config (defaults to lunik.json in the Lunik home)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the executable a tool name resolves to.
    /// Examples:
    ///   lunik which moon                # default toolchain
    ///   lunik which moonc -t dev        # walk dev and its fallbacks
    Which {
        #[arg(value_name = "TOOL")]
        tool: String,
        /// Toolchain to resolve in (defaults to $LUNIK_TOOLCHAIN, then the configured default)
        #[arg(short, long)]
        toolchain: Option<String>,
    },
    /// List configured toolchains; the default is marked with '*'
    List,
    /// Set the default toolchain
    Default {
        #[arg(value_name = "TOOLCHAIN")]
        toolchain: String,
    },
    /// Write a fresh config holding a single toolchain
    InitConfig {
        /// Name of the initial (and default) toolchain
        #[arg(long, default_value = "latest")]
        default: String,
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}
