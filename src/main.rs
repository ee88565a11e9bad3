mod channel;
mod cli;
mod command_handlers;
mod config;
mod dispatcher;
mod error;
mod home;
mod invocation;
mod logging;
mod mux;
mod platform;
mod resolve;

use clap::Parser;
use std::ffi::OsString;
use std::path::Path;
use tracing::level_filters::LevelFilter;

use crate::cli::Cli;
use crate::dispatcher::EXIT_INTERNAL_FAILURE;
use crate::platform::platform;

const BINARY_NAME: &str = "lunik";

fn main() {
    let mut args = std::env::args_os();
    let invoked = args
        .next()
        .and_then(|arg0| platform().tool_name(Path::new(&arg0)));

    match invoked.as_deref() {
        Some(tool) if tool != BINARY_NAME => {
            logging::init(LevelFilter::WARN);
            let raw_args: Vec<OsString> = args.collect();
            if let Err(e) = mux::entry(tool, raw_args) {
                eprintln!("lunik: {e:#}");
                std::process::exit(EXIT_INTERNAL_FAILURE);
            }
        }
        _ => {
            logging::init(LevelFilter::INFO);
            if let Err(e) = self_entry() {
                eprintln!("lunik: {e:#}");
                std::process::exit(1);
            }
        }
    }
}

fn self_entry() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let home = home::home();
    let path = cli.config.clone().unwrap_or_else(|| home.config_path());
    command_handlers::dispatch::dispatch(cli.command, &path, &home.toolchain_store())
}
