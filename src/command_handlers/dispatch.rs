use crate::cli::Commands;
use crate::command_handlers::{config_ops, which};
use anyhow::Result;
use std::path::Path;

pub fn dispatch(cmd: Commands, config_path: &Path, toolchain_store: &Path) -> Result<()> {
    match cmd {
        Commands::Which { tool, toolchain } => {
            which::print_resolution(config_path, toolchain_store, &tool, toolchain.as_deref())
        }
        Commands::List => config_ops::list(config_path, toolchain_store),
        Commands::Default { toolchain } => {
            config_ops::set_default(config_path, toolchain_store, &toolchain)
        }
        Commands::InitConfig { default, force } => {
            config_ops::init_config(config_path, &default, force)
        }
    }
}
