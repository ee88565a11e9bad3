use crate::config::Config;
use crate::invocation::TOOLCHAIN_ENV;
use crate::resolve::{resolve, Origin};
use anyhow::{Context, Result};
use std::path::Path;

pub fn print_resolution(
    config_path: &Path,
    toolchain_store: &Path,
    tool: &str,
    toolchain: Option<&str>,
) -> Result<()> {
    let cfg = Config::load(config_path, toolchain_store)?;
    let env_toolchain = std::env::var(TOOLCHAIN_ENV).ok().filter(|t| !t.is_empty());
    let toolchain = toolchain
        .map(str::to_string)
        .or(env_toolchain)
        .unwrap_or_else(|| cfg.default.clone());

    let res = resolve(tool, &toolchain, &cfg).with_context(|| format!("resolving '{tool}'"))?;
    let origin = match res.origin {
        Origin::Override => "override",
        Origin::Root => "toolchain root",
    };
    eprintln!(
        "{tool} from {} ({origin}; chain: {})",
        res.toolchain,
        res.chain.join(" -> ")
    );
    println!("{}", res.path.display());
    Ok(())
}
