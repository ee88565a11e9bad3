use crate::config::Config;
use crate::dispatcher;
use crate::home::home;
use crate::invocation::{interpret, TOOLCHAIN_ENV};
use crate::resolve::resolve;
use anyhow::{Context, Result};
use std::convert::Infallible;
use std::ffi::OsString;

/// Run `tool` from the selected toolchain. Returns only on failure.
pub fn entry(tool: &str, raw_args: Vec<OsString>) -> Result<Infallible> {
    let home = home();
    let config_path = home.config_path();
    let config = Config::load(&config_path, &home.toolchain_store())
        .with_context(|| format!("cannot run '{tool}'"))?;

    let env_toolchain = std::env::var(TOOLCHAIN_ENV).ok();
    let invocation = interpret(tool, raw_args, &config, env_toolchain.as_deref());
    let resolution = resolve(&invocation.tool, &invocation.toolchain, &config)?;
    drop(config);

    tracing::debug!(
        tool = %invocation.tool,
        toolchain = %resolution.toolchain,
        chain = %resolution.chain.join(" -> "),
        "dispatching"
    );
    let never = dispatcher::dispatch(
        &invocation.tool,
        &resolution.path,
        &invocation.forwarded_args,
    )?;
    Ok(never)
}
