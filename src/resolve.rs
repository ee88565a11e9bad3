//! Tool resolution along a toolchain's fallback chain.
//!
//! Fallbacks are followed by name through [`Config::lookup`], one link at a
//! time. Mutual fallbacks are legal; a walk that comes back to a toolchain it
//! already visited fails with [`LunikError::FallbackCycle`].

use crate::config::Config;
use crate::error::{Chain, LunikError, Result};
use crate::platform::{platform, PlatformOps};
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Taken from the toolchain's `override` table, unchecked.
    Override,
    /// Found as an executable under the toolchain root.
    Root,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub path: PathBuf,
    /// Toolchain that provided the tool.
    pub toolchain: String,
    pub origin: Origin,
    /// Toolchains visited, ending with the providing one.
    pub chain: Vec<String>,
}

pub struct Resolver<'a> {
    config: &'a Config,
    platform: &'a dyn PlatformOps,
}

impl<'a> Resolver<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self::with_platform(config, platform())
    }

    pub fn with_platform(config: &'a Config, platform: &'a dyn PlatformOps) -> Self {
        Self { config, platform }
    }

    pub fn resolve(&self, tool: &str, toolchain: &str) -> Result<Resolution> {
        let mut visited: HashSet<String> = HashSet::new();
        let mut chain: Vec<String> = Vec::new();
        let mut current = toolchain.to_string();

        loop {
            let Some((name, info)) = self.config.lookup(&current) else {
                return Err(LunikError::UnknownToolchain {
                    tool: tool.to_string(),
                    name: current,
                    chain: Chain(chain),
                });
            };
            let name = name.to_string();
            if !visited.insert(name.clone()) {
                chain.push(name.clone());
                return Err(LunikError::FallbackCycle {
                    tool: tool.to_string(),
                    repeated: name,
                    chain: Chain(chain),
                });
            }
            chain.push(name.clone());

            if let Some(path) = self.config.override_path(info, tool) {
                tracing::debug!(%tool, toolchain = %name, path = %path.display(), "using override");
                return Ok(Resolution {
                    path,
                    toolchain: name,
                    origin: Origin::Override,
                    chain,
                });
            }

            let root = self.config.toolchain_root(&name, info);
            let found = self
                .platform
                .executable_candidates(&root, tool)
                .into_iter()
                .find(|candidate| self.platform.is_executable(candidate));
            if let Some(path) = found {
                tracing::debug!(%tool, toolchain = %name, path = %path.display(), "found under root");
                return Ok(Resolution {
                    path,
                    toolchain: name,
                    origin: Origin::Root,
                    chain,
                });
            }
            tracing::trace!(%tool, toolchain = %name, root = %root.display(), "not provided");

            match &info.fallback {
                Some(next) => current = next.clone(),
                None => {
                    return Err(LunikError::ToolNotFound {
                        tool: tool.to_string(),
                        chain: Chain(chain),
                    })
                }
            }
        }
    }
}

/// Resolve `tool` for `toolchain` on the running platform.
pub fn resolve(tool: &str, toolchain: &str, config: &Config) -> Result<Resolution> {
    Resolver::new(config).resolve(tool, toolchain)
}
