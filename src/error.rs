//! Error taxonomy for configuration loading, resolution and dispatch.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Toolchain names consulted during one resolution, in walk order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chain(pub Vec<String>);

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "<empty>");
        }
        write!(f, "{}", self.0.join(" -> "))
    }
}

#[derive(Debug, Error)]
pub enum LunikError {
    #[error("cannot read config {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config {}: {reason}", path.display())]
    MalformedConfig { path: PathBuf, reason: String },

    #[error("default toolchain '{name}' is not defined in the config")]
    InvalidDefault { name: String },

    #[error("cannot resolve '{tool}': unknown toolchain '{name}' (chain: {chain})")]
    UnknownToolchain {
        tool: String,
        name: String,
        chain: Chain,
    },

    #[error("cannot resolve '{tool}': fallback cycle at toolchain '{repeated}' (chain: {chain})")]
    FallbackCycle {
        tool: String,
        repeated: String,
        chain: Chain,
    },

    #[error("tool '{tool}' not found in any toolchain (chain: {chain})")]
    ToolNotFound { tool: String, chain: Chain },

    #[error("failed to execute '{tool}' at {}", path.display())]
    Spawn {
        tool: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, LunikError>;
