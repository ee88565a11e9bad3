//! Release channel names.
//!
//! A channel is written `<kind>[-<os>-<arch>]`. When the host part is
//! omitted the running host is assumed, so `latest` and
//! `latest-linux-x86_64` name the same toolchain on a Linux x86_64 box.

use anyhow::{anyhow, bail};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub kind: ChannelKind,
    pub host: Host,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelKind {
    /// Latest public release.
    Latest,
    /// Nightly build straight from CI.
    Bleeding,
    Version(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    os: String,
    arch: String,
}

/// Canonical spelling of `name` if it parses as a channel.
pub fn canonical_name(name: &str) -> Option<String> {
    name.parse::<Channel>().ok().map(|ch| ch.to_string())
}

impl FromStr for Channel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, host) = match s.split_once('-') {
            Some((kind, host)) => (kind, Some(host)),
            None => (s, None),
        };
        let kind = kind.parse()?;
        let host = match host {
            Some(host) => host.parse()?,
            None => Host::default(),
        };
        Ok(Channel { kind, host })
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.kind, self.host)
    }
}

impl FromStr for ChannelKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => bail!("missing channel"),
            "latest" => Ok(ChannelKind::Latest),
            "bleeding" => Ok(ChannelKind::Bleeding),
            other => Ok(ChannelKind::Version(other.to_string())),
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChannelKind::Latest => write!(f, "latest"),
            ChannelKind::Bleeding => write!(f, "bleeding"),
            ChannelKind::Version(v) => write!(f, "{v}"),
        }
    }
}

impl FromStr for Host {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('-');
        let os = parts
            .next()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| anyhow!("missing os"))?;
        let arch = parts
            .next()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| anyhow!("missing arch"))?;
        if parts.next().is_some() {
            bail!("unexpected trailing host component in '{s}'");
        }
        Ok(Host {
            os: os.to_string(),
            arch: arch.to_string(),
        })
    }
}

impl Default for Host {
    fn default() -> Self {
        let os = match std::env::consts::OS {
            "macos" => "darwin",
            other => other,
        };
        Host {
            os: os.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_defaults_to_running_machine() {
        let host = Host::default();
        assert_eq!(canonical_name("latest"), Some(format!("latest-{host}")));
        assert_eq!(canonical_name("bleeding"), Some(format!("bleeding-{host}")));
        assert_eq!(canonical_name("0.1.2"), Some(format!("0.1.2-{host}")));
    }

    #[test]
    fn explicit_host_is_kept() {
        let ch: Channel = "latest-linux-x86_64".parse().unwrap();
        assert_eq!(ch.kind, ChannelKind::Latest);
        assert_eq!(ch.to_string(), "latest-linux-x86_64");
        assert_eq!(
            canonical_name("0.1.2-darwin-aarch64").as_deref(),
            Some("0.1.2-darwin-aarch64")
        );
    }

    #[test]
    fn malformed_channels_are_rejected() {
        assert!("".parse::<Channel>().is_err());
        assert!("latest-".parse::<Channel>().is_err());
        assert!("latest-linux".parse::<Channel>().is_err());
        assert!("latest-linux-x86_64-extra".parse::<Channel>().is_err());
    }
}
