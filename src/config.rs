use crate::channel;
use crate::error::{LunikError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Toolchain used when no selector is given. Must name an entry of `toolchain`.
    pub default: String,

    #[serde(default)]
    pub toolchain: BTreeMap<String, ToolchainInfo>,

    /// Kept for the installer; resolution never reads it.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub channels: BTreeMap<String, ChannelInfo>,

    /// Directory relative `root_path` and `override` entries are anchored to.
    #[serde(skip)]
    base_dir: PathBuf,

    /// Parent of derived toolchain roots.
    #[serde(skip)]
    toolchain_store: PathBuf,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ToolchainInfo {
    /// Toolchain consulted when this one does not provide the tool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_path: Option<PathBuf>,

    /// Tool name to executable path, checked before `root_path`.
    #[serde(
        default,
        skip_serializing_if = "BTreeMap::is_empty",
        rename = "override"
    )]
    pub override_: BTreeMap<String, PathBuf>,

    /// Core library location for the compiler; carried through saves untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_path: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

impl Config {
    /// A config holding a single empty toolchain that is also the default.
    pub fn with_default(name: &str) -> Self {
        let mut toolchain = BTreeMap::new();
        toolchain.insert(name.to_string(), ToolchainInfo::default());
        Config {
            default: name.to_string(),
            toolchain,
            ..Default::default()
        }
    }

    /// Read, parse and validate the config at `path`.
    pub fn load(path: &Path, toolchain_store: &Path) -> Result<Self> {
        let text = fs_err::read_to_string(path).map_err(|source| LunikError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        let base_dir = absolute.parent().unwrap_or_else(|| Path::new("."));
        let config = Self::parse(&text, ConfigFormat::from_path(path))
            .map_err(|reason| LunikError::MalformedConfig {
                path: path.to_path_buf(),
                reason,
            })?
            .with_layout(base_dir, toolchain_store);
        config.validate()?;
        tracing::debug!(
            path = %path.display(),
            toolchains = config.toolchain.len(),
            default = %config.default,
            "loaded config"
        );
        Ok(config)
    }

    /// Shape check only; see [`Config::validate`] for semantic checks.
    ///
    /// JSON may carry `//` and `/* */` comments and trailing commas.
    pub fn parse(text: &str, format: ConfigFormat) -> std::result::Result<Self, String> {
        match format {
            ConfigFormat::Json => parse_lenient_json(text).map_err(|e| e.to_string()),
            ConfigFormat::Toml => toml::from_str(text).map_err(|e| e.to_string()),
        }
    }

    pub fn with_layout(mut self, base_dir: &Path, toolchain_store: &Path) -> Self {
        self.base_dir = base_dir.to_path_buf();
        self.toolchain_store = toolchain_store.to_path_buf();
        self
    }

    /// Fallback chains and override targets are left to resolution time.
    pub fn validate(&self) -> Result<()> {
        if self.lookup(&self.default).is_none() {
            return Err(LunikError::InvalidDefault {
                name: self.default.clone(),
            });
        }
        Ok(())
    }

    /// Find a toolchain by its verbatim name, then by its canonical channel name.
    ///
    /// Returns the configured key alongside the entry.
    pub fn lookup(&self, name: &str) -> Option<(&str, &ToolchainInfo)> {
        if let Some((key, info)) = self.toolchain.get_key_value(name) {
            return Some((key.as_str(), info));
        }
        let canonical = channel::canonical_name(name)?;
        self.toolchain
            .get_key_value(&canonical)
            .map(|(key, info)| (key.as_str(), info))
    }

    /// Directory searched for tools of toolchain `name`.
    pub fn toolchain_root(&self, name: &str, info: &ToolchainInfo) -> PathBuf {
        match &info.root_path {
            Some(root) => self.anchor(root),
            None => self.toolchain_store.join(name),
        }
    }

    pub fn override_path(&self, info: &ToolchainInfo, tool: &str) -> Option<PathBuf> {
        info.override_.get(tool).map(|p| self.anchor(p))
    }

    fn anchor(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let text = match ConfigFormat::from_path(path) {
            ConfigFormat::Json => {
                serde_json_lenient::to_string_pretty(self).context("serializing config as JSON")?
            }
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).context("serializing config as TOML")?
            }
        };
        fs_err::write(path, text)?;
        Ok(())
    }
}

fn parse_lenient_json(text: &str) -> serde_json_lenient::Result<Config> {
    let mut de = serde_json_lenient::Deserializer::from_str(text);
    de.set_allow_comments(true);
    de.set_ignore_trailing_commas(true);
    let config = Config::deserialize(&mut de)?;
    de.end()?;
    Ok(config)
}
