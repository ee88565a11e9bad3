use once_cell::sync::Lazy;
use std::path::PathBuf;

pub const LUNIK_HOME_ENV: &str = "LUNIK_HOME";
pub const MOON_HOME_ENV: &str = "MOON_HOME";

const MOON_HOME_DEFAULT: &str = ".moon";
const LUNIK_DIR: &str = "lunik";
const TOOLCHAIN_DIR: &str = "toolchain";
const CONFIG_JSON: &str = "lunik.json";
const CONFIG_TOML: &str = "lunik.toml";

static HOME_CACHE: Lazy<LunikHome> = Lazy::new(LunikHome::from_env);

/// Process-wide home, computed once from the environment.
pub fn home() -> &'static LunikHome {
    &HOME_CACHE
}

/// Directory layout rooted at the Lunik home.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LunikHome {
    root: PathBuf,
}

impl LunikHome {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root = std::path::absolute(&root).unwrap_or(root);
        Self { root }
    }

    /// `$LUNIK_HOME`, then `$MOON_HOME`, then `~/.moon`.
    pub fn from_env() -> Self {
        let lunik = std::env::var_os(LUNIK_HOME_ENV).filter(|v| !v.is_empty());
        let moon = std::env::var_os(MOON_HOME_ENV).filter(|v| !v.is_empty());
        let root = match (lunik, moon) {
            (Some(dir), _) | (None, Some(dir)) => PathBuf::from(dir),
            (None, None) => dirs::home_dir()
                .unwrap_or_default()
                .join(MOON_HOME_DEFAULT),
        };
        Self::new(root)
    }

    pub fn lunik_dir(&self) -> PathBuf {
        self.root.join(LUNIK_DIR)
    }

    /// Parent of every derived toolchain root.
    pub fn toolchain_store(&self) -> PathBuf {
        self.lunik_dir().join(TOOLCHAIN_DIR)
    }

    /// The JSON config wins; the TOML one is only used when it exists alone.
    pub fn config_path(&self) -> PathBuf {
        let json = self.root.join(CONFIG_JSON);
        let toml = self.root.join(CONFIG_TOML);
        if !json.exists() && toml.exists() {
            toml
        } else {
            json
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_hangs_off_root() {
        let home = LunikHome::new("/opt/moon");
        assert_eq!(home.lunik_dir(), PathBuf::from("/opt/moon/lunik"));
        assert_eq!(
            home.toolchain_store(),
            PathBuf::from("/opt/moon/lunik/toolchain")
        );
    }

    #[test]
    fn relative_root_becomes_absolute() {
        let home = LunikHome::new("relative/home");
        assert!(home.toolchain_store().is_absolute());
        assert!(home
            .toolchain_store()
            .ends_with("relative/home/lunik/toolchain"));
    }

    #[test]
    fn config_prefers_json() {
        let dir = tempfile::tempdir().unwrap();
        let home = LunikHome::new(dir.path());
        assert_eq!(home.config_path(), dir.path().join("lunik.json"));

        std::fs::write(dir.path().join("lunik.toml"), "default = \"a\"").unwrap();
        assert_eq!(home.config_path(), dir.path().join("lunik.toml"));

        std::fs::write(dir.path().join("lunik.json"), "{}").unwrap();
        assert_eq!(home.config_path(), dir.path().join("lunik.json"));
    }
}
