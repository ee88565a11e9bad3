use crate::config::Config;
use anyhow::{bail, Context, Result};
use std::path::Path;

pub fn list(config_path: &Path, toolchain_store: &Path) -> Result<()> {
    let cfg = Config::load(config_path, toolchain_store)?;
    let default = cfg.lookup(&cfg.default).map(|(name, _)| name);
    for (name, info) in &cfg.toolchain {
        let marker = if Some(name.as_str()) == default { "*" } else { " " };
        let fallback = info
            .fallback
            .as_deref()
            .map(|f| format!(" fallback={f}"))
            .unwrap_or_default();
        println!(
            "{marker} {name} root={}{fallback}",
            cfg.toolchain_root(name, info).display()
        );
    }
    Ok(())
}

pub fn set_default(config_path: &Path, toolchain_store: &Path, toolchain: &str) -> Result<()> {
    let mut cfg = Config::load(config_path, toolchain_store)?;
    let Some((name, _)) = cfg.lookup(toolchain) else {
        bail!("'{toolchain}' is neither a configured toolchain nor a channel of one");
    };
    cfg.default = name.to_string();
    cfg.save(config_path)
        .with_context(|| format!("writing {}", config_path.display()))?;
    tracing::info!("default toolchain set to {}", cfg.default);
    Ok(())
}

pub fn init_config(config_path: &Path, default: &str, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!("config file already exists at {}", config_path.display());
    }
    if let Some(parent) = config_path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    Config::with_default(default)
        .save(config_path)
        .with_context(|| format!("writing {}", config_path.display()))?;
    tracing::info!("config file created at {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_then_set_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lunik.json");
        let store = dir.path().join("store");

        init_config(&path, "stable", false).unwrap();
        assert!(init_config(&path, "stable", false).is_err());

        let mut cfg = Config::load(&path, &store).unwrap();
        assert_eq!(cfg.default, "stable");
        cfg.toolchain.insert("dev".into(), Default::default());
        cfg.save(&path).unwrap();

        set_default(&path, &store, "dev").unwrap();
        assert_eq!(Config::load(&path, &store).unwrap().default, "dev");

        assert!(set_default(&path, &store, "nightly").is_err());
        assert_eq!(Config::load(&path, &store).unwrap().default, "dev");
    }

    #[test]
    fn init_force_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("lunik.toml");
        init_config(&path, "stable", false).unwrap();
        init_config(&path, "dev", true).unwrap();
        let cfg = Config::load(&path, dir.path()).unwrap();
        assert_eq!(cfg.default, "dev");
        assert_eq!(cfg.toolchain.len(), 1);
    }
}
