use crate::view::ViewRadix;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: String,
    pub default_view: ViewRadix,
    pub page_rows: usize,
    pub confirm_quit: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "classic".to_string(),
            default_view: ViewRadix::Hex,
            page_rows: 10,
            confirm_quit: true,
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct PartialConfig {
    theme: Option<String>,
    default_view: Option<ViewRadix>,
    page_rows: Option<usize>,
    confirm_quit: Option<bool>,
    log_level: Option<String>,
}

impl PartialConfig {
    fn apply_defaults(self) -> (Config, bool) {
        let defaults = Config::default();
        let mut changed = false;

        let theme = match self.theme {
            Some(v) => v,
            None => {
                changed = true;
                defaults.theme
            }
        };
        let default_view = match self.default_view {
            Some(v) => v,
            None => {
                changed = true;
                defaults.default_view
            }
        };
        let page_rows = match self.page_rows {
            Some(v) if v > 0 => v,
            _ => {
                changed = true;
                defaults.page_rows
            }
        };
        let confirm_quit = match self.confirm_quit {
            Some(v) => v,
            None => {
                changed = true;
                defaults.confirm_quit
            }
        };
        let log_level = match self.log_level {
            Some(v) => v,
            None => {
                changed = true;
                defaults.log_level
            }
        };

        (
            Config {
                theme,
                default_view,
                page_rows,
                confirm_quit,
                log_level,
            },
            changed,
        )
    }
}

pub fn config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join("hexplore").join("config.toml"))
}

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    Ok(())
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        let cfg = Config::default();
        write_config_to(path, &cfg)?;
        return Ok(cfg);
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let (cfg, changed) = parse_config(&raw)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    if changed {
        write_config_to(path, &cfg)?;
    }
    Ok(cfg)
}

fn parse_config(raw: &str) -> Result<(Config, bool)> {
    let partial: PartialConfig = toml::from_str(raw)?;
    Ok(partial.apply_defaults())
}

pub fn write_config(cfg: &Config) -> Result<()> {
    write_config_to(&config_path()?, cfg)
}

pub fn write_config_to(path: &Path, cfg: &Config) -> Result<()> {
    ensure_parent_dir(path)?;
    let text = toml::to_string_pretty(cfg).context("Failed to serialize config")?;
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
