//! Selector configuration stored in `selector.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::tree::GroupTreeBuilder;

/// Selector configuration (TOML).
///
/// Relative paths are resolved against the directory of the config file.
/// Missing fields default to the values below.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SelectorConfig {
    /// Platform catalog (JSON).
    pub catalog_path: PathBuf,

    /// Project objects (JSON).
    pub project_path: PathBuf,

    pub tree: TreeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TreeConfig {
    /// Separator between the group levels of an instruction.
    pub group_separator: char,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            group_separator: '/',
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("catalog.json"),
            project_path: PathBuf::from("project.json"),
            tree: TreeConfig::default(),
        }
    }
}

impl SelectorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.catalog_path.as_os_str().is_empty() {
            return Err(anyhow!("catalog_path must not be empty"));
        }
        if self.project_path.as_os_str().is_empty() {
            return Err(anyhow!("project_path must not be empty"));
        }
        if self.tree.group_separator.is_whitespace() {
            return Err(anyhow!("tree.group_separator must not be whitespace"));
        }
        Ok(())
    }

    pub fn tree_builder(&self) -> GroupTreeBuilder {
        GroupTreeBuilder::new(self.tree.group_separator)
    }

    /// Resolve `path` against the directory holding the config file.
    pub fn resolve(&self, config_path: &Path, path: &Path) -> PathBuf {
        match config_path.parent() {
            Some(dir) => dir.join(path),
            None => path.to_path_buf(),
        }
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `SelectorConfig::default()`.
pub fn load_config(path: &Path) -> Result<SelectorConfig> {
    if !path.exists() {
        let cfg = SelectorConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: SelectorConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &SelectorConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
