//! Platform catalog and project load/save helpers with invariant validation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::core::invariants::validate_platform;
use crate::platform::Platform;
use crate::project::Project;

/// Load and validate a platform catalog (JSON).
pub fn load_platform(path: &Path) -> Result<Platform> {
    let platform: Platform = read_json(path, "platform")?;
    let errors = validate_platform(&platform);
    if !errors.is_empty() {
        return Err(anyhow!(
            "platform invariants failed in {}: {}",
            path.display(),
            errors.join("; ")
        ));
    }
    debug!(
        path = %path.display(),
        extensions = platform.extensions.len(),
        "platform loaded"
    );
    Ok(platform)
}

pub fn write_platform(path: &Path, platform: &Platform) -> Result<()> {
    write_json(path, platform)
}

/// Load a project (JSON).
pub fn load_project(path: &Path) -> Result<Project> {
    let project: Project = read_json(path, "project")?;
    debug!(
        path = %path.display(),
        layouts = project.layouts.len(),
        "project loaded"
    );
    Ok(project)
}

pub fn write_project(path: &Path, project: &Project) -> Result<()> {
    write_json(path, project)
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read {what} {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parse {what} {}", path.display()))
}

/// Serialize `value` to pretty-printed JSON with trailing newline.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut buf = serde_json::to_string_pretty(value).context("serialize json")?;
    buf.push('\n');
    fs::write(path, buf).with_context(|| format!("write {}", path.display()))
}
