//! Persisted default flags.
//!
//! Defaults live in plain files holding command-line flag tokens, one or more
//! per line, with `#` comment lines. The global file is written by `--save`;
//! a `.lazyviewrc` in the working directory overrides it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const APP_DIR: &str = "lazyview";
const LOCAL_FILE: &str = ".lazyviewrc";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub watch: bool,
    pub view: bool,
    pub allow_trailing_commas: bool,
    pub debounce_ms: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge `other` over `self`: switches are OR-ed, valued options from
    /// `other` win when set.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            watch: self.watch || other.watch,
            view: self.view || other.view,
            allow_trailing_commas: self.allow_trailing_commas || other.allow_trailing_commas,
            debounce_ms: other.debounce_ms.or(self.debounce_ms),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }

    fn to_tokens(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.watch {
            lines.push("--watch".to_string());
        }
        if self.view {
            lines.push("--view".to_string());
        }
        if self.allow_trailing_commas {
            lines.push("--allow-trailing-commas".to_string());
        }
        if let Some(ms) = self.debounce_ms {
            lines.push(format!("--debounce-ms {ms}"));
        }
        if let Some(path) = &self.log_file {
            lines.push(format!("--log-file {}", path.display()));
        }
        lines
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join(APP_DIR).join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join(APP_DIR)
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join(APP_DIR).join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join(APP_DIR)
                .join("config");
        }
    }

    PathBuf::from(LOCAL_FILE)
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(LOCAL_FILE)
}

/// Read flags from `path`. A missing file yields the defaults.
///
/// # Errors
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Write `flags` to `path`, creating parent directories as needed.
///
/// # Errors
/// Returns an error if the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# lazyview defaults (saved with --save)".to_string()];
    lines.extend(flags.to_tokens());
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove the file at `path` if it exists.
///
/// # Errors
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the persisted flags out of a token list. Unknown tokens, including
/// the program name and file arguments, are skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut tokens = tokens.iter();
    while let Some(token) = tokens.next() {
        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (token.as_str(), None),
        };
        match name {
            "--watch" | "-w" => flags.watch = true,
            "--view" => flags.view = true,
            "--allow-trailing-commas" => flags.allow_trailing_commas = true,
            "--debounce-ms" => {
                let value = inline_value.or_else(|| tokens.next().cloned());
                if let Some(ms) = value.and_then(|v| v.parse().ok()) {
                    flags.debounce_ms = Some(ms);
                }
            }
            "--log-file" => {
                if let Some(path) = inline_value.or_else(|| tokens.next().cloned()) {
                    flags.log_file = Some(PathBuf::from(path));
                }
            }
            _ => {}
        }
    }
    flags
}
