use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Title shown above the blocks when none is configured.
pub const DEFAULT_TITLE: &str = "Viagem à Lua";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub title: Option<String>,
    pub debug_log: Option<PathBuf>,
    pub dump_on_exit: bool,
    pub no_mouse: bool,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            title: other.title.clone().or_else(|| self.title.clone()),
            debug_log: other.debug_log.clone().or_else(|| self.debug_log.clone()),
            dump_on_exit: self.dump_on_exit || other.dump_on_exit,
            no_mouse: self.no_mouse || other.no_mouse,
        }
    }

    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("roteiro").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("roteiro")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("roteiro").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("roteiro")
                .join("config");
        }
    }

    PathBuf::from(".roteirorc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".roteirorc")
}

/// Load flags from an rc file. A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    // Titles may contain spaces, so `--title` takes the rest of its line.
    let mut flags = ConfigFlags::default();
    for line in content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
    {
        if let Some(title) = line
            .strip_prefix("--title ")
            .or_else(|| line.strip_prefix("--title="))
        {
            flags.title = Some(title.trim().to_string());
            continue;
        }
        let tokens = line
            .split_whitespace()
            .map(ToOwned::to_owned)
            .collect::<Vec<_>>();
        flags = flags.union(&parse_flag_tokens(&tokens));
    }
    Ok(flags)
}

/// Write `flags` to `path`, one flag per line.
///
/// # Errors
///
/// Returns an error if the parent directory or the file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# roteiro defaults (saved with --save)".to_string());
    if let Some(title) = &flags.title {
        lines.push(format!("--title {title}"));
    }
    if let Some(path) = &flags.debug_log {
        lines.push(format!("--debug-log {}", path.display()));
    }
    if flags.dump_on_exit {
        lines.push("--dump-on-exit".to_string());
    }
    if flags.no_mouse {
        lines.push("--no-mouse".to_string());
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove a saved rc file if there is one.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Extract the persistable flags from raw command-line tokens.
///
/// Unknown tokens are skipped, so the full `argv` can be passed in.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--dump-on-exit" {
            flags.dump_on_exit = true;
        } else if token == "--no-mouse" {
            flags.no_mouse = true;
        } else if token == "--title" {
            if let Some(next) = tokens.get(i + 1) {
                flags.title = Some(next.clone());
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--title=") {
            flags.title = Some(value.to_string());
        } else if token == "--debug-log" {
            if let Some(next) = tokens.get(i + 1) {
                flags.debug_log = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--debug-log=") {
            flags.debug_log = Some(PathBuf::from(value));
        }
        i += 1;
    }
    flags
}
