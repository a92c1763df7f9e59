//! Configuration module for tasklist.

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

pub mod keybindings;

pub use keybindings::{Action, KeyBindingsConfig, ViewType, validate_keybindings_config};

const APP_DIR: &str = "tasklist";
const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the list is stored.
    pub storage: StorageConfig,
    /// TUI configuration.
    pub tui: TuiConfig,
}

/// Storage configuration block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the stored list. Defaults to the platform data
    /// directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Keybindings configuration.
    pub keybindings: KeyBindingsConfig,
}

impl Config {
    /// Pick the data directory: explicit override, then the config file, then
    /// the platform default.
    pub fn resolve_data_dir(&self, cli_override: Option<PathBuf>) -> Result<PathBuf> {
        cli_override
            .or_else(|| self.storage.data_dir.clone())
            .or_else(default_data_dir)
            .ok_or_else(|| anyhow!("could not determine a data directory; pass --data-dir"))
    }

    fn validate(&self) -> Result<()> {
        validate_keybindings_config(&self.tui.keybindings)
    }
}

/// Returns the default configuration file path.
///
/// On Linux: `~/.config/tasklist/config.toml`
/// On macOS: `~/Library/Application Support/tasklist/config.toml`
/// On Windows: `%APPDATA%\tasklist\config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Returns the default directory for the stored list.
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR))
}

/// Load configuration from `path`, or from the default location.
///
/// A missing file yields the default configuration.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) => p,
            None => return Ok(Config::default()),
        },
    };

    if !config_path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config file: {}", config_path.display()))?;
    Ok(config)
}

/// Generate default configuration as TOML string.
pub fn generate_default_config_toml() -> Result<String> {
    let body = toml::to_string_pretty(&Config::default()).context("Failed to serialize default config")?;
    let header = "# tasklist configuration\n\
        #\n\
        # [storage]\n\
        # data_dir = \"/path/to/data\"   # where myList.json is kept\n\
        #\n\
        # Keys: single characters, Enter, Esc, Tab, Space, Backspace, Delete,\n\
        # Up, Down, Left, Right, Home, End, PageUp, PageDown, Insert.\n\
        # Modifiers: Ctrl+, Alt+, Shift+ (e.g. \"Ctrl+c\").\n\n";
    Ok(format!("{header}{body}"))
}

/// Write a default configuration file.
///
/// Asks before overwriting an existing file unless `force` is set.
pub fn init_config<R: BufRead, W: Write>(
    output: Option<&Path>,
    force: bool,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => default_config_path().ok_or_else(|| anyhow!("could not determine the config directory"))?,
    };

    if path.exists() && !force && !confirm_overwrite(&path, input, out)? {
        writeln!(out, "Aborted.")?;
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let content = generate_default_config_toml()?;
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    writeln!(out, "Wrote configuration file: {}", path.display())?;
    Ok(())
}

fn confirm_overwrite<R: BufRead, W: Write>(path: &Path, input: &mut R, out: &mut W) -> Result<bool> {
    write!(out, "File already exists: {}\nOverwrite? [y/N]: ", path.display())?;
    out.flush()?;
    confirm(input)
}

/// Read a yes/no answer; anything but `y`/`yes` means no.
pub fn confirm<R: BufRead>(input: &mut R) -> Result<bool> {
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn missing_config_returns_default() -> Result<()> {
        let dir = tempdir()?;
        let cfg = load_config(Some(&dir.path().join("absent.toml")))?;
        assert_eq!(cfg, Config::default());
        Ok(())
    }

    #[test]
    fn load_config_with_storage_and_keys() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            "[storage]\ndata_dir = \"/tmp/tasks\"\n\n[tui.keybindings.task_list]\ntoggle = [\"t\"]\n",
        )?;

        let cfg = load_config(Some(&path))?;
        assert_eq!(cfg.storage.data_dir.as_deref(), Some(Path::new("/tmp/tasks")));
        assert_eq!(cfg.tui.keybindings.task_list.toggle, vec!["t"]);
        Ok(())
    }

    #[test]
    fn conflicting_keys_fail_to_load() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[tui.keybindings.task_list]\ndelete_all = [\"q\"]\n")?;
        assert!(load_config(Some(&path)).is_err());
        Ok(())
    }

    #[test]
    fn cli_override_wins_over_config() -> Result<()> {
        let cfg = Config {
            storage: StorageConfig {
                data_dir: Some(PathBuf::from("/from/config")),
            },
            ..Config::default()
        };
        assert_eq!(
            cfg.resolve_data_dir(Some(PathBuf::from("/from/cli")))?,
            PathBuf::from("/from/cli")
        );
        assert_eq!(cfg.resolve_data_dir(None)?, PathBuf::from("/from/config"));
        Ok(())
    }

    #[test]
    fn generated_config_parses_back_to_defaults() -> Result<()> {
        let toml_str = generate_default_config_toml()?;
        let parsed: Config = toml::from_str(&toml_str)?;
        assert_eq!(parsed, Config::default());
        Ok(())
    }

    #[test]
    fn init_writes_file_and_respects_refusal() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let mut out = Vec::new();

        init_config(Some(&path), false, &mut Cursor::new(""), &mut out)?;
        assert!(path.exists());

        fs::write(&path, "# mine")?;
        init_config(Some(&path), false, &mut Cursor::new("n\n"), &mut out)?;
        assert_eq!(fs::read_to_string(&path)?, "# mine");

        init_config(Some(&path), true, &mut Cursor::new(""), &mut out)?;
        assert_ne!(fs::read_to_string(&path)?, "# mine");
        Ok(())
    }

    #[test]
    fn confirm_accepts_yes_variants() -> Result<()> {
        assert!(confirm(&mut Cursor::new("y\n"))?);
        assert!(confirm(&mut Cursor::new("YES\n"))?);
        assert!(!confirm(&mut Cursor::new("\n"))?);
        assert!(!confirm(&mut Cursor::new("nope\n"))?);
        Ok(())
    }
}
