//! Environment configuration
//!
//! Everything brufile reads from the environment is collected here once per
//! invocation. Variable names follow Homebrew's so existing shell setups
//! carry over.

use crate::entry::QuoteStyle;
use std::path::PathBuf;

pub const DEFAULT_API_BASE: &str = "https://formulae.brew.sh/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `HOMEBREW_BUNDLE_QUOTE_TYPE=single`
    pub quote_style: QuoteStyle,
    /// `HOMEBREW_BUNDLE_DUMP_DESCRIBE`
    pub describe: bool,
    /// `HOMEBREW_BUNDLE_FILE`
    pub bundle_file: Option<PathBuf>,
    /// `HOMEBREW_BUNDLE_FILE_GLOBAL`, else `~/.Brewfile`
    pub global_file: PathBuf,
    /// `HOMEBREW_EDITOR`, `VISUAL`, `EDITOR`
    pub editor: String,
    /// `HOMEBREW_BAT`
    pub use_bat: bool,
    /// `HOMEBREW_BAT_CONFIG_PATH`
    pub bat_config_path: Option<String>,
    /// `HOMEBREW_PREFIX`, else the platform default
    pub prefix: PathBuf,
    /// `HOMEBREW_API_DOMAIN`
    pub api_base: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let quote_style = match get("HOMEBREW_BUNDLE_QUOTE_TYPE").as_deref() {
            Some("single") => QuoteStyle::Single,
            _ => QuoteStyle::Double,
        };

        let home = get("HOME").map(PathBuf::from).unwrap_or_default();
        let global_file = get("HOMEBREW_BUNDLE_FILE_GLOBAL")
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join(".Brewfile"));

        let editor = get("HOMEBREW_EDITOR")
            .or_else(|| get("VISUAL"))
            .or_else(|| get("EDITOR"))
            .unwrap_or_else(|| "vim".to_string());

        let prefix = get("HOMEBREW_PREFIX")
            .map(PathBuf::from)
            .unwrap_or_else(default_prefix);

        Self {
            quote_style,
            describe: get("HOMEBREW_BUNDLE_DUMP_DESCRIBE").is_some(),
            bundle_file: get("HOMEBREW_BUNDLE_FILE").map(PathBuf::from),
            global_file,
            editor,
            use_bat: get("HOMEBREW_BAT").is_some(),
            bat_config_path: get("HOMEBREW_BAT_CONFIG_PATH"),
            prefix,
            api_base: get("HOMEBREW_API_DOMAIN")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        }
    }

    /// Directory holding local taps
    pub fn taps_path(&self) -> PathBuf {
        self.prefix.join("Library/Taps")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Homebrew prefix for this architecture
fn default_prefix() -> PathBuf {
    #[cfg(all(target_os = "macos", target_arch = "aarch64"))]
    {
        PathBuf::from("/opt/homebrew")
    }
    #[cfg(target_os = "linux")]
    {
        PathBuf::from("/home/linuxbrew/.linuxbrew")
    }
    #[cfg(not(any(all(target_os = "macos", target_arch = "aarch64"), target_os = "linux")))]
    {
        PathBuf::from("/usr/local")
    }
}
