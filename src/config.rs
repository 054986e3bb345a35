use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::keys::KeyOptions;

pub const CONFIG_FILE_NAME: &str = ".ngmigrc.json";

/// Upper bound for `keyPadding`; wider suffixes only make keys unreadable.
pub const MAX_KEY_PADDING: usize = 10;

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Rewrite templates in place; `false` only extracts keys.
    #[serde(default = "default_replace_html_texts")]
    pub replace_html_texts: bool,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    /// Manifest path, relative to the source root unless absolute.
    #[serde(default = "default_output_file")]
    pub output_file: String,
    /// Directory name whose following path segment names the module.
    #[serde(default = "default_module_marker")]
    pub module_marker: String,
    #[serde(default = "default_key_padding")]
    pub key_padding: usize,
    #[serde(default)]
    pub module_prefixed_keys: bool,
    #[serde(default)]
    pub ignores: Vec<String>,
}

fn default_replace_html_texts() -> bool {
    true
}

fn default_source_root() -> String {
    "./src".to_string()
}

fn default_output_file() -> String {
    "translation.json".to_string()
}

fn default_module_marker() -> String {
    "app".to_string()
}

fn default_key_padding() -> usize {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            replace_html_texts: default_replace_html_texts(),
            source_root: default_source_root(),
            output_file: default_output_file(),
            module_marker: default_module_marker(),
            key_padding: default_key_padding(),
            module_prefixed_keys: false,
            ignores: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid glob patterns in `ignores`, an empty
    /// module marker or output file, or a key padding outside `1..=10`.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern)
                    .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
            }
        }

        if self.module_marker.trim().is_empty() {
            bail!("'moduleMarker' must not be empty");
        }

        if self.output_file.trim().is_empty() {
            bail!("'outputFile' must not be empty");
        }

        if self.key_padding == 0 || self.key_padding > MAX_KEY_PADDING {
            bail!(
                "'keyPadding' must be between 1 and {}, got {}",
                MAX_KEY_PADDING,
                self.key_padding
            );
        }

        Ok(())
    }

    pub fn key_options(&self) -> KeyOptions {
        KeyOptions {
            padding: self.key_padding,
            module_prefixed: self.module_prefixed_keys,
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
