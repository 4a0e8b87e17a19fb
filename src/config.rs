use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::extract::DEFAULT_TYPE_DEPTH;

pub const CONFIG_FILE_NAME: &str = ".uigraphrc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
];

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
    /// Import prefix to replacement path, e.g. `"@" -> "./src"`.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    #[serde(default = "default_manifest")]
    pub manifest: String,
    #[serde(default = "default_tsconfig")]
    pub tsconfig: String,
    #[serde(default = "default_outputs")]
    pub outputs: Vec<String>,
    #[serde(default = "default_hook_prefix")]
    pub hook_prefix: String,
    #[serde(default = "default_type_depth")]
    pub type_depth: usize,
}

fn default_includes() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_ignore_test_files() -> bool {
    true
}

fn default_manifest() -> String {
    "package.json".to_string()
}

fn default_tsconfig() -> String {
    "tsconfig.json".to_string()
}

fn default_outputs() -> Vec<String> {
    [".uigraph/graph.json", "node_modules/.cache/uigraph/graph.json"]
        .map(String::from)
        .to_vec()
}

fn default_hook_prefix() -> String {
    "use".to_string()
}

fn default_type_depth() -> usize {
    DEFAULT_TYPE_DEPTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            includes: default_includes(),
            ignores: Vec::new(),
            ignore_test_files: default_ignore_test_files(),
            aliases: BTreeMap::new(),
            manifest: default_manifest(),
            tsconfig: default_tsconfig(),
            outputs: default_outputs(),
            hook_prefix: default_hook_prefix(),
            type_depth: default_type_depth(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Rejects invalid glob patterns, an empty `outputs` list and an empty `hookPrefix`.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Includes without wildcards are literal directories.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.outputs.is_empty() {
            bail!("'outputs' must name at least one path");
        }
        if self.hook_prefix.is_empty() {
            bail!("'hookPrefix' must not be empty");
        }

        Ok(())
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
            tracing::debug!("loaded config from {}", path.display());
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
