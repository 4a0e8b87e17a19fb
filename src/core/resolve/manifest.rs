//! Readers for `package.json` dependencies and `tsconfig.json` path aliases.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use path_clean::PathClean;
use serde::Deserialize;

use super::module_resolver::{AliasTable, DependencySet};

const DEPENDENCY_SECTIONS: [&str; 4] = [
    "dependencies",
    "devDependencies",
    "peerDependencies",
    "optionalDependencies",
];

impl DependencySet {
    /// Collect package names from every dependency section of a manifest.
    ///
    /// A missing manifest yields an empty set.
    pub fn from_manifest(path: &Path) -> Result<Self> {
        if !path.is_file() {
            tracing::debug!("no package manifest at {}", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        let manifest: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse manifest: {}", path.display()))?;

        let names = DEPENDENCY_SECTIONS
            .iter()
            .filter_map(|section| manifest.get(section).and_then(|v| v.as_object()))
            .flat_map(|deps| deps.keys().cloned());
        Ok(Self::new(names))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TsConfig {
    #[serde(default)]
    compiler_options: CompilerOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompilerOptions {
    base_url: Option<String>,
    #[serde(default)]
    paths: BTreeMap<String, Vec<String>>,
}

/// Read `compilerOptions.paths` into alias entries.
///
/// `"@/*": ["./src/*"]` becomes `@ → <baseUrl>/src`. Only the first target of
/// each entry is used. tsconfig files commonly carry comments; one that is not
/// plain JSON is skipped with a warning.
pub fn tsconfig_aliases(path: &Path) -> Vec<(String, PathBuf)> {
    let Ok(content) = fs::read_to_string(path) else {
        tracing::debug!("no tsconfig at {}", path.display());
        return Vec::new();
    };
    let config: TsConfig = match serde_json::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("ignoring tsconfig paths in {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    let dir = path.parent().unwrap_or(Path::new("."));
    let base = match &config.compiler_options.base_url {
        Some(base_url) => dir.join(base_url),
        None => dir.to_path_buf(),
    };

    config
        .compiler_options
        .paths
        .iter()
        .filter_map(|(pattern, targets)| {
            let target = targets.first()?;
            let prefix = pattern.trim_end_matches('*').trim_end_matches('/');
            let target = target.trim_end_matches('*').trim_end_matches('/');
            Some((prefix.to_string(), base.join(target).clean()))
        })
        .filter(|(prefix, _)| !prefix.is_empty())
        .collect()
}

/// Build the alias table: tsconfig entries first, configured entries override.
///
/// Relative configured replacements are resolved against `root`.
pub fn build_alias_table(
    root: &Path,
    tsconfig: Option<&Path>,
    configured: &BTreeMap<String, String>,
) -> AliasTable {
    let mut table = AliasTable::new();
    if let Some(tsconfig) = tsconfig {
        for (prefix, target) in tsconfig_aliases(tsconfig) {
            table.insert(&prefix, target);
        }
    }
    for (prefix, replacement) in configured {
        let replacement = Path::new(replacement);
        let target = if replacement.is_absolute() {
            replacement.to_path_buf()
        } else {
            root.join(replacement)
        };
        table.insert(prefix, target.clean());
    }
    table
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_manifest_collects_all_sections() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("package.json");
        fs::write(
            &path,
            r#"{
                "name": "app",
                "dependencies": { "react": "^19.0.0" },
                "devDependencies": { "@testing-library/react": "^16.0.0" },
                "peerDependencies": { "react-dom": "*" }
            }"#,
        )
        .unwrap();

        let deps = DependencySet::from_manifest(&path).unwrap();

        assert_eq!(deps.len(), 3);
        assert!(deps.contains("react"));
        assert!(deps.contains("@testing-library/react"));
        assert!(!deps.contains("app"));
    }

    #[test]
    fn test_missing_manifest_is_empty() {
        let dir = tempdir().unwrap();
        let deps = DependencySet::from_manifest(&dir.path().join("package.json")).unwrap();
        assert!(deps.is_empty());
    }

    #[test]
    fn test_invalid_manifest_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, "{ nope").unwrap();
        assert!(DependencySet::from_manifest(&path).is_err());
    }

    #[test]
    fn test_tsconfig_paths_respect_base_url() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tsconfig.json");
        fs::write(
            &path,
            r#"{
                "compilerOptions": {
                    "baseUrl": "./web",
                    "paths": { "@/*": ["./src/*"], "config": ["./config/index.ts"] }
                }
            }"#,
        )
        .unwrap();

        let aliases = tsconfig_aliases(&path);

        assert_eq!(
            aliases,
            vec![
                ("@".to_string(), dir.path().join("web/src")),
                ("config".to_string(), dir.path().join("web/config/index.ts")),
            ]
        );
    }

    #[test]
    fn test_configured_aliases_override_tsconfig() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tsconfig.json");
        fs::write(
            &path,
            r#"{ "compilerOptions": { "paths": { "@/*": ["./src/*"] } } }"#,
        )
        .unwrap();
        let configured = BTreeMap::from([("@".to_string(), "app".to_string())]);

        let table = build_alias_table(dir.path(), Some(&path), &configured);

        assert_eq!(table.len(), 1);
        assert_eq!(table.rewrite("@/x"), Some(dir.path().join("app/x")));
    }

    #[test]
    fn test_commented_tsconfig_is_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tsconfig.json");
        fs::write(&path, "// generated\n{ \"compilerOptions\": {} }").unwrap();
        assert!(tsconfig_aliases(&path).is_empty());
    }
}
