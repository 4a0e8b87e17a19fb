//! Import specifier → file key resolution.
//!
//! Order of precedence:
//! 1. relative specifiers (`./x`, `../x`) are joined onto the importing
//!    file's directory and normalized;
//! 2. specifiers naming a manifest dependency are kept verbatim;
//! 3. the alias table rewrites the longest matching prefix;
//! 4. in-project absolute paths are probed on disk for an index file or a
//!    missing extension.
//!
//! Keys are compared byte-for-byte against the keys files were registered
//! under, so every path handed out here goes through [`PathClean`].

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use path_clean::PathClean;

/// Extensions probed for extension-less paths, in priority order.
pub const PROBE_EXTENSIONS: [&str; 4] = ["tsx", "ts", "jsx", "js"];

/// Prefix → replacement path table. Longest prefix wins.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: Vec<(String, PathBuf)>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an alias. A trailing `/` on the prefix is ignored.
    pub fn insert(&mut self, prefix: &str, replacement: PathBuf) {
        let prefix = prefix.trim_end_matches('/').to_string();
        if prefix.is_empty() {
            return;
        }
        match self.entries.iter_mut().find(|(p, _)| *p == prefix) {
            Some(entry) => entry.1 = replacement,
            None => self.entries.push((prefix, replacement)),
        }
        self.entries
            .sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    }

    /// Rewrite `specifier` through the most specific matching alias.
    ///
    /// A prefix matches the whole specifier, or a leading run of complete
    /// path segments (`@/components` matches `@/components/Button` but not
    /// `@/componentsX`).
    pub fn rewrite(&self, specifier: &str) -> Option<PathBuf> {
        self.entries.iter().find_map(|(prefix, target)| {
            if specifier == prefix {
                return Some(target.clone());
            }
            specifier
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
                .map(|rest| target.join(rest))
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Names of external packages declared in the manifest.
#[derive(Debug, Clone, Default)]
pub struct DependencySet {
    names: HashSet<String>,
}

impl DependencySet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact match, or match on the package name of a deep import
    /// (`lodash/debounce` → `lodash`, `@mui/material/Button` → `@mui/material`).
    pub fn contains(&self, specifier: &str) -> bool {
        self.names.contains(specifier)
            || package_name(specifier).is_some_and(|name| self.names.contains(name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn package_name(specifier: &str) -> Option<&str> {
    let mut boundaries = specifier.match_indices('/').map(|(i, _)| i);
    let end = if specifier.starts_with('@') {
        boundaries.nth(1)
    } else {
        boundaries.next()
    };
    end.map(|i| &specifier[..i])
}

#[derive(Debug, Clone)]
pub struct ModuleResolver {
    root: PathBuf,
    aliases: AliasTable,
    dependencies: DependencySet,
}

impl ModuleResolver {
    pub fn new(root: impl Into<PathBuf>, aliases: AliasTable, dependencies: DependencySet) -> Self {
        Self {
            root: root.into(),
            aliases,
            dependencies,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the specifier names an external package.
    pub fn is_dependency(&self, specifier: &str) -> bool {
        !is_relative(specifier) && self.dependencies.contains(specifier)
    }

    /// Resolve `specifier` as imported from `from_file` to a file key.
    ///
    /// Specifiers that match nothing are returned unchanged.
    pub fn resolve(&self, specifier: &str, from_file: &str) -> String {
        if is_relative(specifier) {
            let base = Path::new(from_file).parent().unwrap_or(&self.root);
            return key(probe(base.join(specifier).clean()));
        }
        if self.dependencies.contains(specifier) {
            return specifier.to_string();
        }
        if let Some(rewritten) = self.aliases.rewrite(specifier) {
            return key(probe(rewritten.clean()));
        }
        let path = Path::new(specifier);
        if path.is_absolute() && path.starts_with(&self.root) {
            return key(probe(path.clean()));
        }
        specifier.to_string()
    }
}

fn is_relative(specifier: &str) -> bool {
    specifier == "." || specifier == ".." || specifier.starts_with("./") || specifier.starts_with("../")
}

/// Find the file an import path denotes: the path itself, a directory index,
/// or the path with an extension appended. Falls back to the path unchanged.
fn probe(path: PathBuf) -> PathBuf {
    if path.is_file() {
        return path;
    }
    if path.is_dir() {
        for ext in PROBE_EXTENSIONS {
            let index = path.join(format!("index.{ext}"));
            if index.is_file() {
                return index;
            }
        }
    }
    for ext in PROBE_EXTENSIONS {
        let mut candidate = path.clone().into_os_string();
        candidate.push(".");
        candidate.push(ext);
        let candidate = PathBuf::from(candidate);
        if candidate.is_file() {
            return candidate;
        }
    }
    path
}

fn key(path: PathBuf) -> String {
    path.to_string_lossy().into_owned()
}
