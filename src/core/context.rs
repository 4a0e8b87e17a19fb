use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result, anyhow};

use crate::{
    cli::args::AnalyzeArgs,
    config::{Config, load_config},
    core::{
        analyzer::{AnalysisOutput, Analyzer, AnalyzerOptions},
        document::Document,
        file_scanner::scan_files,
        resolve::{DependencySet, ModuleResolver, build_alias_table},
    },
};

/// Everything needed to run one analysis: merged configuration, the
/// canonical source root and the discovered files.
///
/// Configuration priority (highest to lowest):
/// 1. CLI arguments (`--output`)
/// 2. `.uigraphrc.json` found from the source root upward
/// 3. Built-in defaults
pub struct AnalysisContext {
    pub config: Config,
    /// Canonical source root; every file key in the document is under it.
    pub root_dir: PathBuf,
    /// Files to analyze, in the order they are processed.
    pub files: BTreeSet<String>,
    /// Paths the scanner could not access.
    pub skipped_count: usize,
    pub config_from_file: bool,
}

impl AnalysisContext {
    pub fn new(args: &AnalyzeArgs) -> Result<Self> {
        let source_root = args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let root_dir = source_root
            .canonicalize()
            .with_context(|| anyhow!("Invalid source root: {:?}", source_root))?;

        let loaded = load_config(&root_dir)?;
        let mut config = loaded.config;
        if !args.output.is_empty() {
            config.outputs = args
                .output
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect();
        }
        config.validate()?;

        let scan = scan_files(
            &root_dir,
            &config.includes,
            &config.ignores,
            config.ignore_test_files,
        );
        tracing::debug!(
            "found {} source files under {}",
            scan.files.len(),
            root_dir.display()
        );

        Ok(Self {
            config,
            root_dir,
            files: scan.files,
            skipped_count: scan.skipped_count,
            config_from_file: loaded.from_file,
        })
    }

    fn relative_to_root(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root_dir.join(path)
        }
    }

    pub fn resolver(&self) -> Result<ModuleResolver> {
        let dependencies =
            DependencySet::from_manifest(&self.relative_to_root(&self.config.manifest))?;
        let tsconfig = self.relative_to_root(&self.config.tsconfig);
        let tsconfig = tsconfig.is_file().then_some(tsconfig.as_path());
        let aliases = build_alias_table(&self.root_dir, tsconfig, &self.config.aliases);
        tracing::debug!(
            "{} dependencies, {} aliases",
            dependencies.len(),
            aliases.len()
        );
        Ok(ModuleResolver::new(
            self.root_dir.clone(),
            aliases,
            dependencies,
        ))
    }

    /// Run the full pipeline over every discovered file.
    pub fn analyze(&self) -> Result<AnalysisOutput> {
        let options = AnalyzerOptions {
            hook_prefix: self.config.hook_prefix.clone(),
            type_depth: self.config.type_depth,
        };
        let mut analyzer = Analyzer::new(self.resolver()?, options);

        for file in &self.files {
            match fs::read_to_string(file) {
                Ok(code) => analyzer.add_file(file, code)?,
                Err(e) => analyzer.skip_file(file, e.to_string()),
            }
        }

        Ok(analyzer.finish()?)
    }

    /// Configured output locations, relative ones joined to the source root.
    pub fn output_paths(&self) -> Vec<PathBuf> {
        self.config
            .outputs
            .iter()
            .map(|output| self.relative_to_root(output))
            .collect()
    }

    pub fn write_outputs(&self, document: &Document) -> Result<Vec<PathBuf>> {
        let paths = self.output_paths();
        for path in &paths {
            document.write_to(path)?;
            tracing::debug!("wrote {}", path.display());
        }
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn args(root: &Path) -> AnalyzeArgs {
        AnalyzeArgs {
            source_root: Some(root.to_path_buf()),
            output: Vec::new(),
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn test_context_uses_config_from_source_root() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join(".git")).unwrap();
        fs::create_dir_all(root.join("app")).unwrap();
        fs::write(root.join("app/page.tsx"), "export const Page = () => <div/>;").unwrap();
        fs::write(
            root.join(".uigraphrc.json"),
            r#"{ "includes": ["app"], "outputs": ["out/graph.json"] }"#,
        )
        .unwrap();

        let ctx = AnalysisContext::new(&args(root)).unwrap();

        assert!(ctx.config_from_file);
        assert_eq!(ctx.files.len(), 1);
        let canonical = root.canonicalize().unwrap();
        assert_eq!(ctx.output_paths(), vec![canonical.join("out/graph.json")]);
    }

    #[test]
    fn test_cli_output_replaces_configured_list() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join(".git")).unwrap();

        let mut cli = args(root);
        cli.output = vec![PathBuf::from("/tmp/elsewhere.json"), PathBuf::from("a.json")];
        let ctx = AnalysisContext::new(&cli).unwrap();

        let canonical = root.canonicalize().unwrap();
        assert_eq!(
            ctx.output_paths(),
            vec![PathBuf::from("/tmp/elsewhere.json"), canonical.join("a.json")]
        );
    }

    #[test]
    fn test_missing_source_root_is_error() {
        let dir = tempdir().unwrap();
        let result = AnalysisContext::new(&args(&dir.path().join("missing")));
        assert!(result.is_err());
    }

    #[test]
    fn test_analyze_and_write_outputs() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join(".git")).unwrap();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(
            root.join("src/App.tsx"),
            "import { Button } from './Button';\nexport const App = () => <Button/>;\n",
        )
        .unwrap();
        fs::write(
            root.join("src/Button.tsx"),
            "export const Button = () => <button/>;\n",
        )
        .unwrap();

        let ctx = AnalysisContext::new(&args(root)).unwrap();
        let output = ctx.analyze().unwrap();

        assert_eq!(output.analyzed, 2);
        assert_eq!(output.document.component_count(), 2);
        assert_eq!(output.document.edges.len(), 1);

        let written = ctx.write_outputs(&output.document).unwrap();
        assert_eq!(written.len(), 2);
        for path in written {
            let content = fs::read_to_string(path).unwrap();
            let parsed: Document = serde_json::from_str(&content).unwrap();
            assert_eq!(parsed, output.document);
        }
    }
}
