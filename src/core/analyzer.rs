//! The batch pipeline: stream every file once, replay deferred references,
//! then build the document.

use swc_ecma_visit::VisitWith;

use crate::core::document::Document;
use crate::core::extract::{DEFAULT_TYPE_DEPTH, TypeExtractor, TypeScope};
use crate::core::model::{IdGenerator, Locator};
use crate::core::parsers::jsx::parse_jsx_source;
use crate::core::registry::Registry;
use crate::core::resolve::ModuleResolver;
use crate::core::visit::{FileCollector, ModuleFacts};
use crate::error::AnalysisResult;

#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
    pub hook_prefix: String,
    pub type_depth: usize,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            hook_prefix: "use".to_string(),
            type_depth: DEFAULT_TYPE_DEPTH,
        }
    }
}

/// A file skipped because it could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub file: String,
    pub error: String,
}

pub struct AnalysisOutput {
    pub document: Document,
    pub analyzed: usize,
    pub parse_failures: Vec<ParseFailure>,
}

pub struct Analyzer {
    registry: Registry,
    resolver: ModuleResolver,
    options: AnalyzerOptions,
    analyzed: usize,
    parse_failures: Vec<ParseFailure>,
}

impl Analyzer {
    pub fn new(resolver: ModuleResolver, options: AnalyzerOptions) -> Self {
        Self::with_ids(resolver, options, IdGenerator::default())
    }

    pub fn with_ids(resolver: ModuleResolver, options: AnalyzerOptions, ids: IdGenerator) -> Self {
        Self {
            registry: Registry::with_ids(ids),
            resolver,
            options,
            analyzed: 0,
            parse_failures: Vec::new(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Record a file that could not be read.
    pub fn skip_file(&mut self, path: &str, error: String) {
        tracing::warn!("skipping {}: {}", path, error);
        self.parse_failures.push(ParseFailure {
            file: path.to_string(),
            error,
        });
    }

    /// Parse and walk one file. A parse failure skips the file; only
    /// structural errors are returned.
    pub fn add_file(&mut self, path: &str, code: String) -> AnalysisResult<()> {
        let parsed = match parse_jsx_source(code, path) {
            Ok(parsed) => parsed,
            Err(err) => {
                self.skip_file(path, format!("{err:#}"));
                return Ok(());
            }
        };

        let scope = TypeScope::collect(&parsed.module);
        let facts = ModuleFacts::collect(&parsed.module);
        let mut collector = FileCollector::new(
            &mut self.registry,
            &self.resolver,
            &facts,
            Locator::new(&parsed.source_map, path),
            TypeExtractor::new(&scope, self.options.type_depth),
            &self.options.hook_prefix,
            path,
        );
        parsed.module.visit_with(&mut collector);
        collector.finish()?;

        self.analyzed += 1;
        tracing::debug!("analyzed {} ({} pending)", path, self.registry.pending());
        Ok(())
    }

    pub fn finish(mut self) -> AnalysisResult<AnalysisOutput> {
        let pending = self.registry.pending();
        let resolved = self.registry.replay()?;
        tracing::debug!("replay resolved {} of {} deferred references", resolved, pending);
        self.registry.check_imports();
        self.registry.refine_exports();

        let src = self.resolver.root().to_string_lossy();
        let document = Document::build(&src, &self.registry);
        Ok(AnalysisOutput {
            document,
            analyzed: self.analyzed,
            parse_failures: self.parse_failures,
        })
    }
}
