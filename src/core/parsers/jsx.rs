use anyhow::{Result, anyhow};
use std::sync::Arc;
use swc_common::{FileName, GLOBALS, Globals, SourceMap};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

pub struct ParsedJSX {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
}

impl std::fmt::Debug for ParsedJSX {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedJSX")
            .field("module", &self.module)
            .finish_non_exhaustive()
    }
}

/// Parse JS/TS/JSX/TSX source into a module AST.
///
/// Every extension is parsed with the TSX grammar, which accepts plain
/// JavaScript and JSX as well.
pub fn parse_jsx_source(code: String, file_path: &str) -> Result<ParsedJSX> {
    let source_map: Arc<SourceMap> = Default::default();

    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let syntax = Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        });

        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse {}: {:?}", file_path, e))?;

        Ok(ParsedJSX { module, source_map })
    })
}
