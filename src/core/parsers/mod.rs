//! Source parsing.
//!
//! - `jsx`: JS/TS/JSX/TSX source file parser (uses swc for AST generation)

pub mod jsx;
