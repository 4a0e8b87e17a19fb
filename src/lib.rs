//! uigraph - component and hook graph extractor for React-style codebases
//!
//! uigraph statically analyzes TypeScript and JavaScript UI code and writes
//! a JSON document describing every component, hook and data binding per
//! file, plus the render edges between components.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Analysis engine (parse, walk, replay, build)
//! - `error`: Fatal analysis errors

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
