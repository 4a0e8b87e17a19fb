//! Syntax-tree traversal translating nodes into registry mutations.

mod calls;
pub mod collector;
mod declarations;
pub mod event;
mod exports;
mod imports;
mod jsx;
pub mod prepass;
mod types;

#[cfg(test)]
mod tests;

pub use collector::FileCollector;
pub use event::NodeEvent;
pub use prepass::ModuleFacts;
