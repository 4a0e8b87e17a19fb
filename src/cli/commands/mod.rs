pub mod analyze;
pub mod init;
mod command_result;

pub use command_result::*;
