//! Utility modules

pub mod format;
pub mod memory;
pub mod parsing;

pub use format::*;
pub use memory::*;
pub use parsing::*;
