//! Statement text extraction

pub mod parser;

pub use parser::*;
