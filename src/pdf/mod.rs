// src/pdf/mod.rs
pub mod reader;

#[allow(unused_imports)]
pub use reader::{extract_text, LopdfSource, TextSource};
