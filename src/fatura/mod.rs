mod client;
pub mod extractor;
mod helper;

pub use client::{Client, PageSource};
