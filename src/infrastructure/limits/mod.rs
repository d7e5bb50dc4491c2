//! Destination size enforcement: lossless chunking and per-post truncation

pub mod chunker;
pub mod truncate;

pub use chunker::{chunk_text, enforce_chunk_ceiling};
pub use truncate::truncate_post;
