// src/lib.rs
// Alva reply core: tweet relevance filtering and answer generation

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod alva;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod fixtures;
pub mod llm;
pub mod persona;
pub mod utils;
pub use error::{ReplyError, Result};
