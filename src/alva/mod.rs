// src/alva/mod.rs
// Alva chat backend: domain answers streamed as newline-delimited JSON

mod client;
mod stream;

pub use client::{AlvaClient, AlvaChatRequest, DomainChat};
pub use stream::{ChunkInfo, GENERATING_CLOSE, GENERATING_OPEN, ParsedStream, StreamChunk, parse_stream_response};
