// src/alva/stream.rs
// NDJSON stream decoding with <GENERATING> window framing

use serde::Deserialize;

/// Opens the generation window
pub const GENERATING_OPEN: &str = "<GENERATING>";
/// Closes the generation window
pub const GENERATING_CLOSE: &str = "</GENERATING>";

/// Node progress info attached to some chunks
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ChunkInfo {
    pub info_id: String,
    pub node_info: String,
}

/// One decoded line of the chat stream
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct StreamChunk {
    #[serde(default)]
    pub info: Option<ChunkInfo>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub question_id: Option<String>,
    #[serde(default)]
    pub answer_id: Option<String>,
    #[serde(default)]
    pub session_name: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}

/// Outcome of parsing a whole stream body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedStream {
    /// Fragments received inside the generation window, in arrival order
    pub answer: String,
    /// Last session id the server reported
    pub session_id: Option<String>,
    /// Last answer id the server reported
    pub answer_id: Option<String>,
    /// Lines that were not valid chunks
    pub skipped_lines: usize,
}

/// Reassemble the answer from a raw NDJSON body.
///
/// Undecodable lines are skipped. Fragments outside the window are dropped and
/// the sentinels themselves are never emitted.
pub fn parse_stream_response(raw: &str) -> ParsedStream {
    let mut parsed = ParsedStream::default();
    let mut generating = false;

    for line in raw.split('\n').filter(|l| !l.is_empty()) {
        let chunk: StreamChunk = match serde_json::from_str(line) {
            Ok(chunk) => chunk,
            Err(_) => {
                parsed.skipped_lines += 1;
                continue;
            }
        };

        if chunk.session_id.is_some() {
            parsed.session_id = chunk.session_id;
        }
        if chunk.answer_id.is_some() {
            parsed.answer_id = chunk.answer_id;
        }

        match chunk.msg.as_deref() {
            Some(GENERATING_OPEN) => generating = true,
            Some(GENERATING_CLOSE) => generating = false,
            Some(fragment) if generating => parsed.answer.push_str(fragment),
            _ => {}
        }
    }

    parsed
}
