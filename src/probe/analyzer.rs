//! Response body analysis
//!
//! A body is either read up to the byte budget and measured, or skipped
//! when its declared length is over budget. In both cases whatever is left
//! of the body is drained before the response is dropped, so the connection
//! goes back to the pool in a clean state.

use futures::{Stream, StreamExt};
use log::debug;
use reqwest::Response;
use reqwest::header::CONTENT_LENGTH;
use std::pin::pin;

/// Size metrics derived from a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyAnalysis {
    /// Decoded characters read, or the declared length when skipped
    pub adjusted_size: u64,
    /// Space-separated tokens in the bytes read, 0 when skipped
    pub word_count: usize,
}

impl BodyAnalysis {
    /// Analysis left at its defaults
    pub fn skipped(declared_length: Option<u64>) -> Self {
        Self {
            adjusted_size: declared_length.unwrap_or(0),
            word_count: 0,
        }
    }

    /// Measure the bytes that were read.
    ///
    /// Words are split on the space byte only, so an empty body still
    /// counts as one (empty) word.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let adjusted_size = char_count(bytes) as u64;
        let word_count = memchr::memchr_iter(b' ', bytes).count() + 1;
        Self {
            adjusted_size,
            word_count,
        }
    }
}

/// Count decoded characters, with every byte of an invalid or truncated
/// sequence counted as one character of its own.
fn char_count(mut bytes: &[u8]) -> usize {
    let mut count = 0;
    loop {
        match std::str::from_utf8(bytes) {
            Ok(text) => return count + text.chars().count(),
            Err(err) => {
                let (valid, rest) = bytes.split_at(err.valid_up_to());
                count += std::str::from_utf8(valid).map_or(0, |text| text.chars().count());
                let invalid = err.error_len().unwrap_or(rest.len());
                count += invalid;
                bytes = &rest[invalid..];
            }
        }
    }
}

/// Length the server declared for the body, if any.
pub fn declared_length(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .or_else(|| response.content_length())
}

/// Analyze and release a response body.
///
/// Consumes the response, so the body is closed on every path out of
/// this function.
pub async fn analyze(response: Response, max_body_bytes: u64) -> BodyAnalysis {
    let declared = declared_length(&response);
    let url = response.url().to_string();
    let mut body = pin!(response.bytes_stream());

    let analysis = match declared {
        Some(length) if length > max_body_bytes => {
            debug!("{url}: declared length {length} over budget {max_body_bytes}, skipping analysis");
            BodyAnalysis::skipped(declared)
        }
        _ => match read_bounded(&mut body, max_body_bytes).await {
            Ok(bytes) => BodyAnalysis::from_bytes(&bytes),
            Err(err) => {
                debug!("{url}: body read failed, skipping analysis: {err}");
                BodyAnalysis::skipped(declared)
            }
        },
    };

    let discarded = drain(body).await;
    if discarded > 0 {
        debug!("{url}: drained {discarded} unanalyzed body bytes");
    }

    analysis
}

/// Read at most `max_bytes` bytes from the body.
async fn read_bounded<S, B>(body: &mut S, max_bytes: u64) -> reqwest::Result<Vec<u8>>
where
    S: Stream<Item = reqwest::Result<B>> + Unpin,
    B: AsRef<[u8]>,
{
    let cap = usize::try_from(max_bytes).unwrap_or(usize::MAX);
    let mut buf = Vec::new();

    while buf.len() < cap {
        let Some(chunk) = body.next().await else {
            break;
        };
        let chunk = chunk?;
        let chunk = chunk.as_ref();
        let take = chunk.len().min(cap - buf.len());
        buf.extend_from_slice(&chunk[..take]);
    }

    Ok(buf)
}

/// Discard the rest of the body without decoding it. Never fails.
async fn drain<S, B>(mut body: S) -> usize
where
    S: Stream<Item = reqwest::Result<B>> + Unpin,
    B: AsRef<[u8]>,
{
    let mut discarded = 0;
    while let Some(chunk) = body.next().await {
        match chunk {
            Ok(chunk) => discarded += chunk.as_ref().len(),
            Err(err) => {
                debug!("body drain stopped early: {err}");
                break;
            }
        }
    }
    discarded
}
