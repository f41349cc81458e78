//! SSE line framing
//!
//! Splits a byte stream into complete text lines. Network chunks may cut a
//! line (or a UTF-8 sequence) anywhere, so incomplete tails are buffered.

use crate::utils::error::{AdapterError, AdapterResult};
use futures::stream::{self, Stream, StreamExt};
use std::collections::VecDeque;
use std::pin::Pin;

/// Incremental line splitter
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed bytes, returning every line completed by them.
    /// Blank lines (SSE event separators) are dropped.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(bytes);

        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            let text = String::from_utf8_lossy(&line);
            let text = text.trim_end_matches(['\r', '\n']);
            if !text.trim().is_empty() {
                lines.push(text.to_string());
            }
        }
        lines
    }

    /// Flush the trailing line left without a newline at end of stream
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.pending);
        let text = String::from_utf8_lossy(&rest);
        let text = text.trim_end_matches('\r');
        if text.trim().is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}

struct LineState<E> {
    inner: Pin<Box<dyn Stream<Item = Result<Vec<u8>, E>> + Send>>,
    buffer: LineBuffer,
    ready: VecDeque<String>,
    done: bool,
}

/// Turn a byte stream into a stream of non-blank lines.
/// A transport error ends the stream after being yielded.
pub fn sse_lines<S, B, E>(bytes: S) -> impl Stream<Item = AdapterResult<String>> + Send
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + 'static,
    E: Into<AdapterError> + Send + 'static,
{
    let state = LineState {
        inner: Box::pin(bytes.map(|chunk| chunk.map(|b| b.as_ref().to_vec()))),
        buffer: LineBuffer::new(),
        ready: VecDeque::new(),
        done: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(line) = state.ready.pop_front() {
                return Some((Ok(line), state));
            }
            if state.done {
                return None;
            }
            match state.inner.next().await {
                Some(Ok(chunk)) => state.ready.extend(state.buffer.push(&chunk)),
                Some(Err(e)) => {
                    state.done = true;
                    return Some((Err(e.into()), state));
                }
                None => {
                    state.done = true;
                    state.ready.extend(state.buffer.finish());
                }
            }
        }
    })
}
