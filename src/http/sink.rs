//! Streaming response sinks
//!
//! In stream mode the dispatcher hands raw body chunks to a sink instead of
//! parsing them.

use crate::error::{Error, Result};
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use std::io::Write;

/// Receives raw response bodies in stream mode
///
/// `begin` and `finish` bracket every page; `write` is called once per chunk.
pub trait ResponseSink: Send {
    /// A successful response started
    fn begin(&mut self, _status: StatusCode, _headers: &HeaderMap) -> Result<()> {
        Ok(())
    }

    /// One chunk of the body
    fn write(&mut self, chunk: &[u8]) -> Result<()>;

    /// The body is complete
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl ResponseSink for Vec<u8> {
    fn write(&mut self, chunk: &[u8]) -> Result<()> {
        self.extend_from_slice(chunk);
        Ok(())
    }
}

/// Sink writing to any `io::Write`
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write + Send> WriterSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Unwrap the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> ResponseSink for WriterSink<W> {
    fn write(&mut self, chunk: &[u8]) -> Result<()> {
        self.writer
            .write_all(chunk)
            .map_err(|e| Error::sink(e.to_string()))
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| Error::sink(e.to_string()))
    }
}

/// Sink calling a closure per chunk
pub struct CallbackSink<F> {
    callback: F,
}

impl<F> CallbackSink<F>
where
    F: FnMut(&[u8]) -> Result<()> + Send,
{
    /// Wrap a closure
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ResponseSink for CallbackSink<F>
where
    F: FnMut(&[u8]) -> Result<()> + Send,
{
    fn write(&mut self, chunk: &[u8]) -> Result<()> {
        (self.callback)(chunk)
    }
}
