//! Line assembly for the inbound console stream
//!
//! Bytes arrive one at a time from the serial link. They accumulate in a
//! partial line until the terminator shows up, at which point the content
//! becomes the completed line waiting for the console handler.

use alloc::string::String;
use alloc::vec::Vec;

/// Line terminator byte
pub const LINE_TERMINATOR: u8 = b'\n';

/// Accumulates inbound bytes into complete lines
///
/// There is no length bound on a line: the partial buffer grows until a
/// terminator arrives. A completed line that has not been taken yet is
/// replaced by the next one (last line wins).
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    partial: Vec<u8>,
    completed: Option<String>,
}

impl LineBuffer {
    /// Create an empty line buffer
    pub const fn new() -> Self {
        Self {
            partial: Vec::new(),
            completed: None,
        }
    }

    /// Feed a single byte
    ///
    /// Returns `true` when this byte completed a line.
    pub fn feed(&mut self, byte: u8) -> bool {
        if byte != LINE_TERMINATOR {
            self.partial.push(byte);
            return false;
        }

        // CRLF terminals leave a carriage return behind
        if self.partial.last() == Some(&b'\r') {
            self.partial.pop();
        }

        let line = String::from_utf8_lossy(&self.partial).into_owned();
        self.partial.clear();
        self.completed = Some(line);
        true
    }

    /// Feed multiple bytes
    ///
    /// Returns the number of lines completed. Only the last of them is kept.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> usize {
        bytes.iter().filter(|&&byte| self.feed(byte)).count()
    }

    /// Take the completed line, leaving none behind
    pub fn take_line(&mut self) -> Option<String> {
        self.completed.take()
    }

    /// Peek at the completed line without consuming it
    pub fn completed_line(&self) -> Option<&str> {
        self.completed.as_deref()
    }

    /// Check whether a completed line is waiting
    pub fn has_line(&self) -> bool {
        self.completed.is_some()
    }

    /// Bytes received since the last terminator
    pub fn partial(&self) -> &[u8] {
        &self.partial
    }

    /// Drop any partial and completed line
    pub fn reset(&mut self) {
        self.partial.clear();
        self.completed = None;
    }
}
