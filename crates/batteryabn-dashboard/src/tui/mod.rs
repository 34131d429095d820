/*
[INPUT]:  Dashboard configuration, request executor, and tracing output
[OUTPUT]: Ratatui dashboard plus the in-memory log buffer shown on the Logs tab
[POS]:    TUI module for batteryabn-dashboard binary
[UPDATE]: When changing TUI layout, keybindings, or log capture
[UPDATE]: 2026-10-07 Split runtime, app state, events, and panels into submodules
*/

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::Mutex as StdMutex;

use tracing_subscriber::fmt::MakeWriter;

mod app;
mod events;
mod runtime;
mod terminal;
mod ui;

pub use runtime::run_tui_with_log;

pub(crate) const LOG_BUFFER_CAPACITY: usize = 2000;

pub type LogBufferHandle = Arc<StdMutex<LogBuffer>>;

#[derive(Debug, Default)]
pub struct LogBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity,
        }
    }

    pub fn handle(capacity: usize) -> LogBufferHandle {
        Arc::new(StdMutex::new(Self::new(capacity)))
    }

    pub fn push_line(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

/// `MakeWriter` that feeds formatted log lines into a [`LogBuffer`]
#[derive(Clone)]
pub struct LogWriterFactory {
    buffer: LogBufferHandle,
}

impl LogWriterFactory {
    pub fn new(buffer: LogBufferHandle) -> Self {
        Self { buffer }
    }
}

pub struct LogWriter {
    buffer: LogBufferHandle,
    partial: String,
}

impl LogWriter {
    fn push(&self, line: String) {
        // a poisoned buffer only loses log lines
        if let Ok(mut guard) = self.buffer.lock() {
            guard.push_line(line);
        }
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let chunk = String::from_utf8_lossy(buf);
        self.partial.push_str(&chunk);
        while let Some(pos) = self.partial.find('\n') {
            let line = self.partial[..pos].trim_end_matches('\r').to_string();
            self.partial = self.partial[pos + 1..].to_string();
            self.push(line);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.partial.is_empty() {
            let line = std::mem::take(&mut self.partial);
            self.push(line);
        }
        Ok(())
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl<'a> MakeWriter<'a> for LogWriterFactory {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            buffer: self.buffer.clone(),
            partial: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_buffer_is_bounded() {
        let mut buffer = LogBuffer::new(2);
        buffer.push_line("a".to_string());
        buffer.push_line("b".to_string());
        buffer.push_line("c".to_string());
        assert_eq!(buffer.snapshot(), vec!["b", "c"]);
    }

    #[test]
    fn test_log_writer_splits_lines() {
        let handle = LogBuffer::handle(10);
        let factory = LogWriterFactory::new(handle.clone());
        {
            let mut writer = factory.make_writer();
            writer.write_all(b"first\r\nsec").expect("write");
            writer.write_all(b"ond\nthird").expect("write");
        }
        let lines = handle.lock().expect("lock").snapshot();
        assert_eq!(lines, vec!["first", "second", "third"]);
    }
}
