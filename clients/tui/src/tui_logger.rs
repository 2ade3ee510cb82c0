use log::{Level, Log, Metadata, Record};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Oldest entries are dropped once the buffer is full.
const MAX_BUFFERED: usize = 100;

/// Routes `log` records into a bounded shared buffer the UI drains into its
/// log pane. Raw-mode terminals and stderr logging do not mix.
pub struct TuiLogger {
    buffer: Arc<Mutex<VecDeque<String>>>,
    max_level: Level,
}

impl TuiLogger {
    pub fn new(max_level: Level) -> (Self, Arc<Mutex<VecDeque<String>>>) {
        let buffer = Arc::new(Mutex::new(VecDeque::with_capacity(MAX_BUFFERED)));
        (
            TuiLogger {
                buffer: buffer.clone(),
                max_level,
            },
            buffer,
        )
    }
}

impl Log for TuiLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = format!("{}: {}", record.level(), record.args());
        if let Ok(mut buffer) = self.buffer.lock() {
            if buffer.len() == MAX_BUFFERED {
                buffer.pop_front();
            }
            buffer.push_back(msg);
        }
    }

    fn flush(&self) {}
}
