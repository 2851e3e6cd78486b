//! Event Logger
//!
//! Append-only JSONL event logging, shared by every agent thread.
//! Logging is purely observational: a failed write is reported and skipped,
//! never propagated into an agent's tick.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

use haunt_events::{Event, EventKind};

use crate::sync::lock;

#[derive(Debug)]
enum Sink {
    File(BufWriter<File>),
    Memory(Vec<Event>),
    Null,
}

#[derive(Debug)]
struct LoggerInner {
    sink: Sink,
    event_count: u64,
}

/// Thread-safe event log
#[derive(Debug)]
pub struct EventLogger {
    inner: Mutex<LoggerInner>,
}

impl EventLogger {
    fn with_sink(sink: Sink) -> Self {
        Self {
            inner: Mutex::new(LoggerInner {
                sink,
                event_count: 0,
            }),
        }
    }

    /// Create a new event logger writing to the specified path
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self::with_sink(Sink::File(BufWriter::new(file))))
    }

    /// Create a logger that discards events
    pub fn null() -> Self {
        Self::with_sink(Sink::Null)
    }

    /// Create a logger that keeps events in memory (for testing)
    pub fn memory() -> Self {
        Self::with_sink(Sink::Memory(Vec::new()))
    }

    /// Get the current event count
    pub fn event_count(&self) -> u64 {
        lock(&self.inner).event_count
    }

    /// Log an event, returning the record that was written
    pub fn log(&self, kind: EventKind) -> Event {
        let mut inner = lock(&self.inner);
        inner.event_count += 1;
        let event = Event::new(inner.event_count, kind);

        match &mut inner.sink {
            Sink::File(writer) => {
                let written = serde_json::to_string(&event)
                    .map_err(std::io::Error::from)
                    .and_then(|json| writeln!(writer, "{}", json));
                if let Err(e) = written {
                    tracing::warn!("Failed to write event {}: {}", event.event_id, e);
                }
            }
            Sink::Memory(events) => events.push(event.clone()),
            Sink::Null => {}
        }
        event
    }

    /// Events kept by a memory logger; empty for other sinks
    pub fn events(&self) -> Vec<Event> {
        match &lock(&self.inner).sink {
            Sink::Memory(events) => events.clone(),
            _ => Vec::new(),
        }
    }

    /// Flush the buffer to disk
    pub fn flush(&self) -> std::io::Result<()> {
        if let Sink::File(writer) = &mut lock(&self.inner).sink {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for EventLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!("Failed to flush event logger: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haunt_events::{EvidenceKind, ExitReason, GhostClass};
    use std::io::BufRead;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_event_logging_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");

        let logger = EventLogger::new(&path).unwrap();
        logger.log(EventKind::GhostInit {
            class: GhostClass::Poltergeist,
            room: "Garage".into(),
        });
        logger.log(EventKind::HunterInit {
            hunter: "Ray".into(),
            equipment: EvidenceKind::Fingerprints,
        });
        logger.flush().unwrap();

        let file = File::open(&path).unwrap();
        let lines: Vec<String> = std::io::BufReader::new(file)
            .lines()
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines.len(), 2);

        let parsed: Event = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(parsed.event_id, "evt_00000002");
        assert_eq!(parsed.kind.hunter(), Some("Ray"));
    }

    #[test]
    fn test_null_logger() {
        let logger = EventLogger::null();
        let event = logger.log(EventKind::GhostExit {
            reason: ExitReason::Bored,
        });

        assert_eq!(event.sequence, 1);
        assert_eq!(logger.event_count(), 1);
        assert!(logger.events().is_empty());
    }

    #[test]
    fn test_concurrent_logging_keeps_unique_sequence() {
        let logger = Arc::new(EventLogger::memory());

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let logger = Arc::clone(&logger);
                thread::spawn(move || {
                    for _ in 0..50 {
                        logger.log(EventKind::HunterMove {
                            hunter: format!("H{}", i),
                            room: "Hallway".into(),
                        });
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let events = logger.events();
        assert_eq!(events.len(), 200);
        for (i, event) in events.iter().enumerate() {
            assert_eq!(event.sequence, i as u64 + 1);
        }
    }
}
