//! Terminal event subscription.
//!
//! A reader thread polls crossterm for key and resize events and emits a tick
//! when idle. The subscription lasts as long as the [`EventReader`]; dropping
//! it stops the thread and waits for it to exit.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use tracing::debug;

/// Application events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Nothing happened for one tick.
    Tick,
    /// Keyboard input.
    Key(KeyEvent),
    /// Terminal resize (columns, rows).
    Resize(u16, u16),
}

pub struct EventReader {
    rx: Receiver<Event>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl EventReader {
    /// Subscribe to terminal events, ticking every `tick_rate` when idle.
    pub fn spawn(tick_rate: Duration) -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = stop.clone();

        let handle = thread::Builder::new()
            .name("clanboard-events".into())
            .spawn(move || {
                while !thread_stop.load(Ordering::Relaxed) {
                    let event = match event::poll(tick_rate) {
                        Ok(true) => match event::read() {
                            Ok(CrosstermEvent::Key(key)) => Event::Key(key),
                            Ok(CrosstermEvent::Resize(columns, rows)) => {
                                Event::Resize(columns, rows)
                            }
                            _ => continue,
                        },
                        Ok(false) => Event::Tick,
                        // No terminal to read from: keep ticking at the same pace
                        Err(_) => {
                            thread::sleep(tick_rate);
                            Event::Tick
                        }
                    };

                    if tx.send(event).is_err() {
                        break;
                    }
                }
                debug!("event reader stopped");
            })?;

        Ok(Self {
            rx,
            stop,
            handle: Some(handle),
        })
    }

    /// Receives the next event, blocking until one is available.
    pub fn next(&self) -> Result<Event, RecvError> {
        self.rx.recv()
    }
}

impl Drop for EventReader {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::RecvTimeoutError;

    #[test]
    fn test_reader_ticks_when_idle() {
        let reader = EventReader::spawn(Duration::from_millis(10)).unwrap();
        let event = reader.rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(event, Event::Tick);
    }

    #[test]
    fn test_drop_stops_and_joins_reader() {
        let reader = EventReader::spawn(Duration::from_millis(10)).unwrap();
        assert!(reader.rx.recv_timeout(Duration::from_secs(5)).is_ok());

        let (done_tx, done_rx) = mpsc::channel();
        thread::spawn(move || {
            drop(reader);
            let _ = done_tx.send(());
        });

        assert!(done_rx.recv_timeout(Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn test_stopped_thread_closes_channel() {
        let mut reader = EventReader::spawn(Duration::from_millis(10)).unwrap();
        reader.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = reader.handle.take() {
            handle.join().unwrap();
        }

        // Drain what was sent before the stop, then the sender is gone
        loop {
            match reader.rx.recv_timeout(Duration::from_secs(5)) {
                Ok(_) => continue,
                Err(e) => {
                    assert_eq!(e, RecvTimeoutError::Disconnected);
                    break;
                }
            }
        }
    }
}
