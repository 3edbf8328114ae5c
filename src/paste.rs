//! Paced replay of pasted text
//!
//! Pasted text is fed into the normalizer one character at a time on a
//! fixed interval so a front end can animate it. Setting the cancel flag
//! stops scheduling further characters; characters already fed stay.

use crate::keys::{Key, KeyList};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_PASTE_INTERVAL: Duration = Duration::from_millis(25);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasteOutcome {
    /// Characters handed to the normalizer
    pub fed: usize,
    pub cancelled: bool,
}

#[derive(Debug, Clone)]
pub struct PasteFeeder {
    interval: Duration,
    cancel: Arc<AtomicBool>,
}

impl Default for PasteFeeder {
    fn default() -> Self {
        Self::new(DEFAULT_PASTE_INTERVAL)
    }
}

impl PasteFeeder {
    pub fn new(interval: Duration) -> Self {
        Self::with_cancel(interval, Arc::new(AtomicBool::new(false)))
    }

    /// Share an existing flag, e.g. the one the Ctrl-C handler sets
    pub fn with_cancel(interval: Duration, cancel: Arc<AtomicBool>) -> Self {
        PasteFeeder { interval, cancel }
    }

    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    /// Feed `text` into `keys`
    pub fn feed(&self, keys: &mut KeyList, text: &str) -> PasteOutcome {
        self.feed_with(text, |key| {
            keys.add_key(key);
        })
    }

    /// Feed `text` to an arbitrary key sink, waiting `interval` before each
    /// character
    pub fn feed_with<F: FnMut(Key)>(&self, text: &str, mut on_key: F) -> PasteOutcome {
        let mut fed = 0;
        for c in text.chars() {
            if !self.interval.is_zero() {
                thread::sleep(self.interval);
            }
            if self.is_cancelled() {
                debug!(fed, "paste cancelled");
                return PasteOutcome {
                    fed,
                    cancelled: true,
                };
            }
            on_key(Key::from(c));
            fed += 1;
        }
        PasteOutcome {
            fed,
            cancelled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feeds_every_character() {
        let feeder = PasteFeeder::new(Duration::ZERO);
        let mut keys = KeyList::new();
        let outcome = feeder.feed(&mut keys, "3 4+");
        assert_eq!(outcome, PasteOutcome { fed: 4, cancelled: false });
        assert_eq!(keys.to_string(), "3 4 +");
    }

    #[test]
    fn cancel_stops_further_characters() {
        let feeder = PasteFeeder::new(Duration::ZERO);
        let handle = feeder.cancel_handle();
        let mut seen = Vec::new();
        let outcome = feeder.feed_with("12345", |key| {
            seen.push(key);
            if seen.len() == 2 {
                handle.store(true, Ordering::SeqCst);
            }
        });
        assert_eq!(outcome, PasteOutcome { fed: 2, cancelled: true });
        assert_eq!(seen, vec![Key::Char('1'), Key::Char('2')]);
    }

    #[test]
    fn cancelled_before_start_feeds_nothing() {
        let feeder = PasteFeeder::new(Duration::ZERO);
        feeder.cancel();
        let mut keys = KeyList::new();
        let outcome = feeder.feed(&mut keys, "12");
        assert_eq!(outcome.fed, 0);
        assert!(outcome.cancelled);
        assert!(keys.is_empty());
    }

    #[test]
    fn waits_between_characters() {
        let feeder = PasteFeeder::new(Duration::from_millis(5));
        let mut keys = KeyList::new();
        let start = std::time::Instant::now();
        feeder.feed(&mut keys, "123");
        assert!(start.elapsed() >= Duration::from_millis(15));
    }
}
