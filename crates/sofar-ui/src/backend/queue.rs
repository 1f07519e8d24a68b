//! Bounded event buffering shared by backends.
//!
//! Native input arrives on an [`EventSender`] from wherever the windowing
//! system delivers it. The backend's [`EventPump`] drains that channel into a
//! ring of fixed capacity on every poll and hands out the oldest buffered
//! event addressed to the window being polled. Events for other windows stay
//! queued until their own window polls.
//!
//! Overflow is tolerated: events that do not fit are dropped with a warning.

use std::collections::VecDeque;

use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend::WindowKey;
use crate::event::Event;

/// Producer side of a backend's event source.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: Sender<(WindowKey, Event)>,
}

impl EventSender {
    /// Queue `event` for `window`. Returns false if it was dropped.
    pub fn send(&self, window: WindowKey, event: Event) -> bool {
        match self.tx.try_send((window, event)) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::warn!(%window, "native event source full, event dropped");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Create a connected sender and pump, both holding up to `capacity` events.
pub fn event_channel(capacity: usize) -> (EventSender, EventPump) {
    let capacity = capacity.max(1);
    let (tx, rx) = crossbeam_channel::bounded(capacity);
    (EventSender { tx }, EventPump::new(rx, capacity))
}

/// Consumer side: a bounded ring filled from the event source.
#[derive(Debug)]
pub struct EventPump {
    rx: Receiver<(WindowKey, Event)>,
    ring: VecDeque<(WindowKey, Event)>,
    capacity: usize,
    dropped: u64,
}

impl EventPump {
    /// Wrap a receiver with a ring of `capacity` events.
    pub fn new(rx: Receiver<(WindowKey, Event)>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            rx,
            ring: VecDeque::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    /// Drain the source, then take the oldest event for `window`.
    pub fn poll(&mut self, window: WindowKey) -> Option<Event> {
        self.fill();
        let index = self.ring.iter().position(|(key, _)| *key == window)?;
        self.ring.remove(index).map(|(_, event)| event)
    }

    /// Discard everything buffered for `window`.
    pub fn purge(&mut self, window: WindowKey) {
        self.fill();
        self.ring.retain(|(key, _)| *key != window);
    }

    /// Buffered events across all windows.
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// True if nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Events dropped on overflow since creation.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    fn fill(&mut self) {
        let mut dropped = 0u64;
        while let Ok(item) = self.rx.try_recv() {
            if self.ring.len() >= self.capacity {
                dropped += 1;
            } else {
                self.ring.push_back(item);
            }
        }
        if dropped > 0 {
            self.dropped += dropped;
            tracing::warn!(
                dropped,
                capacity = self.capacity,
                "event ring full, events dropped"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: WindowKey = WindowKey(1);
    const B: WindowKey = WindowKey(2);

    #[test]
    fn poll_returns_events_for_the_asked_window_in_order() {
        let (tx, mut pump) = event_channel(8);
        tx.send(A, Event::Map);
        tx.send(B, Event::Expose);
        tx.send(A, Event::press(1, 1));

        assert_eq!(pump.poll(A), Some(Event::Map));
        assert_eq!(pump.poll(A), Some(Event::press(1, 1)));
        assert_eq!(pump.poll(A), None);
        assert_eq!(pump.len(), 1);
        assert_eq!(pump.poll(B), Some(Event::Expose));
    }

    #[test]
    fn overflow_drops_excess_events() {
        let (tx, rx) = crossbeam_channel::bounded(16);
        let sender = EventSender { tx };
        let mut pump = EventPump::new(rx, 4);
        for i in 0..10 {
            sender.send(A, Event::motion(i, 0));
        }
        assert_eq!(pump.poll(A), Some(Event::motion(0, 0)));
        assert_eq!(pump.dropped(), 6);
        assert_eq!(pump.len(), 3);
    }

    #[test]
    fn full_source_rejects_send() {
        let (tx, _pump) = event_channel(2);
        assert!(tx.send(A, Event::Map));
        assert!(tx.send(A, Event::Map));
        assert!(!tx.send(A, Event::Map));
    }

    #[test]
    fn purge_forgets_one_window() {
        let (tx, mut pump) = event_channel(8);
        tx.send(A, Event::Map);
        tx.send(B, Event::Map);
        pump.purge(A);
        assert_eq!(pump.poll(A), None);
        assert_eq!(pump.poll(B), Some(Event::Map));
        assert!(pump.is_empty());
    }
}
