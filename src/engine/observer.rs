//! Observers for outbound game events.
//!
//! A [`crate::games::peg_solitaire::Game`] owns its observer list, so every
//! subscription ends when the game is dropped.

use std::sync::{Arc, Mutex, PoisonError};

use crate::engine::models::GameEvent;

/// Receives every event a game emits, in order.
pub trait Observer: Send {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> Observer for F
where
    F: FnMut(&GameEvent) + Send,
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

#[derive(Default)]
pub struct ObserverList {
    observers: Vec<Box<dyn Observer>>,
}

impl ObserverList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn notify(&mut self, event: &GameEvent) {
        for observer in &mut self.observers {
            observer.on_event(event);
        }
    }

    pub fn notify_all<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = GameEvent>,
    {
        for event in events {
            self.notify(&event);
        }
    }
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::GameOver { remaining, verdict } => {
                tracing::info!(remaining, ?verdict, "game over");
            }
            GameEvent::BoardCreated { base_row_size, slot_count } => {
                tracing::info!(base_row_size, slot_count, "board created");
            }
            other if other.is_occupancy_change() => tracing::trace!(event = ?other, "occupancy"),
            other => tracing::debug!(event = ?other, "selection"),
        }
    }
}

/// Records events into a shared buffer. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<GameEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Observer for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
