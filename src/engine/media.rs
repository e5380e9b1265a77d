//! Media Playback Port
//!
//! The playback controller never decodes or outputs audio itself. It drives
//! a host-provided media handle through the [`MediaHandle`] trait and
//! listens for the handle's notifications through scoped subscriptions.
//!
//! Subscriptions are RAII guards: dropping a [`Subscription`] unregisters
//! its listener, so a torn-down widget never receives callbacks.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::Result;

/// Notifications emitted by a media handle on the UI event loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    /// Source metadata is available; carries the duration in seconds
    MetadataLoaded { duration: f64 },
    /// Playback position changed; carries the current position in seconds
    TimeUpdate { position: f64 },
    /// Playback reached the end of the stream
    Ended,
}

/// Listener callback registered on an [`EventHub`]
pub type MediaListener = Box<dyn FnMut(&MediaEvent)>;

type SharedListener = Rc<RefCell<MediaListener>>;

struct HubInner {
    next_id: u64,
    listeners: Vec<(u64, SharedListener)>,
}

/// Listener registry used by media handle implementations
///
/// Single-threaded by construction (`Rc`), matching the UI event loop the
/// notifications arrive on.
#[derive(Clone)]
pub struct EventHub {
    inner: Rc<RefCell<HubInner>>,
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl EventHub {
    /// Create an empty hub
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(HubInner {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Register a listener; it stays registered until the guard is dropped
    pub fn subscribe(&self, listener: MediaListener) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Rc::new(RefCell::new(listener))));
        Subscription {
            id,
            hub: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver an event to every registered listener
    ///
    /// The listener list is snapshotted first, so listeners may drop their
    /// own (or other) subscriptions while being called.
    pub fn emit(&self, event: MediaEvent) {
        let snapshot: Vec<(u64, SharedListener)> = self.inner.borrow().listeners.clone();
        for (id, listener) in snapshot {
            // Skip listeners removed by an earlier callback in this dispatch
            let still_registered = self
                .inner
                .borrow()
                .listeners
                .iter()
                .any(|(live, _)| *live == id);
            if !still_registered {
                continue;
            }
            if let Ok(mut callback) = listener.try_borrow_mut() {
                (&mut *callback)(&event);
            }
        }
    }

    /// Number of live subscriptions
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Scoped registration of a listener on an [`EventHub`]
///
/// Unsubscribes on drop. Outliving the hub is harmless.
#[must_use = "dropping a Subscription immediately unregisters its listener"]
pub struct Subscription {
    id: u64,
    hub: Weak<RefCell<HubInner>>,
}

impl Subscription {
    /// Explicitly release the subscription (same as dropping it)
    pub fn cancel(self) {}

    /// Whether the listener is still registered on a live hub
    pub fn is_active(&self) -> bool {
        let Some(hub) = self.hub.upgrade() else {
            return false;
        };
        let registered = hub.borrow().listeners.iter().any(|(id, _)| *id == self.id);
        registered
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            if let Ok(mut inner) = hub.try_borrow_mut() {
                inner.listeners.retain(|(id, _)| *id != self.id);
            }
        }
    }
}

/// Host-provided media playback capability
///
/// Mirrors what a native audio element offers: imperative play/pause, a
/// writable position, a readable duration and subscribable notifications.
pub trait MediaHandle {
    /// Start or resume playback. Hosts may refuse (e.g. autoplay policy).
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self);

    /// Current playback position in seconds
    fn current_time(&self) -> f64;

    /// Move the playback position; implementations may clamp
    fn set_current_time(&mut self, seconds: f64);

    /// Duration in seconds, `None` until metadata has loaded
    fn duration(&self) -> Option<f64>;

    /// Subscribe to this handle's notifications
    fn subscribe(&self, listener: MediaListener) -> Subscription;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting_listener(counter: &Rc<RefCell<Vec<MediaEvent>>>) -> MediaListener {
        let counter = Rc::clone(counter);
        Box::new(move |event| counter.borrow_mut().push(*event))
    }

    #[test]
    fn test_emit_reaches_subscribers() {
        let hub = EventHub::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _sub = hub.subscribe(counting_listener(&seen));

        hub.emit(MediaEvent::TimeUpdate { position: 1.5 });
        hub.emit(MediaEvent::Ended);

        assert_eq!(
            *seen.borrow(),
            vec![MediaEvent::TimeUpdate { position: 1.5 }, MediaEvent::Ended]
        );
    }

    #[test]
    fn test_drop_unsubscribes() {
        let hub = EventHub::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sub = hub.subscribe(counting_listener(&seen));
        assert_eq!(hub.listener_count(), 1);
        assert!(sub.is_active());

        drop(sub);
        assert_eq!(hub.listener_count(), 0);

        hub.emit(MediaEvent::Ended);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_cancel_unsubscribes() {
        let hub = EventHub::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        hub.subscribe(counting_listener(&seen)).cancel();
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn test_subscription_outlives_hub() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sub = {
            let hub = EventHub::new();
            hub.subscribe(counting_listener(&seen))
        };
        assert!(!sub.is_active());
        drop(sub);
    }

    #[test]
    fn test_listener_may_drop_other_subscription_during_emit() {
        let hub = EventHub::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let victim_slot = Rc::clone(&victim);
        let _killer = hub.subscribe(Box::new(move |_| {
            victim_slot.borrow_mut().take();
        }));
        *victim.borrow_mut() = Some(hub.subscribe(counting_listener(&seen)));

        hub.emit(MediaEvent::Ended);

        assert!(seen.borrow().is_empty());
        assert_eq!(hub.listener_count(), 1);
    }
}
