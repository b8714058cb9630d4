#![forbid(unsafe_code)]

//! Process-wide input event source.
//!
//! A drag session needs pointer-move and pointer-up events even when the
//! pointer leaves the element that was pressed. Instead of reaching for a
//! global event target, the session subscribes to an injected
//! [`InputSource`] for exactly the channels it needs and unsubscribes when
//! it ends.
//!
//! [`InputRouter`] is the in-process implementation hosts use: it records
//! subscriptions and answers "who wants this event?" so the host can route
//! global pointer traffic to the right listener.
//!
//! # Invariants
//!
//! 1. Subscription ids are never reused within one source.
//! 2. `unsubscribe` of an unknown or already-released id is a no-op
//!    returning `false`.
//! 3. [`InputRouter::listeners`] yields listeners in subscription order.

use std::fmt;

use bitflags::bitflags;

use crate::event::PointerPhase;

bitflags! {
    /// Global pointer channels a listener can subscribe to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct InputChannels: u8 {
        /// Pointer/touch movement.
        const MOVE = 0b01;
        /// Pointer release/touch end.
        const END  = 0b10;
    }
}

impl InputChannels {
    /// The channel that carries events of `phase`, if any.
    ///
    /// Pointer-down is delivered to the pressed surface directly and has no
    /// global channel.
    #[must_use]
    pub const fn for_phase(phase: PointerPhase) -> Option<Self> {
        match phase {
            PointerPhase::Down => None,
            PointerPhase::Move => Some(Self::MOVE),
            PointerPhase::Up => Some(Self::END),
        }
    }
}

/// Identity of a listener (one per draggable surface).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// Handle returned by [`InputSource::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A source of global pointer events that listeners subscribe to.
pub trait InputSource {
    /// Start delivering `channels` to `listener`.
    fn subscribe(&mut self, listener: ListenerId, channels: InputChannels) -> SubscriptionId;

    /// Stop delivering events for `subscription`.
    ///
    /// Returns `false` if the subscription was unknown or already released.
    fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Subscription {
    id: SubscriptionId,
    listener: ListenerId,
    channels: InputChannels,
}

/// In-process [`InputSource`] that records subscriptions for host routing.
#[derive(Debug, Clone, Default)]
pub struct InputRouter {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl InputRouter {
    /// Create an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// True when nobody is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Whether `listener` currently receives any of `channels`.
    #[must_use]
    pub fn is_subscribed(&self, listener: ListenerId, channels: InputChannels) -> bool {
        self.subscriptions
            .iter()
            .any(|sub| sub.listener == listener && sub.channels.intersects(channels))
    }

    /// Listeners that want events on `channel`, in subscription order.
    pub fn listeners(&self, channel: InputChannels) -> impl Iterator<Item = ListenerId> + '_ {
        self.subscriptions
            .iter()
            .filter(move |sub| sub.channels.intersects(channel))
            .map(|sub| sub.listener)
    }

    /// Listeners that want an event of `phase`.
    pub fn listeners_for_phase(&self, phase: PointerPhase) -> Vec<ListenerId> {
        InputChannels::for_phase(phase)
            .map(|channel| self.listeners(channel).collect())
            .unwrap_or_default()
    }
}

impl InputSource for InputRouter {
    fn subscribe(&mut self, listener: ListenerId, channels: InputChannels) -> SubscriptionId {
        self.next_id = self.next_id.saturating_add(1);
        let id = SubscriptionId(self.next_id);
        self.subscriptions.push(Subscription {
            id,
            listener,
            channels,
        });
        id
    }

    fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|sub| sub.id != subscription);
        self.subscriptions.len() != before
    }
}
