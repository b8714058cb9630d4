#![forbid(unsafe_code)]

//! Typed lifecycle hooks.
//!
//! Owners observe a drag (and optionally take over positioning) by adding
//! callbacks for a [`HookEvent`]. Callbacks run in registration order and
//! every callback runs even after one has asked for suppression; the
//! aggregate [`HookVerdict`] is `Suppress` if any of them said so.
//!
//! What suppression means per event:
//!
//! | Event | Effect of `Suppress` |
//! |-------|----------------------|
//! | [`HookEvent::DragStart`] | session does not start |
//! | [`HookEvent::DragMove`] | computed position is not applied, anchor held |
//! | [`HookEvent::DragPostMove`] | none (informational) |
//! | [`HookEvent::DragEnd`] | none (the session always ends) |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sortrow_core::geometry::Point;

use crate::clamp::ClampCode;
use crate::surface::SurfaceId;

/// Lifecycle events a hook can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookEvent {
    /// Before a session starts.
    DragStart,
    /// Before a computed position is applied.
    DragMove,
    /// After the owner has settled a move (for example, reranked a row).
    DragPostMove,
    /// When the session ends on pointer release.
    DragEnd,
}

impl HookEvent {
    /// Canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DragStart => "dragstart",
            Self::DragMove => "dragmove",
            Self::DragPostMove => "dragpostmove",
            Self::DragEnd => "dragend",
        }
    }
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown hook event name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookEventParseError {
    pub name: String,
}

impl fmt::Display for HookEventParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown drag hook event \"{}\"", self.name)
    }
}

impl std::error::Error for HookEventParseError {}

impl FromStr for HookEvent {
    type Err = HookEventParseError;

    /// Accepts canonical names and the mouse-era aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dragstart" | "mousedown" => Ok(Self::DragStart),
            "dragmove" | "mousemove" => Ok(Self::DragMove),
            "dragpostmove" => Ok(Self::DragPostMove),
            "dragend" | "mouseup" => Ok(Self::DragEnd),
            other => Err(HookEventParseError {
                name: other.to_string(),
            }),
        }
    }
}

/// What a hook asks the controller to do with its default effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HookVerdict {
    /// Carry on.
    #[default]
    Proceed,
    /// Skip the default effect for this occurrence.
    Suppress,
}

impl HookVerdict {
    /// Whether the default effect should be skipped.
    #[must_use]
    pub const fn is_suppressed(self) -> bool {
        matches!(self, Self::Suppress)
    }

    /// Aggregate two verdicts: suppressed if either is.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        if self.is_suppressed() || other.is_suppressed() {
            Self::Suppress
        } else {
            Self::Proceed
        }
    }
}

impl From<bool> for HookVerdict {
    /// `true` means "suppress".
    fn from(suppress: bool) -> Self {
        if suppress { Self::Suppress } else { Self::Proceed }
    }
}

/// Data handed to every hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragHookPayload {
    /// Event being dispatched.
    pub event: HookEvent,
    /// Surface being dragged.
    pub surface: SurfaceId,
    /// Pointer position in screen space.
    pub pointer: Point,
    /// Surface position: current for start/end, computed for moves.
    pub position: Point,
    /// Edges violated by `position` (empty outside moves).
    pub clamp: ClampCode,
    /// Discrete rank, when the owner maps positions to ranks.
    pub rank: Option<u32>,
}

/// Identity of a registered hook, used for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HookId(u64);

type HookFn = Box<dyn FnMut(&DragHookPayload) -> HookVerdict>;

struct Subscriber {
    id: HookId,
    event: HookEvent,
    callback: HookFn,
}

/// Ordered hook subscribers keyed by [`HookEvent`].
#[derive(Default)]
pub struct HookRegistry {
    subscribers: Vec<Subscriber>,
    next_id: u64,
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("subscriber_count", &self.subscribers.len())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl HookRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for `event`.
    pub fn add<F>(&mut self, event: HookEvent, callback: F) -> HookId
    where
        F: FnMut(&DragHookPayload) -> HookVerdict + 'static,
    {
        self.next_id = self.next_id.saturating_add(1);
        let id = HookId(self.next_id);
        self.subscribers.push(Subscriber {
            id,
            event,
            callback: Box::new(callback),
        });
        id
    }

    /// Remove the hook `id` registered for `event`.
    ///
    /// Returns `false` if no such hook exists for that event.
    pub fn remove(&mut self, event: HookEvent, id: HookId) -> bool {
        let Some(index) = self
            .subscribers
            .iter()
            .position(|sub| sub.id == id && sub.event == event)
        else {
            return false;
        };
        self.subscribers.remove(index);
        true
    }

    /// Drop every hook.
    pub fn clear(&mut self) {
        self.subscribers.clear();
    }

    /// Hooks registered for `event`.
    #[must_use]
    pub fn count(&self, event: HookEvent) -> usize {
        self.subscribers
            .iter()
            .filter(|sub| sub.event == event)
            .count()
    }

    /// True when no hooks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Run every hook for `payload.event` and aggregate their verdicts.
    pub fn dispatch(&mut self, payload: &DragHookPayload) -> HookVerdict {
        self.subscribers
            .iter_mut()
            .filter(|sub| sub.event == payload.event)
            .fold(HookVerdict::Proceed, |verdict, sub| {
                verdict.merge((sub.callback)(payload))
            })
    }
}
