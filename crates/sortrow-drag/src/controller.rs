#![forbid(unsafe_code)]

//! Drag session lifecycle for one draggable surface.
//!
//! ```text
//! Idle --pointer_down--> Dragging --pointer_move--> Dragging --pointer_up--> Idle
//!                            \------------------ remove() -----------------/
//! ```
//!
//! # Invariants
//!
//! 1. At most one session per controller; a surface already marked dragged
//!    ignores pointer-down.
//! 2. Move/end listeners are subscribed exactly while `Dragging` and are
//!    released on every exit path (`pointer_up`, `remove`). Pointer-up ends
//!    an active session even if the surface marker was cleared elsewhere.
//! 3. With a container, an applied position always lies within
//!    `[origin, origin + container - element]` on each axis the element
//!    fits in.
//! 4. The anchor advances on an axis only when that axis was not clamped and
//!    no hook suppressed the move.
//!
//! Every handler returns a [`DragDispatch`] describing what happened,
//! including an explicit reason when the event was ignored.

use std::fmt;
use std::time::Duration;

use sortrow_core::event::{PointerEvent, PointerKind, PointerPhase};
use sortrow_core::geometry::{Point, Rect};
use sortrow_core::input::{InputChannels, InputSource, SubscriptionId};
use web_time::Instant;

use crate::clamp::{ClampCode, ClampResolution};
use crate::hooks::{DragHookPayload, HookEvent, HookId, HookRegistry, HookVerdict};
use crate::surface::{DragSurface, SurfaceId};

/// Controller configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Bounding container for clamping, in the surface's coordinate space.
    /// Its origin is honored: positions are pinned inside
    /// `[x, x + width - element] x [y, y + height - element]`.
    pub container: Option<Rect>,
    /// Whether a single-finger touch may start a drag.
    pub allow_touch: bool,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            container: None,
            allow_touch: true,
        }
    }
}

impl DragConfig {
    /// Clamp against `container`.
    #[must_use]
    pub fn with_container(mut self, container: Rect) -> Self {
        self.container = Some(container);
        self
    }

    /// Ignore touch starts.
    #[must_use]
    pub fn mouse_only(mut self) -> Self {
        self.allow_touch = false;
        self
    }

    /// Check the configuration.
    pub fn validate(&self) -> Result<(), DragControllerError> {
        match self.container {
            Some(container) if container.is_empty() => {
                Err(DragControllerError::InvalidContainer {
                    width: container.width,
                    height: container.height,
                })
            }
            _ => Ok(()),
        }
    }
}

/// One active drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    anchor: Point,
    clamp: ClampCode,
    bounds: Option<Rect>,
    subscription: SubscriptionId,
    pointer: PointerKind,
    origin: Point,
    started_at: Instant,
}

impl DragSession {
    /// Movement reference point in screen space.
    #[must_use]
    pub const fn anchor(&self) -> Point {
        self.anchor
    }

    /// Edges violated by the last computed position.
    #[must_use]
    pub const fn clamp(&self) -> ClampCode {
        self.clamp
    }

    /// Container snapshot taken when the session started.
    #[must_use]
    pub const fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Global input subscription held by this session.
    #[must_use]
    pub const fn subscription(&self) -> SubscriptionId {
        self.subscription
    }

    /// Device that started the session.
    #[must_use]
    pub const fn pointer(&self) -> PointerKind {
        self.pointer
    }

    /// Surface position when the session started.
    #[must_use]
    pub const fn origin(&self) -> Point {
        self.origin
    }

    /// Time since the session started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}

/// Controller lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Why an incoming event was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragIgnoredReason {
    /// Not a primary-button press or single-finger touch start.
    NotPrimaryActivation,
    /// Touch start while touch is disabled.
    TouchDisabled,
    /// The surface is already being dragged.
    AlreadyDragged,
    /// A start hook suppressed the session.
    StartSuppressed,
    /// Move or release without an active session.
    NotDragging,
    /// The controller was removed and no longer listens.
    Detached,
}

/// What one handler call did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// A session started with `anchor` as reference.
    Started { anchor: Point },
    /// A move was computed; `applied` is false when a hook suppressed it.
    Moved {
        position: Point,
        clamp: ClampCode,
        applied: bool,
    },
    /// The session ended with the surface at `position`.
    Ended { position: Point, elapsed: Duration },
    /// Nothing happened.
    Ignored(DragIgnoredReason),
}

/// Result of one pointer event dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragDispatch {
    pub phase: PointerPhase,
    pub surface: SurfaceId,
    pub outcome: DragOutcome,
}

impl DragDispatch {
    /// Whether the event was ignored.
    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        matches!(self.outcome, DragOutcome::Ignored(_))
    }

    /// Ignored reason, if any.
    #[must_use]
    pub const fn ignored_reason(&self) -> Option<DragIgnoredReason> {
        match self.outcome {
            DragOutcome::Ignored(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Drag controller for one surface.
#[derive(Debug)]
pub struct DragController {
    surface: SurfaceId,
    config: DragConfig,
    hooks: HookRegistry,
    state: DragState,
    detached: bool,
}

impl DragController {
    /// Create a controller for `surface`.
    ///
    /// Fails if `surface` is the null id or the container is degenerate;
    /// both are programming errors, not conditions to retry.
    pub fn new(surface: SurfaceId, config: DragConfig) -> Result<Self, DragControllerError> {
        if !surface.is_valid() {
            return Err(DragControllerError::InvalidSurface);
        }
        config.validate()?;
        Ok(Self {
            surface,
            config,
            hooks: HookRegistry::new(),
            state: DragState::Idle,
            detached: false,
        })
    }

    /// Surface this controller drives.
    #[must_use]
    pub const fn surface(&self) -> SurfaceId {
        self.surface
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> DragConfig {
        self.config
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> DragState {
        self.state
    }

    /// Active session, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// Whether a session is active.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Whether [`remove`](Self::remove) has been called.
    #[must_use]
    pub const fn is_detached(&self) -> bool {
        self.detached
    }

    /// Replace the container. An active session keeps its snapshot; the new
    /// container applies from the next session.
    pub fn set_container(&mut self, container: Option<Rect>) -> Result<(), DragControllerError> {
        let config = DragConfig {
            container,
            ..self.config
        };
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Register a lifecycle hook.
    pub fn add_hook<F>(&mut self, event: HookEvent, callback: F) -> HookId
    where
        F: FnMut(&DragHookPayload) -> HookVerdict + 'static,
    {
        self.hooks.add(event, callback)
    }

    /// Deregister a lifecycle hook.
    pub fn remove_hook(&mut self, event: HookEvent, id: HookId) -> bool {
        self.hooks.remove(event, id)
    }

    /// Registered hooks.
    #[must_use]
    pub const fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// Handle pointer-down on the surface.
    pub fn pointer_down<S, I>(
        &mut self,
        surface: &mut S,
        event: &PointerEvent,
        input: &mut I,
    ) -> DragDispatch
    where
        S: DragSurface + ?Sized,
        I: InputSource + ?Sized,
    {
        if self.detached {
            return self.ignored(PointerPhase::Down, DragIgnoredReason::Detached);
        }
        if event.kind == PointerKind::Touch && !self.config.allow_touch {
            return self.ignored(PointerPhase::Down, DragIgnoredReason::TouchDisabled);
        }
        if !event.is_primary_activation() {
            return self.ignored(PointerPhase::Down, DragIgnoredReason::NotPrimaryActivation);
        }
        if surface.is_dragged() || self.is_dragging() {
            return self.ignored(PointerPhase::Down, DragIgnoredReason::AlreadyDragged);
        }

        let origin = surface.bounds().origin();
        let payload = self.payload(
            HookEvent::DragStart,
            event.position,
            origin,
            ClampCode::empty(),
        );
        if self.hooks.dispatch(&payload).is_suppressed() {
            return self.ignored(PointerPhase::Down, DragIgnoredReason::StartSuppressed);
        }

        let subscription =
            input.subscribe(self.surface.listener(), InputChannels::MOVE | InputChannels::END);
        surface.set_dragged(true);
        self.state = DragState::Dragging(DragSession {
            anchor: event.position,
            clamp: ClampCode::empty(),
            bounds: self.config.container,
            subscription,
            pointer: event.kind,
            origin,
            started_at: Instant::now(),
        });

        #[cfg(feature = "tracing")]
        sortrow_core::debug!(
            message = "drag.start",
            surface = self.surface.get(),
            anchor_x = event.position.x,
            anchor_y = event.position.y,
            subscription = subscription.get()
        );

        self.dispatch(
            PointerPhase::Down,
            DragOutcome::Started {
                anchor: event.position,
            },
        )
    }

    /// Handle a global pointer-move while dragging.
    pub fn pointer_move<S>(&mut self, surface: &mut S, event: &PointerEvent) -> DragDispatch
    where
        S: DragSurface + ?Sized,
    {
        let DragState::Dragging(mut session) = self.state else {
            return self.ignored(PointerPhase::Move, DragIgnoredReason::NotDragging);
        };

        let pointer = event.position;
        let bounds = surface.bounds();
        let candidate = bounds
            .origin()
            .offset_by(-session.anchor.x, -session.anchor.y)
            .offset_by(pointer.x, pointer.y);

        let (clamp, resolution) = match session.bounds {
            Some(container) => {
                let origin = container.origin();
                let local = candidate.offset_by(-origin.x, -origin.y);
                let clamp = ClampCode::detect(local, bounds.size(), container.size());
                let mut resolution = clamp.resolve(local, bounds.size(), container.size());
                resolution.position = resolution.position.offset_by(origin.x, origin.y);
                (clamp, resolution)
            }
            None => (ClampCode::empty(), ClampResolution::free(candidate)),
        };
        session.clamp = clamp;

        let payload = self.payload(HookEvent::DragMove, pointer, resolution.position, clamp);
        let applied = !self.hooks.dispatch(&payload).is_suppressed();
        if applied {
            surface.set_position(resolution.position);
            if resolution.advance_x {
                session.anchor.x = pointer.x;
            }
            if resolution.advance_y {
                session.anchor.y = pointer.y;
            }
        }
        self.state = DragState::Dragging(session);

        #[cfg(feature = "tracing")]
        sortrow_core::trace!(
            message = "drag.move",
            surface = self.surface.get(),
            x = resolution.position.x,
            y = resolution.position.y,
            clamp = clamp.code(),
            applied
        );

        self.dispatch(
            PointerPhase::Move,
            DragOutcome::Moved {
                position: resolution.position,
                clamp,
                applied,
            },
        )
    }

    /// Notify post-move hooks once the owner has settled a move, for example
    /// after mapping the new position to a rank.
    ///
    /// Does nothing outside a session. Post-move hooks cannot suppress
    /// anything; their verdict is discarded.
    pub fn settle_move(&mut self, pointer: Point, position: Point, rank: Option<u32>) {
        let Some(clamp) = self.session().map(DragSession::clamp) else {
            return;
        };
        let mut payload = self.payload(HookEvent::DragPostMove, pointer, position, clamp);
        payload.rank = rank;
        let _ = self.hooks.dispatch(&payload);
    }

    /// Handle a global pointer-up while dragging.
    ///
    /// The session ends whenever the controller holds one, even if the
    /// surface's dragged marker was cleared externally, so listeners never
    /// outlive the session.
    pub fn pointer_up<S, I>(
        &mut self,
        surface: &mut S,
        event: &PointerEvent,
        input: &mut I,
    ) -> DragDispatch
    where
        S: DragSurface + ?Sized,
        I: InputSource + ?Sized,
    {
        let DragState::Dragging(session) = self.state else {
            return self.ignored(PointerPhase::Up, DragIgnoredReason::NotDragging);
        };

        let position = surface.bounds().origin();
        let payload = self.payload(HookEvent::DragEnd, event.position, position, session.clamp);
        let _ = self.hooks.dispatch(&payload);
        self.end_session(surface, input, session);
        let elapsed = session.elapsed();

        #[cfg(feature = "tracing")]
        sortrow_core::debug!(
            message = "drag.end",
            surface = self.surface.get(),
            x = position.x,
            y = position.y,
            elapsed_ms = saturating_millis(elapsed)
        );

        self.dispatch(PointerPhase::Up, DragOutcome::Ended { position, elapsed })
    }

    /// Stop listening: terminate any session without running end hooks,
    /// release its global listeners, and optionally drop every hook.
    ///
    /// Returns the session that was terminated, if one was active. The
    /// controller ignores pointer-down until [`reattach`](Self::reattach).
    pub fn remove<S, I>(
        &mut self,
        surface: &mut S,
        input: &mut I,
        clear_hooks: bool,
    ) -> Option<DragSession>
    where
        S: DragSurface + ?Sized,
        I: InputSource + ?Sized,
    {
        let terminated = match self.state {
            DragState::Dragging(session) => {
                self.end_session(surface, input, session);
                Some(session)
            }
            DragState::Idle => None,
        };
        if clear_hooks {
            self.hooks.clear();
        }
        self.detached = true;

        #[cfg(feature = "tracing")]
        sortrow_core::debug!(
            message = "drag.remove",
            surface = self.surface.get(),
            terminated = terminated.is_some(),
            clear_hooks
        );

        terminated
    }

    /// Accept pointer-down again after [`remove`](Self::remove).
    pub fn reattach(&mut self) {
        self.detached = false;
    }

    fn end_session<S, I>(&mut self, surface: &mut S, input: &mut I, session: DragSession)
    where
        S: DragSurface + ?Sized,
        I: InputSource + ?Sized,
    {
        surface.set_dragged(false);
        input.unsubscribe(session.subscription);
        self.state = DragState::Idle;
    }

    fn payload(
        &self,
        event: HookEvent,
        pointer: Point,
        position: Point,
        clamp: ClampCode,
    ) -> DragHookPayload {
        DragHookPayload {
            event,
            surface: self.surface,
            pointer,
            position,
            clamp,
            rank: None,
        }
    }

    const fn dispatch(&self, phase: PointerPhase, outcome: DragOutcome) -> DragDispatch {
        DragDispatch {
            phase,
            surface: self.surface,
            outcome,
        }
    }

    fn ignored(&self, phase: PointerPhase, reason: DragIgnoredReason) -> DragDispatch {
        #[cfg(feature = "tracing")]
        sortrow_core::trace!(
            message = "drag.ignored",
            surface = self.surface.get(),
            ?phase,
            ?reason
        );
        self.dispatch(phase, DragOutcome::Ignored(reason))
    }
}

/// Controller construction/configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragControllerError {
    /// The target is not a surface (null id).
    InvalidSurface,
    /// The container has zero or negative extent.
    InvalidContainer { width: i32, height: i32 },
}

impl fmt::Display for DragControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSurface => write!(f, "drag controller requires a surface (got null id)"),
            Self::InvalidContainer { width, height } => {
                write!(f, "drag container must have positive extent (got {width}x{height})")
            }
        }
    }
}

impl std::error::Error for DragControllerError {}

/// Whole milliseconds in `elapsed`, saturating at `u64::MAX`.
#[cfg(any(feature = "tracing", test))]
fn saturating_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
