//! Gesture disambiguation state machine.
//!
//! Recognizes four gestures from raw touch-start/move/end events:
//! - Single-finger drag
//! - Long-press-and-drag
//! - Two-finger pan
//! - Two-finger pinch-zoom
//!
//! The host feeds every raw touch event into [`GestureRecognizer::on_touch_start`],
//! [`GestureRecognizer::on_touch_move`] and [`GestureRecognizer::on_touch_end`],
//! and drives long-press promotion by calling [`GestureRecognizer::poll`] once
//! [`GestureRecognizer::long_press_deadline`] has passed. Recognized gestures
//! fire the registered callbacks synchronously on the delivering thread.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};
use web_time::Instant;

use crate::event::{Point, TouchEvent, TouchPoint};
use crate::listener::{
    DragListener, GestureKind, GestureListener, ListenerRegistry, PanListener, ZoomListener,
};

/// Configuration for gesture recognition. Fixed for the recognizer's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Time a stationary contact must be held to become a long press.
    pub long_touch_duration: Duration,

    /// Pixel radius of allowed jitter before long-press promotion is canceled.
    pub tolerance: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_touch_duration: Duration::from_millis(500),
            tolerance: 3.0,
        }
    }
}

/// Session state. At most one gesture session is active at a time; everything
/// here is transient and resets to `Idle` on touch-end or on losing a tracked
/// finger.
#[derive(Debug)]
enum SessionState {
    Idle,

    /// Contact down, long-press deadline pending. `drag_armed` records whether
    /// a single-finger drag session began on the same contact, so a
    /// tolerance-exceeding move can fall through into an ordinary drag.
    /// The event is retained so promotion can hand it to the start callbacks.
    LongPressArmed {
        armed_at: Instant,
        pressed: TouchPoint,
        event: TouchEvent,
        drag_armed: bool,
    },

    /// Drag session begun, long press ruled out, no confirmed motion yet.
    SingleDragArmed,

    /// Drag motion confirmed.
    SingleDragging,

    /// Long-press threshold elapsed; every further move feeds `longTouchDrag`.
    LongPressActive,

    /// Two tracked contacts; `cache` holds their last seen positions.
    TwoFingerActive { cache: [TouchPoint; 2] },
}

/// Recognizes touch gestures and dispatches them to registered listeners.
pub struct GestureRecognizer {
    config: GestureConfig,
    listeners: ListenerRegistry,
    state: SessionState,
    /// Most recent single-finger touch point. Survives session transitions and
    /// is reseeded from the remaining touches when a two-finger session ends.
    last_touch: Option<TouchPoint>,
    /// Midpoint of the cached pre-move positions, recomputed each two-finger move.
    zoom_center: Option<Point>,
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self::with_config(GestureConfig::default())
    }

    pub fn with_config(config: GestureConfig) -> Self {
        Self {
            config,
            listeners: ListenerRegistry::default(),
            state: SessionState::Idle,
            last_touch: None,
            zoom_center: None,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Register a listener under a gesture name: `drag`, `longTouchDrag`,
    /// `twoFingerZoom` or `twoFingerDrag`.
    ///
    /// An unrecognized name, or a listener record whose shape does not match
    /// the named kind, is reported via a diagnostic and skipped; nothing
    /// panics and no error propagates.
    pub fn add_gesture_listener(&mut self, name: &str, listener: impl Into<GestureListener>) {
        let kind = match GestureKind::from_str(name) {
            Ok(kind) => kind,
            Err(err) => {
                warn!("{}, registration skipped", err);
                return;
            }
        };
        match (kind, listener.into()) {
            (GestureKind::Drag, GestureListener::Drag(l)) => self.add_drag_listener(l),
            (GestureKind::LongTouchDrag, GestureListener::Drag(l)) => {
                self.add_long_touch_drag_listener(l)
            }
            (GestureKind::TwoFingerZoom, GestureListener::Zoom(l)) => {
                self.add_two_finger_zoom_listener(l)
            }
            (GestureKind::TwoFingerDrag, GestureListener::Pan(l)) => {
                self.add_two_finger_drag_listener(l)
            }
            (kind, _) => {
                warn!("listener shape does not match gesture `{kind}`, registration skipped")
            }
        }
    }

    pub fn add_drag_listener(&mut self, listener: DragListener) {
        self.listeners.drag.push(listener);
    }

    pub fn add_long_touch_drag_listener(&mut self, listener: DragListener) {
        self.listeners.long_touch_drag.push(listener);
    }

    pub fn add_two_finger_zoom_listener(&mut self, listener: ZoomListener) {
        self.listeners.two_finger_zoom.push(listener);
    }

    pub fn add_two_finger_drag_listener(&mut self, listener: PanListener) {
        self.listeners.two_finger_drag.push(listener);
    }

    /// Whether single-finger drag motion has been confirmed.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SessionState::SingleDragging)
    }

    /// Whether a two-finger session is active.
    pub fn is_two_finger_active(&self) -> bool {
        matches!(self.state, SessionState::TwoFingerActive { .. })
    }

    pub fn last_touch(&self) -> Option<TouchPoint> {
        self.last_touch
    }

    /// Center of the most recent two-finger zoom update.
    pub fn zoom_center(&self) -> Option<Point> {
        self.zoom_center
    }

    /// Deadline at which a pending long press promotes, if one is armed.
    /// Hosts schedule a wakeup for this instant and call [`Self::poll`].
    pub fn long_press_deadline(&self) -> Option<Instant> {
        match &self.state {
            SessionState::LongPressArmed { armed_at, .. } => {
                Some(*armed_at + self.config.long_touch_duration)
            }
            _ => None,
        }
    }

    /// Promote a pending long press whose deadline has passed, firing the
    /// `longTouchDrag` start callbacks with the touch point and event retained
    /// at contact start. No-op while the deadline is still in the future.
    pub fn poll(&mut self) {
        self.poll_at(Instant::now());
    }

    /// [`Self::poll`] with an explicit current time.
    pub fn poll_at(&mut self, now: Instant) {
        let SessionState::LongPressArmed {
            armed_at,
            pressed,
            event,
            ..
        } = &self.state
        else {
            return;
        };
        if now.saturating_duration_since(*armed_at) < self.config.long_touch_duration {
            return;
        }
        let pressed = *pressed;
        let event = event.clone();
        self.state = SessionState::LongPressActive;
        trace!("long press recognized");
        for l in &mut self.listeners.long_touch_drag {
            if let Some(start) = &mut l.start {
                start(&pressed, &event);
            }
        }
    }

    /// Feed a raw touch-start event.
    pub fn on_touch_start(&mut self, evt: &TouchEvent) {
        if !evt.persistent {
            evt.prevent_default();
        }
        // no gesture for 3+ fingers
        if evt.target_touches.len() > 2 {
            return;
        }

        if evt.target_touches.len() == 2 && self.listeners.has_two_finger() {
            let cache = [evt.target_touches[0], evt.target_touches[1]];
            // a second finger landing cancels any pending long press
            self.state = SessionState::TwoFingerActive { cache };
            trace!("two-finger session started");
            if let Some(first) = evt.touches.first().copied() {
                for l in &mut self.listeners.two_finger_drag {
                    if let Some(start) = &mut l.start {
                        start(&first, evt);
                    }
                }
                for l in &mut self.listeners.two_finger_zoom {
                    if let Some(start) = &mut l.start {
                        start(&first, evt);
                    }
                }
            }
            return;
        }

        let first = evt.touches.first().copied();
        let drag_armed = evt.touches.len() == 1;
        if self.listeners.has_long_touch() {
            if let Some(pressed) = first {
                // re-arming replaces any previous deadline
                self.state = SessionState::LongPressArmed {
                    armed_at: Instant::now(),
                    pressed,
                    event: evt.clone(),
                    drag_armed,
                };
            }
        } else if drag_armed {
            self.state = SessionState::SingleDragArmed;
        }
        self.last_touch = first;
        if drag_armed {
            if let Some(first) = first {
                for l in &mut self.listeners.drag {
                    if let Some(start) = &mut l.start {
                        start(&first, evt);
                    }
                }
            }
        }
    }

    /// Feed a raw touch-move event.
    pub fn on_touch_move(&mut self, evt: &TouchEvent) {
        if evt.target_touches.len() == 2 && self.listeners.has_two_finger() {
            self.handle_two_finger(evt);
            return;
        }
        let (Some(touch), Some(last)) = (evt.touches.first().copied(), self.last_touch) else {
            return;
        };
        match &self.state {
            SessionState::LongPressActive => {
                // last_touch deliberately stays at the press point
                for l in &mut self.listeners.long_touch_drag {
                    (l.main)(&touch, &last, evt);
                }
            }
            SessionState::LongPressArmed { drag_armed, .. } => {
                let drag_armed = *drag_armed;
                if last.distance_sq(&touch) > self.config.tolerance * self.config.tolerance {
                    // motion disqualifies the long press
                    trace!("long press canceled by motion");
                    if drag_armed {
                        self.state = SessionState::SingleDragging;
                        self.fire_drag_update(touch, last, evt);
                    } else {
                        self.state = SessionState::Idle;
                    }
                }
                // within tolerance: drag updates stay suppressed while the
                // deadline is live
            }
            SessionState::SingleDragArmed | SessionState::SingleDragging => {
                self.state = SessionState::SingleDragging;
                self.fire_drag_update(touch, last, evt);
            }
            SessionState::Idle | SessionState::TwoFingerActive { .. } => {}
        }
    }

    /// Feed a raw touch-end event.
    pub fn on_touch_end(&mut self, evt: &TouchEvent) {
        match &self.state {
            SessionState::LongPressActive => {
                self.state = SessionState::Idle;
                for l in &mut self.listeners.long_touch_drag {
                    if let Some(end) = &mut l.end {
                        end(evt);
                    }
                }
            }
            SessionState::LongPressArmed { drag_armed, .. } => {
                let drag_armed = *drag_armed;
                // contact ended before the deadline: cancel the long press
                self.state = SessionState::Idle;
                if drag_armed {
                    self.fire_drag_end(evt);
                }
            }
            SessionState::TwoFingerActive { cache } => {
                let all_present = cache
                    .iter()
                    .all(|c| evt.touches.iter().any(|t| t.identifier == c.identifier));
                if !all_present {
                    self.state = SessionState::Idle;
                    trace!("two-finger session ended, finger lifted");
                    for l in &mut self.listeners.two_finger_drag {
                        if let Some(end) = &mut l.end {
                            end(evt);
                        }
                    }
                    for l in &mut self.listeners.two_finger_zoom {
                        if let Some(end) = &mut l.end {
                            end(evt);
                        }
                    }
                    // no single-finger drag session restarts here; the next
                    // touch-start begins a fresh one
                    self.last_touch = evt.touches.first().copied();
                }
            }
            SessionState::SingleDragArmed | SessionState::SingleDragging => {
                self.state = SessionState::Idle;
                self.fire_drag_end(evt);
            }
            SessionState::Idle => {}
        }
    }

    /// Two-finger pan/zoom update. Only reached from a move with exactly two
    /// current target touches.
    fn handle_two_finger(&mut self, evt: &TouchEvent) {
        if evt.target_touches.len() != 2 || evt.changed_touches.is_empty() {
            return;
        }
        let t1 = evt.target_touches[0];
        let t2 = evt.target_touches[1];
        let SessionState::TwoFingerActive { cache } = &self.state else {
            return;
        };
        let mut c1 = None;
        let mut c2 = None;
        for c in cache {
            if c.identifier == t1.identifier {
                c1 = Some(*c);
            } else if c.identifier == t2.identifier {
                c2 = Some(*c);
            }
        }
        let (Some(c1), Some(c2)) = (c1, c2) else {
            // a tracked finger was lost or replaced: silently abort; a new
            // touch-start must reseed the cache
            trace!("two-finger cache mismatch, session aborted");
            self.state = SessionState::Idle;
            return;
        };

        let dx1 = t1.client_x - c1.client_x;
        let dx2 = t2.client_x - c2.client_x;
        let dy1 = t1.client_y - c1.client_y;
        let dy2 = t2.client_y - c2.client_y;

        // pan only when both fingers move the same direction along an axis;
        // the shared motion is the minimum-magnitude component, so pinch
        // motion never reads as panning
        let mut pan_x = 0.0;
        let mut pan_y = 0.0;
        if dx1 > 0.0 && dx2 > 0.0 {
            pan_x = -dx1.min(dx2);
        } else if dx1 < 0.0 && dx2 < 0.0 {
            pan_x = -dx1.max(dx2);
        }
        if dy1 > 0.0 && dy2 > 0.0 {
            pan_y = -dy1.min(dy2);
        } else if dy1 < 0.0 && dy2 < 0.0 {
            pan_y = -dy1.max(dy2);
        }

        // positive scale when the fingers diverged, negative when they pinched
        let diverged = t1.distance_sq(&t2) > c1.distance_sq(&c2);
        let magnitude = (dx1 - dx2).hypot(dy1 - dy2);
        let scale = if diverged { magnitude } else { -magnitude };
        let center = Point::new(
            (c1.client_x + c2.client_x) / 2.0,
            (c1.client_y + c2.client_y) / 2.0,
        );
        self.zoom_center = Some(center);

        for l in &mut self.listeners.two_finger_zoom {
            (l.main)(scale, center, evt);
        }
        for l in &mut self.listeners.two_finger_drag {
            (l.main)(pan_x, pan_y, evt);
        }

        self.state = SessionState::TwoFingerActive { cache: [t1, t2] };
    }

    fn fire_drag_update(&mut self, touch: TouchPoint, last: TouchPoint, evt: &TouchEvent) {
        for l in &mut self.listeners.drag {
            (l.main)(&touch, &last, evt);
        }
        self.last_touch = Some(touch);
    }

    fn fire_drag_end(&mut self, evt: &TouchEvent) {
        for l in &mut self.listeners.drag {
            if let Some(end) = &mut l.end {
                end(evt);
            }
        }
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new()
    }
}
