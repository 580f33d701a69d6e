//! Gesture kinds and listener registration records.
//!
//! A listener is a structured record: a main callback fired on every
//! intermediate update, plus optional start/end callbacks fired at the
//! gesture-start and gesture-end transitions. Registration order is
//! invocation order.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::event::{Point, TouchEvent, TouchPoint};

/// Main callback for drag-style gestures: (touch, last_touch, event).
pub type DragFn = Box<dyn FnMut(&TouchPoint, &TouchPoint, &TouchEvent)>;
/// Main callback for pinch-zoom: (scale, center, event).
pub type ZoomFn = Box<dyn FnMut(f64, Point, &TouchEvent)>;
/// Main callback for two-finger pan: (pan_x, pan_y, event).
pub type PanFn = Box<dyn FnMut(f64, f64, &TouchEvent)>;
/// Fired when a gesture begins: (touch, event).
pub type GestureStartFn = Box<dyn FnMut(&TouchPoint, &TouchEvent)>;
/// Fired when a gesture ends.
pub type GestureEndFn = Box<dyn FnMut(&TouchEvent)>;

/// The four built-in gesture kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Drag,
    LongTouchDrag,
    TwoFingerZoom,
    TwoFingerDrag,
}

impl GestureKind {
    /// Registration name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Drag => "drag",
            Self::LongTouchDrag => "longTouchDrag",
            Self::TwoFingerZoom => "twoFingerZoom",
            Self::TwoFingerDrag => "twoFingerDrag",
        }
    }
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registration was attempted under a name that is not a gesture kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no gesture named `{0}`")]
pub struct UnknownGestureError(pub String);

impl FromStr for GestureKind {
    type Err = UnknownGestureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drag" => Ok(Self::Drag),
            "longTouchDrag" => Ok(Self::LongTouchDrag),
            "twoFingerZoom" => Ok(Self::TwoFingerZoom),
            "twoFingerDrag" => Ok(Self::TwoFingerDrag),
            _ => Err(UnknownGestureError(s.to_string())),
        }
    }
}

/// Listener record for `drag` and `longTouchDrag`.
pub struct DragListener {
    pub(crate) main: DragFn,
    pub(crate) start: Option<GestureStartFn>,
    pub(crate) end: Option<GestureEndFn>,
}

impl DragListener {
    pub fn new(main: impl FnMut(&TouchPoint, &TouchPoint, &TouchEvent) + 'static) -> Self {
        Self {
            main: Box::new(main),
            start: None,
            end: None,
        }
    }

    pub fn with_start(mut self, f: impl FnMut(&TouchPoint, &TouchEvent) + 'static) -> Self {
        self.start = Some(Box::new(f));
        self
    }

    pub fn with_end(mut self, f: impl FnMut(&TouchEvent) + 'static) -> Self {
        self.end = Some(Box::new(f));
        self
    }
}

/// Listener record for `twoFingerZoom`.
pub struct ZoomListener {
    pub(crate) main: ZoomFn,
    pub(crate) start: Option<GestureStartFn>,
    pub(crate) end: Option<GestureEndFn>,
}

impl ZoomListener {
    pub fn new(main: impl FnMut(f64, Point, &TouchEvent) + 'static) -> Self {
        Self {
            main: Box::new(main),
            start: None,
            end: None,
        }
    }

    pub fn with_start(mut self, f: impl FnMut(&TouchPoint, &TouchEvent) + 'static) -> Self {
        self.start = Some(Box::new(f));
        self
    }

    pub fn with_end(mut self, f: impl FnMut(&TouchEvent) + 'static) -> Self {
        self.end = Some(Box::new(f));
        self
    }
}

/// Listener record for `twoFingerDrag`.
pub struct PanListener {
    pub(crate) main: PanFn,
    pub(crate) start: Option<GestureStartFn>,
    pub(crate) end: Option<GestureEndFn>,
}

impl PanListener {
    pub fn new(main: impl FnMut(f64, f64, &TouchEvent) + 'static) -> Self {
        Self {
            main: Box::new(main),
            start: None,
            end: None,
        }
    }

    pub fn with_start(mut self, f: impl FnMut(&TouchPoint, &TouchEvent) + 'static) -> Self {
        self.start = Some(Box::new(f));
        self
    }

    pub fn with_end(mut self, f: impl FnMut(&TouchEvent) + 'static) -> Self {
        self.end = Some(Box::new(f));
        self
    }
}

/// A listener record for the name-keyed registration API.
///
/// `Drag` records register for both `drag` and `longTouchDrag` (same callback
/// shape); `Zoom` for `twoFingerZoom`; `Pan` for `twoFingerDrag`.
pub enum GestureListener {
    Drag(DragListener),
    Zoom(ZoomListener),
    Pan(PanListener),
}

impl From<DragListener> for GestureListener {
    fn from(l: DragListener) -> Self {
        Self::Drag(l)
    }
}

impl From<ZoomListener> for GestureListener {
    fn from(l: ZoomListener) -> Self {
        Self::Zoom(l)
    }
}

impl From<PanListener> for GestureListener {
    fn from(l: PanListener) -> Self {
        Self::Pan(l)
    }
}

/// Per-kind listener lists, in registration order.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    pub drag: Vec<DragListener>,
    pub long_touch_drag: Vec<DragListener>,
    pub two_finger_zoom: Vec<ZoomListener>,
    pub two_finger_drag: Vec<PanListener>,
}

impl ListenerRegistry {
    pub fn has_two_finger(&self) -> bool {
        !self.two_finger_zoom.is_empty() || !self.two_finger_drag.is_empty()
    }

    pub fn has_long_touch(&self) -> bool {
        !self.long_touch_drag.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in [
            GestureKind::Drag,
            GestureKind::LongTouchDrag,
            GestureKind::TwoFingerZoom,
            GestureKind::TwoFingerDrag,
        ] {
            assert_eq!(kind.as_str().parse::<GestureKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_name_is_an_error() {
        let err = "swirl".parse::<GestureKind>().unwrap_err();
        assert_eq!(err.to_string(), "no gesture named `swirl`");
    }
}
