//! Touch gesture recognition from raw touch-start/move/end events.
//!
//! Recognizes four gestures and dispatches them to registered listeners:
//! - Single-finger drag
//! - Long-press-and-drag
//! - Two-finger pan
//! - Two-finger pinch-zoom
//!
//! The host UI surface feeds every raw touch event into the recognizer's three
//! entry points and drives long-press promotion by scheduling a wakeup for
//! [`GestureRecognizer::long_press_deadline`] and calling
//! [`GestureRecognizer::poll`]. All callbacks fire synchronously on the
//! delivering thread; separate recognizer instances are fully independent.
//!
//! ```
//! use touch_gestures::{DragListener, GestureRecognizer, TouchEvent, TouchPoint};
//!
//! let mut gestures = GestureRecognizer::new();
//! gestures.add_drag_listener(
//!     DragListener::new(|touch, last, _evt| {
//!         let dx = touch.client_x - last.client_x;
//!         let dy = touch.client_y - last.client_y;
//!         println!("dragged by {dx},{dy}");
//!     })
//!     .with_end(|_evt| println!("drag finished")),
//! );
//!
//! gestures.on_touch_start(&TouchEvent::new(vec![TouchPoint::new(0, 10.0, 10.0)]));
//! gestures.on_touch_move(&TouchEvent::new(vec![TouchPoint::new(0, 30.0, 25.0)]));
//! gestures.on_touch_end(&TouchEvent::new(vec![]));
//! ```

pub mod event;
pub mod gestures;
pub mod listener;

pub use event::{Point, TouchEvent, TouchPoint};
pub use gestures::{GestureConfig, GestureRecognizer};
pub use listener::{
    DragListener, GestureKind, GestureListener, PanListener, UnknownGestureError, ZoomListener,
};
