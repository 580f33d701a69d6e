//! Touch event value types consumed from the host UI surface.

use std::cell::Cell;

/// A point in host pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One finger's contact point as reported by the host.
///
/// `identifier` is stable for the lifetime of the physical contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub identifier: i32,
    pub client_x: f64,
    pub client_y: f64,
}

impl TouchPoint {
    pub fn new(identifier: i32, client_x: f64, client_y: f64) -> Self {
        Self {
            identifier,
            client_x,
            client_y,
        }
    }

    /// Squared pixel distance to another contact point.
    pub fn distance_sq(&self, other: &TouchPoint) -> f64 {
        let dx = self.client_x - other.client_x;
        let dy = self.client_y - other.client_y;
        dx * dx + dy * dy
    }
}

/// A browser-style touch event snapshot.
///
/// Host adapters (web-sys, winit, test drivers) build one of these per native
/// event. `touches` holds every active contact on the surface, `target_touches`
/// the contacts on the listening element, and `changed_touches` the contacts
/// that changed in this event.
#[derive(Debug, Clone, Default)]
pub struct TouchEvent {
    pub target_touches: Vec<TouchPoint>,
    pub touches: Vec<TouchPoint>,
    pub changed_touches: Vec<TouchPoint>,
    /// The host keeps event data alive after the handler returns and manages
    /// default actions itself (pooled or synthetic events). Suppression is
    /// skipped for persistent events.
    pub persistent: bool,
    default_prevented: Cell<bool>,
}

impl TouchEvent {
    /// Event where all three touch lists hold the same contacts. Adjust the
    /// individual lists afterwards when they differ.
    pub fn new(touches: Vec<TouchPoint>) -> Self {
        Self {
            target_touches: touches.clone(),
            changed_touches: touches.clone(),
            touches,
            persistent: false,
            default_prevented: Cell::new(false),
        }
    }

    /// Ask the host to suppress its default handling of this event.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    /// Whether default-action suppression was requested. Hosts read this back
    /// after the handler returns and forward it to their native event.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_sq() {
        let a = TouchPoint::new(0, 10.0, 20.0);
        let b = TouchPoint::new(1, 13.0, 24.0);
        assert_eq!(a.distance_sq(&b), 25.0);
    }

    #[test]
    fn test_prevent_default_is_recorded() {
        let evt = TouchEvent::new(vec![TouchPoint::new(0, 0.0, 0.0)]);
        assert!(!evt.default_prevented());
        evt.prevent_default();
        assert!(evt.default_prevented());
    }
}
