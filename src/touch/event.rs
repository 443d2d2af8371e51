//! # Touch Event Types
//!
//! Plain data types describing raw multi-touch input as delivered by the
//! embedding UI runtime. The tracker consumes these; it never talks to the
//! windowing layer directly.

/// Identifier of one physical contact.
///
/// Assigned by the UI runtime on first contact and stable until that finger
/// is lifted or the gesture is cancelled. Identifiers may be recycled after
/// release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TouchId(pub u64);

/// A single contact position in screen coordinates.
///
/// # Examples
///
/// ```
/// use touch_bridge::touch::{TouchId, TouchPoint};
///
/// let point = TouchPoint::new(TouchId(0), 120.0, 96.0);
/// assert_eq!(point.id, TouchId(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Contact identifier, stable for the life of the contact.
    pub id: TouchId,
    /// X position in screen space, in pixels.
    pub x: f32,
    /// Y position in screen space, in pixels.
    pub y: f32,
}

impl TouchPoint {
    /// Creates a touch point at the given screen position.
    #[must_use]
    pub fn new(id: TouchId, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }
}

/// Lifecycle phase of a touch batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    /// One or more new contacts went down.
    Start,
    /// Tracked contacts moved.
    Move,
    /// Contacts were lifted normally.
    End,
    /// The gesture was cancelled by the runtime (palm rejection, focus loss).
    Cancel,
}

/// A batch of changed contacts delivered in one UI callback.
///
/// For `Start` and `Move` the batch carries the current contacts of the
/// gesture; for `End` and `Cancel` it carries the contacts that changed.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub touches: Vec<TouchPoint>,
}

impl TouchEvent {
    /// Creates a touch event batch.
    #[must_use]
    pub fn new(phase: TouchPhase, touches: Vec<TouchPoint>) -> Self {
        Self { phase, touches }
    }

    /// Convenience constructor for a single-contact batch.
    ///
    /// # Examples
    ///
    /// ```
    /// use touch_bridge::touch::{TouchEvent, TouchId, TouchPhase, TouchPoint};
    ///
    /// let event = TouchEvent::single(TouchPhase::Start, TouchPoint::new(TouchId(3), 10.0, 20.0));
    /// assert_eq!(event.touches.len(), 1);
    /// ```
    #[must_use]
    pub fn single(phase: TouchPhase, touch: TouchPoint) -> Self {
        Self {
            phase,
            touches: vec![touch],
        }
    }
}
