//! # Stick Surface Geometry
//!
//! One on-screen joystick's container plus its movable indicator.
//!
//! ## Coordinate Frames
//!
//! Touch positions arrive in screen space. The surface subtracts its
//! container origin and its center to obtain the raw offset, so all
//! downstream math is center-relative:
//!
//! ```text
//! raw = touch − origin − center
//! ```
//!
//! ## Clamp Boundary
//!
//! The indicator must never overflow the surface edge, so the clamp
//! boundary is the activation radius minus the indicator half-extent
//! (the *effective radius*). The clamp is circular: when the raw offset
//! is outside, both components are scaled by `effective_radius / distance`,
//! which preserves direction and caps magnitude.
//!
//! ## Usage
//!
//! ```
//! use touch_bridge::stick::StickSurface;
//! use touch_bridge::touch::{TouchId, TouchPoint};
//!
//! // 160px container at the screen origin, 40px indicator
//! let surface = StickSurface::from_container("stickLeft", 0.0, 0.0, 160.0, 40.0);
//! assert_eq!(surface.effective_radius(), 60.0);
//!
//! // A touch at the container center is neutral
//! let sample = surface.sample(&TouchPoint::new(TouchId(0), 80.0, 80.0));
//! assert!(sample.is_centered());
//! ```

use crate::stick::axis::AxisSample;
use crate::touch::TouchPoint;

/// Geometry of one joystick surface.
///
/// Immutable after construction; rebuilt only when the view re-initializes.
#[derive(Debug, Clone, PartialEq)]
pub struct StickSurface {
    /// Surface name, used as the stick identifier in dispatched events.
    name: String,
    /// Container top-left origin in screen space.
    origin_x: f32,
    origin_y: f32,
    /// Geometric center relative to the container origin.
    center_x: f32,
    center_y: f32,
    /// Activation radius: contacts inside it may claim the surface.
    radius: f32,
    /// Half-extent of the movable indicator.
    indicator_half_extent: f32,
}

impl StickSurface {
    /// Creates a surface with explicit geometry.
    ///
    /// # Arguments
    ///
    /// * `name` - Stick identifier carried in dispatched events
    /// * `origin_x`, `origin_y` - Container top-left in screen space
    /// * `center_x`, `center_y` - Center relative to the container origin
    /// * `radius` - Activation radius in pixels
    /// * `indicator_half_extent` - Half the indicator's width in pixels
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        origin_x: f32,
        origin_y: f32,
        center_x: f32,
        center_y: f32,
        radius: f32,
        indicator_half_extent: f32,
    ) -> Self {
        Self {
            name: name.into(),
            origin_x,
            origin_y,
            center_x,
            center_y,
            radius,
            indicator_half_extent,
        }
    }

    /// Derives geometry from a square container, the way the view layer
    /// measures it: center at half the side, activation radius at half the
    /// side, indicator half-extent at half the indicator size.
    #[must_use]
    pub fn from_container(
        name: impl Into<String>,
        origin_x: f32,
        origin_y: f32,
        container_size: f32,
        indicator_size: f32,
    ) -> Self {
        let half = container_size / 2.0;
        Self::new(
            name,
            origin_x,
            origin_y,
            half,
            half,
            half,
            indicator_size / 2.0,
        )
    }

    /// Returns the surface name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the activation radius.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Returns the clamp boundary: activation radius minus the indicator
    /// half-extent. Non-positive for degenerate geometry.
    #[must_use]
    pub fn effective_radius(&self) -> f32 {
        self.radius - self.indicator_half_extent
    }

    /// Raw offset of a touch point relative to the surface center.
    #[must_use]
    pub fn raw_offset(&self, touch: &TouchPoint) -> (f32, f32) {
        (
            touch.x - self.origin_x - self.center_x,
            touch.y - self.origin_y - self.center_y,
        )
    }

    /// Membership test: is the contact within the activation radius?
    ///
    /// Uses the full activation radius, not the effective radius, so a
    /// touch landing on the rim still claims the surface.
    #[must_use]
    pub fn contains(&self, touch: &TouchPoint) -> bool {
        let (dx, dy) = self.raw_offset(touch);
        (dx * dx + dy * dy).sqrt() <= self.radius
    }

    /// Clamps the raw offset to the effective-radius circle.
    ///
    /// Offsets inside the boundary pass through unchanged; offsets outside
    /// are scaled onto the boundary circle, preserving direction.
    #[must_use]
    pub fn clamped_offset(&self, touch: &TouchPoint) -> (f32, f32) {
        let (mut x, mut y) = self.raw_offset(touch);
        let effective = self.effective_radius();

        let dist = (x * x + y * y).sqrt();
        if dist > effective {
            x = (x * effective) / dist;
            y = (y * effective) / dist;
        }
        (x, y)
    }

    /// Converts a touch point into a controller axis sample.
    ///
    /// Clamps the offset, normalizes each component by the effective
    /// radius and scales to the 16-bit controller range. Degenerate
    /// geometry (effective radius ≤ 0) yields the centered sample rather
    /// than dividing by zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use touch_bridge::stick::{AxisSample, StickSurface};
    /// use touch_bridge::touch::{TouchId, TouchPoint};
    ///
    /// let surface = StickSurface::new("stickLeft", 0.0, 0.0, 100.0, 100.0, 80.0, 20.0);
    ///
    /// // 90px right of center, outside the 60px boundary: clamps to full deflection
    /// let sample = surface.sample(&TouchPoint::new(TouchId(0), 190.0, 100.0));
    /// assert_eq!(sample, AxisSample { x: 32767, y: 0 });
    /// ```
    #[must_use]
    pub fn sample(&self, touch: &TouchPoint) -> AxisSample {
        let effective = self.effective_radius();
        if effective <= 0.0 {
            return AxisSample::CENTERED;
        }

        let (x, y) = self.clamped_offset(touch);
        AxisSample::from_normalized(x / effective, y / effective)
    }
}
