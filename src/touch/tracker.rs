//! # Per-Surface Contact Tracking
//!
//! Folds raw touch batches into per-surface contact state and produces
//! controller axis samples.
//!
//! ## Claim Policy
//!
//! A surface tracks at most one contact at a time. The first contact that
//! lands inside the activation radius claims the surface; further contacts
//! are ignored until the claim is released. Ignoring is silent: a second
//! finger on an active surface is expected input, not an error.
//!
//! ## Release vs Cancel
//!
//! Release removes only identifiers the surface owns and resets to center
//! when the owner was removed. Cancel is an unconditional drop of every
//! identifier in the batch; whenever the active set is empty afterwards the
//! stick resets to center.

use tracing::{debug, trace};

use crate::stick::{AxisSample, StickSurface};
use crate::touch::event::{TouchEvent, TouchId, TouchPhase, TouchPoint};

/// The contact currently owning a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveContact {
    id: TouchId,
    /// Last known clamped offset relative to the surface center.
    offset: (f32, f32),
}

/// Tracks the single active contact of one joystick surface.
///
/// # Examples
///
/// ```
/// use touch_bridge::stick::StickSurface;
/// use touch_bridge::touch::{SurfaceTracker, TouchEvent, TouchId, TouchPhase, TouchPoint};
///
/// let surface = StickSurface::new("stickLeft", 0.0, 0.0, 100.0, 100.0, 80.0, 20.0);
/// let mut tracker = SurfaceTracker::new(surface);
///
/// let down = TouchEvent::single(TouchPhase::Start, TouchPoint::new(TouchId(0), 130.0, 70.0));
/// let sample = tracker.handle_event(&down).expect("contact inside the radius claims");
/// assert_eq!((sample.x, sample.y), (16384, 16384));
/// ```
#[derive(Debug)]
pub struct SurfaceTracker {
    surface: StickSurface,
    active: Option<ActiveContact>,
}

impl SurfaceTracker {
    /// Creates a tracker for the given surface with no active contact.
    #[must_use]
    pub fn new(surface: StickSurface) -> Self {
        Self {
            surface,
            active: None,
        }
    }

    /// Returns the tracked surface.
    #[must_use]
    pub fn surface(&self) -> &StickSurface {
        &self.surface
    }

    /// Returns the identifier currently owning this surface, if any.
    #[must_use]
    pub fn active_id(&self) -> Option<TouchId> {
        self.active.map(|contact| contact.id)
    }

    /// Processes one touch batch and returns the sample to dispatch, if any.
    ///
    /// At most one sample is produced per batch; `None` means the batch did
    /// not concern this surface.
    pub fn handle_event(&mut self, event: &TouchEvent) -> Option<AxisSample> {
        match event.phase {
            TouchPhase::Start => self.handle_start(&event.touches),
            TouchPhase::Move => self.handle_move(&event.touches),
            TouchPhase::End => self.handle_end(&event.touches),
            TouchPhase::Cancel => self.handle_cancel(&event.touches),
        }
    }

    /// Claims the first in-radius contact if the surface is free.
    fn handle_start(&mut self, touches: &[TouchPoint]) -> Option<AxisSample> {
        if self.active.is_some() {
            // First claim wins; simultaneous contacts are ignored
            trace!(surface = self.surface.name(), "surface busy, contact ignored");
            return None;
        }

        for touch in touches {
            if self.surface.contains(touch) {
                let offset = self.surface.clamped_offset(touch);
                self.active = Some(ActiveContact {
                    id: touch.id,
                    offset,
                });
                debug!(
                    surface = self.surface.name(),
                    id = touch.id.0,
                    "contact claimed"
                );
                return Some(self.surface.sample(touch));
            }
        }
        None
    }

    /// Follows the owning contact; unrecognized identifiers are ignored.
    fn handle_move(&mut self, touches: &[TouchPoint]) -> Option<AxisSample> {
        let contact = self.active.as_mut()?;

        for touch in touches {
            if touch.id == contact.id {
                contact.offset = self.surface.clamped_offset(touch);
                return Some(self.surface.sample(touch));
            }
        }
        None
    }

    /// Removes matching identifiers; resets when the owner was lifted.
    fn handle_end(&mut self, touches: &[TouchPoint]) -> Option<AxisSample> {
        let contact = self.active?;

        let released = touches.iter().any(|touch| touch.id == contact.id);
        if !released {
            return None;
        }

        self.active = None;
        debug!(
            surface = self.surface.name(),
            id = contact.id.0,
            "contact released, stick reset"
        );
        Some(AxisSample::CENTERED)
    }

    /// Unconditionally drops every batch identifier; resets on empty.
    fn handle_cancel(&mut self, touches: &[TouchPoint]) -> Option<AxisSample> {
        if let Some(contact) = self.active {
            if touches.iter().any(|touch| touch.id == contact.id) {
                self.active = None;
            }
        }

        if self.active.is_none() {
            debug!(surface = self.surface.name(), "cancel batch, stick reset");
            return Some(AxisSample::CENTERED);
        }
        None
    }
}
