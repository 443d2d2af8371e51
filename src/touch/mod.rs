//! # Touch Input Module
//!
//! Raw multi-touch event types and per-surface contact tracking.
//!
//! This module handles:
//! - Touch identity (stable identifier per physical contact)
//! - Claiming a contact for a joystick surface on touch start
//! - Following the claimed contact through move events
//! - Releasing/cancelling contacts and emitting the center reset

pub mod event;
pub mod tracker;

pub use event::{TouchEvent, TouchId, TouchPhase, TouchPoint};
pub use tracker::SurfaceTracker;
