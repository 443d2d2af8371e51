//! # Joystick Geometry Module
//!
//! Converts a raw contact point into a clamped, centered offset and then
//! into a normalized controller axis pair.
//!
//! This module handles:
//! - Circular boundary clamping (direction preserved, magnitude capped)
//! - Normalization to the 16-bit signed controller axis range
//! - The asymmetric X/Y scale convention used by the controller protocol

pub mod axis;
pub mod surface;

pub use axis::AxisSample;
pub use surface::StickSurface;
