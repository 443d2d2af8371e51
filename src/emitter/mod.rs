//! # Input Event Emitter
//!
//! Packages button, trigger, and stick events into the outbound protocol
//! and dispatches them to the host.
//!
//! Dispatch is fire-and-forget: the emitter never awaits the consumer and a
//! failed dispatch is caught and logged at the call site, never retried.
//! The next physical input event naturally supersedes a lost one, so the
//! input pipeline keeps running regardless of host health.
//!
//! The [`HostDispatch`] trait is the seam between the input pipeline and
//! the host transport, so tests can record or fail dispatches without a
//! live host.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::warn;

use crate::error::{Result, TouchBridgeError};
use crate::stick::AxisSample;

/// Trigger pressure dispatched on press start.
pub const TRIGGER_PRESSED: u8 = 255;

/// Trigger pressure dispatched on release or cancel.
pub const TRIGGER_RELEASED: u8 = 0;

/// Input protocol events dispatched to the host, one per occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A digital button changed state.
    Button { id: String, pressed: bool },
    /// A trigger changed pressure. Only the extremes 0 and 255 are produced.
    Trigger { id: String, value: u8 },
    /// A stick produced a new axis sample.
    Stick { surface: String, x: i32, y: i32 },
    /// The controller view became visible for the first time.
    ViewOpened,
}

/// Trait for dispatching input events to the host process.
#[async_trait]
pub trait HostDispatch: Send + Sync {
    /// Delivers one event to the host.
    async fn dispatch(&self, event: InputEvent) -> Result<()>;
}

/// Host dispatch over an in-process channel.
///
/// The channel is unbounded: the producer never blocks on a slow consumer,
/// and backpressure is absorbed on the consumer side.
#[derive(Debug, Clone)]
pub struct ChannelDispatch {
    tx: mpsc::UnboundedSender<InputEvent>,
}

impl ChannelDispatch {
    /// Creates a dispatch plus the receiver half the host consumes.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<InputEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl HostDispatch for ChannelDispatch {
    async fn dispatch(&self, event: InputEvent) -> Result<()> {
        self.tx
            .send(event)
            .map_err(|e| TouchBridgeError::Dispatch(format!("host channel closed: {}", e)))
    }
}

/// Emits input protocol events to the host.
///
/// # Examples
///
/// ```
/// use touch_bridge::emitter::{ChannelDispatch, InputEmitter, InputEvent};
///
/// # tokio_test::block_on(async {
/// let (dispatch, mut rx) = ChannelDispatch::new();
/// let emitter = InputEmitter::new(dispatch);
///
/// emitter.button("A", true).await;
/// assert_eq!(
///     rx.recv().await,
///     Some(InputEvent::Button { id: "A".into(), pressed: true })
/// );
/// # });
/// ```
#[derive(Debug)]
pub struct InputEmitter<D: HostDispatch> {
    dispatch: D,
}

impl<D: HostDispatch> InputEmitter<D> {
    /// Creates an emitter over the given host dispatch.
    #[must_use]
    pub fn new(dispatch: D) -> Self {
        Self { dispatch }
    }

    /// Dispatches a stick sample for the named surface.
    pub async fn stick_sample(&self, surface: &str, sample: AxisSample) {
        self.send(InputEvent::Stick {
            surface: surface.to_string(),
            x: sample.x,
            y: sample.y,
        })
        .await;
    }

    /// Dispatches a button state change.
    pub async fn button(&self, id: &str, pressed: bool) {
        self.send(InputEvent::Button {
            id: id.to_string(),
            pressed,
        })
        .await;
    }

    /// Dispatches a trigger edge. Press maps to 255, release to 0; no
    /// intermediate pressure is ever produced.
    pub async fn trigger(&self, id: &str, pressed: bool) {
        let value = if pressed {
            TRIGGER_PRESSED
        } else {
            TRIGGER_RELEASED
        };
        self.send(InputEvent::Trigger {
            id: id.to_string(),
            value,
        })
        .await;
    }

    /// Notifies the host that the controller view became visible.
    pub async fn view_opened(&self) {
        self.send(InputEvent::ViewOpened).await;
    }

    /// Dispatches one event, containing any failure at this boundary.
    async fn send(&self, event: InputEvent) {
        if let Err(e) = self.dispatch.dispatch(event).await {
            // No retry: the next input event supersedes the lost one
            warn!("input dispatch failed: {}", e);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::mocks::MockDispatch;
    use super::*;

    // ==================== Protocol Shape Tests ====================

    #[tokio::test]
    async fn test_stick_sample_carries_surface_and_axes() {
        let mock = MockDispatch::new();
        let emitter = InputEmitter::new(mock.clone());

        emitter
            .stick_sample("stickLeft", AxisSample { x: 16384, y: 16384 })
            .await;

        assert_eq!(
            mock.recorded(),
            vec![InputEvent::Stick {
                surface: "stickLeft".into(),
                x: 16384,
                y: 16384,
            }]
        );
    }

    #[tokio::test]
    async fn test_button_press_then_release_sequence() {
        let mock = MockDispatch::new();
        let emitter = InputEmitter::new(mock.clone());

        emitter.button("A", true).await;
        emitter.button("A", false).await;

        assert_eq!(
            mock.recorded(),
            vec![
                InputEvent::Button {
                    id: "A".into(),
                    pressed: true,
                },
                InputEvent::Button {
                    id: "A".into(),
                    pressed: false,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_trigger_produces_only_extremes() {
        let mock = MockDispatch::new();
        let emitter = InputEmitter::new(mock.clone());

        emitter.trigger("LT", true).await;
        emitter.trigger("LT", false).await;

        assert_eq!(
            mock.recorded(),
            vec![
                InputEvent::Trigger {
                    id: "LT".into(),
                    value: TRIGGER_PRESSED,
                },
                InputEvent::Trigger {
                    id: "LT".into(),
                    value: TRIGGER_RELEASED,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_view_opened() {
        let mock = MockDispatch::new();
        let emitter = InputEmitter::new(mock.clone());

        emitter.view_opened().await;
        assert_eq!(mock.recorded(), vec![InputEvent::ViewOpened]);
    }

    // ==================== Failure Containment Tests ====================

    #[tokio::test]
    async fn test_failed_dispatch_does_not_block_subsequent_input() {
        let mock = MockDispatch::new();
        let emitter = InputEmitter::new(mock.clone());

        mock.set_failing(true);
        emitter.button("B", true).await; // lost, logged, not retried

        mock.set_failing(false);
        emitter.button("B", false).await;

        // Only the post-failure event arrives; the pipeline never stalled
        assert_eq!(
            mock.recorded(),
            vec![InputEvent::Button {
                id: "B".into(),
                pressed: false,
            }]
        );
    }

    // ==================== Channel Dispatch Tests ====================

    #[tokio::test]
    async fn test_channel_dispatch_delivers_in_order() {
        let (dispatch, mut rx) = ChannelDispatch::new();
        let emitter = InputEmitter::new(dispatch);

        emitter.button("X", true).await;
        emitter.trigger("RT", true).await;

        assert_eq!(
            rx.recv().await,
            Some(InputEvent::Button {
                id: "X".into(),
                pressed: true,
            })
        );
        assert_eq!(
            rx.recv().await,
            Some(InputEvent::Trigger {
                id: "RT".into(),
                value: TRIGGER_PRESSED,
            })
        );
    }

    #[tokio::test]
    async fn test_channel_dispatch_fails_when_host_gone() {
        let (dispatch, rx) = ChannelDispatch::new();
        drop(rx);

        let result = dispatch.dispatch(InputEvent::ViewOpened).await;
        assert!(matches!(result, Err(TouchBridgeError::Dispatch(_))));
    }
}
