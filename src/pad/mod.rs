//! # Gamepad State Aggregation
//!
//! The host-side view of the virtual controller: every dispatched input
//! event is folded into one [`GamepadState`], and each accepted event emits
//! a full JSON snapshot as an outbound payload.
//!
//! ## Identifiers
//!
//! | Kind | Identifiers |
//! |------|-------------|
//! | Buttons | A, B, X, Y, LB, RB, SELECT, START, BACK, HOME, UP, DOWN, LEFT, RIGHT |
//! | Triggers | LT, RT |
//! | Sticks | stickLeft, stickRight |
//!
//! Unknown identifiers are ignored; the touch layer may carry widgets the
//! controller protocol does not model.
//!
//! ## Payload Shape
//!
//! ```json
//! {
//!   "buttons": ["A", "LB"],
//!   "left_trigger": 255,
//!   "right_trigger": 0,
//!   "thumb_lx": 16384,
//!   "thumb_ly": 16384,
//!   "thumb_rx": 0,
//!   "thumb_ry": 0
//! }
//! ```

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::emitter::InputEvent;
use crate::stick::AxisSample;

/// Digital button states, keyed by the standard controller layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buttons {
    pub a: bool,
    pub b: bool,
    pub x: bool,
    pub y: bool,
    pub lb: bool,
    pub rb: bool,
    pub select: bool,
    pub start: bool,
    pub back: bool,
    pub home: bool,
    pub dpad_up: bool,
    pub dpad_down: bool,
    pub dpad_left: bool,
    pub dpad_right: bool,
}

/// Analog trigger pressures. Only the extremes 0 and 255 ever occur.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Triggers {
    pub lt: u8,
    pub rt: u8,
}

/// Complete state of the virtual controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GamepadState {
    pub left_stick: AxisSample,
    pub right_stick: AxisSample,
    pub buttons: Buttons,
    pub triggers: Triggers,
}

impl GamepadState {
    /// Creates a neutral state: sticks centered, everything released.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one dispatched event. Returns true when the event updated
    /// controller state (and a payload snapshot should be emitted).
    pub fn apply(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Button { id, pressed } => {
                self.update_button(id, *pressed);
                true
            }
            InputEvent::Trigger { id, value } => {
                self.update_trigger(id, *value);
                true
            }
            InputEvent::Stick { surface, x, y } => {
                self.update_stick(surface, *x, *y);
                true
            }
            InputEvent::ViewOpened => false,
        }
    }

    /// Updates one button by identifier; unknown identifiers are ignored.
    pub fn update_button(&mut self, id: &str, pressed: bool) {
        match id {
            "A" => self.buttons.a = pressed,
            "B" => self.buttons.b = pressed,
            "X" => self.buttons.x = pressed,
            "Y" => self.buttons.y = pressed,
            "LB" => self.buttons.lb = pressed,
            "RB" => self.buttons.rb = pressed,
            "SELECT" => self.buttons.select = pressed,
            "START" => self.buttons.start = pressed,
            "BACK" => self.buttons.back = pressed,
            "HOME" => self.buttons.home = pressed,
            "UP" => self.buttons.dpad_up = pressed,
            "DOWN" => self.buttons.dpad_down = pressed,
            "LEFT" => self.buttons.dpad_left = pressed,
            "RIGHT" => self.buttons.dpad_right = pressed,
            _ => {}
        }
    }

    /// Updates one stick by surface name; unknown surfaces are ignored.
    pub fn update_stick(&mut self, surface: &str, x: i32, y: i32) {
        match surface {
            "stickLeft" => self.left_stick = AxisSample { x, y },
            "stickRight" => self.right_stick = AxisSample { x, y },
            _ => {}
        }
    }

    /// Updates one trigger by identifier; unknown identifiers are ignored.
    pub fn update_trigger(&mut self, id: &str, value: u8) {
        match id {
            "LT" => self.triggers.lt = value,
            "RT" => self.triggers.rt = value,
            _ => {}
        }
    }

    /// Serializes the full state as the outbound JSON payload.
    ///
    /// The `buttons` array carries the names of the currently held buttons.
    #[must_use]
    pub fn to_payload(&self) -> String {
        let mut held = Vec::new();

        if self.buttons.lb {
            held.push("LB");
        }
        if self.buttons.rb {
            held.push("RB");
        }
        if self.buttons.dpad_up {
            held.push("UP");
        }
        if self.buttons.dpad_down {
            held.push("DOWN");
        }
        if self.buttons.dpad_left {
            held.push("LEFT");
        }
        if self.buttons.dpad_right {
            held.push("RIGHT");
        }
        if self.buttons.y {
            held.push("Y");
        }
        if self.buttons.x {
            held.push("X");
        }
        if self.buttons.a {
            held.push("A");
        }
        if self.buttons.b {
            held.push("B");
        }
        if self.buttons.select {
            held.push("SELECT");
        }
        if self.buttons.home {
            held.push("HOME");
        }
        if self.buttons.back {
            held.push("BACK");
        }
        if self.buttons.start {
            held.push("START");
        }

        serde_json::json!({
            "buttons": held,
            "left_trigger": self.triggers.lt,
            "right_trigger": self.triggers.rt,
            "thumb_lx": self.left_stick.x,
            "thumb_ly": self.left_stick.y,
            "thumb_rx": self.right_stick.x,
            "thumb_ry": self.right_stick.y,
        })
        .to_string()
    }
}

/// One diagnostic line per dispatched event, for the observational
/// host-to-view debug stream.
#[must_use]
pub fn describe(event: &InputEvent) -> String {
    match event {
        InputEvent::Button { id, pressed } => {
            let state = if *pressed { "pressed" } else { "released" };
            format!("Btn: {} {}", id, state)
        }
        InputEvent::Trigger { id, value } => format!("Trigger: {} = {}", id, value),
        InputEvent::Stick { surface, x, y } => format!("{}: {}, {}", surface, x, y),
        InputEvent::ViewOpened => "controller view opened".to_string(),
    }
}

/// Consumes dispatched input events, maintains the aggregate state, and
/// emits payload snapshots plus diagnostic lines.
///
/// Runs until the event channel closes. Both outbound channels are
/// fire-and-forget: a gone consumer never stalls event processing.
pub struct GamepadHost {
    state: GamepadState,
    events: mpsc::UnboundedReceiver<InputEvent>,
    payloads: mpsc::UnboundedSender<String>,
    diagnostics: mpsc::UnboundedSender<String>,
}

impl GamepadHost {
    /// Creates a host over the emitter's event stream.
    #[must_use]
    pub fn new(
        events: mpsc::UnboundedReceiver<InputEvent>,
        payloads: mpsc::UnboundedSender<String>,
        diagnostics: mpsc::UnboundedSender<String>,
    ) -> Self {
        Self {
            state: GamepadState::new(),
            events,
            payloads,
            diagnostics,
        }
    }

    /// Event loop: apply, snapshot, emit.
    pub async fn run(mut self) {
        info!("gamepad host started");

        while let Some(event) = self.events.recv().await {
            let _ = self.diagnostics.send(describe(&event));

            if !self.state.apply(&event) {
                continue;
            }

            if self.payloads.send(self.state.to_payload()).is_err() {
                debug!("payload consumer gone, snapshot dropped");
            }
        }

        info!("gamepad host stopped: input stream closed");
    }
}
