//! # View Controller Module
//!
//! Page switching and one-time lazy initialization of the input pipeline.
//!
//! The controller view is initialized exactly once, the first time it
//! becomes visible: surface geometry is resolved from configuration, the
//! per-surface trackers are built, and a readiness signal is raised.
//! Touch events arriving before readiness reference unresolved geometry
//! and are treated as logged, benign no-ops.
//!
//! This is the thin outer layer: all real work happens in the tracker,
//! geometry, and emitter modules it routes between.

use std::collections::HashMap;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::config::SurfacesConfig;
use crate::emitter::{HostDispatch, InputEmitter};
use crate::relay::RelayCommand;
use crate::stick::StickSurface;
use crate::touch::{SurfaceTracker, TouchEvent, TouchPhase};

/// The two pages of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Connection settings page.
    Config,
    /// The controller surface page.
    Gamepad,
}

/// Input notifications from the embedding UI runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum UiInput {
    /// The gamepad page was opened.
    OpenGamepad,
    /// The configuration page was opened.
    OpenConfig,
    /// A touch batch on a joystick surface.
    Stick { surface: String, event: TouchEvent },
    /// A touch phase change on a button widget.
    Button { id: String, phase: TouchPhase },
    /// A touch phase change on a trigger widget.
    Trigger { id: String, phase: TouchPhase },
    /// The user asked for a relay connection.
    ConnectRelay { address: String },
}

/// Routes UI input through the touch/geometry/emitter pipeline.
pub struct ViewController<D: HostDispatch> {
    page: Page,
    surfaces: SurfacesConfig,
    emitter: InputEmitter<D>,
    trackers: HashMap<String, SurfaceTracker>,
    initialized: bool,
    ready_tx: watch::Sender<bool>,
    last_diagnostic: Option<String>,
}

impl<D: HostDispatch> ViewController<D> {
    /// Creates a view controller on the configuration page, with the
    /// pipeline not yet initialized.
    #[must_use]
    pub fn new(surfaces: SurfacesConfig, emitter: InputEmitter<D>) -> Self {
        let (ready_tx, _) = watch::channel(false);
        Self {
            page: Page::Config,
            surfaces,
            emitter,
            trackers: HashMap::new(),
            initialized: false,
            ready_tx,
            last_diagnostic: None,
        }
    }

    /// Returns the currently visible page.
    #[must_use]
    pub fn page(&self) -> Page {
        self.page
    }

    /// Readiness signal: becomes true once surface geometry is resolved.
    ///
    /// Components wanting to feed touch input can await this instead of
    /// guessing initialization timing.
    #[must_use]
    pub fn readiness(&self) -> watch::Receiver<bool> {
        self.ready_tx.subscribe()
    }

    /// Last diagnostic line received from the host, if any.
    #[must_use]
    pub fn last_diagnostic(&self) -> Option<&str> {
        self.last_diagnostic.as_deref()
    }

    /// Switches to the gamepad page, initializing the pipeline on first
    /// open and notifying the host exactly once.
    pub async fn open_gamepad(&mut self) {
        self.page = Page::Gamepad;

        if self.initialized {
            return;
        }

        self.resolve_surfaces();
        self.initialized = true;
        let _ = self.ready_tx.send(true);
        info!("controller view initialized");

        self.emitter.view_opened().await;
    }

    /// Switches back to the configuration page. The pipeline stays
    /// initialized; reopening the gamepad page is cheap.
    pub fn open_config(&mut self) {
        self.page = Page::Config;
    }

    /// Drops resolved geometry and lowers the readiness signal.
    pub fn teardown(&mut self) {
        self.trackers.clear();
        self.initialized = false;
        let _ = self.ready_tx.send(false);
        info!("controller view torn down");
    }

    /// Builds one tracker per configured surface.
    fn resolve_surfaces(&mut self) {
        for (name, cfg) in [
            ("stickLeft", &self.surfaces.left),
            ("stickRight", &self.surfaces.right),
        ] {
            let surface = StickSurface::from_container(
                name,
                cfg.origin_x,
                cfg.origin_y,
                cfg.container_size,
                cfg.indicator_size,
            );
            debug!(
                surface = name,
                radius = surface.radius(),
                effective_radius = surface.effective_radius(),
                "surface resolved"
            );
            self.trackers
                .insert(name.to_string(), SurfaceTracker::new(surface));
        }
    }

    /// Routes a touch batch to the named surface's tracker.
    pub async fn handle_stick_touch(&mut self, surface: &str, event: &TouchEvent) {
        if !self.initialized {
            debug!(surface, "surface geometry not resolved, touch ignored");
            return;
        }

        let tracker = match self.trackers.get_mut(surface) {
            Some(tracker) => tracker,
            None => {
                debug!(surface, "unknown surface, touch ignored");
                return;
            }
        };

        if let Some(sample) = tracker.handle_event(event) {
            self.emitter.stick_sample(surface, sample).await;
        }
    }

    /// Routes a button touch phase to the emitter.
    ///
    /// Release and cancel are equivalent from the consumer's point of
    /// view: both dispatch `pressed = false`.
    pub async fn handle_button_touch(&mut self, id: &str, phase: TouchPhase) {
        if !self.initialized {
            debug!(button = id, "view not initialized, touch ignored");
            return;
        }

        match phase {
            TouchPhase::Start => self.emitter.button(id, true).await,
            TouchPhase::End | TouchPhase::Cancel => self.emitter.button(id, false).await,
            TouchPhase::Move => {}
        }
    }

    /// Routes a trigger touch phase to the emitter. Cancel behaves
    /// identically to release.
    pub async fn handle_trigger_touch(&mut self, id: &str, phase: TouchPhase) {
        if !self.initialized {
            debug!(trigger = id, "view not initialized, touch ignored");
            return;
        }

        match phase {
            TouchPhase::Start => self.emitter.trigger(id, true).await,
            TouchPhase::End | TouchPhase::Cancel => self.emitter.trigger(id, false).await,
            TouchPhase::Move => {}
        }
    }

    /// Stores a diagnostic line from the host's observational stream.
    pub fn on_diagnostic(&mut self, text: String) {
        debug!(diagnostic = %text, "host diagnostic");
        self.last_diagnostic = Some(text);
    }

    /// Dispatches one UI input notification.
    async fn handle_input(&mut self, input: UiInput, relay_commands: &mpsc::Sender<RelayCommand>) {
        match input {
            UiInput::OpenGamepad => self.open_gamepad().await,
            UiInput::OpenConfig => self.open_config(),
            UiInput::Stick { surface, event } => self.handle_stick_touch(&surface, &event).await,
            UiInput::Button { id, phase } => self.handle_button_touch(&id, phase).await,
            UiInput::Trigger { id, phase } => self.handle_trigger_touch(&id, phase).await,
            UiInput::ConnectRelay { address } => {
                if relay_commands
                    .send(RelayCommand::Connect(address))
                    .await
                    .is_err()
                {
                    warn!("relay task gone, connect request dropped");
                }
            }
        }
    }

    /// View event loop: consumes UI input and host diagnostics until both
    /// streams close.
    pub async fn run(
        mut self,
        mut inputs: mpsc::Receiver<UiInput>,
        mut diagnostics: mpsc::UnboundedReceiver<String>,
        relay_commands: mpsc::Sender<RelayCommand>,
    ) {
        loop {
            tokio::select! {
                Some(input) = inputs.recv() => self.handle_input(input, &relay_commands).await,
                Some(text) = diagnostics.recv() => self.on_diagnostic(text),
                else => break,
            }
        }
        debug!("view controller stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::mocks::MockDispatch;
    use crate::emitter::InputEvent;
    use crate::touch::{TouchId, TouchPoint};

    fn controller() -> (ViewController<MockDispatch>, MockDispatch) {
        let mock = MockDispatch::new();
        let view = ViewController::new(SurfacesConfig::default(), InputEmitter::new(mock.clone()));
        (view, mock)
    }

    /// Touch point at the left stick's center. Default left surface:
    /// origin (40, 280), container 160 → center at (120, 360).
    fn left_center(id: u64) -> TouchPoint {
        TouchPoint::new(TouchId(id), 120.0, 360.0)
    }

    // ==================== Initialization Tests ====================

    #[tokio::test]
    async fn test_starts_on_config_page_not_ready() {
        let (view, _mock) = controller();
        assert_eq!(view.page(), Page::Config);
        assert!(!*view.readiness().borrow());
    }

    #[tokio::test]
    async fn test_open_gamepad_initializes_and_notifies_once() {
        let (mut view, mock) = controller();

        view.open_gamepad().await;
        assert_eq!(view.page(), Page::Gamepad);
        assert!(*view.readiness().borrow());

        // Reopening must not notify again
        view.open_config();
        view.open_gamepad().await;

        assert_eq!(mock.recorded(), vec![InputEvent::ViewOpened]);
    }

    #[tokio::test]
    async fn test_touch_before_initialization_is_benign_noop() {
        let (mut view, mock) = controller();

        let event = TouchEvent::single(TouchPhase::Start, left_center(1));
        view.handle_stick_touch("stickLeft", &event).await;
        view.handle_button_touch("A", TouchPhase::Start).await;
        view.handle_trigger_touch("LT", TouchPhase::Start).await;

        assert!(mock.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_teardown_lowers_readiness() {
        let (mut view, mock) = controller();
        view.open_gamepad().await;

        view.teardown();
        assert!(!*view.readiness().borrow());

        let event = TouchEvent::single(TouchPhase::Start, left_center(1));
        view.handle_stick_touch("stickLeft", &event).await;
        assert_eq!(mock.recorded(), vec![InputEvent::ViewOpened]);
    }

    // ==================== Stick Routing Tests ====================

    #[tokio::test]
    async fn test_stick_touch_lifecycle_dispatches_samples() {
        let (mut view, mock) = controller();
        view.open_gamepad().await;

        // Claim at center, drag right past the boundary, release
        view.handle_stick_touch(
            "stickLeft",
            &TouchEvent::single(TouchPhase::Start, left_center(1)),
        )
        .await;
        view.handle_stick_touch(
            "stickLeft",
            &TouchEvent::single(TouchPhase::Move, TouchPoint::new(TouchId(1), 210.0, 360.0)),
        )
        .await;
        view.handle_stick_touch(
            "stickLeft",
            &TouchEvent::single(TouchPhase::End, TouchPoint::new(TouchId(1), 210.0, 360.0)),
        )
        .await;

        assert_eq!(
            mock.recorded(),
            vec![
                InputEvent::ViewOpened,
                InputEvent::Stick {
                    surface: "stickLeft".into(),
                    x: 0,
                    y: 0,
                },
                InputEvent::Stick {
                    surface: "stickLeft".into(),
                    x: 32767,
                    y: 0,
                },
                InputEvent::Stick {
                    surface: "stickLeft".into(),
                    x: 0,
                    y: 0,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_surface_is_ignored() {
        let (mut view, mock) = controller();
        view.open_gamepad().await;

        let event = TouchEvent::single(TouchPhase::Start, left_center(1));
        view.handle_stick_touch("stickMiddle", &event).await;

        assert_eq!(mock.recorded(), vec![InputEvent::ViewOpened]);
    }

    // ==================== Button & Trigger Routing Tests ====================

    #[tokio::test]
    async fn test_button_press_release_and_cancel() {
        let (mut view, mock) = controller();
        view.open_gamepad().await;

        view.handle_button_touch("A", TouchPhase::Start).await;
        view.handle_button_touch("A", TouchPhase::End).await;
        view.handle_button_touch("B", TouchPhase::Start).await;
        view.handle_button_touch("B", TouchPhase::Cancel).await;

        assert_eq!(
            mock.recorded()[1..],
            [
                InputEvent::Button {
                    id: "A".into(),
                    pressed: true,
                },
                InputEvent::Button {
                    id: "A".into(),
                    pressed: false,
                },
                InputEvent::Button {
                    id: "B".into(),
                    pressed: true,
                },
                InputEvent::Button {
                    id: "B".into(),
                    pressed: false,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_trigger_cancel_equals_release() {
        let (mut view, mock) = controller();
        view.open_gamepad().await;

        view.handle_trigger_touch("LT", TouchPhase::Start).await;
        view.handle_trigger_touch("LT", TouchPhase::Cancel).await;

        assert_eq!(
            mock.recorded()[1..],
            [
                InputEvent::Trigger {
                    id: "LT".into(),
                    value: 255,
                },
                InputEvent::Trigger {
                    id: "LT".into(),
                    value: 0,
                },
            ]
        );
    }

    // ==================== Diagnostics Tests ====================

    #[tokio::test]
    async fn test_diagnostics_are_observational() {
        let (mut view, mock) = controller();
        view.on_diagnostic("Btn: A pressed".to_string());

        assert_eq!(view.last_diagnostic(), Some("Btn: A pressed"));
        assert!(mock.recorded().is_empty());
    }

    // ==================== Relay Command Tests ====================

    #[tokio::test]
    async fn test_connect_request_forwarded_to_relay() {
        let (mut view, _mock) = controller();
        let (relay_tx, mut relay_rx) = mpsc::channel(4);

        view.handle_input(
            UiInput::ConnectRelay {
                address: "ws://10.0.0.2:9001".into(),
            },
            &relay_tx,
        )
        .await;

        assert_eq!(
            relay_rx.recv().await,
            Some(RelayCommand::Connect("ws://10.0.0.2:9001".into()))
        );
    }
}
