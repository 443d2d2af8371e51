//! # Touch Bridge
//!
//! Turn a touch screen into a virtual game controller.
//!
//! The binary hosts the full pipeline: UI input notifications flow through
//! the view controller into the touch tracker and geometry engine, the
//! emitter dispatches controller events to the host task, and the host's
//! payload snapshots are forwarded to the optional WebSocket relay.
//!
//! The touch intake channel is owned by the embedding UI runtime; this
//! process opens the controller view, brings the relay up when configured,
//! and then serves input until Ctrl+C.

use anyhow::Result;
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};

use touch_bridge::config::Config;
use touch_bridge::emitter::{ChannelDispatch, InputEmitter};
use touch_bridge::pad::GamepadHost;
use touch_bridge::relay::{self, RelayBridge, RelayState};
use touch_bridge::view::{UiInput, ViewController};

/// Configuration file consulted on startup.
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Touch Bridge v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match Config::load(DEFAULT_CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            warn!(
                "no usable config at {} ({}), falling back to defaults",
                DEFAULT_CONFIG_PATH, e
            );
            Config::default()
        }
    };

    // Emitter → host
    let (dispatch, host_events) = ChannelDispatch::new();
    // Host → relay and host → view diagnostics
    let (payload_tx, payload_rx) = mpsc::unbounded_channel();
    let (diag_tx, diag_rx) = mpsc::unbounded_channel();
    // UI → view and view → relay
    let (ui_tx, ui_rx) = mpsc::channel(config.pipeline.event_capacity);
    let (relay_command_tx, relay_command_rx) = mpsc::channel(8);
    let (relay_status_tx, mut relay_status_rx) = watch::channel(RelayState::Absent);

    tokio::spawn(GamepadHost::new(host_events, payload_tx, diag_tx).run());
    tokio::spawn(relay::run(
        RelayBridge::new(),
        relay_command_rx,
        payload_rx,
        relay_status_tx,
    ));

    let view = ViewController::new(config.surfaces.clone(), InputEmitter::new(dispatch));
    let mut readiness = view.readiness();
    tokio::spawn(view.run(ui_rx, diag_rx, relay_command_tx));

    // Open the controller view and wait for surface geometry to resolve
    ui_tx.send(UiInput::OpenGamepad).await?;
    readiness.wait_for(|ready| *ready).await?;
    info!("input pipeline ready");

    if config.relay.enabled {
        ui_tx
            .send(UiInput::ConnectRelay {
                address: config.relay.address.clone(),
            })
            .await?;
    }

    info!("Press Ctrl+C to exit");

    // Serve until shutdown, logging relay status transitions
    loop {
        tokio::select! {
            changed = relay_status_rx.changed() => {
                if changed.is_ok() {
                    info!("relay status: {}", *relay_status_rx.borrow());
                } else {
                    break;
                }
            }

            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    Ok(())
}
