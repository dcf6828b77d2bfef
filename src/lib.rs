//! Screen telemetry - the pointer/keyboard side of a screen recording.
//!
//! Records raw input telemetry during capture and derives the visual effects
//! built from it: the decaying cursor trail overlay, the auto-zoom region
//! contract, and the timeline mapping used to retime zoom keyframes.

pub mod capture;
pub mod processing;
pub mod project;
pub mod recorder;
pub mod telemetry;
pub mod timeline;
pub mod zoom;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging.
///
/// Honours `RUST_LOG`; safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "screen_telemetry=debug,telemetry_inspect=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();

    tracing::debug!("screen-telemetry v{}", env!("CARGO_PKG_VERSION"));
}
