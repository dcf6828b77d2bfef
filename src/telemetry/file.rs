//! Telemetry file load/save
//!
//! The file is a pretty-printed JSON document. `version` is checked before
//! anything else is decoded; only version 1 is accepted.

use crate::telemetry::error::{TelemetryError, TelemetryResult};
use crate::telemetry::session::{TelemetrySession, TelemetryStats, TELEMETRY_VERSION};
use std::path::Path;

/// Parse a telemetry document from a JSON string
pub fn parse_session(json: &str) -> TelemetryResult<TelemetrySession> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    let version = value
        .get("version")
        .ok_or(TelemetryError::MissingVersion)?
        .as_u64()
        .ok_or(TelemetryError::UnsupportedVersion { found: 0 })?;
    if version != TELEMETRY_VERSION {
        return Err(TelemetryError::UnsupportedVersion { found: version });
    }

    let mut session: TelemetrySession = serde_json::from_value(value)?;

    let counted = TelemetryStats::from_events(&session.events);
    if counted != session.stats {
        tracing::warn!(
            "Telemetry stats for session {} did not match its events, recomputed ({} -> {} total)",
            session.session_id,
            session.stats.total,
            counted.total
        );
        session.stats = counted;
    }

    Ok(session)
}

/// Load a telemetry file from disk
pub fn load_session(path: &Path) -> TelemetryResult<TelemetrySession> {
    let content = std::fs::read_to_string(path)?;
    match parse_session(&content) {
        Ok(session) => {
            tracing::info!(
                "Loaded telemetry session {} from {} ({} events)",
                session.session_id,
                path.display(),
                session.events().len()
            );
            Ok(session)
        }
        Err(e) => {
            tracing::warn!("Rejected telemetry file {}: {}", path.display(), e);
            Err(e)
        }
    }
}

/// Write a telemetry file to disk, creating parent directories as needed
pub fn save_session(path: &Path, session: &TelemetrySession) -> TelemetryResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(session)?;
    std::fs::write(path, data)?;

    tracing::info!(
        "Saved telemetry session {} to {}",
        session.session_id,
        path.display()
    );
    Ok(())
}
