//! Pure helpers shared by the resource adapters around path handling.
//!
//! Remote-error classification works on the error's rendered text because the
//! HTTP client reports failures as formatted messages, not structured codes.

use std::fmt::Write as _;
use std::time::Duration;

use serde_json::Value;
use tracing::warn;

/// Compare two JSON documents for semantic equality, for suppressing diffs
/// caused only by formatting or key order.
///
/// `state` is the value recorded from the remote side, `config` the value the
/// user wrote. If `state` is not valid JSON the values are reported as
/// different (the recorded value needs to be rewritten); if `config` is not
/// valid JSON they are reported as equal (a later validation step owns that
/// complaint, suppressing the diff avoids a double report).
#[must_use]
pub fn json_equivalent(state: &str, config: &str) -> bool {
    let state_json: Value = match serde_json::from_str(state) {
        Ok(v) => v,
        Err(err) => {
            warn!(%err, "recorded value is not valid JSON");
            return false;
        }
    };
    let config_json: Value = match serde_json::from_str(config) {
        Ok(v) => v,
        Err(err) => {
            warn!(%err, "configured value is not valid JSON");
            return true;
        }
    };
    state_json == config_json
}

/// Render a duration the way Vault prints TTLs (`1h30m`, `15m`, `1m30s`),
/// trimming the trailing zero units a plain h/m/s rendering would carry.
#[must_use]
pub fn short_dur(d: Duration) -> String {
    let total = d.as_secs();
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);

    let mut out = String::new();
    if h > 0 {
        let _ = write!(out, "{h}h{m}m{s}s");
    } else if m > 0 {
        let _ = write!(out, "{m}m{s}s");
    } else {
        let _ = write!(out, "{s}s");
    }

    if let Some(trimmed) = out.strip_suffix("m0s") {
        out = format!("{trimmed}m");
    }
    if let Some(trimmed) = out.strip_suffix("h0m") {
        out = format!("{trimmed}h");
    }
    out
}

/// Whether a remote error means the target no longer exists.
#[must_use]
pub fn is_not_found(err: &dyn std::error::Error) -> bool {
    err.to_string().contains("Code: 404")
}

/// Whether a remote error means the token behind the request has expired or
/// been revoked, so the operation should re-authenticate rather than fail.
#[must_use]
pub fn is_expired_token(err: &dyn std::error::Error) -> bool {
    let text = err.to_string();
    text.contains("invalid accessor") || text.contains("failed to find accessor entry")
}

/// The conflict list for `field` within a mutually-exclusive `group`: every
/// other member of the group. Groups smaller than two have nothing to
/// conflict with.
#[must_use]
pub fn conflicts_with(field: &str, group: &[&str]) -> Vec<String> {
    if group.len() < 2 {
        return Vec::new();
    }
    group
        .iter()
        .filter(|member| **member != field)
        .map(|member| (*member).to_owned())
        .collect()
}
