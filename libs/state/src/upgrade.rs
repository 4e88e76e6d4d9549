//! State upgrades.
//!
//! Schema version 0 stored the principal as `role_name` and wrote names in
//! ids unquoted (`db.role|false|USAGE|OnDatabase|sales`). Version 1 renames
//! the attribute to `database_role_name` and quotes every name part.

use serde_json::{Map, Value};
use snowgrant_id::{
    split_segments, CompositeGrantIdentifier, ObjectName, SchemaObjectGrantKind, TargetKind,
    SEPARATOR,
};
use tracing::{debug, info};

use crate::StateError;

/// Current state schema version.
pub const SCHEMA_VERSION: u64 = 1;

const LEGACY_ROLE_FIELD: &str = "role_name";
const ROLE_FIELD: &str = "database_role_name";

/// Rewrites an id into its canonical form.
///
/// Canonical ids pass through unchanged. Ids with unquoted names are
/// quoted part by part; anything else fails with the decode error of the
/// original input.
pub fn upgrade_legacy_id(raw: &str) -> Result<String, StateError> {
    let original_err = match CompositeGrantIdentifier::decode(raw) {
        Ok(identifier) => return Ok(identifier.encode()?),
        Err(e) => e,
    };

    let mut segments = split_segments(raw)?;
    let mut quoted_any = false;

    for position in name_positions(&segments) {
        let Some(segment) = segments.get_mut(position) else {
            continue;
        };
        if segment.is_empty() || segment.starts_with('"') {
            continue;
        }
        *segment = ObjectName::parse_unquoted(segment)?.to_string();
        quoted_any = true;
    }

    if !quoted_any {
        return Err(original_err.into());
    }

    let separator = SEPARATOR.to_string();
    let candidate = segments.join(separator.as_str());
    let upgraded = CompositeGrantIdentifier::decode(&candidate)?.encode()?;
    debug!(from = %raw, to = %upgraded, "quoted legacy grant identifier");
    Ok(upgraded)
}

/// Positions of name segments for the target kind found in `segments`.
fn name_positions(segments: &[String]) -> Vec<usize> {
    let mut positions = vec![0];

    let target_kind = segments.get(3).map(|s| TargetKind::parse(s));
    match target_kind {
        Some(Ok(TargetKind::OnDatabase)) => positions.push(4),
        Some(Ok(TargetKind::OnSchema)) => positions.push(5),
        Some(Ok(TargetKind::OnSchemaObject)) => {
            match segments.get(4).map(|s| SchemaObjectGrantKind::parse(s)) {
                Some(Ok(SchemaObjectGrantKind::OnObject)) => positions.push(6),
                Some(Ok(SchemaObjectGrantKind::OnAll | SchemaObjectGrantKind::OnFuture)) => {
                    positions.push(7)
                }
                _ => {}
            }
        }
        _ => {}
    }

    positions
}

/// Upgrades raw persisted state to [`SCHEMA_VERSION`].
///
/// State without a `schema_version` attribute is version 0.
pub fn upgrade_state(raw: Value) -> Result<Value, StateError> {
    let Value::Object(mut state) = raw else {
        return Err(StateError::Serialization(
            "grant state must be a JSON object".to_string(),
        ));
    };

    let version = match state.get("schema_version") {
        None => 0,
        Some(v) => v.as_u64().ok_or_else(|| {
            StateError::Serialization(format!("schema_version must be an integer, got {v}"))
        })?,
    };

    match version {
        0 => {
            upgrade_v0(&mut state)?;
            info!(from = 0, to = SCHEMA_VERSION, "upgraded grant state");
        }
        SCHEMA_VERSION => {}
        other => return Err(StateError::UnsupportedVersion(other)),
    }

    Ok(Value::Object(state))
}

fn upgrade_v0(state: &mut Map<String, Value>) -> Result<(), StateError> {
    if let Some(role) = state.remove(LEGACY_ROLE_FIELD) {
        state.entry(ROLE_FIELD).or_insert(role);
    }

    let id = state
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| StateError::Serialization("grant state has no string id".to_string()))?;
    let upgraded = upgrade_legacy_id(id)?;

    // Derived attributes are rebuilt from the upgraded id.
    let identifier = CompositeGrantIdentifier::decode(&upgraded)?;
    let derived = serde_json::to_value(crate::GrantState::from_identifier(&identifier)?)?;
    if let Value::Object(derived) = derived {
        for (key, value) in derived {
            state.insert(key, value);
        }
    }

    Ok(())
}
