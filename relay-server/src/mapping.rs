//! Field map translation from webhook bodies to upstream form payloads.
//!
//! The field map is a flat JSON object configured out of band, mapping
//! logical body keys (`"title"`, `"city"`, `"date_year"`, ...) to the
//! opaque field identifiers the upstream form expects (`"entry.123456"`).
//! Keys suffixed `_year`, `_month`, or `_day` are reserved for decomposed
//! date fields and are never matched directly against the body.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::warn;

/// Logical body keys carrying an ISO `yyyy-mm-dd` date that gets
/// decomposed into `<slot>_year` / `<slot>_month` / `<slot>_day` entries.
const DATE_SLOTS: [&str; 2] = ["date", "deadline"];

/// Typed mapping from logical field keys to upstream form identifiers.
///
/// Lookups for keys that are not mapped are a defined no-op, never an
/// error: unmapped body keys are silently dropped, and mapped keys absent
/// from the body are skipped.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    entries: BTreeMap<String, String>,
}

impl FieldMap {
    /// Parse a field map from its JSON configuration text.
    ///
    /// Empty or invalid configuration yields an empty map (every body key
    /// is then dropped), with a warning rather than an error.
    pub fn from_json(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }

        match serde_json::from_str::<BTreeMap<String, String>>(raw) {
            Ok(entries) => Self { entries },
            Err(e) => {
                warn!(error = %e, "field_map_invalid_json");
                Self::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up the upstream identifier for a logical key.
    ///
    /// Entries with an empty identifier behave as if absent.
    fn identifier(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }

    /// Translate a parsed webhook body into the outgoing form payload.
    ///
    /// The returned pairs are built fresh per call from the body alone;
    /// nothing is cached across invocations.
    pub fn translate(&self, body: &Map<String, Value>) -> Vec<(String, String)> {
        let mut form = Vec::new();

        // Plain fields: map-driven, reserved date suffixes excluded.
        for (key, entry_id) in &self.entries {
            if is_date_component(key) || entry_id.is_empty() {
                continue;
            }
            if let Some(value) = body.get(key).and_then(scalar_text) {
                form.push((entry_id.clone(), value));
            }
        }

        // Decomposed date fields.
        for slot in DATE_SLOTS {
            if let Some(iso) = body.get(slot).and_then(Value::as_str) {
                self.push_date(slot, iso, &mut form);
            }
        }

        form
    }

    /// Append the decomposed year/month/day entries for one date slot.
    ///
    /// Expects `yyyy-mm-dd`; year and day are passed through as literal
    /// text, the month has its leading zero stripped (`"03"` becomes `3`).
    /// Suffixes missing from the map are omitted without error.
    fn push_date(&self, slot: &str, iso: &str, form: &mut Vec<(String, String)>) {
        let parts: Vec<&str> = iso.split('-').collect();
        let (year, month, day) = match parts[..] {
            [y, m, d] => (y, m, d),
            _ => {
                warn!(slot = slot, value = iso, "date_field_not_iso");
                return;
            }
        };

        if let Some(id) = self.identifier(&format!("{slot}_year")) {
            form.push((id.to_string(), year.to_string()));
        }
        if let Some(id) = self.identifier(&format!("{slot}_month")) {
            match month.parse::<u32>() {
                Ok(m) => form.push((id.to_string(), m.to_string())),
                Err(_) => warn!(slot = slot, value = iso, "date_month_not_numeric"),
            }
        }
        if let Some(id) = self.identifier(&format!("{slot}_day")) {
            form.push((id.to_string(), day.to_string()));
        }
    }
}

/// Whether a map key is reserved for date decomposition.
fn is_date_component(key: &str) -> bool {
    key.ends_with("_year") || key.ends_with("_month") || key.ends_with("_day")
}

/// Render a body value as form text.
///
/// Strings pass through verbatim; numbers and booleans use their JSON
/// text form. `null` counts as undefined and yields nothing.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
