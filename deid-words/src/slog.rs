//! Adapters for emitting policy descriptions through `slog`.
//!
//! This module connects `crate::policy` with `slog` by providing
//! `slog::Value` implementations, so a policy can be logged as a structured
//! field without dumping its word list.
//!
//! It is responsible for:
//! - Emitting [`PolicyMode`] as its short name.
//! - Emitting [`PolicySummary`] as nested JSON via `slog`'s nested-value
//!   support.
//! - Avoiding fallible logging APIs: serialization failures are represented as
//!   placeholder strings rather than propagated as errors.
//!
//! It does not configure `slog`.

use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::policy::{PolicyMode, PolicySummary};

impl SlogValue for PolicyMode {
    fn serialize(
        &self,
        _record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        serializer.emit_str(key, self.as_str())
    }
}

impl SlogValue for PolicySummary {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let json_value = serde_json::to_value(self).unwrap_or_else(|_| {
            JsonValue::String("Failed to serialize policy summary".to_string())
        });
        let nested = slog::Serde(json_value);
        SlogValue::serialize(&nested, record, key, serializer)
    }
}
