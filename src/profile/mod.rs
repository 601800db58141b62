//! Canonical Saju and astrology profiles built from loosely-typed chart records.
//!
//! Upstream chart calculators have produced several historical JSON shapes. The
//! builders here accept any of them and always yield a fully-populated profile,
//! so downstream analysis never has to deal with holes in the data.

mod astro;
mod saju;

pub use astro::{AstrologyProfile, Element, Placement, Point, build_astro_profile, element_from_sign};
pub use saju::{FiveElements, SajuProfile, build_saju_profile};

use serde_json::Value;

/// Read a non-empty, trimmed string from either a bare string or an object
/// carrying a `name` field.
pub(crate) fn text_of(value: Option<&Value>) -> Option<String> {
    let value = value?;
    let raw = match value {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map.get("name")?.as_str()?,
        _ => return None,
    };
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Treat JSON `null`, `false`, empty strings and zero as absent input.
pub(crate) fn is_falsy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        _ => false,
    }
}
