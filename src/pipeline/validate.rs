//! Generic field validation against the static schema tables.

use crate::models::Item;
use crate::models::schema::{FieldKind, FieldSpec, FieldValue, field_values, schema_for};

/// One failed constraint. Violations are reported, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

/// Checks every declared field of the item against its constraint record.
/// Returns all violations; the item itself is untouched.
#[must_use]
pub fn validate(item: &Item) -> Vec<Violation> {
    let mut violations = Vec::new();
    let values = field_values(item);
    for spec in schema_for(item) {
        let value = values
            .iter()
            .find(|(name, _)| *name == spec.name)
            .map(|(_, v)| v);
        let Some(value) = value else {
            violations.push(Violation {
                field: spec.name,
                message: "field missing from value table".to_string(),
            });
            continue;
        };
        check_field(spec, value, &mut violations);
    }
    violations
}

fn check_field(spec: &FieldSpec, value: &FieldValue, out: &mut Vec<Violation>) {
    if is_unset(value) {
        if !spec.optional {
            out.push(Violation {
                field: spec.name,
                message: "required field is unset".to_string(),
            });
        }
        return;
    }

    if !kind_matches(spec.kind, value) {
        out.push(Violation {
            field: spec.name,
            message: format!("expected {:?}, got {value:?}", spec.kind),
        });
        return;
    }

    if let (Some(min), FieldValue::Int(n)) = (spec.min, value)
        && *n < min
    {
        out.push(Violation {
            field: spec.name,
            message: format!("{n} is below the minimum {min}"),
        });
    }

    if let (Some(allowed), FieldValue::Str(s)) = (spec.allowed, value)
        && !allowed.contains(&s.as_str())
    {
        out.push(Violation {
            field: spec.name,
            message: format!("{s:?} is not an allowed value"),
        });
    }

    if let (Some(required), FieldValue::IntKeys(keys)) = (spec.required_keys, value) {
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        if sorted != required {
            out.push(Violation {
                field: spec.name,
                message: format!("keys {sorted:?} do not match the declared set"),
            });
        }
    }
}

/// A required text field holding the empty string counts as unset; typed
/// records have no other way to express a missing name.
fn is_unset(value: &FieldValue) -> bool {
    match value {
        FieldValue::Unset => true,
        FieldValue::Str(s) => s.is_empty(),
        _ => false,
    }
}

const fn kind_matches(kind: FieldKind, value: &FieldValue) -> bool {
    matches!(
        (kind, value),
        (FieldKind::Int, FieldValue::Int(_))
            | (FieldKind::Str, FieldValue::Str(_))
            | (FieldKind::Bool, FieldValue::Bool(_))
            | (FieldKind::IntKeyMap, FieldValue::IntKeys(_))
            | (FieldKind::StrMap, FieldValue::StrKeys(_))
    )
}
