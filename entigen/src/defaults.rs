//! Default value transfer and required-field inference.
//!
//! A declared schema default is coerced into a literal of the column's scalar
//! kind. Coercion is permissive: text that does not parse as a number becomes
//! `0` instead of being rejected.

use crate::schema::{ColumnSchema, ScalarType};
use crate::types::zero_value;

/// Outcome of default resolution for one column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedDefault {
    /// Literal to emit as the property default, if any
    pub expression: Option<String>,

    /// Value the column would hold without an explicit assignment.
    /// Equals `expression` when a default was declared, otherwise the
    /// type's zero value. Never emitted on its own.
    pub value: Option<String>,
}

/// Resolve the default literal for a column.
///
/// Primary keys never receive a default, whatever the schema declares.
pub fn resolve_default(scalar: ScalarType, is_primary_key: bool, declared: Option<&str>) -> ResolvedDefault {
    if is_primary_key {
        return ResolvedDefault::default();
    }

    let Some(declared) = declared else {
        return ResolvedDefault {
            expression: None,
            value: Some(zero_value(scalar).literal().to_string()),
        };
    };

    let literal = coerce_literal(scalar, declared.trim());
    ResolvedDefault {
        expression: Some(literal.clone()),
        value: Some(literal),
    }
}

/// Resolve the default literal for a column schema.
pub fn resolve_column_default(column: &ColumnSchema) -> ResolvedDefault {
    resolve_default(
        column.scalar_type,
        column.is_primary_key,
        column.declared_default.as_deref(),
    )
}

/// Whether the generated property must carry the required marker.
pub fn is_required(column: &ColumnSchema, force_non_required: bool) -> bool {
    if column.is_primary_key || force_non_required {
        return false;
    }
    !column.nullable && column.declared_default.is_none()
}

fn coerce_literal(scalar: ScalarType, value: &str) -> String {
    match scalar {
        ScalarType::Int | ScalarType::Number => leading_integer(value).to_string(),
        ScalarType::Bool => {
            if value.is_empty() || value == "0" {
                "0".to_string()
            } else {
                "1".to_string()
            }
        }
        ScalarType::Float => leading_float(value).to_string(),
        ScalarType::String | ScalarType::DateTime => quote(value),
    }
}

/// Parse the longest signed integer prefix, `0` when there is none.
fn leading_integer(value: &str) -> i64 {
    let bytes = value.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return 0;
    }

    match value[..end].parse::<i64>() {
        Ok(parsed) => parsed,
        Err(_) if bytes[0] == b'-' => i64::MIN,
        Err(_) => i64::MAX,
    }
}

/// Parse the longest floating-point prefix, `0` when there is none.
fn leading_float(value: &str) -> f64 {
    let bytes = value.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let mut fraction_end = end + 1;
        while fraction_end < bytes.len() && bytes[fraction_end].is_ascii_digit() {
            fraction_end += 1;
            digits += 1;
        }
        if digits > 0 {
            end = fraction_end;
        }
    }
    if digits == 0 {
        return 0.0;
    }

    // exponent only counts when digits follow it
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    value[..end].parse::<f64>().unwrap_or(0.0)
}

fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_key_never_defaults() {
        for scalar in [ScalarType::Int, ScalarType::String, ScalarType::Bool] {
            let resolved = resolve_default(scalar, true, Some("7"));
            assert_eq!(resolved, ResolvedDefault::default());
        }
    }

    #[test]
    fn test_absent_default_reports_zero_value() {
        let resolved = resolve_default(ScalarType::Float, false, None);
        assert_eq!(resolved.expression, None);
        assert_eq!(resolved.value.as_deref(), Some("0.0"));

        let resolved = resolve_default(ScalarType::String, false, None);
        assert_eq!(resolved.expression, None);
        assert_eq!(resolved.value.as_deref(), Some("\"\""));
    }

    #[test]
    fn test_declared_defaults_are_coerced() {
        let expr = |scalar, declared| resolve_default(scalar, false, Some(declared)).expression.unwrap();

        assert_eq!(expr(ScalarType::Int, "42"), "42");
        assert_eq!(expr(ScalarType::Number, " -17 "), "-17");
        assert_eq!(expr(ScalarType::Float, " 3.5 "), "3.5");
        assert_eq!(expr(ScalarType::Float, "3.0"), "3");
        assert_eq!(expr(ScalarType::String, "abc"), "\"abc\"");
        assert_eq!(expr(ScalarType::DateTime, "CURRENT_TIMESTAMP"), "\"CURRENT_TIMESTAMP\"");
        assert_eq!(expr(ScalarType::Bool, "1"), "1");
        assert_eq!(expr(ScalarType::Bool, "true"), "1");
        assert_eq!(expr(ScalarType::Bool, "0"), "0");
        assert_eq!(expr(ScalarType::Bool, " "), "0");
    }

    #[test]
    fn test_coercion_is_permissive() {
        let expr = |scalar, declared| resolve_default(scalar, false, Some(declared)).expression.unwrap();

        assert_eq!(expr(ScalarType::Int, "abc"), "0");
        assert_eq!(expr(ScalarType::Int, "12abc"), "12");
        assert_eq!(expr(ScalarType::Int, "3.9"), "3");
        assert_eq!(expr(ScalarType::Int, "99999999999999999999"), i64::MAX.to_string());
        assert_eq!(expr(ScalarType::Float, "n/a"), "0");
        assert_eq!(expr(ScalarType::Float, "1.5e2x"), "150");
        assert_eq!(expr(ScalarType::Float, ".25"), "0.25");
        assert_eq!(expr(ScalarType::Float, "2e"), "2");
    }

    #[test]
    fn test_string_defaults_are_escaped() {
        let resolved = resolve_default(ScalarType::String, false, Some("say \"hi\""));
        assert_eq!(resolved.expression.as_deref(), Some("\"say \\\"hi\\\"\""));
    }

    #[test]
    fn test_required_inference() {
        let email = ColumnSchema::new("email", "email", ScalarType::String).not_null();
        assert!(is_required(&email, false));
        assert!(!is_required(&email, true));

        let id = ColumnSchema::new("id", "id", ScalarType::Int).primary_key();
        assert!(!is_required(&id, false));

        let active = ColumnSchema::new("active", "active", ScalarType::Bool)
            .not_null()
            .default_value("1");
        assert!(!is_required(&active, false));

        let bio = ColumnSchema::new("bio", "bio", ScalarType::String);
        assert!(!is_required(&bio, false));
    }
}
