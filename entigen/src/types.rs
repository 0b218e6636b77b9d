//! Scalar type mapping.
//!
//! Maps a column's [`ScalarType`] to the type name used in generated code and
//! to a representative zero value. Both functions are total: anything that is
//! not numeric or boolean falls through to the string-like arm.

use serde::{Deserialize, Serialize};

use crate::schema::ScalarType;

/// Zero value of a scalar type, as a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroValue {
    Integer,
    Float,
    EmptyString,
}

impl ZeroValue {
    pub fn literal(self) -> &'static str {
        match self {
            ZeroValue::Integer => "0",
            ZeroValue::Float => "0.0",
            ZeroValue::EmptyString => "\"\"",
        }
    }
}

impl std::fmt::Display for ZeroValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.literal())
    }
}

/// Zero value for a scalar type. Booleans are falsy `0`, not `false`.
pub fn zero_value(scalar: ScalarType) -> ZeroValue {
    match scalar {
        ScalarType::Int | ScalarType::Number | ScalarType::Bool => ZeroValue::Integer,
        ScalarType::Float => ZeroValue::Float,
        ScalarType::String | ScalarType::DateTime => ZeroValue::EmptyString,
    }
}

/// Target-language type names per scalar kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeNames {
    pub int: String,
    pub number: String,
    pub bool: String,
    pub float: String,
    pub string: String,
    pub datetime: String,
}

impl Default for TypeNames {
    fn default() -> Self {
        Self {
            int: "Integer".to_string(),
            number: "Long".to_string(),
            bool: "Boolean".to_string(),
            float: "Double".to_string(),
            string: "String".to_string(),
            datetime: "String".to_string(),
        }
    }
}

/// Target-language type name for a scalar type.
pub fn type_name(scalar: ScalarType, names: &TypeNames) -> &str {
    match scalar {
        ScalarType::Int => &names.int,
        ScalarType::Number => &names.number,
        ScalarType::Bool => &names.bool,
        ScalarType::Float => &names.float,
        ScalarType::String => &names.string,
        ScalarType::DateTime => &names.datetime,
    }
}
