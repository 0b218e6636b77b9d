//! Schema facts consumed by the generator.
//!
//! Tables and columns are produced by a [`SchemaSource`](crate::source::SchemaSource)
//! and stay immutable for the duration of one generation run.

use serde::{Deserialize, Serialize};

/// A table selected for generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name as stored in the database (e.g., "t_users")
    pub name: String,

    /// Entity class name derived from the table name (e.g., "User")
    pub mapping_class: String,
}

impl TableSchema {
    pub fn new(name: impl Into<String>, mapping_class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mapping_class: mapping_class.into(),
        }
    }
}

/// A single column of a table, in introspection order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Column name as stored in the database
    pub name: String,

    /// Property identifier in the generated entity
    pub mapping_name: String,

    /// Parameter identifier used by the setter
    pub mapping_var: String,

    /// Value kind the generator distinguishes
    pub scalar_type: ScalarType,

    /// Storage-level type tag (e.g., "varchar", "int")
    pub mapping_storage_type: String,

    /// Whether the column accepts NULL
    pub nullable: bool,

    /// Whether the column is part of the primary key
    pub is_primary_key: bool,

    /// Schema-declared default, verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_default: Option<String>,
}

impl ColumnSchema {
    /// Create a nullable, non-key column without a declared default.
    pub fn new(name: impl Into<String>, mapping_name: impl Into<String>, scalar_type: ScalarType) -> Self {
        let mapping_name = mapping_name.into();
        Self {
            name: name.into(),
            mapping_var: mapping_name.clone(),
            mapping_name,
            scalar_type,
            mapping_storage_type: scalar_type.to_string(),
            nullable: true,
            is_primary_key: false,
            declared_default: None,
        }
    }

    pub fn storage_type(mut self, storage_type: impl Into<String>) -> Self {
        self.mapping_storage_type = storage_type.into();
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self.nullable = false;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.declared_default = Some(value.into());
        self
    }
}

/// Column value kinds the generator distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    Int,
    Number,
    Bool,
    Float,
    String,
    DateTime,
}

impl std::fmt::Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarType::Int => write!(f, "int"),
            ScalarType::Number => write!(f, "number"),
            ScalarType::Bool => write!(f, "bool"),
            ScalarType::Float => write!(f, "float"),
            ScalarType::String => write!(f, "string"),
            ScalarType::DateTime => write!(f, "datetime"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_builder() {
        let column = ColumnSchema::new("id", "id", ScalarType::Int).storage_type("int").primary_key();
        assert!(column.is_primary_key);
        assert!(!column.nullable);
        assert_eq!(column.mapping_var, "id");
        assert_eq!(column.mapping_storage_type, "int");
        assert_eq!(column.declared_default, None);
    }

    #[test]
    fn test_scalar_type_serialization() {
        let json = serde_json::to_string(&ScalarType::DateTime).unwrap();
        assert_eq!(json, "\"datetime\"");
        let parsed: ScalarType = serde_json::from_str("\"number\"").unwrap();
        assert_eq!(parsed, ScalarType::Number);
    }
}
