//! Schema source backed by a snapshot file.
//!
//! A snapshot records what an introspection query against a live database
//! would return: databases, their tables, and each table's columns in
//! definition order. TOML and JSON files share one shape.

use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

use super::filter::TableFilter;
use super::naming::{camel_case, strip_prefix, studly_case};
use super::SchemaSource;
use crate::errors::{SchemaError, SchemaResult};
use crate::schema::{ColumnSchema, ScalarType, TableSchema};

/// Root of a snapshot file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    #[serde(default)]
    pub databases: Vec<DatabaseSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSnapshot {
    pub name: String,

    /// Driver the database was introspected with ("mysql" or "pgsql")
    #[serde(default = "default_driver")]
    pub driver: String,

    #[serde(default)]
    pub tables: Vec<TableSnapshot>,
}

fn default_driver() -> String {
    "mysql".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub name: String,

    /// Explicit entity class name; derived from the table name when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    #[serde(default)]
    pub columns: Vec<ColumnSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSnapshot {
    pub name: String,

    /// Declared database type (e.g., "varchar(255)", "int(11) unsigned")
    #[serde(rename = "type")]
    pub column_type: String,

    #[serde(default = "default_nullable")]
    pub nullable: bool,

    #[serde(default)]
    pub primary_key: bool,

    /// Declared default; numbers and booleans are kept as their text
    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Explicit property name; derived from the column name when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
}

fn default_nullable() -> bool {
    true
}

fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(text)) => Some(text),
        Some(serde_json::Value::Bool(flag)) => Some(if flag { "1" } else { "0" }.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

/// Database drivers with a storage type mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    Mysql,
    Pgsql,
}

impl Driver {
    pub fn parse(name: &str) -> SchemaResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(Driver::Mysql),
            "pgsql" | "postgres" | "postgresql" => Ok(Driver::Pgsql),
            _ => Err(SchemaError::UnsupportedDriver {
                driver: name.to_string(),
            }),
        }
    }
}

/// Map a declared column type to its scalar kind and storage type tag.
pub fn map_storage_type(driver: Driver, column_type: &str) -> (ScalarType, String) {
    let declared = column_type.trim().to_ascii_lowercase();
    let base = declared.split('(').next().unwrap_or_default().trim();

    match driver {
        Driver::Mysql => {
            let tag = base.split_whitespace().next().unwrap_or_default().to_string();
            if declared.starts_with("tinyint(1)") {
                return (ScalarType::Bool, tag);
            }
            let scalar = match tag.as_str() {
                "tinyint" | "smallint" | "mediumint" | "int" | "integer" => ScalarType::Int,
                "bigint" => ScalarType::Number,
                "bool" | "boolean" | "bit" => ScalarType::Bool,
                "float" | "double" | "real" | "decimal" | "numeric" => ScalarType::Float,
                "date" | "datetime" | "timestamp" | "time" | "year" => ScalarType::DateTime,
                _ => ScalarType::String,
            };
            (scalar, tag)
        }
        Driver::Pgsql => {
            let scalar = match base {
                "smallint" | "integer" | "int" | "int2" | "int4" | "serial" | "smallserial" => ScalarType::Int,
                "bigint" | "int8" | "bigserial" => ScalarType::Number,
                "boolean" | "bool" => ScalarType::Bool,
                "real" | "double precision" | "float4" | "float8" | "numeric" | "decimal" | "money" => {
                    ScalarType::Float
                }
                "date" => ScalarType::DateTime,
                other if other.starts_with("time") => ScalarType::DateTime,
                _ => ScalarType::String,
            };
            (scalar, base.to_string())
        }
    }
}

/// [`SchemaSource`] answering from an in-memory snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotSource {
    snapshot: SchemaSnapshot,
    path: Option<PathBuf>,
}

impl SnapshotSource {
    pub fn new(snapshot: SchemaSnapshot) -> Self {
        Self { snapshot, path: None }
    }

    /// Load a snapshot file; `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: &Path) -> SchemaResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path.extension().is_some_and(|ext| ext == "json");
        let snapshot = if is_json {
            serde_json::from_str(&content).map_err(|err| err.to_string())
        } else {
            toml::from_str(&content).map_err(|err| err.to_string())
        }
        .map_err(|message| SchemaError::Parse {
            path: path.to_path_buf(),
            message,
        })?;

        debug!("Loaded schema snapshot {}", path.display());
        Ok(Self {
            snapshot,
            path: Some(path.to_path_buf()),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn snapshot(&self) -> &SchemaSnapshot {
        &self.snapshot
    }

    fn database(&self, driver: &str, database: &str) -> SchemaResult<(Driver, &DatabaseSnapshot)> {
        let requested = Driver::parse(driver)?;
        let db = self
            .snapshot
            .databases
            .iter()
            .find(|db| db.name == database)
            .ok_or_else(|| SchemaError::UnknownDatabase {
                database: database.to_string(),
            })?;

        if Driver::parse(&db.driver)? != requested {
            return Err(SchemaError::DriverMismatch {
                database: database.to_string(),
                requested: driver.to_string(),
                actual: db.driver.clone(),
            });
        }
        Ok((requested, db))
    }
}

impl SchemaSource for SnapshotSource {
    fn list_tables(
        &self,
        driver: &str,
        database: &str,
        include: Option<&str>,
        exclude: Option<&str>,
        table_prefix: Option<&str>,
    ) -> SchemaResult<Vec<TableSchema>> {
        let (_, db) = self.database(driver, database)?;
        let filter = TableFilter::new(include, exclude)?;

        let tables: Vec<TableSchema> = db
            .tables
            .iter()
            .filter(|table| filter.matches(&table.name))
            .map(|table| {
                let class = table
                    .class
                    .clone()
                    .unwrap_or_else(|| studly_case(strip_prefix(&table.name, table_prefix)));
                TableSchema::new(&table.name, class)
            })
            .collect();

        debug!("Selected {} of {} tables in {database}", tables.len(), db.tables.len());
        Ok(tables)
    }

    fn list_columns(
        &self,
        driver: &str,
        database: &str,
        table: &str,
        field_prefix: Option<&str>,
    ) -> SchemaResult<Vec<ColumnSchema>> {
        let (driver, db) = self.database(driver, database)?;
        let snapshot = db
            .tables
            .iter()
            .find(|candidate| candidate.name == table)
            .ok_or_else(|| SchemaError::UnknownTable {
                database: database.to_string(),
                table: table.to_string(),
            })?;

        Ok(snapshot
            .columns
            .iter()
            .map(|column| {
                let property = column
                    .property
                    .clone()
                    .unwrap_or_else(|| camel_case(strip_prefix(&column.name, field_prefix)));
                let (scalar_type, storage_type) = map_storage_type(driver, &column.column_type);
                ColumnSchema {
                    name: column.name.clone(),
                    mapping_name: property.clone(),
                    mapping_var: property,
                    scalar_type,
                    mapping_storage_type: storage_type,
                    nullable: column.nullable,
                    is_primary_key: column.primary_key,
                    declared_default: column.default.clone(),
                }
            })
            .collect())
    }
}
