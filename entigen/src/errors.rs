use std::path::PathBuf;

use thiserror::Error;

/// Failure to enumerate tables or columns from a schema source.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The snapshot file could not be read.
    #[error("failed to read schema snapshot {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot file could not be parsed.
    #[error("failed to parse schema snapshot {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// The requested database is not described by the source.
    #[error("unknown database '{database}'")]
    UnknownDatabase { database: String },

    /// The requested table does not exist in the database.
    #[error("unknown table '{table}' in database '{database}'")]
    UnknownTable { database: String, table: String },

    /// The database exists but was introspected with another driver.
    #[error("database '{database}' uses driver '{actual}', not '{requested}'")]
    DriverMismatch {
        database: String,
        requested: String,
        actual: String,
    },

    /// No storage type mapping exists for this driver.
    #[error("unsupported driver '{driver}' (expected mysql or pgsql)")]
    UnsupportedDriver { driver: String },

    /// An include or exclude pattern could not be compiled.
    #[error("invalid table filter '{pattern}': {source}")]
    InvalidFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Failure while rendering a template or writing its output.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Neither the configured nor the built-in directory holds the template.
    #[error("template '{name}' not found in {}", dir.display())]
    TemplateNotFound { dir: PathBuf, name: String },

    /// The template file exists but could not be read.
    #[error("failed to read template {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A placeholder names a key missing from the data bundle.
    #[error("template '{template}' references unknown variable '{variable}'")]
    MissingVariable { template: String, variable: String },

    /// Rendered text could not be written to its target file.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level error returned by the generation driver.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The schema source failed; the run cannot continue.
    #[error("schema resolution failed")]
    Schema(#[from] SchemaError),

    /// A template could not be rendered; the run cannot continue.
    #[error("template rendering failed")]
    Render(#[from] RenderError),

    /// Strict mode stopped the run at the first table that failed to write.
    #[error("generation of table '{table}' failed")]
    Table {
        table: String,
        #[source]
        source: RenderError,
    },
}

impl RenderError {
    /// Whether this error came from writing output rather than rendering.
    pub fn is_write(&self) -> bool {
        matches!(self, RenderError::Write { .. })
    }
}

pub type SchemaResult<T> = Result<T, SchemaError>;
pub type RenderResult<T> = Result<T, RenderError>;
