//! Caller-supplied parameters of a generation run.

use std::path::{Path, PathBuf};

use crate::config::GeneratorConfig;

/// Builder describing which tables to generate and where to put them.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub database: String,
    pub include: Option<String>,
    pub exclude: Option<String>,
    pub output_path: PathBuf,
    pub namespace: String,
    pub driver: String,
    pub instance: Option<String>,
    pub table_prefix: Option<String>,
    pub field_prefix: Option<String>,
    pub template_dir: Option<PathBuf>,
    pub force_non_required: bool,
    /// Stop at the first table that fails to write
    pub strict: bool,
}

impl GenerationRequest {
    /// Create a request for `database` using the configured defaults.
    pub fn new(database: impl Into<String>, config: &GeneratorConfig) -> Self {
        Self {
            database: database.into(),
            include: None,
            exclude: None,
            output_path: config.default_output_path.clone(),
            namespace: config.default_namespace.clone(),
            driver: config.default_driver.clone(),
            instance: None,
            table_prefix: None,
            field_prefix: None,
            template_dir: None,
            force_non_required: false,
            strict: false,
        }
    }

    /// Comma-separated table names to generate; `*` matches any run of characters.
    pub fn include(mut self, tables: impl Into<String>) -> Self {
        self.include = non_empty(tables.into());
        self
    }

    /// Comma-separated table names to skip.
    pub fn exclude(mut self, tables: impl Into<String>) -> Self {
        self.exclude = non_empty(tables.into());
        self
    }

    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn driver(mut self, driver: impl Into<String>) -> Self {
        self.driver = driver.into();
        self
    }

    /// Storage instance the generated entities are bound to.
    pub fn instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = non_empty(instance.into());
        self
    }

    /// Prefix stripped from table names before deriving class names.
    pub fn table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_prefix = non_empty(prefix.into());
        self
    }

    /// Prefix stripped from column names before deriving property names.
    pub fn field_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.field_prefix = non_empty(prefix.into());
        self
    }

    /// Directory whose templates override the built-in ones.
    pub fn template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = Some(dir.into());
        self
    }

    /// Never mark properties as required.
    pub fn force_non_required(mut self, force: bool) -> Self {
        self.force_non_required = force;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn template_dir_ref(&self) -> Option<&Path> {
        self.template_dir.as_deref()
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}
