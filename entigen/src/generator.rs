//! Generation driver.
//!
//! Selects tables through the schema source and generates one entity per
//! table, strictly one table at a time. Tables are independent: a table that
//! fails to write is reported and the run moves on, unless the request is
//! strict. Schema and rendering failures end the run.

use log::{info, warn};
use serde::Serialize;
use std::path::PathBuf;

use crate::config::GeneratorConfig;
use crate::defaults::{is_required, resolve_column_default};
use crate::entity::{EntityGenerator, EntityOutcome, RenderedEntity};
use crate::errors::GenerateError;
use crate::request::GenerationRequest;
use crate::schema::{ScalarType, TableSchema};
use crate::source::SchemaSource;
use crate::template::{TemplateRenderer, WriteOutcome};
use crate::types::type_name;

/// Outcome of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub entities: Vec<EntityOutcome>,
    pub failures: Vec<TableFailure>,
}

impl GenerationReport {
    pub fn written(&self) -> usize {
        self.count(WriteOutcome::Written)
    }

    pub fn unchanged(&self) -> usize {
        self.count(WriteOutcome::Unchanged)
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn count(&self, outcome: WriteOutcome) -> usize {
        self.entities.iter().filter(|entity| entity.outcome == outcome).count()
    }
}

/// A table whose entity could not be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableFailure {
    pub table: String,
    pub path: PathBuf,
    pub error: String,
}

/// Generation-ready facts about one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnFacts {
    pub column: String,
    pub property: String,
    pub scalar_type: ScalarType,
    pub type_name: String,
    pub storage_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    pub required: bool,
    pub primary_key: bool,
}

/// A selected table and its resolved columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableFacts {
    pub table: TableSchema,
    pub columns: Vec<ColumnFacts>,
}

/// Drives entity generation for every selected table.
pub struct Generator<'a, S: SchemaSource + ?Sized, R: TemplateRenderer + ?Sized> {
    source: &'a S,
    renderer: &'a R,
    config: &'a GeneratorConfig,
}

impl<'a, S: SchemaSource + ?Sized, R: TemplateRenderer + ?Sized> Generator<'a, S, R> {
    pub fn new(source: &'a S, renderer: &'a R, config: &'a GeneratorConfig) -> Self {
        Self {
            source,
            renderer,
            config,
        }
    }

    /// Generate and write one entity file per selected table.
    pub fn generate(&self, request: &GenerationRequest) -> Result<GenerationReport, GenerateError> {
        let tables = self.tables(request)?;
        info!("Generating {} entities from {}", tables.len(), request.database);

        let entities = EntityGenerator::new(self.renderer, self.config, request);
        let mut report = GenerationReport::default();

        for table in &tables {
            let columns = self.source.list_columns(
                &request.driver,
                &request.database,
                &table.name,
                request.field_prefix.as_deref(),
            )?;

            match entities.generate(table, &columns) {
                Ok(outcome) => report.entities.push(outcome),
                Err(err) if err.is_write() => {
                    if request.strict {
                        return Err(GenerateError::Table {
                            table: table.name.clone(),
                            source: err,
                        });
                    }
                    warn!("Skipping table {}: {err}", table.name);
                    report.failures.push(TableFailure {
                        table: table.name.clone(),
                        path: entities.output_file(table),
                        error: err.to_string(),
                    });
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(report)
    }

    /// Render every selected entity without writing anything.
    pub fn preview(&self, request: &GenerationRequest) -> Result<Vec<RenderedEntity>, GenerateError> {
        let entities = EntityGenerator::new(self.renderer, self.config, request);
        let mut rendered = Vec::new();

        for table in self.tables(request)? {
            let columns = self.source.list_columns(
                &request.driver,
                &request.database,
                &table.name,
                request.field_prefix.as_deref(),
            )?;
            rendered.push(entities.render(&table, &columns)?);
        }

        Ok(rendered)
    }

    /// Resolve the generation-ready facts of every selected table.
    pub fn describe(&self, request: &GenerationRequest) -> Result<Vec<TableFacts>, GenerateError> {
        let mut described = Vec::new();

        for table in self.tables(request)? {
            let columns = self
                .source
                .list_columns(
                    &request.driver,
                    &request.database,
                    &table.name,
                    request.field_prefix.as_deref(),
                )?
                .into_iter()
                .map(|column| ColumnFacts {
                    property: column.mapping_name.clone(),
                    type_name: type_name(column.scalar_type, &self.config.type_names).to_string(),
                    storage_type: column.mapping_storage_type.clone(),
                    default: resolve_column_default(&column).expression,
                    required: is_required(&column, request.force_non_required),
                    primary_key: column.is_primary_key,
                    scalar_type: column.scalar_type,
                    column: column.name,
                })
                .collect();
            described.push(TableFacts { table, columns });
        }

        Ok(described)
    }

    fn tables(&self, request: &GenerationRequest) -> Result<Vec<TableSchema>, GenerateError> {
        Ok(self.source.list_tables(
            &request.driver,
            &request.database,
            request.include.as_deref(),
            request.exclude.as_deref(),
            request.table_prefix.as_deref(),
        )?)
    }
}
