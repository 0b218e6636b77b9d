//! Whole-entity generation for one table.

use log::{debug, info};
use serde::Serialize;
use std::path::PathBuf;

use crate::config::GeneratorConfig;
use crate::errors::RenderResult;
use crate::member::MemberGenerator;
use crate::request::GenerationRequest;
use crate::schema::{ColumnSchema, TableSchema};
use crate::template::{TemplateData, TemplateKind, TemplateRenderer, WriteOutcome, resolve_template};

/// Rendered entity text, not yet written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedEntity {
    pub table: String,
    pub class_name: String,
    pub path: PathBuf,
    pub columns: usize,
    /// Whether any property carries the required marker
    pub uses_required: bool,
    #[serde(skip)]
    pub text: String,
}

/// Entity written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityOutcome {
    pub table: String,
    pub class_name: String,
    pub path: PathBuf,
    pub columns: usize,
    pub outcome: WriteOutcome,
}

/// Table-level data bundle plus facts gathered while building it.
struct EntityBundle {
    data: TemplateData,
    columns: usize,
    uses_required: bool,
}

/// Assembles entity source files from table and column schemas.
pub struct EntityGenerator<'a, R: TemplateRenderer + ?Sized> {
    renderer: &'a R,
    config: &'a GeneratorConfig,
    request: &'a GenerationRequest,
}

impl<'a, R: TemplateRenderer + ?Sized> EntityGenerator<'a, R> {
    pub fn new(renderer: &'a R, config: &'a GeneratorConfig, request: &'a GenerationRequest) -> Self {
        Self {
            renderer,
            config,
            request,
        }
    }

    /// Target file of the entity for `table`.
    pub fn output_file(&self, table: &TableSchema) -> PathBuf {
        self.request
            .output_path
            .join(self.config.entity_file_name(&table.mapping_class))
    }

    /// Render the entity without touching the file system.
    pub fn render(&self, table: &TableSchema, columns: &[ColumnSchema]) -> RenderResult<RenderedEntity> {
        let bundle = self.bundle(table, columns)?;
        let template = resolve_template(TemplateKind::Entity, self.request.template_dir_ref(), self.config);
        let text = self.renderer.render(&template, &bundle.data)?;

        Ok(RenderedEntity {
            table: table.name.clone(),
            class_name: table.mapping_class.clone(),
            path: self.output_file(table),
            columns: bundle.columns,
            uses_required: bundle.uses_required,
            text,
        })
    }

    /// Render the entity and write it to `<output_path>/<Class>.<ext>`.
    pub fn generate(&self, table: &TableSchema, columns: &[ColumnSchema]) -> RenderResult<EntityOutcome> {
        let bundle = self.bundle(table, columns)?;
        let template = resolve_template(TemplateKind::Entity, self.request.template_dir_ref(), self.config);
        let path = self.output_file(table);

        let outcome = self.renderer.render_to_file(&template, &bundle.data, &path)?;

        match outcome {
            WriteOutcome::Written => info!("Generated {} ({})", path.display(), table.name),
            WriteOutcome::Unchanged => debug!("{} is up to date", path.display()),
        }

        Ok(EntityOutcome {
            table: table.name.clone(),
            class_name: table.mapping_class.clone(),
            path,
            columns: bundle.columns,
            outcome,
        })
    }

    fn bundle(&self, table: &TableSchema, columns: &[ColumnSchema]) -> RenderResult<EntityBundle> {
        let members = MemberGenerator::new(
            self.renderer,
            self.config,
            self.request.template_dir_ref(),
            self.request.force_non_required,
        );

        let mut properties = Vec::with_capacity(columns.len());
        let mut getters = Vec::with_capacity(columns.len());
        let mut setters = Vec::with_capacity(columns.len());
        let mut uses_required = false;

        for column in columns {
            let generated = members.generate(column)?;
            uses_required |= generated.is_required();
            properties.push(generated.property.text);
            getters.push(generated.getter.text);
            setters.push(generated.setter.text);
        }

        let properties = join_block(&properties);
        let members = format!("{}\n\n{}", join_block(&getters), join_block(&setters));

        let syntax = &self.config.syntax;
        let required_import = if uses_required {
            syntax.required_import.clone()
        } else {
            String::new()
        };
        let instance = match self.request.instance.as_deref() {
            Some(instance) if !instance.is_empty() => syntax.instance(instance),
            _ => String::new(),
        };

        let data = TemplateData::new()
            .with("properties", properties)
            .with("members", members)
            .with("tableName", &table.name)
            .with("entityName", &table.mapping_class)
            .with("namespace", &self.request.namespace)
            .with("requiredImport", required_import)
            .with("instance", instance);

        Ok(EntityBundle {
            data,
            columns: columns.len(),
            uses_required,
        })
    }
}

/// Newline-join fragments, order preserved, without a trailing newline.
fn join_block(fragments: &[String]) -> String {
    fragments.join("\n").trim_end_matches('\n').to_string()
}
