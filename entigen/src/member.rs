//! Per-column fragment generation.
//!
//! Every column yields a property declaration, a getter and a setter. Each
//! fragment resolves its own template directory, so a custom directory may
//! override any subset of the three.

use log::debug;
use std::path::Path;

use crate::config::GeneratorConfig;
use crate::defaults::{is_required, resolve_column_default};
use crate::errors::RenderResult;
use crate::schema::ColumnSchema;
use crate::template::{TemplateData, TemplateKind, TemplateRenderer, resolve_template};
use crate::types::type_name;

/// One rendered fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMember {
    pub kind: TemplateKind,
    pub text: String,
    /// Whether the fragment carries the required marker
    pub required: bool,
}

/// The three fragments generated for a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMembers {
    pub property: RenderedMember,
    pub getter: RenderedMember,
    pub setter: RenderedMember,
}

impl ColumnMembers {
    pub fn is_required(&self) -> bool {
        self.property.required
    }
}

/// Renders property and accessor fragments for columns of one table.
pub struct MemberGenerator<'a, R: TemplateRenderer + ?Sized> {
    renderer: &'a R,
    config: &'a GeneratorConfig,
    template_dir: Option<&'a Path>,
    force_non_required: bool,
}

impl<'a, R: TemplateRenderer + ?Sized> MemberGenerator<'a, R> {
    pub fn new(
        renderer: &'a R,
        config: &'a GeneratorConfig,
        template_dir: Option<&'a Path>,
        force_non_required: bool,
    ) -> Self {
        Self {
            renderer,
            config,
            template_dir,
            force_non_required,
        }
    }

    /// Render all three fragments for a column.
    pub fn generate(&self, column: &ColumnSchema) -> RenderResult<ColumnMembers> {
        Ok(ColumnMembers {
            property: self.property(column)?,
            getter: self.getter(column)?,
            setter: self.setter(column)?,
        })
    }

    pub fn property(&self, column: &ColumnSchema) -> RenderResult<RenderedMember> {
        let syntax = &self.config.syntax;
        let required = is_required(column, self.force_non_required);
        let default = resolve_column_default(column)
            .expression
            .map(|literal| syntax.default_value(&literal))
            .unwrap_or_default();

        let data = TemplateData::new()
            .with("type", type_name(column.scalar_type, &self.config.type_names))
            .with("propertyName", &column.mapping_name)
            .with("column", &column.name)
            .with("columnType", &column.mapping_storage_type)
            .with("default", default)
            .with("required", marker(required, &syntax.required_marker))
            .with("id", marker(column.is_primary_key, &syntax.id_marker));

        Ok(RenderedMember {
            kind: TemplateKind::Property,
            text: self.render(TemplateKind::Property, &data)?,
            required,
        })
    }

    pub fn getter(&self, column: &ColumnSchema) -> RenderResult<RenderedMember> {
        let data = TemplateData::new()
            .with("returnType", type_name(column.scalar_type, &self.config.type_names))
            .with("methodName", accessor_name("get", &column.mapping_name))
            .with("propertyName", &column.mapping_name);

        Ok(RenderedMember {
            kind: TemplateKind::Getter,
            text: self.render(TemplateKind::Getter, &data)?,
            required: false,
        })
    }

    pub fn setter(&self, column: &ColumnSchema) -> RenderResult<RenderedMember> {
        let data = TemplateData::new()
            .with("type", type_name(column.scalar_type, &self.config.type_names))
            .with("methodName", accessor_name("set", &column.mapping_name))
            .with("paramName", &column.mapping_var)
            .with("propertyName", &column.mapping_name);

        Ok(RenderedMember {
            kind: TemplateKind::Setter,
            text: self.render(TemplateKind::Setter, &data)?,
            required: false,
        })
    }

    fn render(&self, kind: TemplateKind, data: &TemplateData) -> RenderResult<String> {
        let source = resolve_template(kind, self.template_dir, self.config);
        debug!("Rendering {kind} fragment from {}", source.name());
        self.renderer.render(&source, data)
    }
}

/// Accessor method name, e.g. `get` + `createdAt` -> `getCreatedAt`.
pub fn accessor_name(prefix: &str, mapping_name: &str) -> String {
    let mut chars = mapping_name.chars();
    match chars.next() {
        Some(first) => format!("{prefix}{}{}", first.to_uppercase(), chars.as_str()),
        None => prefix.to_string(),
    }
}

fn marker(enabled: bool, text: &str) -> String {
    if enabled { text.to_string() } else { String::new() }
}
