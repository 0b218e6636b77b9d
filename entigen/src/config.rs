//! Generator configuration.
//!
//! Everything that used to be a hard-coded default (template names, namespace,
//! output path, driver, annotation syntax) lives in
//! [`GeneratorConfig`], which is built once and passed explicitly to the
//! generation driver.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::template::TemplateKind;
use crate::types::TypeNames;

/// Immutable configuration shared by every stage of a generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Directory whose files replace the compiled-in templates, when set
    pub builtin_template_dir: Option<PathBuf>,
    /// Template file name per fragment kind
    pub templates: TemplateNames,
    /// Extension of generated files, without the dot
    pub extension: String,
    pub default_namespace: String,
    pub default_output_path: PathBuf,
    pub default_driver: String,
    pub type_names: TypeNames,
    pub syntax: AnnotationSyntax,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            builtin_template_dir: None,
            templates: TemplateNames::default(),
            extension: "java".to_string(),
            default_namespace: "app.models.entity".to_string(),
            default_output_path: PathBuf::from("src/main/java/app/models/entity"),
            default_driver: "mysql".to_string(),
            type_names: TypeNames::default(),
            syntax: AnnotationSyntax::default(),
        }
    }
}

impl GeneratorConfig {
    /// Template file name for a fragment kind.
    pub fn template_file(&self, kind: TemplateKind) -> &str {
        self.templates.file_name(kind)
    }

    /// File name of the generated entity for a class.
    pub fn entity_file_name(&self, class_name: &str) -> String {
        format!("{class_name}.{}", self.extension)
    }

    pub fn with_builtin_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.builtin_template_dir = Some(dir.into());
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_type_names(mut self, type_names: TypeNames) -> Self {
        self.type_names = type_names;
        self
    }

    pub fn with_syntax(mut self, syntax: AnnotationSyntax) -> Self {
        self.syntax = syntax;
        self
    }
}

/// Template file names for each fragment kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateNames {
    pub entity: String,
    pub property: String,
    pub getter: String,
    pub setter: String,
}

impl Default for TemplateNames {
    fn default() -> Self {
        Self {
            entity: "entity.tpl".to_string(),
            property: "property.tpl".to_string(),
            getter: "getter.tpl".to_string(),
            setter: "setter.tpl".to_string(),
        }
    }
}

impl TemplateNames {
    pub fn file_name(&self, kind: TemplateKind) -> &str {
        match kind {
            TemplateKind::Entity => &self.entity,
            TemplateKind::Property => &self.property,
            TemplateKind::Getter => &self.getter,
            TemplateKind::Setter => &self.setter,
        }
    }
}

/// Framework-specific text the generator splices into templates.
///
/// `{}` in a clause is replaced with the value it formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationSyntax {
    /// Marker placed on primary-key properties
    pub id_marker: String,
    /// Marker placed on properties that must always hold a value
    pub required_marker: String,
    /// Import emitted once per entity when any property is required
    pub required_import: String,
    /// Clause referencing a storage instance
    pub instance_clause: String,
    /// Clause carrying a property's default literal
    pub default_clause: String,
}

impl Default for AnnotationSyntax {
    fn default() -> Self {
        Self {
            id_marker: "@Id".to_string(),
            required_marker: "@Required".to_string(),
            required_import: "import entigen.annotation.Required;".to_string(),
            instance_clause: "(instance = \"{}\")".to_string(),
            default_clause: ", defaultValue = {}".to_string(),
        }
    }
}

impl AnnotationSyntax {
    pub fn instance(&self, instance: &str) -> String {
        self.instance_clause.replace("{}", instance)
    }

    pub fn default_value(&self, literal: &str) -> String {
        self.default_clause.replace("{}", literal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.template_file(TemplateKind::Setter), "setter.tpl");
        assert_eq!(config.entity_file_name("User"), "User.java");
        assert_eq!(config.default_driver, "mysql");
        assert_eq!(config.builtin_template_dir, None);
    }

    #[test]
    fn test_builtin_template_dir_override() {
        let config = GeneratorConfig::default().with_builtin_template_dir("/opt/entigen/templates");
        assert_eq!(config.builtin_template_dir, Some(PathBuf::from("/opt/entigen/templates")));
    }

    #[test]
    fn test_syntax_clauses() {
        let syntax = AnnotationSyntax::default();
        assert_eq!(syntax.instance("replica"), "(instance = \"replica\")");
        assert_eq!(syntax.default_value("42"), ", defaultValue = 42");
    }

    #[test]
    fn test_syntax_partial_override() {
        let syntax: AnnotationSyntax = toml::from_str("required_marker = \"@NotNull\"").unwrap();
        assert_eq!(syntax.required_marker, "@NotNull");
        assert_eq!(syntax.id_marker, "@Id");
    }
}
