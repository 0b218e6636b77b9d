//! Template rendering.
//!
//! Templates are plain text with `{{ name }}` placeholders. A line that holds
//! nothing but placeholders which all render empty is dropped, so optional
//! markers do not leave blank lines behind. The built-in templates are
//! compiled into the crate; template files on disk only override them.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::GeneratorConfig;
use crate::errors::{RenderError, RenderResult};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder pattern is valid"));

/// Kinds of independently renderable fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Entity,
    Property,
    Getter,
    Setter,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 4] = [
        TemplateKind::Entity,
        TemplateKind::Property,
        TemplateKind::Getter,
        TemplateKind::Setter,
    ];
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateKind::Entity => write!(f, "entity"),
            TemplateKind::Property => write!(f, "property"),
            TemplateKind::Getter => write!(f, "getter"),
            TemplateKind::Setter => write!(f, "setter"),
        }
    }
}

/// Variables handed to a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TemplateData {
    values: BTreeMap<String, String>,
}

impl TemplateData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Result of writing rendered text to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

const ENTITY_TEMPLATE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/entity.tpl"));
const PROPERTY_TEMPLATE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/property.tpl"));
const GETTER_TEMPLATE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/getter.tpl"));
const SETTER_TEMPLATE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/setter.tpl"));

/// Built-in template text for a fragment kind.
pub fn builtin_template(kind: TemplateKind) -> &'static str {
    match kind {
        TemplateKind::Entity => ENTITY_TEMPLATE,
        TemplateKind::Property => PROPERTY_TEMPLATE,
        TemplateKind::Getter => GETTER_TEMPLATE,
        TemplateKind::Setter => SETTER_TEMPLATE,
    }
}

/// Where the text of one fragment kind comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Template file `name` inside `dir`
    File { dir: PathBuf, name: String },
    /// Text compiled into the crate
    Builtin(TemplateKind),
}

impl TemplateSource {
    /// Name used in diagnostics.
    pub fn name(&self) -> String {
        match self {
            TemplateSource::File { name, .. } => name.clone(),
            TemplateSource::Builtin(kind) => format!("built-in {kind} template"),
        }
    }
}

/// Renders a template with a data bundle.
pub trait TemplateRenderer {
    fn render(&self, source: &TemplateSource, data: &TemplateData) -> RenderResult<String>;

    /// Render a template straight into `target`.
    fn render_to_file(&self, source: &TemplateSource, data: &TemplateData, target: &Path) -> RenderResult<WriteOutcome> {
        let text = self.render(source, data)?;
        write_if_changed(target, &text)
    }
}

/// `{{ name }}` placeholder renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderRenderer;

impl PlaceholderRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for PlaceholderRenderer {
    fn render(&self, source: &TemplateSource, data: &TemplateData) -> RenderResult<String> {
        let (dir, name) = match source {
            TemplateSource::Builtin(kind) => return render_str(&source.name(), builtin_template(*kind), data),
            TemplateSource::File { dir, name } => (dir, name),
        };

        let path = dir.join(name);
        if !path.is_file() {
            return Err(RenderError::TemplateNotFound {
                dir: dir.clone(),
                name: name.clone(),
            });
        }
        let text = fs::read_to_string(&path).map_err(|source| RenderError::Read {
            path: path.clone(),
            source,
        })?;

        debug!("Rendering {}", path.display());
        render_str(name, &text, data)
    }
}

/// Substitute every placeholder in `source`.
pub fn render_str(template: &str, source: &str, data: &TemplateData) -> RenderResult<String> {
    let mut rendered = String::with_capacity(source.len());

    for line in source.split_inclusive('\n') {
        let mut output = String::with_capacity(line.len());
        let mut last = 0;
        let mut has_placeholder = false;

        for caps in PLACEHOLDER.captures_iter(line) {
            let (Some(whole), Some(key)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let value = data.get(key.as_str()).ok_or_else(|| RenderError::MissingVariable {
                template: template.to_string(),
                variable: key.as_str().to_string(),
            })?;
            output.push_str(&line[last..whole.start()]);
            output.push_str(value);
            last = whole.end();
            has_placeholder = true;
        }
        output.push_str(&line[last..]);

        if has_placeholder && output.trim().is_empty() && PLACEHOLDER.replace_all(line, "").trim().is_empty() {
            continue;
        }
        rendered.push_str(&output);
    }

    Ok(rendered)
}

/// Template to use for a fragment kind.
///
/// The configured directory wins when it holds the kind's template file, then
/// the on-disk built-in override directory, then the compiled-in text. Each
/// kind is resolved on its own, so a directory may override only some
/// templates.
pub fn resolve_template(kind: TemplateKind, configured: Option<&Path>, config: &GeneratorConfig) -> TemplateSource {
    let name = config.template_file(kind);
    for dir in [configured, config.builtin_template_dir.as_deref()].into_iter().flatten() {
        if dir.join(name).is_file() {
            return TemplateSource::File {
                dir: dir.to_path_buf(),
                name: name.to_string(),
            };
        }
        debug!("No {kind} template in {}", dir.display());
    }
    TemplateSource::Builtin(kind)
}

/// Write `contents` to `path` unless the file already holds exactly that text.
pub fn write_if_changed(path: &Path, contents: &str) -> RenderResult<WriteOutcome> {
    if let Ok(existing) = fs::read_to_string(path)
        && existing == contents
    {
        return Ok(WriteOutcome::Unchanged);
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| RenderError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, contents).map_err(|source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(WriteOutcome::Written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_placeholders() {
        let data = TemplateData::new().with("name", "email").with("type", "String");
        let out = render_str("t", "private {{type}} {{ name }};\n", &data).unwrap();
        assert_eq!(out, "private String email;\n");
    }

    #[test]
    fn test_render_drops_empty_marker_lines() {
        let data = TemplateData::new()
            .with("id", "")
            .with("required", "@Required")
            .with("name", "email");
        let source = "    {{id}}\n    {{required}}\n    private String {{name}};\n";
        let out = render_str("t", source, &data).unwrap();
        assert_eq!(out, "    @Required\n    private String email;\n");
    }

    #[test]
    fn test_render_keeps_lines_with_literal_text() {
        let data = TemplateData::new().with("instance", "");
        let out = render_str("t", "@Entity{{instance}}\n", &data).unwrap();
        assert_eq!(out, "@Entity\n");
    }

    #[test]
    fn test_render_keeps_blank_template_lines() {
        let data = TemplateData::new();
        let out = render_str("t", "a\n\nb\n", &data).unwrap();
        assert_eq!(out, "a\n\nb\n");
    }

    #[test]
    fn test_render_missing_variable() {
        let err = render_str("getter.tpl", "{{ methodName }}", &TemplateData::new()).unwrap_err();
        match err {
            RenderError::MissingVariable { template, variable } => {
                assert_eq!(template, "getter.tpl");
                assert_eq!(variable, "methodName");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_template_falls_back_per_kind() {
        let custom = tempfile::tempdir().unwrap();
        fs::write(custom.path().join("getter.tpl"), "custom").unwrap();
        let config = GeneratorConfig::default();

        let getter = resolve_template(TemplateKind::Getter, Some(custom.path()), &config);
        let setter = resolve_template(TemplateKind::Setter, Some(custom.path()), &config);
        let unset = resolve_template(TemplateKind::Entity, None, &config);

        assert_eq!(
            getter,
            TemplateSource::File {
                dir: custom.path().to_path_buf(),
                name: "getter.tpl".to_string(),
            }
        );
        assert_eq!(setter, TemplateSource::Builtin(TemplateKind::Setter));
        assert_eq!(unset, TemplateSource::Builtin(TemplateKind::Entity));
    }

    #[test]
    fn test_builtin_override_directory_is_consulted_before_compiled_text() {
        let overrides = tempfile::tempdir().unwrap();
        fs::write(overrides.path().join("setter.tpl"), "SET {{methodName}}\n").unwrap();
        let config = GeneratorConfig::default().with_builtin_template_dir(overrides.path());

        let setter = resolve_template(TemplateKind::Setter, None, &config);
        let getter = resolve_template(TemplateKind::Getter, None, &config);
        assert!(matches!(setter, TemplateSource::File { .. }));
        assert_eq!(getter, TemplateSource::Builtin(TemplateKind::Getter));
    }

    #[test]
    fn test_builtin_templates_render_without_any_template_directory() {
        let config = GeneratorConfig::default().with_builtin_template_dir("/nonexistent/entigen/templates");
        let data = TemplateData::new()
            .with("returnType", "String")
            .with("methodName", "getEmail")
            .with("propertyName", "email");

        let source = resolve_template(TemplateKind::Getter, None, &config);
        let text = PlaceholderRenderer::new().render(&source, &data).unwrap();
        assert_eq!(text, "    public String getEmail() {\n        return this.email;\n    }\n");
    }

    #[test]
    fn test_every_kind_has_builtin_text() {
        for kind in TemplateKind::ALL {
            assert!(builtin_template(kind).contains("{{"), "empty built-in {kind} template");
        }
    }

    #[test]
    fn test_builtin_missing_variable_names_the_kind() {
        let err = PlaceholderRenderer::new()
            .render(&TemplateSource::Builtin(TemplateKind::Setter), &TemplateData::new())
            .unwrap_err();
        assert!(err.to_string().contains("built-in setter template"));
    }

    #[test]
    fn test_renderer_reports_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let source = TemplateSource::File {
            dir: dir.path().to_path_buf(),
            name: "entity.tpl".to_string(),
        };
        let err = PlaceholderRenderer::new().render(&source, &TemplateData::new()).unwrap_err();
        assert!(matches!(err, RenderError::TemplateNotFound { .. }));
    }

    #[test]
    fn test_write_if_changed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/User.java");

        assert_eq!(write_if_changed(&path, "class User {}").unwrap(), WriteOutcome::Written);
        assert_eq!(write_if_changed(&path, "class User {}").unwrap(), WriteOutcome::Unchanged);
        assert_eq!(write_if_changed(&path, "class User { }").unwrap(), WriteOutcome::Written);
    }
}
