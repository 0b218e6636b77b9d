use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use entigen::{AnnotationSyntax, GeneratorConfig, TemplateNames, TypeNames};

/// Name of the project file looked up from the working directory upwards
pub const CONFIG_FILE: &str = "entigen.toml";

/// Project context for entigen operations
pub struct ProjectContext {
    /// Directory holding entigen.toml, or the starting directory when none exists
    pub project_root: PathBuf,
    /// Path to the project file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: Option<EntigenConfig>,
}

/// Configuration stored in entigen.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntigenConfig {
    #[serde(default)]
    pub generator: GeneratorSettings,
    #[serde(default)]
    pub types: TypeNames,
    #[serde(default)]
    pub syntax: AnnotationSyntax,
    #[serde(default)]
    pub templates: TemplateNames,
}

/// `[generator]` section; every key is optional and CLI flags win over it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<String>,
    pub force_non_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

impl EntigenConfig {
    /// Starter file written by `entigen init`
    pub fn starter(database: &str, schema: &str, defaults: &GeneratorConfig) -> Self {
        Self {
            generator: GeneratorSettings {
                schema: Some(schema.to_string()),
                database: Some(database.to_string()),
                driver: Some(defaults.default_driver.clone()),
                output_path: Some(defaults.default_output_path.display().to_string()),
                namespace: Some(defaults.default_namespace.clone()),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

impl ProjectContext {
    /// Find and load project context from current directory or ancestors
    pub fn find() -> Result<Self> {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Self::find_from(&current_dir)
    }

    /// Find project context starting from the given directory
    pub fn find_from(start: &Path) -> Result<Self> {
        let project_root = start
            .ancestors()
            .find(|dir| dir.join(CONFIG_FILE).is_file())
            .unwrap_or(start)
            .to_path_buf();
        Self::from_root(project_root)
    }

    /// Create context from a known project root
    pub fn from_root(project_root: PathBuf) -> Result<Self> {
        let config_path = project_root.join(CONFIG_FILE);

        let config = if config_path.is_file() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            let config: EntigenConfig = toml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?;
            log::debug!("Loaded project config from {}", config_path.display());
            Some(config)
        } else {
            None
        };

        Ok(Self {
            project_root,
            config_path,
            config,
        })
    }

    pub fn is_initialized(&self) -> bool {
        self.config.is_some()
    }

    /// Where settings come from, for verbose output
    pub fn describe(&self) -> String {
        if self.is_initialized() {
            format!("Project file: {}", self.config_path.display())
        } else {
            format!("No {CONFIG_FILE} found, using flags only")
        }
    }

    /// `[generator]` settings, empty when no project file exists
    pub fn settings(&self) -> GeneratorSettings {
        self.config
            .as_ref()
            .map(|config| config.generator.clone())
            .unwrap_or_default()
    }

    /// Resolve a path from the project file relative to the project root
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.project_root.join(path)
    }

    /// Generator configuration with the project's overrides applied
    pub fn generator_config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::default();
        if let Some(project) = &self.config {
            config.templates = project.templates.clone();
            config = config
                .with_type_names(project.types.clone())
                .with_syntax(project.syntax.clone());
            if let Some(extension) = &project.generator.extension {
                config = config.with_extension(extension.trim_start_matches('.'));
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EntigenConfig::default();
        assert!(config.generator.database.is_none());
        assert!(!config.generator.force_non_required);
        assert_eq!(config.types, TypeNames::default());
    }

    #[test]
    fn test_starter_serialization() {
        let defaults = GeneratorConfig::default();
        let config = EntigenConfig::starter("shop", "schema.toml", &defaults);
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[generator]"));
        assert!(toml_str.contains("database = \"shop\""));
        assert!(!toml_str.contains("instance"));
    }

    #[test]
    fn test_find_from_nested_directory() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(
            root.path().join(CONFIG_FILE),
            "[generator]\ndatabase = \"shop\"\nextension = \".kt\"\n\n[syntax]\nrequired_marker = \"@NotNull\"\n",
        )
        .unwrap();
        let nested = root.path().join("src/main");
        std::fs::create_dir_all(&nested).unwrap();

        let ctx = ProjectContext::find_from(&nested).unwrap();
        assert_eq!(ctx.project_root, root.path());
        assert_eq!(ctx.describe(), format!("Project file: {}", root.path().join(CONFIG_FILE).display()));
        assert_eq!(ctx.settings().database.as_deref(), Some("shop"));

        let config = ctx.generator_config();
        assert_eq!(config.extension, "kt");
        assert_eq!(config.syntax.required_marker, "@NotNull");
        assert_eq!(config.syntax.id_marker, "@Id");
    }

    #[test]
    fn test_missing_project_file_uses_start_directory() {
        let root = tempfile::tempdir().unwrap();
        let ctx = ProjectContext::find_from(root.path()).unwrap();
        assert!(!ctx.is_initialized());
        assert_eq!(ctx.describe(), "No entigen.toml found, using flags only");
        assert_eq!(ctx.project_root, root.path());
        assert_eq!(ctx.generator_config(), GeneratorConfig::default());
    }

    #[test]
    fn test_invalid_project_file_is_an_error() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join(CONFIG_FILE), "[generator\n").unwrap();
        assert!(ProjectContext::find_from(root.path()).is_err());
    }
}
