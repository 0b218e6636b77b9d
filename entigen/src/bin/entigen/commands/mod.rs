pub mod entity;
pub mod init;
pub mod tables;

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use entigen::{GenerationRequest, GeneratorConfig, SnapshotSource};

use crate::context::ProjectContext;

/// Table selection flags shared by `entity` and `tables`
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Schema snapshot describing the database (TOML or JSON)
    #[arg(long, env = "ENTIGEN_SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Database to generate entities for
    #[arg(long = "db")]
    pub database: Option<String>,

    /// Driver the database was introspected with (mysql, pgsql)
    #[arg(long)]
    pub driver: Option<String>,

    /// Comma-separated tables to include; `*` matches any characters
    #[arg(long)]
    pub include: Option<String>,

    /// Comma-separated tables to skip
    #[arg(long)]
    pub exclude: Option<String>,

    /// Prefix stripped from table names before deriving class names
    #[arg(long)]
    pub table_prefix: Option<String>,

    /// Prefix stripped from column names before deriving property names
    #[arg(long)]
    pub field_prefix: Option<String>,

    /// Never mark properties as required
    #[arg(long)]
    pub force: bool,
}

/// Load the schema snapshot named by the flags or the project file
pub fn load_source(ctx: &ProjectContext, selection: &SelectionArgs) -> Result<SnapshotSource> {
    let settings = ctx.settings();
    let path = match (&selection.schema, &settings.schema) {
        (Some(path), _) => path.clone(),
        (None, Some(path)) => ctx.resolve(path),
        (None, None) => anyhow::bail!(
            "No schema snapshot given. Pass --schema, set ENTIGEN_SCHEMA, or add generator.schema to {}",
            ctx.config_path.display()
        ),
    };

    SnapshotSource::load(&path).with_context(|| format!("Failed to load schema snapshot {}", path.display()))
}

/// Build a request from the selection flags, falling back to the project file
pub fn selection_request(
    ctx: &ProjectContext,
    config: &GeneratorConfig,
    selection: &SelectionArgs,
) -> Result<GenerationRequest> {
    let settings = ctx.settings();
    let database = pick(&selection.database, &settings.database).ok_or_else(|| {
        anyhow::anyhow!(
            "No database given. Pass --db or add generator.database to {}",
            crate::context::CONFIG_FILE
        )
    })?;

    let mut request = GenerationRequest::new(database, config)
        .force_non_required(selection.force || settings.force_non_required);

    if let Some(driver) = pick(&selection.driver, &settings.driver) {
        request = request.driver(driver);
    }
    if let Some(include) = pick(&selection.include, &settings.include) {
        request = request.include(include);
    }
    if let Some(exclude) = pick(&selection.exclude, &settings.exclude) {
        request = request.exclude(exclude);
    }
    if let Some(prefix) = pick(&selection.table_prefix, &settings.table_prefix) {
        request = request.table_prefix(prefix);
    }
    if let Some(prefix) = pick(&selection.field_prefix, &settings.field_prefix) {
        request = request.field_prefix(prefix);
    }

    Ok(request)
}

/// Flag value if given, else the project file value
pub fn pick(flag: &Option<String>, setting: &Option<String>) -> Option<String> {
    flag.clone().or_else(|| setting.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(contents: &str) -> (tempfile::TempDir, ProjectContext) {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join(crate::context::CONFIG_FILE), contents).unwrap();
        let ctx = ProjectContext::find_from(root.path()).unwrap();
        (root, ctx)
    }

    #[test]
    fn test_flags_override_project_file() {
        let (_root, ctx) = project("[generator]\ndatabase = \"shop\"\ntable_prefix = \"t_\"\ndriver = \"pgsql\"\n");
        let config = ctx.generator_config();
        let selection = SelectionArgs {
            database: Some("billing".to_string()),
            ..Default::default()
        };

        let request = selection_request(&ctx, &config, &selection).unwrap();
        assert_eq!(request.database, "billing");
        assert_eq!(request.table_prefix.as_deref(), Some("t_"));
        assert_eq!(request.driver, "pgsql");
    }

    #[test]
    fn test_missing_database_is_an_error() {
        let (_root, ctx) = project("[generator]\n");
        let config = ctx.generator_config();
        let err = selection_request(&ctx, &config, &SelectionArgs::default()).unwrap_err();
        assert!(err.to_string().contains("--db"));
    }

    #[test]
    fn test_schema_path_is_relative_to_project_root() {
        let (root, ctx) = project("[generator]\nschema = \"db/schema.toml\"\n");
        std::fs::create_dir(root.path().join("db")).unwrap();
        std::fs::write(
            root.path().join("db/schema.toml"),
            "[[databases]]\nname = \"shop\"\n",
        )
        .unwrap();

        let source = load_source(&ctx, &SelectionArgs::default()).unwrap();
        assert_eq!(source.snapshot().databases[0].name, "shop");
    }

    #[test]
    fn test_missing_schema_names_the_project_file() {
        let (root, ctx) = project("[generator]\ndatabase = \"shop\"\n");
        let err = load_source(&ctx, &SelectionArgs::default()).unwrap_err();
        assert!(err.to_string().contains(&root.path().join(crate::context::CONFIG_FILE).display().to_string()));
    }
}
