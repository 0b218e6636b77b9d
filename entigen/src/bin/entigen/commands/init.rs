use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use entigen::{GeneratorConfig, TemplateKind, builtin_template};

use crate::context::{CONFIG_FILE, EntigenConfig};
use crate::examples::ExampleGroup;
use crate::output::OutputManager;

pub const EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Project Setup",
    commands: &[
        "entigen init --db shop --schema db/schema.toml      # Write entigen.toml",
        "entigen init --db shop --templates templates/entigen # Also copy the built-in templates",
        "entigen init --db shop --force                      # Overwrite an existing entigen.toml",
    ],
}];

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Database the project generates entities for
    #[arg(long = "db", default_value = "app")]
    pub database: String,

    /// Schema snapshot path, relative to the project root
    #[arg(long, default_value = "schema.toml")]
    pub schema: String,

    /// Copy the built-in templates into this directory for editing
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// Overwrite an existing entigen.toml
    #[arg(long)]
    pub force: bool,
}

pub fn handle_init(args: InitArgs, output: &OutputManager) -> Result<()> {
    let root = std::env::current_dir().context("Failed to get current directory")?;
    init_project(&root, &args, output)
}

fn init_project(root: &Path, args: &InitArgs, output: &OutputManager) -> Result<()> {
    output.heading("Initializing entigen");

    let defaults = GeneratorConfig::default();
    let config_path = root.join(CONFIG_FILE);

    if config_path.exists() && !args.force {
        output.warning(&format!("{CONFIG_FILE} already exists, use --force to overwrite"));
    } else {
        let mut config = EntigenConfig::starter(&args.database, &args.schema, &defaults);
        if let Some(dir) = &args.templates {
            config.generator.template_dir = Some(dir.display().to_string());
        }

        let content = toml::to_string_pretty(&config).context("Failed to serialize project config")?;
        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        output.success(&format!("Created {}", config_path.display()));
        output.key_value("Database", &args.database);
        output.key_value("Schema", &args.schema);
    }

    if let Some(dir) = &args.templates {
        let target = root.join(dir);
        copy_templates(&defaults, &target, args.force, output)?;
    }

    output.info("Next: run 'entigen tables' to check the selection, then 'entigen entity'");
    Ok(())
}

/// Write every built-in template into `target`, keeping edited copies unless forced
fn copy_templates(defaults: &GeneratorConfig, target: &Path, force: bool, output: &OutputManager) -> Result<()> {
    std::fs::create_dir_all(target).with_context(|| format!("Failed to create {}", target.display()))?;

    for kind in TemplateKind::ALL {
        let name = defaults.template_file(kind);
        let to = target.join(name);

        if to.exists() && !force {
            output.bullet(&format!("{name} kept"));
            continue;
        }

        std::fs::write(&to, builtin_template(kind)).with_context(|| format!("Failed to write {kind} template"))?;
        output.bullet(&format!("{name} written"));
    }

    output.success(&format!("Templates ready in {}", target.display()));
    Ok(())
}
