use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{Cell, Color as TableColor, Table};
use serde::Serialize;
use std::path::{Path, PathBuf};

use entigen::{GenerationReport, GenerationRequest, Generator, PlaceholderRenderer, SnapshotSource, WriteOutcome};

use super::{SelectionArgs, load_source, pick, selection_request};
use crate::context::ProjectContext;
use crate::examples::ExampleGroup;
use crate::output::{GlobalOptions, OutputManager, TableDisplay, themed_table};

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Generate Entities",
        commands: &[
            "entigen entity --db shop --schema schema.toml       # Every table of shop",
            "entigen entity --include 'user*,orders'             # Only matching tables",
            "entigen entity --exclude audit_log --table-prefix t_",
        ],
    },
    ExampleGroup {
        title: "Output Location",
        commands: &[
            "entigen entity --path src/main/java/shop/entity --namespace shop.entity",
            "entigen entity --tpl-dir templates/entigen          # Override some templates",
        ],
    },
    ExampleGroup {
        title: "Checking",
        commands: &[
            "entigen entity --dry-run                            # Print entities, write nothing",
            "entigen --output json entity --strict               # Stop at the first failed table",
        ],
    },
];

#[derive(Args, Debug)]
pub struct EntityArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Directory the entity files are written to
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Namespace declared by the generated entities
    #[arg(long)]
    pub namespace: Option<String>,

    /// Storage instance the entities are bound to
    #[arg(long)]
    pub instance: Option<String>,

    /// Directory whose templates override the built-in ones
    #[arg(long = "tpl-dir")]
    pub template_dir: Option<PathBuf>,

    /// Stop at the first table that fails to write
    #[arg(long)]
    pub strict: bool,

    /// Render entities and print them without writing files
    #[arg(long)]
    pub dry_run: bool,
}

pub fn handle_entity(args: EntityArgs, output: &OutputManager) -> Result<()> {
    let ctx = ProjectContext::find()?;
    let settings = ctx.settings();
    let config = ctx.generator_config();
    let source = load_source(&ctx, &args.selection)?;

    let mut request = selection_request(&ctx, &config, &args.selection)?.strict(args.strict);

    let output_path = match (&args.path, &settings.output_path) {
        (Some(path), _) => path.clone(),
        (None, Some(path)) => ctx.resolve(path),
        (None, None) => ctx.project_root.join(&config.default_output_path),
    };
    request = request.output_path(output_path);

    if let Some(namespace) = pick(&args.namespace, &settings.namespace) {
        request = request.namespace(namespace);
    }
    if let Some(instance) = pick(&args.instance, &settings.instance) {
        request = request.instance(instance);
    }
    match (&args.template_dir, &settings.template_dir) {
        (Some(dir), _) => request = request.template_dir(dir.clone()),
        (None, Some(dir)) => request = request.template_dir(ctx.resolve(dir)),
        (None, None) => {}
    }

    output.verbose(&ctx.describe());
    output.verbose(&format!("Schema database: {} ({})", request.database, request.driver));
    output.verbose(&format!("Output directory: {}", request.output_path.display()));
    if let Some(dir) = request.template_dir_ref() {
        output.verbose(&format!("Template overrides: {}", dir.display()));
    }

    let generator = Generator::new(&source, &PlaceholderRenderer, &config);

    if args.dry_run {
        return preview(&generator, &request, output);
    }

    output.heading("Entity Generation");
    output.progress(&format!("Generating entities for {}", request.database));
    let result = generator.generate(&request);
    output.clear_line();
    let report = result.with_context(|| format!("Failed to generate entities for {}", request.database))?;

    if report.entities.is_empty() && report.failures.is_empty() {
        output.warning("No tables matched the selection");
        return Ok(());
    }

    output.display(&report)?;

    for failure in &report.failures {
        output.error(&format!("{}: {}", failure.table, failure.error));
    }

    if !report.is_success() {
        anyhow::bail!("{} of {} tables failed", report.failures.len(), report.failures.len() + report.entities.len());
    }

    output.success(&format!(
        "{} written, {} unchanged in {}",
        report.written(),
        report.unchanged(),
        request.output_path.display()
    ));
    Ok(())
}

/// Rendered entity as printed by --dry-run
#[derive(Serialize)]
struct PreviewEntry<'a> {
    table: &'a str,
    class_name: &'a str,
    path: &'a Path,
    text: &'a str,
}

fn preview(
    generator: &Generator<'_, SnapshotSource, PlaceholderRenderer>,
    request: &GenerationRequest,
    output: &OutputManager,
) -> Result<()> {
    let rendered = generator
        .preview(request)
        .with_context(|| format!("Failed to render entities for {}", request.database))?;

    if output.is_json() {
        let entries: Vec<PreviewEntry<'_>> = rendered
            .iter()
            .map(|entity| PreviewEntry {
                table: &entity.table,
                class_name: &entity.class_name,
                path: &entity.path,
                text: &entity.text,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entity in &rendered {
        output.heading(&entity.path.display().to_string());
        if !output.options.quiet {
            println!("{}", entity.text);
        }
    }
    output.info(&format!("{} entities rendered, nothing written", rendered.len()));
    Ok(())
}

impl TableDisplay for GenerationReport {
    fn to_table(&self, options: &GlobalOptions) -> Table {
        let mut table = themed_table(options, &["Table", "Class", "Columns", "File", "Result"]);

        for entity in &self.entities {
            let (label, color) = match entity.outcome {
                WriteOutcome::Written => ("written", TableColor::Green),
                WriteOutcome::Unchanged => ("unchanged", TableColor::DarkGrey),
            };
            let result = Cell::new(label);
            table.add_row(vec![
                Cell::new(&entity.table),
                Cell::new(&entity.class_name),
                Cell::new(entity.columns),
                Cell::new(entity.path.display()),
                if options.no_color { result } else { result.fg(color) },
            ]);
        }

        for failure in &self.failures {
            let result = Cell::new("failed");
            table.add_row(vec![
                Cell::new(&failure.table),
                Cell::new("-"),
                Cell::new("-"),
                Cell::new(failure.path.display()),
                if options.no_color { result } else { result.fg(TableColor::Red) },
            ]);
        }

        table
    }

    fn to_compact(&self) -> String {
        format!(
            "written={} unchanged={} failed={}",
            self.written(),
            self.unchanged(),
            self.failures.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entigen::{EntityOutcome, TableFailure};

    fn report() -> GenerationReport {
        GenerationReport {
            entities: vec![
                EntityOutcome {
                    table: "t_users".to_string(),
                    class_name: "User".to_string(),
                    path: PathBuf::from("out/User.java"),
                    columns: 3,
                    outcome: WriteOutcome::Written,
                },
                EntityOutcome {
                    table: "t_orders".to_string(),
                    class_name: "Order".to_string(),
                    path: PathBuf::from("out/Order.java"),
                    columns: 2,
                    outcome: WriteOutcome::Unchanged,
                },
            ],
            failures: vec![TableFailure {
                table: "t_audit".to_string(),
                path: PathBuf::from("out/Audit.java"),
                error: "permission denied".to_string(),
            }],
        }
    }

    #[test]
    fn test_report_compact() {
        assert_eq!(report().to_compact(), "written=1 unchanged=1 failed=1");
    }

    #[test]
    fn test_report_table_lists_every_table() {
        let options = GlobalOptions {
            no_color: true,
            ..Default::default()
        };
        let rendered = report().to_table(&options).to_string();
        assert!(rendered.contains("t_users"));
        assert!(rendered.contains("unchanged"));
        assert!(rendered.contains("failed"));
    }
}
