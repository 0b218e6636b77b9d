use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{Cell, Table};
use serde::Serialize;

use entigen::{Generator, PlaceholderRenderer, TableFacts};

use super::{SelectionArgs, load_source, selection_request};
use crate::context::ProjectContext;
use crate::examples::ExampleGroup;
use crate::output::{GlobalOptions, OutputManager, TableDisplay, themed_table};

pub const EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Inspect Tables",
    commands: &[
        "entigen tables --db shop --schema schema.toml       # Columns as the generator sees them",
        "entigen tables --include 't_user*' --table-prefix t_",
        "entigen --output json tables                        # Machine-readable column facts",
    ],
}];

#[derive(Args, Debug)]
pub struct TablesArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// Selected tables with their resolved columns
#[derive(Serialize)]
#[serde(transparent)]
struct SchemaListing(Vec<TableFacts>);

pub fn handle_tables(args: TablesArgs, output: &OutputManager) -> Result<()> {
    let ctx = ProjectContext::find()?;
    let config = ctx.generator_config();
    let source = load_source(&ctx, &args.selection)?;
    let request = selection_request(&ctx, &config, &args.selection)?;
    output.verbose(&ctx.describe());

    let tables = Generator::new(&source, &PlaceholderRenderer, &config)
        .describe(&request)
        .with_context(|| format!("Failed to read tables of {}", request.database))?;

    if tables.is_empty() {
        output.warning("No tables matched the selection");
        return Ok(());
    }

    output.heading(&format!("Tables of {} ({})", request.database, request.driver));
    output.display(&SchemaListing(tables))
}

impl TableDisplay for SchemaListing {
    fn to_table(&self, options: &GlobalOptions) -> Table {
        let mut table = themed_table(
            options,
            &["Table", "Class", "Column", "Property", "Type", "Storage", "Default", "Flags"],
        );

        for facts in &self.0 {
            for (index, column) in facts.columns.iter().enumerate() {
                // table and class only on the first row of each group
                let (name, class) = if index == 0 {
                    (facts.table.name.as_str(), facts.table.mapping_class.as_str())
                } else {
                    ("", "")
                };

                let mut flags = Vec::new();
                if column.primary_key {
                    flags.push("id");
                }
                if column.required {
                    flags.push("required");
                }

                table.add_row(vec![
                    Cell::new(name),
                    Cell::new(class),
                    Cell::new(&column.column),
                    Cell::new(&column.property),
                    Cell::new(&column.type_name),
                    Cell::new(&column.storage_type),
                    Cell::new(column.default.as_deref().unwrap_or("-")),
                    Cell::new(flags.join(", ")),
                ]);
            }
        }

        table
    }

    fn to_compact(&self) -> String {
        self.0
            .iter()
            .map(|facts| format!("{}={}({})", facts.table.name, facts.table.mapping_class, facts.columns.len()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
