mod commands;
mod context;
mod examples;
mod output;
mod theme;

use anyhow::Result;
use clap::{ColorChoice, Command, CommandFactory, FromArgMatches, Parser, Subcommand};
use colored::control::ShouldColorize;

use commands::{
    entity::{EntityArgs, handle_entity},
    init::{InitArgs, handle_init},
    tables::{TablesArgs, handle_tables},
};
use examples::{command_examples, environment_help};
use output::{GlobalOptions, OutputFormat, OutputManager};
use theme::help_styles;

#[derive(Parser)]
#[command(name = "entigen")]
#[command(version)]
#[command(
    about = "Entity class generator for relational database schemas",
    long_about = r#"Generates one annotated entity class per database table:

• Column types and declared defaults mapped to typed properties
• Getter and setter per column, primary keys and required columns marked
• Templates overridable per fragment, built-in ones used for the rest

Commands:
  init      Write a starter entigen.toml
  entity    Generate entity files
  tables    Show the selected tables as the generator sees them
"#
)]
#[command(subcommand_required = true, arg_required_else_help = true)]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value = "table", global = true)]
    output: OutputFormat,

    /// Suppress output (only errors will be shown)
    #[arg(short = 'q', long, global = true)]
    quiet: bool,

    /// Enable verbose output
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn parse_with_styles() -> Self {
        let matches = build_cli_command().get_matches();
        Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit())
    }
}

fn build_cli_command() -> Command {
    let use_color = ShouldColorize::from_env().should_colorize();
    let mut command = Cli::command()
        .styles(help_styles())
        .color(if use_color { ColorChoice::Auto } else { ColorChoice::Never })
        .after_long_help(environment_help(use_color));

    for example in command_examples() {
        command = command.mut_subcommand(example.name, |sub| sub.after_long_help(example.help_text(use_color)));
    }
    command
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter entigen.toml in the current directory
    Init(InitArgs),

    /// Generate one entity file per selected table
    Entity(EntityArgs),

    /// Show the selected tables and their resolved columns
    Tables(TablesArgs),
}

fn main() {
    env_logger::init();

    let cli = Cli::parse_with_styles();

    if let Err(err) = execute(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn execute(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let global_options = GlobalOptions {
        output_format: cli.output,
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_color: cli.no_color,
    };

    let output = OutputManager::new(global_options);

    match cli.command {
        Commands::Init(args) => handle_init(args, &output)?,
        Commands::Entity(args) => handle_entity(args, &output)?,
        Commands::Tables(args) => handle_tables(args, &output)?,
    }

    Ok(())
}
