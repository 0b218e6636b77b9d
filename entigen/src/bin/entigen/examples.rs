use crate::commands::{entity, init, tables};
use crate::theme::{ARROW, Tone};

#[derive(Clone, Copy)]
pub struct ExampleGroup {
    pub title: &'static str,
    pub commands: &'static [&'static str],
}

#[derive(Clone, Copy)]
pub struct CommandExample {
    pub name: &'static str,
    pub groups: &'static [ExampleGroup],
}

pub fn command_examples() -> &'static [CommandExample] {
    &[
        CommandExample {
            name: "init",
            groups: init::EXAMPLES,
        },
        CommandExample {
            name: "entity",
            groups: entity::EXAMPLES,
        },
        CommandExample {
            name: "tables",
            groups: tables::EXAMPLES,
        },
    ]
}

const ENVIRONMENT_VARIABLES: &[(&str, &str)] = &[
    ("ENTIGEN_SCHEMA", "Schema snapshot used when --schema is not given"),
    ("RUST_LOG", "Diagnostic log filter (e.g. entigen=debug)"),
];

impl CommandExample {
    /// Examples section appended to the command's long help
    pub fn help_text(&self, use_color: bool) -> String {
        let mut lines = vec![Tone::Progress.paint("Examples:", use_color)];
        for (index, group) in self.groups.iter().enumerate() {
            if index > 0 {
                lines.push(String::new());
            }
            lines.push(format!("  {}", Tone::Heading.paint(group.title, use_color)));
            for command in group.commands {
                lines.push(format!(
                    "    {} {}",
                    Tone::Example.paint(ARROW, use_color),
                    Tone::Example.paint(command, use_color)
                ));
            }
        }
        lines.join("\n") + "\n"
    }
}

/// Environment variables and a pointer to per-command help
pub fn environment_help(use_color: bool) -> String {
    let mut lines = vec![Tone::Progress.paint("Environment Variables:", use_color)];
    for (key, description) in ENVIRONMENT_VARIABLES {
        lines.push(format!(
            "  {}  {}",
            Tone::Key.paint(key, use_color),
            Tone::Value.paint(description, use_color)
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "{} {}",
        Tone::Progress.paint("Tip:", use_color),
        Tone::Example.paint("Use 'entigen <command> --help' to view examples for each command.", use_color)
    ));
    lines.join("\n") + "\n"
}
