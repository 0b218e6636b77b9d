//! Runs the entigen binary against a temporary project.

use std::path::Path;
use std::process::{Command, Output};

fn entigen(project: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_entigen"))
        .args(args)
        .current_dir(project)
        .env_remove("ENTIGEN_SCHEMA")
        .env_remove("RUST_LOG")
        .output()
        .expect("entigen binary should run")
}

fn project() -> tempfile::TempDir {
    let root = tempfile::tempdir().unwrap();
    let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/schema.toml");
    std::fs::copy(fixture, root.path().join("schema.toml")).unwrap();
    std::fs::write(
        root.path().join("entigen.toml"),
        r#"[generator]
schema = "schema.toml"
database = "shop"
output_path = "generated"
namespace = "shop.entity"
table_prefix = "t_"
field_prefix = "u_"
"#,
    )
    .unwrap();
    root
}

#[test]
fn entity_command_writes_files_from_project_config() {
    let root = project();
    let output = entigen(root.path(), &["--no-color", "entity"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    for class in ["User", "OrderItems", "AuditLog"] {
        assert!(root.path().join("generated").join(format!("{class}.java")).is_file());
    }
}

#[test]
fn dry_run_writes_nothing() {
    let root = project();
    let output = entigen(root.path(), &["--output", "json", "entity", "--dry-run", "--include", "t_users"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(entries[0]["class_name"], "User");
    assert!(entries[0]["text"].as_str().unwrap().contains("public class User {"));
    assert!(!root.path().join("generated").exists());
}

#[test]
fn tables_command_lists_column_facts_as_json() {
    let root = project();
    let output = entigen(root.path(), &["--output", "json", "tables", "--include", "t_order_items"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let tables: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tables[0]["table"]["mapping_class"], "OrderItems");
    assert_eq!(tables[0]["columns"][1]["default"], "3");
}

#[test]
fn unknown_database_exits_with_error() {
    let root = project();
    let output = entigen(root.path(), &["--no-color", "entity", "--db", "missing"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}

#[test]
fn init_writes_project_file() {
    let root = tempfile::tempdir().unwrap();
    let output = entigen(root.path(), &["--no-color", "init", "--db", "shop", "--templates", "tpl"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let config = std::fs::read_to_string(root.path().join("entigen.toml")).unwrap();
    assert!(config.contains("database = \"shop\""));
    assert!(root.path().join("tpl/entity.tpl").is_file());
}
