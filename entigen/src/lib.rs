//! Entity class generator for relational database schemas.
//!
//! `entigen` reads table and column metadata from a [`SchemaSource`], maps
//! column types and declared defaults into generation-ready facts, and renders
//! one entity source file per table through a [`TemplateRenderer`].
//!
//! # Example
//!
//! ```ignore
//! use entigen::{GenerationRequest, Generator, GeneratorConfig, PlaceholderRenderer, SnapshotSource};
//!
//! let config = GeneratorConfig::default();
//! let source = SnapshotSource::load("schema.toml".as_ref())?;
//! let request = GenerationRequest::new("shop", &config)
//!     .table_prefix("t_")
//!     .output_path("src/main/java/shop/entity")
//!     .namespace("shop.entity");
//!
//! let report = Generator::new(&source, &PlaceholderRenderer, &config).generate(&request)?;
//! println!("{} entities written", report.written());
//! ```

pub mod config;
pub mod defaults;
pub mod entity;
pub mod errors;
pub mod generator;
pub mod member;
pub mod request;
pub mod schema;
pub mod source;
pub mod template;
pub mod types;

pub use config::{AnnotationSyntax, GeneratorConfig, TemplateNames};
pub use entity::{EntityGenerator, EntityOutcome, RenderedEntity};
pub use errors::{GenerateError, RenderError, SchemaError};
pub use generator::{ColumnFacts, GenerationReport, Generator, TableFacts, TableFailure};
pub use member::{ColumnMembers, MemberGenerator, RenderedMember};
pub use request::GenerationRequest;
pub use schema::{ColumnSchema, ScalarType, TableSchema};
pub use source::{SchemaSource, SnapshotSource};
pub use template::{
    PlaceholderRenderer, TemplateData, TemplateKind, TemplateRenderer, TemplateSource, WriteOutcome, builtin_template,
    resolve_template,
};
pub use types::TypeNames;
