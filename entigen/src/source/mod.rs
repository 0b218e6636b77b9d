//! Schema sources.
//!
//! A [`SchemaSource`] answers the two questions the generator asks of a
//! database: which tables are selected, and what columns each one has. The
//! generator does not cache or retry; it trusts the returned order.

mod filter;
mod naming;
mod snapshot;

pub use filter::TableFilter;
pub use naming::{camel_case, studly_case, strip_prefix};
pub use snapshot::{
    ColumnSnapshot, DatabaseSnapshot, Driver, SchemaSnapshot, SnapshotSource, TableSnapshot, map_storage_type,
};

use crate::errors::SchemaResult;
use crate::schema::{ColumnSchema, TableSchema};

/// Introspection collaborator consumed by the generation driver.
pub trait SchemaSource {
    /// Tables of `database` selected by the include/exclude filters, with
    /// class names derived after stripping `table_prefix`.
    fn list_tables(
        &self,
        driver: &str,
        database: &str,
        include: Option<&str>,
        exclude: Option<&str>,
        table_prefix: Option<&str>,
    ) -> SchemaResult<Vec<TableSchema>>;

    /// Columns of `table` in definition order, with property names derived
    /// after stripping `field_prefix`.
    fn list_columns(
        &self,
        driver: &str,
        database: &str,
        table: &str,
        field_prefix: Option<&str>,
    ) -> SchemaResult<Vec<ColumnSchema>>;
}
