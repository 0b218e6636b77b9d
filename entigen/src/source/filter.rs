//! Include/exclude table selection.

use regex::Regex;

use crate::errors::{SchemaError, SchemaResult};

/// Compiled include/exclude lists.
///
/// Each list is comma-separated; `*` inside a name matches any run of
/// characters. An absent include list selects every table.
#[derive(Debug, Clone, Default)]
pub struct TableFilter {
    include: Option<Regex>,
    exclude: Option<Regex>,
}

impl TableFilter {
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> SchemaResult<Self> {
        Ok(Self {
            include: include.map(compile).transpose()?.flatten(),
            exclude: exclude.map(compile).transpose()?.flatten(),
        })
    }

    pub fn matches(&self, table: &str) -> bool {
        if let Some(include) = &self.include
            && !include.is_match(table)
        {
            return false;
        }
        !self.exclude.as_ref().is_some_and(|exclude| exclude.is_match(table))
    }
}

fn compile(list: &str) -> SchemaResult<Option<Regex>> {
    let alternatives: Vec<String> = list
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| name.split('*').map(regex::escape).collect::<Vec<_>>().join(".*"))
        .collect();

    if alternatives.is_empty() {
        return Ok(None);
    }

    let pattern = format!("^(?:{})$", alternatives.join("|"));
    Regex::new(&pattern)
        .map(Some)
        .map_err(|source| SchemaError::InvalidFilter {
            pattern: list.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filters_select_everything() {
        let filter = TableFilter::new(None, None).unwrap();
        assert!(filter.matches("users"));
        assert!(filter.matches("orders"));
    }

    #[test]
    fn test_include_list() {
        let filter = TableFilter::new(Some("users, orders"), None).unwrap();
        assert!(filter.matches("users"));
        assert!(filter.matches("orders"));
        assert!(!filter.matches("order_items"));
        assert!(!filter.matches("users_archive"));
    }

    #[test]
    fn test_wildcards_and_exclude() {
        let filter = TableFilter::new(Some("order*"), Some("*_archive")).unwrap();
        assert!(filter.matches("orders"));
        assert!(filter.matches("order_items"));
        assert!(!filter.matches("orders_archive"));
        assert!(!filter.matches("users"));
    }

    #[test]
    fn test_names_are_literal() {
        let filter = TableFilter::new(Some("a.b"), None).unwrap();
        assert!(filter.matches("a.b"));
        assert!(!filter.matches("axb"));
    }

    #[test]
    fn test_blank_list_is_ignored() {
        let filter = TableFilter::new(Some(" , "), None).unwrap();
        assert!(filter.matches("anything"));
    }
}
