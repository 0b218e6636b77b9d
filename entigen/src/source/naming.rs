//! Identifier derivation for tables and columns.

/// Remove `prefix` from `name` when present and something remains.
pub fn strip_prefix<'a>(name: &'a str, prefix: Option<&str>) -> &'a str {
    match prefix {
        Some(prefix) if !prefix.is_empty() => match name.strip_prefix(prefix) {
            Some(rest) if !rest.is_empty() => rest,
            _ => name,
        },
        _ => name,
    }
}

/// Convert snake_case or kebab-case to StudlyCase
pub fn studly_case(name: &str) -> String {
    name.split(['_', '-', ' '])
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect()
}

/// Convert snake_case or kebab-case to camelCase
pub fn camel_case(name: &str) -> String {
    let studly = studly_case(name);
    let mut chars = studly.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_studly_case() {
        assert_eq!(studly_case("users"), "Users");
        assert_eq!(studly_case("order_items"), "OrderItems");
        assert_eq!(studly_case("audit-log"), "AuditLog");
        assert_eq!(studly_case("__odd__name"), "OddName");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("created_at"), "createdAt");
        assert_eq!(camel_case("id"), "id");
        assert_eq!(camel_case("UserName"), "userName");
    }

    #[test]
    fn test_strip_prefix() {
        assert_eq!(strip_prefix("t_users", Some("t_")), "users");
        assert_eq!(strip_prefix("users", Some("t_")), "users");
        assert_eq!(strip_prefix("t_", Some("t_")), "t_");
        assert_eq!(strip_prefix("t_users", None), "t_users");
    }
}
