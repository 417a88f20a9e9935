//! Naming conventions shared by tables and associations.

use heck::ToSnakeCase;

/// Returns the conventional table name for a table alias.
///
/// `Companies` maps to `companies`, `BlogPosts` to `blog_posts`.
#[must_use]
pub fn table_name(alias: &str) -> String {
    alias.to_snake_case()
}

/// Returns the conventional foreign key column referencing the table known
/// under `name`: the singular, underscored name followed by `_id`.
#[must_use]
pub fn foreign_key(name: &str) -> String {
    let singular = pluralizer::pluralize(&name.to_snake_case(), 1, false);
    format!("{singular}_id")
}
