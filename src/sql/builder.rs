//! Builds DDL and parameterized statements over collection tables.
//!
//! Each collection is a table `(_pk BIGSERIAL, body JSONB, created_at, updated_at)`.
//! `_pk` is the store's internal key and never leaves the adapter; lookups go
//! through the `id` field of `body`. Identifiers come from code, never from requests.

/// Quote identifier for PostgreSQL.
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

pub fn create_schema(schema: &str) -> String {
    format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema))
}

pub fn create_collection(schema: &str, collection: &str) -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            _pk BIGSERIAL PRIMARY KEY,
            body JSONB NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        qualified_table(schema, collection)
    )
}

/// Non-unique expression index on `body->'id'`; `id` uniqueness is not enforced.
pub fn create_id_index(schema: &str, collection: &str) -> String {
    format!(
        "CREATE INDEX IF NOT EXISTS {} ON {} ((body -> 'id'))",
        quoted(&format!("{}_id_idx", collection)),
        qualified_table(schema, collection)
    )
}

/// All documents in insertion order. No params.
pub fn select_all(schema: &str, collection: &str) -> String {
    format!(
        "SELECT body FROM {} ORDER BY _pk",
        qualified_table(schema, collection)
    )
}

/// First document with the given id. Params: $1 JSONB id.
/// The key is a literal so the planner can use the `body -> 'id'` index.
pub fn select_by_id(schema: &str, collection: &str) -> String {
    format!(
        "SELECT body FROM {} WHERE body -> 'id' = $1 ORDER BY _pk LIMIT 1",
        qualified_table(schema, collection)
    )
}

/// First document whose top-level field equals a JSON value. Params: $1 field name, $2 JSONB value.
/// Not index-backed; use `select_by_id` for id lookups.
pub fn select_one_by_field(schema: &str, collection: &str) -> String {
    format!(
        "SELECT body FROM {} WHERE body -> $1::text = $2 ORDER BY _pk LIMIT 1",
        qualified_table(schema, collection)
    )
}

/// Params: $1 JSONB body.
pub fn insert(schema: &str, collection: &str) -> String {
    format!(
        "INSERT INTO {} (body) VALUES ($1) RETURNING body",
        qualified_table(schema, collection)
    )
}

/// Replace the body of the first document with the given id. Params: $1 JSONB id, $2 JSONB body.
pub fn update_by_id(schema: &str, collection: &str) -> String {
    let table = qualified_table(schema, collection);
    format!(
        "UPDATE {t} SET body = $2, updated_at = NOW() \
         WHERE _pk = (SELECT _pk FROM {t} WHERE body -> 'id' = $1 ORDER BY _pk LIMIT 1) \
         RETURNING body",
        t = table
    )
}

/// Delete the first document with the given id. Params: $1 JSONB id.
pub fn delete_by_id(schema: &str, collection: &str) -> String {
    let table = qualified_table(schema, collection);
    format!(
        "DELETE FROM {t} \
         WHERE _pk = (SELECT _pk FROM {t} WHERE body -> 'id' = $1 ORDER BY _pk LIMIT 1) \
         RETURNING _pk",
        t = table
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quoted("posts"), "\"posts\"");
        assert_eq!(quoted("we\"ird"), "\"we\"\"ird\"");
        assert_eq!(qualified_table("social", "posts"), "\"social\".\"posts\"");
    }

    #[test]
    fn lookups_key_on_document_id() {
        let sql = update_by_id("social", "users");
        assert!(sql.contains("body -> 'id' = $1"));
        assert!(sql.contains("ORDER BY _pk LIMIT 1"));
        assert!(delete_by_id("social", "users").contains("body -> 'id' = $1"));
    }

    #[test]
    fn id_lookup_matches_the_index_expression() {
        let index = create_id_index("social", "posts");
        assert!(index.contains("((body -> 'id'))"));
        assert_eq!(
            select_by_id("social", "posts"),
            "SELECT body FROM \"social\".\"posts\" WHERE body -> 'id' = $1 ORDER BY _pk LIMIT 1"
        );
    }

    #[test]
    fn find_by_field_binds_field_name() {
        let sql = select_one_by_field("social", "posts");
        assert_eq!(
            sql,
            "SELECT body FROM \"social\".\"posts\" WHERE body -> $1::text = $2 ORDER BY _pk LIMIT 1"
        );
    }
}
