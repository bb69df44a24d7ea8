use sqlx::{Row, SqlitePool};

use crate::error::Result;

/// One row of the record store's collection catalog.
pub struct RawCollection {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub system: bool,
    /// JSON array of field declarations, in the store's dialect.
    pub fields: String,
}

pub async fn list_collections(pool: &SqlitePool) -> Result<Vec<RawCollection>> {
    let rows = sqlx::query(
        r#"
        select id, name, type, system, cast(fields as text) as fields
        from _collections
        order by rowid
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| {
            Ok(RawCollection {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                kind: row.try_get("type")?,
                system: row.try_get("system")?,
                fields: row.try_get("fields")?,
            })
        })
        .collect()
}
