use anyhow::{Context, Result};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn delete_property(db: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM properties WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .context("unable to delete property")?;
    Ok(result.rows_affected() > 0)
}
