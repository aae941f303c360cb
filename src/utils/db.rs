#![forbid(unsafe_code)]

use anyhow::Result;
use futures::future::try_join_all;
use sqlx::Row;

use crate::utils::config::RuntimeCtx;
use crate::utils::db_statements::{GET_WORLD, LIST_FORTUNES, UPDATE_WORLD};
use crate::utils::db_types::{Fortune, World};

// ---------------------------------------------------------------------------
// get_world_by_id:
// ---------------------------------------------------------------------------
/** Single-row lookup by primary key.  Ids are drawn from a fixed valid
 * range, so None indicates a misconfigured store rather than normal flow.
 */
pub async fn get_world_by_id(ctx: &RuntimeCtx, id: i32) -> Result<Option<World>> {
    let result = sqlx::query(GET_WORLD)
        .bind(id)
        .fetch_optional(&ctx.db)
        .await?;

    Ok(result.map(|row| World::new(row.get(0), row.get(1))))
}

// ---------------------------------------------------------------------------
// get_all_fortunes:
// ---------------------------------------------------------------------------
/** Unordered full-table scan; the caller owns ordering. */
pub async fn get_all_fortunes(ctx: &RuntimeCtx) -> Result<Vec<Fortune>> {
    let rows = sqlx::query(LIST_FORTUNES)
        .fetch_all(&ctx.db)
        .await?;

    Ok(rows.iter().map(|row| Fortune::new(row.get(0), row.get(1))).collect())
}

// ---------------------------------------------------------------------------
// update_worlds:
// ---------------------------------------------------------------------------
/** Persist one (id, randomnumber) pair per entry.  Each update is an
 * independent statement and all are issued concurrently against the pool;
 * there is no transaction and no per-record failure reporting.  The first
 * statement error fails the whole batch.
 */
pub async fn update_worlds(ctx: &RuntimeCtx, updates: &[(i32, i32)]) -> Result<()> {
    let statements = updates.iter().map(|&(id, random_number)| {
        sqlx::query(UPDATE_WORLD)
            .bind(random_number)
            .bind(id)
            .execute(&ctx.db)
    });

    try_join_all(statements).await?;
    Ok(())
}
