use crate::heroes::{db, seed};
use anyhow::Result;
use tracing::info;

/// Execute the seed action against `dsn`, applying the schema first.
/// # Errors
/// Returns an error if the database cannot be opened or an insert fails.
pub async fn execute(dsn: &str) -> Result<()> {
    let pool = db::connect(dsn).await?;
    db::migrate(&pool).await?;

    let summary = seed::run(&pool).await?;
    info!("Seed complete: {:?}", summary);

    pool.close().await;

    Ok(())
}
