//! Database schema initialization

use sqlx::SqlitePool;

/// Create the override table if it does not exist yet
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Runtime config overrides
	//**************************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS runtime_config (
		scope text NOT NULL,
		key text NOT NULL,
		value blob NOT NULL,
		updated_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(scope, key)
	)",
	)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;

	Ok(())
}

// vim: ts=4
