//! Runtime config override storage
//!
//! One row per (scope, key). Values are stored as opaque blobs; decoding is
//! the engine's job, so a corrupt row is returned as-is rather than hidden.

use sqlx::{Row, SqlitePool};

use scopecfg_types::prelude::*;

use crate::map_db_err;

/// Read a single override
pub(crate) async fn read(
	db: &SqlitePool,
	scope: &Scope,
	key: &str,
) -> ClResult<Option<Box<[u8]>>> {
	let row = sqlx::query("SELECT value FROM runtime_config WHERE scope = ? AND key = ?")
		.bind(scope.to_string())
		.bind(key)
		.fetch_optional(db)
		.await
		.map_err(map_db_err)?;

	match row {
		Some(row) => {
			let value: Vec<u8> = row.try_get("value").map_err(map_db_err)?;
			Ok(Some(value.into_boxed_slice()))
		}
		None => Ok(None),
	}
}

/// Create or replace an override
pub(crate) async fn upsert(
	db: &SqlitePool,
	scope: &Scope,
	key: &str,
	value: &[u8],
) -> ClResult<()> {
	sqlx::query(
		"INSERT INTO runtime_config (scope, key, value, updated_at) VALUES (?, ?, ?, unixepoch())
		ON CONFLICT(scope, key) DO UPDATE
			SET value = excluded.value, updated_at = excluded.updated_at",
	)
	.bind(scope.to_string())
	.bind(key)
	.bind(value)
	.execute(db)
	.await
	.map_err(map_db_err)?;

	Ok(())
}

// vim: ts=4
