//! SQLite-backed override store for scopecfg.

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::path::Path;
use std::time::Duration;

use scopecfg_types::{override_adapter::OverrideAdapter, prelude::*};

mod runtime_config;
mod schema;

/// How long a query waits for a free connection before failing with `Timeout`
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) fn map_db_err(err: sqlx::Error) -> Error {
	warn!("DB: {:#?}", err);
	match err {
		sqlx::Error::PoolTimedOut => Error::Timeout,
		_ => Error::DbError,
	}
}

#[derive(Debug)]
pub struct OverrideAdapterSqlite {
	db: SqlitePool,
}

impl OverrideAdapterSqlite {
	/// Open (creating if missing) the database file at `path`
	pub async fn new(path: impl AsRef<Path>) -> ClResult<Self> {
		if let Some(dir) = path.as_ref().parent()
			&& !dir.as_os_str().is_empty()
		{
			tokio::fs::create_dir_all(dir).await?;
		}

		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref())
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.acquire_timeout(ACQUIRE_TIMEOUT)
			.connect_with(opts)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		schema::init_db(&db)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		info!(path = %path.as_ref().display(), "Runtime config store opened");
		Ok(Self { db })
	}

	/// Close the pool, waiting for in-flight queries
	pub async fn close(&self) {
		self.db.close().await;
	}
}

#[async_trait]
impl OverrideAdapter for OverrideAdapterSqlite {
	async fn read_override(
		&self,
		ctx: &CallCtx,
		scope: &Scope,
		key: &str,
	) -> ClResult<Option<Box<[u8]>>> {
		ctx.run(runtime_config::read(&self.db, scope, key)).await
	}

	async fn write_override(
		&self,
		ctx: &CallCtx,
		scope: &Scope,
		key: &str,
		value: &[u8],
	) -> ClResult<()> {
		ctx.run(runtime_config::upsert(&self.db, scope, key, value)).await
	}
}

// vim: ts=4
