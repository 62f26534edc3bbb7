//! Adapter that persists runtime config overrides.
//!
//! The engine only needs keyed byte storage partitioned by scope. Absence of
//! an override is a normal `Ok(None)`, never an error.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;

#[async_trait]
pub trait OverrideAdapter: Debug + Send + Sync {
	/// Read the raw override stored for `key` in `scope`
	///
	/// Returns `Ok(None)` when no override exists. Fails only when the store
	/// itself fails, times out, or `ctx` is cancelled.
	async fn read_override(
		&self,
		ctx: &CallCtx,
		scope: &Scope,
		key: &str,
	) -> ClResult<Option<Box<[u8]>>>;

	/// Store `value` as the override for `key` in `scope`
	///
	/// Unconditionally replaces any previous value (last writer wins). The
	/// write must be durable before this returns `Ok`.
	async fn write_override(
		&self,
		ctx: &CallCtx,
		scope: &Scope,
		key: &str,
		value: &[u8],
	) -> ClResult<()>;
}

// vim: ts=4
