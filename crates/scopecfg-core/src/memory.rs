//! In-process override store
//!
//! Useful for embedding and for tests: supports raw seeding and injected
//! store failures.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::override_adapter::OverrideAdapter;
use crate::prelude::*;

#[derive(Debug, Default)]
pub struct MemoryOverrideAdapter {
	overrides: RwLock<HashMap<(Scope, Box<str>), Box<[u8]>>>,
	fail_reads: AtomicBool,
	fail_writes: AtomicBool,
}

impl MemoryOverrideAdapter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Make every subsequent read fail with [`Error::DbError`]
	pub fn fail_reads(&self, fail: bool) {
		self.fail_reads.store(fail, Ordering::SeqCst);
	}

	/// Make every subsequent write fail with [`Error::DbError`]
	pub fn fail_writes(&self, fail: bool) {
		self.fail_writes.store(fail, Ordering::SeqCst);
	}

	/// Store raw bytes directly, bypassing any codec and injected failures
	pub fn seed(&self, scope: Scope, key: &str, value: &[u8]) {
		self.overrides.write().insert((scope, key.into()), value.into());
	}

	pub fn len(&self) -> usize {
		self.overrides.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.overrides.read().is_empty()
	}
}

#[async_trait]
impl OverrideAdapter for MemoryOverrideAdapter {
	async fn read_override(
		&self,
		ctx: &CallCtx,
		scope: &Scope,
		key: &str,
	) -> ClResult<Option<Box<[u8]>>> {
		ctx.run(async {
			if self.fail_reads.load(Ordering::SeqCst) {
				warn!(key = %key, scope = %scope, "Memory store: injected read failure");
				return Err(Error::DbError);
			}
			Ok(self.overrides.read().get(&(*scope, Box::<str>::from(key))).cloned())
		})
		.await
	}

	async fn write_override(
		&self,
		ctx: &CallCtx,
		scope: &Scope,
		key: &str,
		value: &[u8],
	) -> ClResult<()> {
		ctx.run(async {
			if self.fail_writes.load(Ordering::SeqCst) {
				warn!(key = %key, scope = %scope, "Memory store: injected write failure");
				return Err(Error::DbError);
			}
			self.overrides.write().insert((*scope, key.into()), value.into());
			Ok(())
		})
		.await
	}
}


// vim: ts=4
