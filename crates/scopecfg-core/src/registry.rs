//! Entry registry
//!
//! Built once during startup, then frozen and shared by `Arc`. The frozen
//! registry is immutable, so callers read it without locking.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::prelude::*;

/// Mutable registry used during initialization
#[derive(Default)]
pub struct EntryRegistry {
	entries: BTreeMap<Box<str>, Arc<dyn DynEntry>>,
}

impl EntryRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register an entry. Keys must be unique.
	pub fn register(&mut self, entry: Arc<dyn DynEntry>) -> ClResult<()> {
		if self.entries.contains_key(entry.key()) {
			return Err(Error::ConfigError(format!(
				"Runtime entry '{}' is already registered",
				entry.key()
			)));
		}

		debug!("Registering runtime entry: {}", entry.key());
		self.entries.insert(entry.key().into(), entry);
		Ok(())
	}

	/// Freeze the registry (make it immutable)
	pub fn freeze(self) -> FrozenEntryRegistry {
		info!("Freezing runtime entry registry with {} entries", self.entries.len());
		FrozenEntryRegistry { entries: self.entries }
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Immutable registry handed to the transport layer
pub struct FrozenEntryRegistry {
	entries: BTreeMap<Box<str>, Arc<dyn DynEntry>>,
}

impl FrozenEntryRegistry {
	pub fn get(&self, key: &str) -> Option<&Arc<dyn DynEntry>> {
		self.entries.get(key)
	}

	/// Like [`get`](Self::get), failing with [`Error::UnknownEntry`]
	pub fn require(&self, key: &str) -> ClResult<&Arc<dyn DynEntry>> {
		self.get(key).ok_or_else(|| Error::UnknownEntry(key.to_string()))
	}

	/// All entries, ordered by key
	pub fn list(&self) -> impl Iterator<Item = &Arc<dyn DynEntry>> {
		self.entries.values()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}


// vim: ts=4
