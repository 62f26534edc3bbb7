//! Runtime config entries
//!
//! A [`RuntimeEntry`] binds a key, a default value, and a codec. Resolving it
//! against a scope yields the stored override for that scope, or the default
//! when none is stored. A stored override that fails to decode is an error and
//! is never replaced by the default.

use async_trait::async_trait;
use std::fmt::Debug;
use std::marker::PhantomData;

use crate::prelude::*;

pub struct RuntimeEntry<T, C = JsonCodec<T>> {
	key: Box<str>,
	description: Box<str>,
	default: T,
	codec: PhantomData<fn() -> C>,
}

impl<T, C> RuntimeEntry<T, C>
where
	C: Codec<Value = T>,
	T: Clone + Send + Sync,
{
	/// Create a builder for declaring an entry
	pub fn builder(key: impl Into<String>) -> RuntimeEntryBuilder<T, C> {
		RuntimeEntryBuilder::new(key)
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	pub fn description(&self) -> &str {
		&self.description
	}

	pub fn default_value(&self) -> &T {
		&self.default
	}

	/// Effective value of this entry in the resolver's scope
	///
	/// Store failures are returned unchanged. An override that does not decode
	/// yields [`Error::DecodeError`].
	pub async fn resolve(&self, ctx: &CallCtx, resolver: &dyn ScopeResolver) -> ClResult<T> {
		let raw = resolver.read_raw(ctx, &self.key).await.inspect_err(|err| {
			warn!(
				key = %self.key, scope = %resolver.scope(), error = %err,
				"Failed to read runtime override"
			);
		})?;

		let Some(raw) = raw else {
			debug!(key = %self.key, scope = %resolver.scope(), "No override, using default");
			return Ok(self.default.clone());
		};

		let value = C::decode(&raw).map_err(|reason| {
			warn!(
				key = %self.key, scope = %resolver.scope(), error = %reason,
				"Stored runtime override is corrupt"
			);
			Error::DecodeError { key: self.key.clone(), reason }
		})?;

		debug!(key = %self.key, scope = %resolver.scope(), "Resolved runtime override");
		Ok(value)
	}

	/// Replace the override for this entry in the resolver's scope
	///
	/// Does not read back; call [`resolve`](Self::resolve) afterwards to
	/// confirm. Concurrent writers to the same scope race, the last write the
	/// store commits wins.
	pub async fn set_runtime_value(
		&self,
		ctx: &CallCtx,
		resolver: &dyn ScopeResolver,
		value: &T,
	) -> ClResult<()> {
		let raw = self.encode(value)?;
		resolver.write_raw(ctx, &self.key, &raw).await.inspect_err(|err| {
			warn!(
				key = %self.key, scope = %resolver.scope(), error = %err,
				"Failed to write runtime override"
			);
		})?;

		info!(key = %self.key, scope = %resolver.scope(), "Runtime override updated");
		Ok(())
	}

	fn encode(&self, value: &T) -> ClResult<Vec<u8>> {
		C::encode(value).map_err(|reason| {
			error!(key = %self.key, error = %reason, "Failed to encode runtime config value");
			Error::EncodeError { key: self.key.clone(), reason }
		})
	}
}

impl<T: Debug, C> Debug for RuntimeEntry<T, C> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RuntimeEntry")
			.field("key", &self.key)
			.field("description", &self.description)
			.field("default", &self.default)
			.finish()
	}
}

/// Builder for [`RuntimeEntry`]
pub struct RuntimeEntryBuilder<T, C> {
	key: String,
	description: Option<String>,
	default: Option<T>,
	codec: PhantomData<fn() -> C>,
}

impl<T, C> RuntimeEntryBuilder<T, C>
where
	C: Codec<Value = T>,
	T: Clone + Send + Sync,
{
	pub fn new(key: impl Into<String>) -> Self {
		Self { key: key.into(), description: None, default: None, codec: PhantomData }
	}

	/// Set the description (required)
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Set the default value (required)
	pub fn default(mut self, value: T) -> Self {
		self.default = Some(value);
		self
	}

	pub fn build(self) -> ClResult<RuntimeEntry<T, C>> {
		if self.key.is_empty() {
			return Err(Error::ConfigError("Runtime entry key is required".into()));
		}
		if self.key.chars().any(|c| c.is_whitespace() || c.is_control()) {
			return Err(Error::ConfigError(format!(
				"Runtime entry key {:?} must not contain whitespace",
				self.key
			)));
		}
		let description = self.description.ok_or_else(|| {
			Error::ConfigError(format!("Runtime entry '{}' needs a description", self.key))
		})?;
		let default = self.default.ok_or_else(|| {
			Error::ConfigError(format!("Runtime entry '{}' needs a default value", self.key))
		})?;

		Ok(RuntimeEntry {
			key: self.key.into(),
			description: description.into(),
			default,
			codec: PhantomData,
		})
	}
}

/// Type-erased view of an entry, addressed by key with text values.
///
/// Registries and text transports (such as the admin CLI) use this when they
/// only know an entry by its key.
#[async_trait]
pub trait DynEntry: Send + Sync {
	fn key(&self) -> &str;

	fn description(&self) -> &str;

	fn type_name(&self) -> &'static str;

	/// Resolve and render the value with the entry's codec
	async fn resolve_text(&self, ctx: &CallCtx, resolver: &dyn ScopeResolver) -> ClResult<String>;

	/// Parse `input` with the entry's codec and store it as the override
	///
	/// Input that does not decode is rejected before the store is touched.
	async fn set_text(
		&self,
		ctx: &CallCtx,
		resolver: &dyn ScopeResolver,
		input: &str,
	) -> ClResult<()>;
}

#[async_trait]
impl<T, C> DynEntry for RuntimeEntry<T, C>
where
	C: Codec<Value = T>,
	T: Clone + Send + Sync + 'static,
{
	fn key(&self) -> &str {
		&self.key
	}

	fn description(&self) -> &str {
		&self.description
	}

	fn type_name(&self) -> &'static str {
		std::any::type_name::<T>()
	}

	async fn resolve_text(&self, ctx: &CallCtx, resolver: &dyn ScopeResolver) -> ClResult<String> {
		let value = self.resolve(ctx, resolver).await?;
		let raw = self.encode(&value)?;
		String::from_utf8(raw)
			.map_err(|e| Error::EncodeError { key: self.key.clone(), reason: e.to_string() })
	}

	async fn set_text(
		&self,
		ctx: &CallCtx,
		resolver: &dyn ScopeResolver,
		input: &str,
	) -> ClResult<()> {
		let value = C::decode(input.as_bytes())
			.map_err(|reason| Error::DecodeError { key: self.key.clone(), reason })?;
		self.set_runtime_value(ctx, resolver, &value).await
	}
}


// vim: ts=4
