//! Scope resolvers: scope-bound access to the override store

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::override_adapter::OverrideAdapter;
use crate::prelude::*;

/// A capability bound to exactly one scope, mediating all override reads and
/// writes for that scope.
#[async_trait]
pub trait ScopeResolver: Send + Sync {
	fn scope(&self) -> &Scope;

	/// `Ok(None)` means no override is stored for `key` in this scope
	async fn read_raw(&self, ctx: &CallCtx, key: &str) -> ClResult<Option<Box<[u8]>>>;

	async fn write_raw(&self, ctx: &CallCtx, key: &str, value: &[u8]) -> ClResult<()>;
}

/// Resolver backed by an [`OverrideAdapter`]
#[derive(Debug, Clone)]
pub struct StoreResolver {
	adapter: Arc<dyn OverrideAdapter>,
	scope: Scope,
}

impl StoreResolver {
	pub fn new(adapter: Arc<dyn OverrideAdapter>, scope: Scope) -> Self {
		Self { adapter, scope }
	}
}

#[async_trait]
impl ScopeResolver for StoreResolver {
	fn scope(&self) -> &Scope {
		&self.scope
	}

	async fn read_raw(&self, ctx: &CallCtx, key: &str) -> ClResult<Option<Box<[u8]>>> {
		self.adapter.read_override(ctx, &self.scope, key).await
	}

	async fn write_raw(&self, ctx: &CallCtx, key: &str, value: &[u8]) -> ClResult<()> {
		self.adapter.write_override(ctx, &self.scope, key, value).await
	}
}

/// Resolver for contexts where runtime overrides are disabled.
///
/// Every entry resolves to its default; writes fail with [`Error::ReadOnly`].
#[derive(Debug, Clone, Copy)]
pub struct NoopResolver {
	scope: Scope,
}

impl NoopResolver {
	pub fn new(scope: Scope) -> Self {
		Self { scope }
	}
}

impl Default for NoopResolver {
	fn default() -> Self {
		Self::new(Scope::Deployment)
	}
}

#[async_trait]
impl ScopeResolver for NoopResolver {
	fn scope(&self) -> &Scope {
		&self.scope
	}

	async fn read_raw(&self, ctx: &CallCtx, _key: &str) -> ClResult<Option<Box<[u8]>>> {
		ctx.check()?;
		Ok(None)
	}

	async fn write_raw(&self, ctx: &CallCtx, key: &str, _value: &[u8]) -> ClResult<()> {
		ctx.check()?;
		warn!(key = %key, scope = %self.scope, "Rejected override write: overrides disabled");
		Err(Error::ReadOnly)
	}
}

/// Hands out resolvers bound to a single override store
#[derive(Debug, Clone)]
pub struct Manager {
	adapter: Arc<dyn OverrideAdapter>,
}

impl Manager {
	pub fn new(adapter: Arc<dyn OverrideAdapter>) -> Self {
		Self { adapter }
	}

	pub fn adapter(&self) -> &Arc<dyn OverrideAdapter> {
		&self.adapter
	}

	pub fn resolver(&self, scope: Scope) -> StoreResolver {
		StoreResolver::new(self.adapter.clone(), scope)
	}

	pub fn deployment_resolver(&self) -> StoreResolver {
		self.resolver(Scope::Deployment)
	}

	pub fn organization_resolver(&self, org_id: Uuid) -> StoreResolver {
		self.resolver(Scope::Organization(org_id))
	}
}


// vim: ts=4
