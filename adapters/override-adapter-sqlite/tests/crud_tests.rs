//! SQLite override store tests
//!
//! Tests raw reads and writes, durability across reopen, and resolution of
//! runtime entries through the engine on top of the SQLite store.

use std::sync::Arc;

use scopecfg_core::idp_sync::{GROUP_SYNC_KEY, GroupSyncSettings};
use scopecfg_core::{Manager, SyncSettings};
use scopecfg_override_adapter_sqlite::OverrideAdapterSqlite;
use scopecfg_types::error::Error;
use scopecfg_types::override_adapter::OverrideAdapter;
use scopecfg_types::types::{CallCtx, Scope};
use tempfile::TempDir;
use uuid::Uuid;

async fn create_test_adapter() -> (OverrideAdapterSqlite, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");

	let adapter = OverrideAdapterSqlite::new(temp_dir.path().join("runtime_config.db"))
		.await
		.expect("Failed to create adapter");

	(adapter, temp_dir)
}

#[tokio::test]
async fn test_missing_override_is_none() {
	let (adapter, _temp) = create_test_adapter().await;

	let res = adapter.read_override(&CallCtx::new(), &Scope::Deployment, "missing").await;
	assert!(matches!(res, Ok(None)), "absent override must not be an error");
}

#[tokio::test]
async fn test_write_then_read() {
	let (adapter, _temp) = create_test_adapter().await;
	let ctx = CallCtx::new();
	let scope = Scope::Organization(Uuid::new_v4());

	adapter.write_override(&ctx, &scope, "k", b"{\"a\":1}").await.expect("Should write");

	let value = adapter.read_override(&ctx, &scope, "k").await.expect("Should read");
	assert_eq!(value.as_deref(), Some(&b"{\"a\":1}"[..]));
}

#[tokio::test]
async fn test_upsert_replaces_value() {
	let (adapter, _temp) = create_test_adapter().await;
	let ctx = CallCtx::new();

	adapter.write_override(&ctx, &Scope::Deployment, "k", b"one").await.unwrap();
	adapter.write_override(&ctx, &Scope::Deployment, "k", b"two").await.unwrap();

	let value = adapter.read_override(&ctx, &Scope::Deployment, "k").await.unwrap();
	assert_eq!(value.as_deref(), Some(&b"two"[..]));
}

#[tokio::test]
async fn test_scopes_are_isolated() {
	let (adapter, _temp) = create_test_adapter().await;
	let ctx = CallCtx::new();
	let org_a = Scope::Organization(Uuid::new_v4());
	let org_b = Scope::Organization(Uuid::new_v4());

	adapter.write_override(&ctx, &org_a, "k", b"a").await.unwrap();

	assert!(adapter.read_override(&ctx, &org_b, "k").await.unwrap().is_none());
	assert!(adapter.read_override(&ctx, &Scope::Deployment, "k").await.unwrap().is_none());
}

#[tokio::test]
async fn test_override_survives_reopen() {
	let temp_dir = TempDir::new().unwrap();
	let path = temp_dir.path().join("runtime_config.db");
	let ctx = CallCtx::new();

	let adapter = OverrideAdapterSqlite::new(&path).await.unwrap();
	adapter.write_override(&ctx, &Scope::Deployment, "k", b"kept").await.unwrap();
	adapter.close().await;

	let reopened = OverrideAdapterSqlite::new(&path).await.unwrap();
	let value = reopened.read_override(&ctx, &Scope::Deployment, "k").await.unwrap();
	assert_eq!(value.as_deref(), Some(&b"kept"[..]));
}

#[tokio::test]
async fn test_cancelled_ctx_skips_write() {
	let (adapter, _temp) = create_test_adapter().await;
	let cancelled = CallCtx::new();
	cancelled.cancel_token().cancel();

	let res = adapter.write_override(&cancelled, &Scope::Deployment, "k", b"v").await;
	assert!(matches!(res, Err(Error::Cancelled)));

	let value = adapter.read_override(&CallCtx::new(), &Scope::Deployment, "k").await.unwrap();
	assert!(value.is_none());
}

#[tokio::test]
async fn test_group_sync_entry_on_sqlite() {
	let (adapter, _temp) = create_test_adapter().await;
	let manager = Manager::new(Arc::new(adapter));
	let sync = SyncSettings::new().unwrap();
	let ctx = CallCtx::new();
	let org_a = manager.organization_resolver(Uuid::new_v4());
	let org_b = manager.organization_resolver(Uuid::new_v4());

	assert_eq!(sync.group.resolve(&ctx, &org_a).await.unwrap(), GroupSyncSettings::default());

	let wanted = GroupSyncSettings {
		field: "groups".into(),
		auto_create_missing: true,
		..Default::default()
	};
	sync.group.set_runtime_value(&ctx, &org_a, &wanted).await.unwrap();

	assert_eq!(sync.group.resolve(&ctx, &org_a).await.unwrap(), wanted);
	assert_eq!(sync.group.resolve(&ctx, &org_b).await.unwrap(), GroupSyncSettings::default());
}

#[tokio::test]
async fn test_corrupt_row_is_reported() {
	let (adapter, _temp) = create_test_adapter().await;
	let org_id = Uuid::new_v4();
	let ctx = CallCtx::new();
	adapter
		.write_override(&ctx, &Scope::Organization(org_id), GROUP_SYNC_KEY, b"\x00\x01garbage")
		.await
		.unwrap();

	let manager = Manager::new(Arc::new(adapter));
	let sync = SyncSettings::new().unwrap();

	let res = sync.group.resolve(&ctx, &manager.organization_resolver(org_id)).await;
	assert!(matches!(res, Err(Error::DecodeError { .. })));
}

// vim: ts=4
