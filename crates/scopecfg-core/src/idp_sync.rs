//! Identity-provider sync settings
//!
//! Declares the runtime entries that hold per-organization group, role, and
//! organization sync configuration. Only the payloads and their declarations
//! live here; applying them to users is up to the caller.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, DisplayFromStr, serde_as};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::codec::json_string;
use crate::prelude::*;
use crate::registry::EntryRegistry;

pub const GROUP_SYNC_KEY: &str = "group-sync-settings";
pub const ROLE_SYNC_KEY: &str = "role-sync-settings";
pub const ORGANIZATION_SYNC_KEY: &str = "organization-sync-settings";

// Maps are stored as `null` when empty, so every mapping accepts it.

/// Maps IdP group claims to groups inside an organization
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupSyncSettings {
	/// Claim holding the user's groups. Empty disables group sync.
	#[serde(default)]
	pub field: String,

	/// IdP group name -> group ids
	#[serde_as(as = "DefaultOnNull")]
	#[serde(default)]
	pub mapping: BTreeMap<String, Vec<Uuid>>,

	/// Only IdP groups matching this pattern are synced. An invalid pattern
	/// fails decoding.
	#[serde_as(as = "Option<DisplayFromStr>")]
	#[serde(skip_serializing_if = "Option::is_none")]
	pub regex_filter: Option<Regex>,

	#[serde(default, rename = "auto_create_missing_groups")]
	pub auto_create_missing: bool,

	/// IdP group name -> group name, for deployments configured before `mapping` existed
	#[serde_as(as = "DefaultOnNull")]
	#[serde(
		default,
		rename = "legacy_group_name_mapping",
		skip_serializing_if = "BTreeMap::is_empty"
	)]
	pub legacy_name_mapping: BTreeMap<String, String>,
}

impl GroupSyncSettings {
	pub fn is_enabled(&self) -> bool {
		!self.field.is_empty()
	}
}

impl PartialEq for GroupSyncSettings {
	fn eq(&self, other: &Self) -> bool {
		self.field == other.field
			&& self.mapping == other.mapping
			&& self.regex_filter.as_ref().map(Regex::as_str)
				== other.regex_filter.as_ref().map(Regex::as_str)
			&& self.auto_create_missing == other.auto_create_missing
			&& self.legacy_name_mapping == other.legacy_name_mapping
	}
}

impl Eq for GroupSyncSettings {}

/// Maps IdP role claims to organization roles
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSyncSettings {
	#[serde(default)]
	pub field: String,

	/// IdP role -> organization role names
	#[serde_as(as = "DefaultOnNull")]
	#[serde(default)]
	pub mapping: BTreeMap<String, Vec<String>>,
}

impl RoleSyncSettings {
	pub fn is_enabled(&self) -> bool {
		!self.field.is_empty()
	}
}

/// Maps IdP claims to organization membership. Stored in the deployment scope.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationSyncSettings {
	#[serde(default)]
	pub field: String,

	#[serde_as(as = "DefaultOnNull")]
	#[serde(default)]
	pub mapping: BTreeMap<String, Vec<Uuid>>,

	/// Keep every user in the default organization
	#[serde(default = "default_true")]
	pub assign_default: bool,
}

fn default_true() -> bool {
	true
}

impl Default for OrganizationSyncSettings {
	fn default() -> Self {
		Self { field: String::new(), mapping: BTreeMap::new(), assign_default: true }
	}
}

impl OrganizationSyncSettings {
	pub fn is_enabled(&self) -> bool {
		!self.field.is_empty()
	}
}

macro_rules! json_display {
	($($ty:ty),*) => {$(
		impl std::fmt::Display for $ty {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				f.write_str(&json_string(self))
			}
		}

		impl FromStr for $ty {
			type Err = serde_json::Error;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				serde_json::from_str(s)
			}
		}
	)*};
}

json_display!(GroupSyncSettings, RoleSyncSettings, OrganizationSyncSettings);

/// The IdP sync runtime entries, declared once at startup
#[derive(Debug, Clone)]
pub struct SyncSettings {
	pub group: Arc<RuntimeEntry<GroupSyncSettings>>,
	pub role: Arc<RuntimeEntry<RoleSyncSettings>>,
	pub organization: Arc<RuntimeEntry<OrganizationSyncSettings>>,
}

impl SyncSettings {
	pub fn new() -> ClResult<Self> {
		let group: RuntimeEntry<GroupSyncSettings> = RuntimeEntry::builder(GROUP_SYNC_KEY)
			.description("Group sync settings for an organization")
			.default(GroupSyncSettings::default())
			.build()?;

		let role: RuntimeEntry<RoleSyncSettings> = RuntimeEntry::builder(ROLE_SYNC_KEY)
			.description("Role sync settings for an organization")
			.default(RoleSyncSettings::default())
			.build()?;

		let organization: RuntimeEntry<OrganizationSyncSettings> =
			RuntimeEntry::builder(ORGANIZATION_SYNC_KEY)
				.description("Organization membership sync settings")
				.default(OrganizationSyncSettings::default())
				.build()?;

		Ok(Self {
			group: Arc::new(group),
			role: Arc::new(role),
			organization: Arc::new(organization),
		})
	}

	/// Register all sync entries
	pub fn register(&self, registry: &mut EntryRegistry) -> ClResult<()> {
		registry.register(self.group.clone())?;
		registry.register(self.role.clone())?;
		registry.register(self.organization.clone())?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::memory::MemoryOverrideAdapter;
	use crate::resolver::Manager;

	#[test]
	fn test_wire_names() {
		let settings = GroupSyncSettings {
			field: "groups".into(),
			auto_create_missing: true,
			..Default::default()
		};
		let json = settings.to_string();
		assert!(json.contains("\"auto_create_missing_groups\":true"), "{}", json);
		assert!(!json.contains("regex_filter"), "{}", json);
		assert!(!json.contains("legacy_group_name_mapping"), "{}", json);
		assert_eq!(json.parse::<GroupSyncSettings>().unwrap(), settings);
	}

	#[test]
	fn test_partial_payload_uses_field_defaults() {
		let parsed: OrganizationSyncSettings = "{\"field\":\"orgs\"}".parse().unwrap();
		assert_eq!(parsed.field, "orgs");
		assert!(parsed.assign_default);
		assert!(parsed.mapping.is_empty());
	}

	#[test]
	fn test_organization_default_matches_missing_field() {
		let parsed: OrganizationSyncSettings = "{}".parse().unwrap();
		assert_eq!(parsed, OrganizationSyncSettings::default());
		assert!(OrganizationSyncSettings::default().assign_default);
	}

	#[test]
	fn test_null_mappings_decode_as_empty() {
		let group: GroupSyncSettings = "{\"field\":\"\",\"mapping\":null,\"regex_filter\":null,\
			\"auto_create_missing_groups\":false,\"legacy_group_name_mapping\":null}"
			.parse()
			.unwrap();
		assert_eq!(group, GroupSyncSettings::default());

		let role: RoleSyncSettings = "{\"field\":\"\",\"mapping\":null}".parse().unwrap();
		assert_eq!(role, RoleSyncSettings::default());

		let org: OrganizationSyncSettings =
			"{\"field\":\"\",\"mapping\":null,\"assign_default\":true}".parse().unwrap();
		assert_eq!(org, OrganizationSyncSettings::default());
	}

	#[test]
	fn test_regex_filter_is_validated() {
		let parsed: GroupSyncSettings =
			"{\"field\":\"groups\",\"regex_filter\":\"^eng-.*$\"}".parse().unwrap();
		let filter = parsed.regex_filter.as_ref().unwrap();
		assert!(filter.is_match("eng-platform"));
		assert!(!filter.is_match("sales"));
		assert!(parsed.to_string().contains("\"regex_filter\":\"^eng-.*$\""));

		assert!("{\"regex_filter\":\"([\"}".parse::<GroupSyncSettings>().is_err());
	}

	#[test]
	fn test_register_all() {
		let mut registry = EntryRegistry::new();
		SyncSettings::new().unwrap().register(&mut registry).unwrap();
		let registry = registry.freeze();

		assert_eq!(registry.len(), 3);
		for key in [GROUP_SYNC_KEY, ROLE_SYNC_KEY, ORGANIZATION_SYNC_KEY] {
			assert!(registry.get(key).is_some(), "missing {}", key);
		}
	}

	#[tokio::test]
	async fn test_stored_assign_default_false_is_honoured() {
		let sync = SyncSettings::new().unwrap();
		let store = Arc::new(MemoryOverrideAdapter::new());
		store.seed(
			Scope::Deployment,
			ORGANIZATION_SYNC_KEY,
			b"{\"field\":\"orgs\",\"mapping\":{},\"assign_default\":false}",
		);
		let manager = Manager::new(store);

		let resolver = manager.deployment_resolver();
		let org_sync = sync.organization.resolve(&CallCtx::new(), &resolver).await.unwrap();
		assert_eq!(org_sync.field, "orgs");
		assert!(!org_sync.assign_default);
		assert!(org_sync.to_string().contains("\"assign_default\":false"));
	}

	#[tokio::test]
	async fn test_stored_null_mapping_resolves() {
		let sync = SyncSettings::new().unwrap();
		let store = Arc::new(MemoryOverrideAdapter::new());
		let org_id = Uuid::new_v4();
		store.seed(
			Scope::Organization(org_id),
			GROUP_SYNC_KEY,
			b"{\"field\":\"\",\"mapping\":null,\"regex_filter\":null,\
			\"auto_create_missing_groups\":false}",
		);
		let manager = Manager::new(store);

		let resolver = manager.organization_resolver(org_id);
		let group = sync.group.resolve(&CallCtx::new(), &resolver).await.unwrap();
		assert_eq!(group, GroupSyncSettings::default());
	}

	#[tokio::test]
	async fn test_stored_invalid_regex_filter_is_a_decode_error() {
		let sync = SyncSettings::new().unwrap();
		let store = Arc::new(MemoryOverrideAdapter::new());
		let org_id = Uuid::new_v4();
		store.seed(
			Scope::Organization(org_id),
			GROUP_SYNC_KEY,
			b"{\"field\":\"groups\",\"mapping\":{},\"regex_filter\":\"([\"}",
		);
		let manager = Manager::new(store);

		let res = sync.group.resolve(&CallCtx::new(), &manager.organization_resolver(org_id)).await;
		assert!(matches!(res, Err(Error::DecodeError { .. })), "{:?}", res);
	}

	#[tokio::test]
	async fn test_organization_default_assigns_default_org() {
		let sync = SyncSettings::new().unwrap();
		let manager = Manager::new(Arc::new(MemoryOverrideAdapter::new()));

		let resolver = manager.deployment_resolver();
		let org_sync = sync.organization.resolve(&CallCtx::new(), &resolver).await.unwrap();
		assert!(org_sync.assign_default);
		assert!(!org_sync.is_enabled());
	}
}

// vim: ts=4
