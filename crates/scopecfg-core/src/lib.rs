//! Scoped runtime configuration.
//!
//! An entry is declared once with a key, a compiled-in default, and a codec.
//! Its effective value for a scope is the stored override for that scope if
//! one exists, otherwise the default. Overrides can be replaced at runtime
//! through a [`resolver::ScopeResolver`] bound to the target scope.
//!
//! # Architecture
//!
//! - **Codec** (`codec.rs`): typed value <-> bytes
//! - **Resolver** (`resolver.rs`): scope-bound raw access to an override store
//! - **Entry** (`entry.rs`): typed `resolve` / `set_runtime_value`
//! - **Registry** (`registry.rs`): immutable key -> entry map built at startup
//! - **Memory** (`memory.rs`): in-process override store
//! - **IdP sync** (`idp_sync.rs`): identity-provider sync settings entries
//!
//! The engine caches nothing. Every resolve is a store round trip, so a
//! resolve always reflects what the store holds at call time.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod entry;
pub mod idp_sync;
pub mod memory;
pub mod prelude;
pub mod registry;
pub mod resolver;

pub use codec::{Codec, JsonCodec, TextCodec};
pub use entry::{DynEntry, RuntimeEntry, RuntimeEntryBuilder};
pub use idp_sync::SyncSettings;
pub use memory::MemoryOverrideAdapter;
pub use registry::{EntryRegistry, FrozenEntryRegistry};
pub use resolver::{Manager, NoopResolver, ScopeResolver, StoreResolver};

pub use scopecfg_types::{error, override_adapter, types};

// vim: ts=4
