//! Common types used throughout scopecfg.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::prelude::*;

// Scope //
//*******//
/// Partition under which an entry's override is stored.
///
/// The text form (`deployment`, `org:<uuid>`) is what adapters persist, so it
/// must stay stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
	/// Instance-wide overrides
	Deployment,
	/// Overrides for a single organization
	Organization(Uuid),
}

const DEPLOYMENT: &str = "deployment";
const ORG_PREFIX: &str = "org:";

impl std::fmt::Display for Scope {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Scope::Deployment => write!(f, "{}", DEPLOYMENT),
			Scope::Organization(id) => write!(f, "{}{}", ORG_PREFIX, id),
		}
	}
}

impl FromStr for Scope {
	type Err = Error;

	fn from_str(s: &str) -> ClResult<Self> {
		if s == DEPLOYMENT {
			return Ok(Scope::Deployment);
		}
		let id = s
			.strip_prefix(ORG_PREFIX)
			.ok_or_else(|| Error::ConfigError(format!("invalid scope: {}", s)))?;
		let id = Uuid::parse_str(id)
			.map_err(|e| Error::ConfigError(format!("invalid organization id '{}': {}", id, e)))?;
		Ok(Scope::Organization(id))
	}
}

impl Serialize for Scope {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for Scope {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		s.parse().map_err(serde::de::Error::custom)
	}
}

// CallCtx //
//*********//
/// Caller-supplied cancellation signal and optional deadline for store round
/// trips.
///
/// The engine never creates its own deadlines; it hands the caller's `CallCtx`
/// to the adapter, which runs its query under [`CallCtx::run`].
#[derive(Clone, Debug, Default)]
pub struct CallCtx {
	cancel: CancellationToken,
	deadline: Option<Instant>,
}

impl CallCtx {
	pub fn new() -> Self {
		Self::default()
	}

	/// Bind to an existing cancellation token (e.g. a request's or the process shutdown token)
	pub fn with_cancel(cancel: CancellationToken) -> Self {
		Self { cancel, deadline: None }
	}

	pub fn timeout(self, timeout: Duration) -> Self {
		self.deadline(Instant::now() + timeout)
	}

	pub fn deadline(mut self, deadline: Instant) -> Self {
		self.deadline = Some(deadline);
		self
	}

	pub fn cancel_token(&self) -> &CancellationToken {
		&self.cancel
	}

	/// Fails fast if the context is already cancelled or past its deadline
	pub fn check(&self) -> ClResult<()> {
		if self.cancel.is_cancelled() {
			return Err(Error::Cancelled);
		}
		if self.deadline.is_some_and(|at| at <= Instant::now()) {
			return Err(Error::Timeout);
		}
		Ok(())
	}

	/// Drive a store future, aborting it when the context is cancelled or expires
	pub async fn run<T, F>(&self, fut: F) -> ClResult<T>
	where
		F: Future<Output = ClResult<T>>,
	{
		self.check()?;
		tokio::select! {
			biased;
			() = self.cancel.cancelled() => Err(Error::Cancelled),
			() = sleep_until(self.deadline) => Err(Error::Timeout),
			res = fut => res,
		}
	}
}

async fn sleep_until(deadline: Option<Instant>) {
	match deadline {
		Some(at) => tokio::time::sleep_until(at).await,
		None => std::future::pending().await,
	}
}


// vim: ts=4
