//! Command line schema for scopecfg-admin.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use scopecfg_core::types::Scope;

#[derive(Parser, Debug)]
#[command(name = "scopecfg-admin")]
#[command(about = "Inspect and update scoped runtime config overrides")]
pub struct Args {
	/// SQLite database holding the overrides
	#[arg(
		long,
		env = "SCOPECFG_DB",
		value_name = "PATH",
		default_value = "./data/runtime_config.db"
	)]
	pub db: PathBuf,

	/// Deadline for each store operation, in milliseconds
	#[arg(long, env = "SCOPECFG_TIMEOUT_MS", value_name = "MS", default_value_t = 5000)]
	pub timeout_ms: u64,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// List registered entries
	Keys,

	/// Print the effective value of an entry
	Get {
		key: String,

		/// `deployment` or `org:<uuid>`
		#[arg(long, default_value = "deployment")]
		scope: Scope,
	},

	/// Replace the override of an entry, then print the effective value
	Set {
		key: String,

		/// Value in the entry's encoding (JSON for structured entries)
		value: String,

		#[arg(long, default_value = "deployment")]
		scope: Scope,
	},

	/// Print the effective value of every entry in a scope
	Show {
		#[arg(long, default_value = "deployment")]
		scope: Scope,
	},
}

/// Settings resolved from arguments and environment
#[derive(Debug, Clone)]
pub struct Config {
	pub db_path: PathBuf,
	pub timeout: Duration,
}

impl From<&Args> for Config {
	fn from(args: &Args) -> Self {
		Self { db_path: args.db.clone(), timeout: Duration::from_millis(args.timeout_ms) }
	}
}


// vim: ts=4
