//! scopecfg-admin: inspect and update runtime config overrides in a SQLite store.
//!
//! `set` writes the override and then resolves it again, printing what the
//! store now holds.

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use scopecfg_core::prelude::*;
use scopecfg_core::{EntryRegistry, FrozenEntryRegistry, Manager, SyncSettings};
use scopecfg_override_adapter_sqlite::OverrideAdapterSqlite;
use tokio_util::sync::CancellationToken;

mod cli;

use cli::{Args, Command, Config};

#[tokio::main]
async fn main() -> ExitCode {
	let args = Args::parse();

	tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_target(false)
		.with_writer(std::io::stderr)
		.init();

	let shutdown = CancellationToken::new();
	let on_signal = shutdown.clone();
	tokio::spawn(async move {
		if tokio::signal::ctrl_c().await.is_ok() {
			info!("Interrupted, cancelling store operation");
			on_signal.cancel();
		}
	});

	match run(args, shutdown).await {
		Ok(code) => code,
		Err(err) => {
			error!("{}", err);
			eprintln!("error: {}", err);
			ExitCode::FAILURE
		}
	}
}

fn build_registry() -> ClResult<FrozenEntryRegistry> {
	let mut registry = EntryRegistry::new();
	SyncSettings::new()?.register(&mut registry)?;
	Ok(registry.freeze())
}

async fn run(args: Args, shutdown: CancellationToken) -> ClResult<ExitCode> {
	let config = Config::from(&args);
	let registry = build_registry()?;
	let ctx = || CallCtx::with_cancel(shutdown.clone()).timeout(config.timeout);

	let command = args.command;
	if let Command::Keys = command {
		for entry in registry.list() {
			println!("{}\t{}\t{}", entry.key(), entry.type_name(), entry.description());
		}
		return Ok(ExitCode::SUCCESS);
	}

	let manager = Manager::new(Arc::new(OverrideAdapterSqlite::new(&config.db_path).await?));

	match command {
		Command::Keys => {}
		Command::Get { key, scope } => {
			let entry = registry.require(&key)?;
			let value = entry.resolve_text(&ctx(), &manager.resolver(scope)).await?;
			println!("{}", value);
		}
		Command::Set { key, value, scope } => {
			let entry = registry.require(&key)?;
			let resolver = manager.resolver(scope);
			entry.set_text(&ctx(), &resolver, &value).await?;
			let value = entry.resolve_text(&ctx(), &resolver).await?;
			println!("{}", value);
		}
		Command::Show { scope } => {
			let resolver = manager.resolver(scope);
			let failed = show(
				&registry,
				&resolver,
				ctx,
				&mut std::io::stdout(),
				&mut std::io::stderr(),
			)
			.await?;
			if failed > 0 {
				warn!("{} of {} entries failed to resolve", failed, registry.len());
				return Ok(ExitCode::FAILURE);
			}
		}
	}

	Ok(ExitCode::SUCCESS)
}

/// Print every entry's resolved value, returning how many failed to resolve
async fn show(
	registry: &FrozenEntryRegistry,
	resolver: &dyn ScopeResolver,
	ctx: impl Fn() -> CallCtx,
	out: &mut impl Write,
	err_out: &mut impl Write,
) -> ClResult<usize> {
	let mut failed = 0;
	for entry in registry.list() {
		match entry.resolve_text(&ctx(), resolver).await {
			Ok(value) => writeln!(out, "{} = {}", entry.key(), value)?,
			// report and continue
			Err(err) => {
				failed += 1;
				writeln!(err_out, "{} ! {}", entry.key(), err)?;
			}
		}
	}
	Ok(failed)
}


// vim: ts=4
