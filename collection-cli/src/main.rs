mod cli;
mod commands;

use clap::Parser;
use serde::Serialize;

use crate::cli::{CliArgs, Command};

fn main() {
	let args = CliArgs::parse();

	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
		)
		.init();

	if let Err(e) = run(&args) {
		tracing::error!("{:#}", e);
		eprintln!("error: {e:#}");
		std::process::exit(1);
	}
}

fn run(args: &CliArgs) -> anyhow::Result<()> {
	let config = commands::load_config(args.config.as_deref())?;

	match &args.command {
		Command::List { page, query, sort } => {
			let catalog = commands::load_catalog(&args.content)?;
			print_json(&commands::list(&catalog, &config, *page, query, *sort))
		}
		Command::Stats { recent } => {
			let catalog = commands::load_catalog(&args.content)?;
			print_json(&commands::stats(&catalog, &config, *recent))
		}
		Command::Options => print_json(&commands::options(&config)),
	}
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}
