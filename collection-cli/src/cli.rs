use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use collection_ui_core::{ItemStatus, SortKey};

#[derive(Parser, Debug)]
#[command(name = "collection", about = "Browse the collection content from the terminal")]
pub struct CliArgs {
	/// Directory (or single YAML file) holding the item records
	#[arg(long, default_value = "content/items/lego", env = "COLLECTION_CONTENT_DIR", global = true)]
	pub content: PathBuf,

	/// Site configuration file (price breakpoints, age buckets, currency)
	#[arg(long, env = "COLLECTION_CONFIG", global = true)]
	pub config: Option<PathBuf>,

	/// Log level (trace, debug, info, warn, error)
	#[arg(long, default_value = "info", env = "COLLECTION_LOG_LEVEL", global = true)]
	pub log_level: String,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Filter and sort one list page
	List {
		/// Which page to emulate
		#[arg(long, value_enum, default_value_t = Page::Collection)]
		page: Page,

		/// Query string as it would appear in the page URL, e.g. "?q=falcon&tags=ucs"
		#[arg(long, default_value = "")]
		query: String,

		/// Sort order
		#[arg(long, default_value = "name-asc", value_parser = parse_sort_key)]
		sort: SortKey,
	},

	/// Counts, totals and the most recent additions
	Stats {
		/// How many recent additions to show
		#[arg(long, default_value = "5")]
		recent: usize,
	},

	/// Price range and age bucket options for the configured site
	Options,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Page {
	Collection,
	Wishlist,
}

impl Page {
	pub fn status(self) -> ItemStatus {
		match self {
			Self::Collection => ItemStatus::Owned,
			Self::Wishlist => ItemStatus::Wishlist,
		}
	}

	pub fn path(self) -> &'static str {
		match self {
			Self::Collection => "/collection/",
			Self::Wishlist => "/wishlist/",
		}
	}
}

fn parse_sort_key(raw: &str) -> Result<SortKey, String> {
	raw.parse::<SortKey>().map_err(|e| e.to_string())
}
