use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CollectionError, Result};

/// One age filter option. `days: None` is the open-ended "older" bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBucket {
	pub label: String,
	pub days: Option<u32>,
}

impl AgeBucket {
	pub fn new(label: impl Into<String>, days: Option<u32>) -> Self {
		Self {
			label: label.into(),
			days,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiltersConfig {
	#[serde(rename = "priceBreakpoints", default = "default_price_breakpoints")]
	pub price_breakpoints: Vec<f64>,
	#[serde(rename = "ageBuckets", default = "default_age_buckets")]
	pub age_buckets: Vec<AgeBucket>,
}

impl Default for FiltersConfig {
	fn default() -> Self {
		Self {
			price_breakpoints: default_price_breakpoints(),
			age_buckets: default_age_buckets(),
		}
	}
}

fn default_price_breakpoints() -> Vec<f64> {
	vec![25.0, 50.0, 100.0, 200.0, 500.0]
}

fn default_age_buckets() -> Vec<AgeBucket> {
	vec![
		AgeBucket::new("This week", Some(7)),
		AgeBucket::new("This month", Some(30)),
		AgeBucket::new("This quarter", Some(90)),
		AgeBucket::new("This year", Some(365)),
		AgeBucket::new("Older", None),
	]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
	pub title: String,
	pub description: String,
	pub currency: String,
	#[serde(rename = "currencySymbol")]
	pub currency_symbol: String,
	#[serde(rename = "siteUrl", default)]
	pub site_url: Option<String>,
	#[serde(default)]
	pub author: Option<String>,
}

impl Default for SiteConfig {
	fn default() -> Self {
		Self {
			title: "Means of Collection".to_string(),
			description: "A static archive of what I own and what I want".to_string(),
			currency: "EUR".to_string(),
			currency_symbol: "€".to_string(),
			site_url: None,
			author: None,
		}
	}
}

impl SiteConfig {
	/// Format an amount the way list headers show it, e.g. `€49.99`.
	pub fn format_price(&self, amount: f64) -> String {
		format!("{}{:.2}", self.currency_symbol, amount)
	}
}

/// Site configuration file (`config/site.yaml`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
	#[serde(default)]
	pub site: SiteConfig,
	#[serde(default)]
	pub filters: FiltersConfig,
}

impl Config {
	pub fn from_yaml_str(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
		serde_yaml::from_str(yaml)
	}

	pub fn load(path: &Path) -> Result<Self> {
		if !path.exists() {
			return Err(CollectionError::NotFound(path.to_path_buf()));
		}
		let raw = std::fs::read_to_string(path)?;
		let config = Self::from_yaml_str(&raw).map_err(|source| CollectionError::Yaml {
			path: path.to_path_buf(),
			source,
		})?;
		tracing::debug!(
			path = %path.display(),
			breakpoints = config.filters.price_breakpoints.len(),
			buckets = config.filters.age_buckets.len(),
			"loaded site config"
		);
		Ok(config)
	}
}
