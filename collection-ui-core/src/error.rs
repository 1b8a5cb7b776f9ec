use std::path::PathBuf;

use thiserror::Error;

/// Errors raised at the content and configuration boundary.
///
/// The filter, search and sort paths never fail; malformed filter input
/// degrades to "matches everything" instead.
#[derive(Debug, Error)]
pub enum CollectionError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	#[error("YAML error in {path}: {source}")]
	Yaml {
		path: PathBuf,
		#[source]
		source: serde_yaml::Error,
	},
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
	#[error("Invalid sort key: {0}")]
	InvalidSortKey(String),
	#[error("Invalid item in {path}: {reason}")]
	InvalidItem { path: PathBuf, reason: String },
	#[error("Content path not found: {0}")]
	NotFound(PathBuf),
}

impl CollectionError {
	pub fn code(&self) -> &str {
		match self {
			Self::Io(_) => "COLLECTION_IO",
			Self::Yaml { .. } => "COLLECTION_YAML",
			Self::Json(_) => "COLLECTION_JSON",
			Self::InvalidSortKey(_) => "COLLECTION_INVALID_SORT_KEY",
			Self::InvalidItem { .. } => "COLLECTION_INVALID_ITEM",
			Self::NotFound(_) => "COLLECTION_NOT_FOUND",
		}
	}

	pub fn to_json_error(&self) -> serde_json::Value {
		serde_json::json!({
			"collectionCode": self.code(),
			"message": self.to_string(),
		})
	}
}

pub type Result<T> = std::result::Result<T, CollectionError>;
