// ---------------------------------------------------------------------------
// Content loading
// ---------------------------------------------------------------------------
//
// Items live one per YAML file (content/items/lego/<set>.yaml). A single
// file may also hold a list of items.
// ---------------------------------------------------------------------------

use std::path::{Path, PathBuf};

use crate::error::{CollectionError, Result};
use crate::types::Item;

fn is_yaml(path: &Path) -> bool {
	matches!(
		path.extension().and_then(|e| e.to_str()),
		Some("yaml") | Some("yml")
	)
}

/// Parse one YAML document holding an item or a list of items.
///
/// The document shape is checked first and the text is then decoded as
/// exactly that shape, so errors point at the offending field.
pub fn parse_items(yaml: &str, origin: &Path) -> Result<Vec<Item>> {
	let yaml_error = |source| CollectionError::Yaml {
		path: origin.to_path_buf(),
		source,
	};
	let shape: serde_yaml::Value = serde_yaml::from_str(yaml).map_err(yaml_error)?;
	let items = if shape.is_sequence() {
		serde_yaml::from_str::<Vec<Item>>(yaml).map_err(yaml_error)?
	} else {
		vec![serde_yaml::from_str::<Item>(yaml).map_err(yaml_error)?]
	};
	for item in &items {
		validate(item, origin)?;
	}
	Ok(items)
}

fn validate(item: &Item, origin: &Path) -> Result<()> {
	if item.id.trim().is_empty() {
		return Err(CollectionError::InvalidItem {
			path: origin.to_path_buf(),
			reason: "empty id".to_string(),
		});
	}
	if item.name.trim().is_empty() {
		return Err(CollectionError::InvalidItem {
			path: origin.to_path_buf(),
			reason: format!("item {} has an empty name", item.id),
		});
	}
	Ok(())
}

/// Load items from a YAML file, or from every `*.yaml`/`*.yml` file in a
/// directory (non-recursive, in file-name order).
pub fn load_items(path: &Path) -> Result<Vec<Item>> {
	if !path.exists() {
		return Err(CollectionError::NotFound(path.to_path_buf()));
	}

	if path.is_file() {
		let raw = std::fs::read_to_string(path)?;
		return parse_items(&raw, path);
	}

	let mut files: Vec<PathBuf> = std::fs::read_dir(path)?
		.filter_map(|entry| entry.ok().map(|e| e.path()))
		.filter(|p| p.is_file() && is_yaml(p))
		.collect();
	files.sort();

	let mut items = Vec::new();
	for file in &files {
		let raw = std::fs::read_to_string(file)?;
		items.extend(parse_items(&raw, file)?);
	}

	let mut seen = std::collections::HashSet::new();
	for item in &items {
		if !seen.insert(item.id.as_str()) {
			tracing::warn!(id = %item.id, "duplicate item id in content");
		}
	}

	tracing::debug!(
		dir = %path.display(),
		files = files.len(),
		items = items.len(),
		"loaded content"
	);
	Ok(items)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::ItemStatus;

	const DEATH_STAR: &str = r#"
id: "75159"
name: Death Star
status: owned
isGift: false
tags: [starwars, ucs]
referenceRetailPrice: 499.99
dateAdded: "2024-01-10"
"#;

	const BONSAI: &str = r#"
id: "10281"
name: Bonsai Tree
status: wishlist
tags: [plants]
retailPrice: 49.99
dateAdded: "2024-03-02"
"#;

	#[test]
	fn parse_single_item() {
		let items = parse_items(DEATH_STAR, Path::new("death-star.yaml")).unwrap();
		assert_eq!(items.len(), 1);
		assert_eq!(items[0].name, "Death Star");
	}

	#[test]
	fn parse_item_list() {
		let yaml = format!("- {}\n- {}", indent(DEATH_STAR), indent(BONSAI));
		let items = parse_items(&yaml, Path::new("all.yaml")).unwrap();
		assert_eq!(items.len(), 2);
		assert_eq!(items[1].status, ItemStatus::Wishlist);
	}

	fn indent(doc: &str) -> String {
		doc.trim()
			.lines()
			.enumerate()
			.map(|(i, l)| if i == 0 { l.to_string() } else { format!("  {l}") })
			.collect::<Vec<_>>()
			.join("\n")
	}

	#[test]
	fn empty_name_rejected() {
		let yaml = "id: \"1\"\nname: \" \"\nstatus: owned\ndateAdded: \"2024-01-01\"\n";
		let err = parse_items(yaml, Path::new("bad.yaml")).unwrap_err();
		assert_eq!(err.code(), "COLLECTION_INVALID_ITEM");
	}

	#[test]
	fn malformed_yaml_names_file() {
		let err = parse_items("id: [", Path::new("broken.yaml")).unwrap_err();
		assert_eq!(err.code(), "COLLECTION_YAML");
		assert!(err.to_string().contains("broken.yaml"));
	}

	#[test]
	fn parse_file_from_add_script() {
		let yaml = r#"
id: "10281"
name: Bonsai Tree
status: owned
tags: []
retailPrice: 49.99
purchasePrice: ''
dateAdded: "2024-03-02"
images: []
"#;
		let items = parse_items(yaml, Path::new("bonsai-tree-10281.yaml")).unwrap();
		assert_eq!(items[0].paid_price, None);
		assert_eq!(items[0].effective_price(), Some(49.99));
	}

	#[test]
	fn parse_file_after_pricing_migration() {
		let yaml = format!("{BONSAI}purchasePrice: 39.99\ngenuinePrice: 49.99\nreferenceRetailPrice: 49.99\n");
		let items = parse_items(&yaml, Path::new("bonsai.yaml")).unwrap();
		assert_eq!(items[0].paid_price, Some(49.99));
		assert_eq!(items[0].reference_price, Some(49.99));
	}

	#[test]
	fn field_error_reaches_caller() {
		let yaml = "id: \"1\"\nname: X\nstatus: lost\ndateAdded: \"2024-01-01\"\n";
		let err = parse_items(yaml, Path::new("lost.yaml")).unwrap_err();
		assert_eq!(err.code(), "COLLECTION_YAML");
		let message = err.to_string();
		assert!(message.contains("lost.yaml"), "{message}");
		assert!(message.contains("unknown variant"), "{message}");
	}

	#[test]
	fn load_directory_in_name_order() {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(dir.path().join("b-bonsai.yaml"), BONSAI).unwrap();
		std::fs::write(dir.path().join("a-death-star.yml"), DEATH_STAR).unwrap();
		std::fs::write(dir.path().join("README.md"), "not content").unwrap();

		let items = load_items(dir.path()).unwrap();
		let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
		assert_eq!(ids, vec!["75159", "10281"]);
	}

	#[test]
	fn load_missing_path() {
		let err = load_items(Path::new("/no/such/content")).unwrap_err();
		assert_eq!(err.code(), "COLLECTION_NOT_FOUND");
	}

	#[test]
	fn load_empty_directory() {
		let dir = tempfile::tempdir().unwrap();
		assert!(load_items(dir.path()).unwrap().is_empty());
	}
}
