// ---------------------------------------------------------------------------
// External link labels
// ---------------------------------------------------------------------------
//
// "https://www.lego.com/en-de/product/..."  =>  "View on Lego.com"
// ---------------------------------------------------------------------------

use std::sync::OnceLock;

use regex::Regex;
use url::{Host, Url};

pub const FALLBACK_LABEL: &str = "External Link";

/// Second-level registries where the registrable domain spans three labels.
const MULTI_PART_TLDS: &[&str] = &[
	"co.uk", "co.jp", "com.au", "co.nz", "co.za", "co.in", "co.il", "org.uk", "ac.uk",
];

fn scheme_regex() -> &'static Regex {
	static REGEX: OnceLock<Regex> = OnceLock::new();
	REGEX.get_or_init(|| Regex::new(r"(?i)^(https?|ftp)://").expect("Invalid regex"))
}

/// Display name of the site a link points at, e.g. `Lego.com`,
/// `Amazon.co.uk`. IPv4 hosts are returned as-is. Anything that does not
/// look like a domain yields [`FALLBACK_LABEL`].
pub fn domain_from_url(raw: &str) -> String {
	let raw = raw.trim();
	if raw.is_empty() {
		return FALLBACK_LABEL.to_string();
	}

	let candidate = if scheme_regex().is_match(raw) {
		raw.to_string()
	} else {
		format!("https://{raw}")
	};

	let Ok(url) = Url::parse(&candidate) else {
		return FALLBACK_LABEL.to_string();
	};

	let hostname = match url.host() {
		Some(Host::Ipv4(ip)) => return ip.to_string(),
		Some(Host::Domain(domain)) => domain.to_lowercase(),
		Some(Host::Ipv6(_)) | None => return FALLBACK_LABEL.to_string(),
	};

	if !hostname.contains('.') || hostname.len() < 3 {
		return FALLBACK_LABEL.to_string();
	}

	let parts: Vec<&str> = hostname.split('.').filter(|p| !p.is_empty()).collect();
	if parts.len() < 2 {
		return capitalize(&hostname);
	}

	let last_two = parts[parts.len() - 2..].join(".");
	let keep = if MULTI_PART_TLDS.contains(&last_two.as_str()) && parts.len() >= 3 {
		3
	} else {
		2
	};

	let main = &parts[parts.len() - keep..];
	let mut out = capitalize(main[0]);
	for part in &main[1..] {
		out.push('.');
		out.push_str(part);
	}
	out
}

/// Custom name when one is given, else `"View on <domain>"`.
pub fn format_link_label(url: &str, custom_name: Option<&str>) -> String {
	match custom_name {
		Some(name) if !name.trim().is_empty() => name.to_string(),
		_ => format!("View on {}", domain_from_url(url)),
	}
}

fn capitalize(word: &str) -> String {
	let mut chars = word.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
		None => String::new(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	// -- domain_from_url --

	#[test]
	fn standard_domains() {
		assert_eq!(domain_from_url("https://www.lego.com/en-de/product/r2-d2-75379"), "Lego.com");
		assert_eq!(domain_from_url("https://lego.com/product/test"), "Lego.com");
		assert_eq!(domain_from_url("https://www.amazon.com/dp/B08XYZ"), "Amazon.com");
		assert_eq!(domain_from_url("https://de.aliexpress.com/item/test"), "Aliexpress.com");
		assert_eq!(domain_from_url("https://www.ebay.com/itm/test"), "Ebay.com");
	}

	#[test]
	fn country_tlds() {
		assert_eq!(domain_from_url("https://www.lego.co.uk/en-de/product/test"), "Lego.co.uk");
		assert_eq!(domain_from_url("https://www.amazon.co.uk/dp/B08XYZ"), "Amazon.co.uk");
		assert_eq!(domain_from_url("https://www.amazon.de/dp/B08XYZ"), "Amazon.de");
		assert_eq!(domain_from_url("https://www.amazon.fr/dp/B08XYZ"), "Amazon.fr");
	}

	#[test]
	fn nested_subdomains() {
		assert_eq!(domain_from_url("https://shop.sub.lego.com/product"), "Lego.com");
		assert_eq!(domain_from_url("https://store.lego.com/product"), "Lego.com");
	}

	#[test]
	fn missing_or_other_scheme() {
		assert_eq!(domain_from_url("www.lego.com/product"), "Lego.com");
		assert_eq!(domain_from_url("ftp://ftp.lego.com/files"), "Lego.com");
		assert_eq!(domain_from_url("HTTPS://WWW.BRICKLINK.COM/v2"), "Bricklink.com");
	}

	#[test]
	fn fallbacks() {
		assert_eq!(domain_from_url("not-a-url"), FALLBACK_LABEL);
		assert_eq!(domain_from_url(""), FALLBACK_LABEL);
		assert_eq!(domain_from_url("   "), FALLBACK_LABEL);
		assert_eq!(domain_from_url("https://localhost/path"), FALLBACK_LABEL);
	}

	#[test]
	fn ipv4_verbatim() {
		assert_eq!(domain_from_url("https://192.168.1.1/path"), "192.168.1.1");
	}

	// -- format_link_label --

	#[test]
	fn custom_name_wins() {
		assert_eq!(
			format_link_label("https://lego.com/product", Some("Official Store")),
			"Official Store"
		);
	}

	#[test]
	fn domain_label() {
		assert_eq!(
			format_link_label("https://www.amazon.co.uk/dp/B08XYZ", None),
			"View on Amazon.co.uk"
		);
		assert_eq!(
			format_link_label("https://www.bricklink.com/v2/catalog/catalogitem.page", None),
			"View on Bricklink.com"
		);
	}

	#[test]
	fn blank_custom_name_ignored() {
		assert_eq!(format_link_label("https://lego.com/product", Some("")), "View on Lego.com");
		assert_eq!(format_link_label("https://lego.com/product", Some("  ")), "View on Lego.com");
	}

	#[test]
	fn invalid_url_label() {
		assert_eq!(format_link_label("not-a-url", None), "View on External Link");
		assert_eq!(format_link_label("", None), "View on External Link");
	}
}
