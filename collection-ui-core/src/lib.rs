//! Filtering, fuzzy search and sorting for the collection site's list pages.
//!
//! A page hands a [`FilterEngine`] its slice of items (owned or wishlist),
//! drives it through the setter methods as the visitor clicks around, and
//! renders [`FilterEngine::filtered_items`] after running them through
//! [`sort_items`]. Filter state can be mirrored into the page URL through
//! the [`UrlSync`] boundary.

pub mod age_bucket;
pub mod clock;
pub mod config;
pub mod content;
pub mod error;
pub mod filters;
pub mod links;
pub mod price_range;
pub mod retired;
pub mod sort;
pub mod stats;
pub mod tags;
pub mod text_search;
pub mod types;
pub mod url_state;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{AgeBucket, Config, FiltersConfig, SiteConfig};
pub use error::{CollectionError, Result};
pub use filters::{FilterEngine, FilterEngineOptions};
pub use sort::{SortKey, sort_items};
pub use stats::{CollectionStats, PriceBasis};
pub use text_search::{FuzzyIndex, SearchProvider};
pub use types::{FilterState, Item, ItemLink, ItemStatus, StatusFilter};
pub use url_state::{MemoryLocation, QueryParams, UrlSync};
