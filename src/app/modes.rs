//! Listing mode and the catalog's consistency policies.
//!
//! [`ListingMode`] is derived from `search_active` and names which listing is
//! authoritative. The two policies decide behaviors the API contract leaves
//! open: what happens to a search that resolves after it was superseded, and
//! how imported movies merge with the existing catalog.
//!
//! # Example
//!
//! ```rust
//! use movieshelf::app::modes::{CatalogPolicy, ImportMerge, StalePolicy};
//!
//! let policy = CatalogPolicy {
//!     stale: StalePolicy::Discard,
//!     import_merge: ImportMerge::Append,
//! };
//! assert_ne!(policy, CatalogPolicy::default());
//! ```

use serde::{Deserialize, Serialize};

/// Which listing the display surface consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingMode {
    /// The full catalog (`entries`) is authoritative.
    Catalog,

    /// The most recent search result set (`search_results`) is authoritative.
    Search,
}

/// What to do with a search that resolves after a newer search or a
/// `clear_search` was issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Commit every resolution as it lands; last to land wins.
    #[default]
    Commit,

    /// Drop resolutions whose search generation is no longer current.
    Discard,
}

/// How an import's returned movies are merged into `entries`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMerge {
    /// Extend `entries` with everything returned, duplicates included.
    #[default]
    Append,

    /// Replace entries that share an id in place; append the rest.
    ReplaceById,
}

/// The catalog store's consistency policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogPolicy {
    pub stale: StalePolicy,
    pub import_merge: ImportMerge,
}
