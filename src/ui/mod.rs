//! Presentation helpers for the listing and detail surfaces.
//!
//! ```text
//! CatalogState → CatalogView::from_state → render_catalog → text
//! Movie        → MovieDetailView::from_movie → render_detail → text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready view models
//! - [`renderer`]: plain-text rendering used by the CLI

pub mod renderer;
pub mod viewmodel;

pub use renderer::{render_catalog, render_detail};
pub use viewmodel::{CatalogView, MovieDetailView, MovieRow};
