//! Plain-text rendering of view models.
//!
//! Output is returned as a `String` so the CLI can print it and tests can
//! compare it. Layout is a fixed-width table:
//!
//! ```text
//! Movies List
//! ID     TITLE                                YEAR  FORMAT
//! 1      Casablanca                           1942  DVD
//! ```

use crate::ui::viewmodel::{CatalogView, MovieDetailView};
use std::fmt::Write;

const ID_WIDTH: usize = 6;
const TITLE_WIDTH: usize = 36;

/// Renders the listing surface.
#[must_use]
pub fn render_catalog(view: &CatalogView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.heading);

    if let Some(error) = &view.error {
        let _ = writeln!(out, "error: {error}");
    }

    if let Some(message) = view.empty_message {
        let _ = writeln!(out, "{message}");
        return out;
    }

    let _ = writeln!(out, "{:<ID_WIDTH$} {:<TITLE_WIDTH$} {:<5} FORMAT", "ID", "TITLE", "YEAR");
    for row in &view.rows {
        let _ = writeln!(
            out,
            "{:<ID_WIDTH$} {:<TITLE_WIDTH$} {:<5} {}",
            row.id.to_string(),
            truncate(&row.title, TITLE_WIDTH),
            row.year,
            row.format
        );
    }
    out
}

/// Renders one movie as labelled lines.
#[must_use]
pub fn render_detail(view: &MovieDetailView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.title);
    let _ = writeln!(out, "ID: {}", view.id);
    let _ = writeln!(out, "Year: {}", view.year);
    let _ = writeln!(out, "Format: {}", view.format);
    let _ = writeln!(out, "Actors: {}", view.actors);
    out
}

/// Cuts `text` to `width` characters, marking the cut with `…`.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
