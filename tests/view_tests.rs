use movieshelf::app::{CatalogState, ListingMode};
use movieshelf::domain::{Actor, ErrorCode, ErrorValue, Format, Movie, MovieId};
use movieshelf::ui::{render_catalog, render_detail, CatalogView, MovieDetailView};
use pretty_assertions::assert_eq;

fn movie(id: i64, title: &str) -> Movie {
    Movie {
        id: MovieId(id),
        title: title.to_string(),
        year: 1990,
        format: Format::Vhs,
        actors: Vec::new(),
    }
}

fn titles(view: &CatalogView) -> Vec<&str> {
    view.rows.iter().map(|row| row.title.as_str()).collect()
}

#[test]
fn catalog_rows_are_sorted_ignoring_case() {
    let state = CatalogState {
        entries: vec![movie(1, "casablanca"), movie(2, "Alien"), movie(3, "Brazil")],
        ..CatalogState::default()
    };

    let view = CatalogView::from_state(&state);

    assert_eq!(view.heading, "Movies List");
    assert_eq!(view.mode, ListingMode::Catalog);
    assert_eq!(titles(&view), vec!["Alien", "Brazil", "casablanca"]);
    assert_eq!(view.empty_message, None);
}

#[test]
fn empty_search_shows_search_heading_and_empty_message() {
    let state = CatalogState {
        entries: vec![movie(1, "Alpha")],
        search_active: true,
        ..CatalogState::default()
    };

    let view = CatalogView::from_state(&state);

    assert_eq!(view.heading, "Search Results");
    assert!(view.rows.is_empty());
    assert_eq!(view.empty_message, Some("No movies found."));
}

#[test]
fn stored_error_is_rendered_as_user_message() {
    let state = CatalogState {
        error: Some(ErrorValue::code_only(ErrorCode::WrongToken)),
        ..CatalogState::default()
    };

    let view = CatalogView::from_state(&state);
    let text = render_catalog(&view);

    assert_eq!(view.error.as_deref(), Some("Invalid or expired token. Please log in again."));
    assert!(text.contains("Invalid or expired token. Please log in again."));
    assert!(text.contains("No movies found."));
}

#[test]
fn rendered_listing_contains_every_row() {
    let state = CatalogState {
        entries: vec![movie(7, "Alpha"), movie(8, "Beta")],
        ..CatalogState::default()
    };

    let text = render_catalog(&CatalogView::from_state(&state));

    assert!(text.starts_with("Movies List"));
    assert!(text.contains("Alpha"));
    assert!(text.contains("Beta"));
    assert!(text.contains("VHS"));
}

#[test]
fn detail_joins_actor_names() {
    let mut casablanca = movie(3, "Casablanca");
    casablanca.actors = vec![Actor::new("Humphrey Bogart"), Actor::new("Ingrid Bergman")];

    let view = MovieDetailView::from_movie(&casablanca);

    assert_eq!(view.actors, "Humphrey Bogart, Ingrid Bergman");
    assert!(render_detail(&view).contains("Humphrey Bogart, Ingrid Bergman"));
}

#[test]
fn detail_without_actors_uses_placeholder() {
    let view = MovieDetailView::from_movie(&movie(3, "Casablanca"));
    assert_eq!(view.actors, "No actors available");
}
