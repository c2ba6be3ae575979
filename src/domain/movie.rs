//! Movie domain model.
//!
//! [`Movie`] is a catalog entry as the client holds it after the remote decode
//! step. [`MovieDraft`] is what the client sends to create one: every field but
//! the id, which only the server assigns.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Earliest release year accepted by [`MovieDraft::from_form`].
const FIRST_FILM_YEAR: i32 = 1888;

/// Minimum title length accepted by [`MovieDraft::from_form`].
const MIN_TITLE_CHARS: usize = 2;

/// Server-assigned movie identifier. Immutable once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub i64);

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MovieId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Physical release format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    #[serde(rename = "VHS")]
    Vhs,
    #[serde(rename = "DVD")]
    Dvd,
    #[serde(rename = "Blu-ray")]
    BluRay,
}

impl Format {
    /// All formats, in the order they are offered to users.
    pub const ALL: [Self; 3] = [Self::Vhs, Self::Dvd, Self::BluRay];

    /// Wire and display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vhs => "VHS",
            Self::Dvd => "DVD",
            Self::BluRay => "Blu-ray",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DraftError::UnknownFormat(s.to_string()))
    }
}

/// A credited actor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
}

impl Actor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A catalog entry.
///
/// Title, year, format and actors change only by replacing the whole entry;
/// there is no partial update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub year: i32,
    pub format: Format,
    #[serde(default)]
    pub actors: Vec<Actor>,
}

impl Movie {
    /// Actor names in credit order.
    pub fn actor_names(&self) -> impl Iterator<Item = &str> {
        self.actors.iter().map(|actor| actor.name.as_str())
    }
}

/// Rejections from [`MovieDraft::from_form`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Title must be at least 2 characters long")]
    TitleTooShort,

    #[error("Year must be a number")]
    YearNotNumeric,

    #[error("Year must be after 1888")]
    YearTooEarly,

    #[error("Year cannot be in the future")]
    YearInFuture,

    #[error("Unknown format '{0}' (expected VHS, DVD or Blu-ray)")]
    UnknownFormat(String),

    #[error("At least one actor is required")]
    NoActors,
}

/// A movie to be created: every field except the server-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDraft {
    pub title: String,
    pub year: i32,
    pub format: Format,
    /// Actor names, sent to the API as plain strings.
    pub actors: Vec<String>,
}

impl MovieDraft {
    /// Builds a draft from raw form input.
    ///
    /// `actors_csv` is split on commas and each name trimmed; empty names are
    /// skipped. The stores never call this; it exists for input surfaces such
    /// as the CLI, which validate before dispatching a create.
    ///
    /// # Errors
    ///
    /// Returns the first [`DraftError`] found, checking title, year, format and
    /// actors in that order.
    ///
    /// # Example
    ///
    /// ```
    /// use movieshelf::domain::{Format, MovieDraft};
    ///
    /// let draft = MovieDraft::from_form("Casablanca", "1942", "DVD", "Humphrey Bogart, Ingrid Bergman").unwrap();
    /// assert_eq!(draft.format, Format::Dvd);
    /// assert_eq!(draft.actors, vec!["Humphrey Bogart", "Ingrid Bergman"]);
    /// ```
    pub fn from_form(title: &str, year: &str, format: &str, actors_csv: &str) -> Result<Self, DraftError> {
        let title = title.trim();
        if title.chars().count() < MIN_TITLE_CHARS {
            return Err(DraftError::TitleTooShort);
        }

        let year: i32 = year.trim().parse().map_err(|_| DraftError::YearNotNumeric)?;
        if year < FIRST_FILM_YEAR {
            return Err(DraftError::YearTooEarly);
        }
        if year > chrono::Utc::now().year() {
            return Err(DraftError::YearInFuture);
        }

        let format = format.parse()?;

        let actors: Vec<String> = actors_csv
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect();
        if actors.is_empty() {
            return Err(DraftError::NoActors);
        }

        Ok(Self {
            title: title.to_string(),
            year,
            format,
            actors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_actors_are_split_and_trimmed() {
        let draft = MovieDraft::from_form("  Heat ", "1995", "blu-ray", " Al Pacino,, Robert De Niro ,").unwrap();
        assert_eq!(draft.title, "Heat");
        assert_eq!(draft.format, Format::BluRay);
        assert_eq!(draft.actors, vec!["Al Pacino", "Robert De Niro"]);
    }

    #[test]
    fn form_rejections_in_field_order() {
        assert_eq!(MovieDraft::from_form("H", "abc", "8mm", ""), Err(DraftError::TitleTooShort));
        assert_eq!(MovieDraft::from_form("Heat", "abc", "DVD", "A"), Err(DraftError::YearNotNumeric));
        assert_eq!(MovieDraft::from_form("Heat", "1800", "DVD", "A"), Err(DraftError::YearTooEarly));
        assert_eq!(MovieDraft::from_form("Heat", "9999", "DVD", "A"), Err(DraftError::YearInFuture));
        assert_eq!(
            MovieDraft::from_form("Heat", "1995", "8mm", "A"),
            Err(DraftError::UnknownFormat("8mm".to_string()))
        );
        assert_eq!(MovieDraft::from_form("Heat", "1995", "DVD", " , "), Err(DraftError::NoActors));
    }

    #[test]
    fn movie_id_parses_trimmed_integers() {
        assert_eq!(" 42 ".parse::<MovieId>(), Ok(MovieId(42)));
        assert!("forty-two".parse::<MovieId>().is_err());
    }
}
