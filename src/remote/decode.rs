//! Typed decode step for remote payloads.
//!
//! The movies API is loose about shapes: payloads may or may not sit inside a
//! `{"data": ...}` envelope, tokens arrive bare or wrapped, actors come as
//! strings or as `{"name": ...}` objects. Every coercion the client performs
//! lives here so the reducers only ever see typed values.
//!
//! Malformed shapes never become errors. A listing that is not an array decodes
//! to an empty listing; a record that does not decode is dropped. Both are
//! logged at `warn`.

use crate::domain::{Actor, ApiFailure, ErrorCode, ErrorValue, Format, Movie, MovieId};
use crate::remote::service::{Operation, RemoteFailure};
use serde_json::Value;

/// JavaScript-style truthiness, which is what the API's consumers have always
/// applied to its payloads.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Returns the `data` member when present and truthy, else the payload itself.
#[must_use]
pub fn unwrap_envelope(payload: Value) -> Value {
    match payload {
        Value::Object(mut map) if map.get("data").is_some_and(is_truthy) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Extracts the session token from a `createSession` payload.
///
/// Takes the `token` member when truthy, otherwise the payload itself; if the
/// result is not a string the token is `""`.
#[must_use]
pub fn decode_token(payload: &Value) -> String {
    let candidate = payload
        .get("token")
        .filter(|token| is_truthy(token))
        .unwrap_or(payload);

    if let Some(token) = candidate.as_str() {
        return token.to_string();
    }

    tracing::warn!(
        payload_kind = value_kind(payload),
        "session response carried no string token, storing empty token"
    );
    String::new()
}

/// True when a record carries truthy `id`, `title`, `year` and `format`.
///
/// This is the acceptance filter for created movies: a partial response is
/// dropped rather than appended.
#[must_use]
pub fn is_complete_record(value: &Value) -> bool {
    ["id", "title", "year", "format"]
        .iter()
        .all(|key| value.get(key).is_some_and(is_truthy))
}

/// Decodes one movie record, tolerating both actor shapes.
#[must_use]
pub fn decode_movie(value: &Value) -> Option<Movie> {
    let record = value.as_object()?;

    let id = match record.get("id")? {
        Value::Number(n) => MovieId(n.as_i64()?),
        Value::String(s) => s.parse().ok()?,
        _ => return None,
    };

    let title = record.get("title")?.as_str()?.to_string();

    let year = match record.get("year")? {
        Value::Number(n) => i32::try_from(n.as_i64()?).ok()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };

    let format: Format = record.get("format")?.as_str()?.parse().ok()?;

    let actors = record
        .get("actors")
        .and_then(Value::as_array)
        .map(|actors| actors.iter().filter_map(decode_actor).collect())
        .unwrap_or_default();

    Some(Movie {
        id,
        title,
        year,
        format,
        actors,
    })
}

fn decode_actor(value: &Value) -> Option<Actor> {
    match value {
        Value::String(name) => Some(Actor::new(name.as_str())),
        Value::Object(map) => map.get("name").and_then(Value::as_str).map(Actor::new),
        _ => None,
    }
}

/// Decodes a listing payload (already unwrapped).
///
/// A non-array payload yields an empty listing. Elements that do not decode
/// are dropped.
#[must_use]
pub fn decode_listing(payload: &Value) -> Vec<Movie> {
    let Some(items) = payload.as_array() else {
        tracing::warn!(payload_kind = value_kind(payload), "listing payload is not an array, using empty listing");
        return Vec::new();
    };

    let movies: Vec<Movie> = items.iter().filter_map(decode_movie).collect();

    let dropped = items.len() - movies.len();
    if dropped > 0 {
        tracing::warn!(dropped = dropped, kept = movies.len(), "dropped undecodable movie records");
    }

    movies
}

/// Converts a remote failure into the value stored in a store's `error` field.
///
/// - an `error` object with a `code` becomes [`ErrorValue::Structured`]
/// - an `error` object with only a `message`, or an `error` string, becomes
///   [`ErrorValue::Message`]
/// - anything else, including no response at all, becomes the operation's
///   fallback message
#[must_use]
pub fn failure_to_error(failure: RemoteFailure, operation: Operation) -> ErrorValue {
    let fallback = || ErrorValue::message(operation.fallback_message());

    let RemoteFailure::Rejected { body, .. } = failure else {
        return fallback();
    };

    match body.get("error") {
        Some(Value::Object(error)) => {
            if let Some(code) = error.get("code").and_then(Value::as_str) {
                return ErrorValue::Structured(ApiFailure {
                    code: ErrorCode::parse(code),
                    message: error.get("message").and_then(Value::as_str).map(String::from),
                    fields: error.get("fields").cloned(),
                });
            }
            error
                .get("message")
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
                .map_or_else(fallback, ErrorValue::message)
        }
        Some(Value::String(message)) if !message.is_empty() => ErrorValue::message(message.as_str()),
        _ => fallback(),
    }
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_is_unwrapped_only_when_data_is_truthy() {
        assert_eq!(unwrap_envelope(json!({"data": [1, 2]})), json!([1, 2]));
        assert_eq!(unwrap_envelope(json!({"data": []})), json!([]));
        assert_eq!(unwrap_envelope(json!({"data": null, "meta": 1})), json!({"data": null, "meta": 1}));
        assert_eq!(unwrap_envelope(json!([{"id": 1}])), json!([{"id": 1}]));
    }

    #[test]
    fn token_is_taken_from_member_or_payload() {
        assert_eq!(decode_token(&json!({"token": "T1", "status": 1})), "T1");
        assert_eq!(decode_token(&json!("T2")), "T2");
        assert_eq!(decode_token(&json!({"status": 1})), "");
        assert_eq!(decode_token(&json!({"token": 42})), "");
    }

    #[test]
    fn movie_accepts_both_actor_shapes() {
        let plain = decode_movie(&json!({
            "id": 1, "title": "Alpha", "year": 1990, "format": "VHS", "actors": ["A", "B"]
        }))
        .unwrap();
        let nested = decode_movie(&json!({
            "id": "1", "title": "Alpha", "year": 1990, "format": "VHS",
            "actors": [{"id": 7, "name": "A"}, {"name": "B"}]
        }))
        .unwrap();

        assert_eq!(plain, nested);
        assert_eq!(plain.actor_names().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn movie_without_actors_decodes_with_empty_list() {
        let movie = decode_movie(&json!({"id": 2, "title": "Beta", "year": 2000, "format": "Blu-ray"})).unwrap();
        assert_eq!(movie.format, Format::BluRay);
        assert!(movie.actors.is_empty());
    }

    #[test]
    fn listing_drops_undecodable_records() {
        let movies = decode_listing(&json!([
            {"id": 1, "title": "Alpha", "year": 1990, "format": "VHS"},
            {"id": 2, "title": "Broken"},
            "garbage"
        ]));
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "Alpha");
    }

    #[test]
    fn non_array_listing_is_empty() {
        assert!(decode_listing(&json!({"total": 3})).is_empty());
        assert!(decode_listing(&Value::Null).is_empty());
    }

    #[test]
    fn complete_record_requires_truthy_fields() {
        assert!(is_complete_record(&json!({"id": 2, "title": "Beta", "year": 2000, "format": "DVD"})));
        assert!(!is_complete_record(&json!({"id": 2, "title": "Beta", "format": "DVD"})));
        assert!(!is_complete_record(&json!({"id": 2, "title": "", "year": 2000, "format": "DVD"})));
        assert!(!is_complete_record(&json!({"id": 0, "title": "Beta", "year": 2000, "format": "DVD"})));
    }

    #[test]
    fn failure_with_code_is_structured() {
        let failure = RemoteFailure::Rejected {
            status: Some(400),
            body: json!({"status": 0, "error": {"code": "FILE_INVALID", "fields": {"movies": "INVALID"}}}),
        };
        let error = failure_to_error(failure, Operation::ImportMovies);
        assert_eq!(error.code(), Some(&ErrorCode::FileInvalid));
    }

    #[test]
    fn failure_without_payload_uses_operation_fallback() {
        let error = failure_to_error(RemoteFailure::Transport("refused".into()), Operation::FetchMovies);
        assert_eq!(error, ErrorValue::message("Failed to fetch movies"));

        let error = failure_to_error(
            RemoteFailure::Rejected { status: Some(500), body: json!("Internal Server Error") },
            Operation::AddMovie,
        );
        assert_eq!(error, ErrorValue::message("Failed to add movie"));
    }

    #[test]
    fn failure_with_string_error_is_a_message() {
        let error = failure_to_error(
            RemoteFailure::Rejected { status: Some(401), body: json!({"error": "token expired"}) },
            Operation::DeleteMovie,
        );
        assert_eq!(error, ErrorValue::message("token expired"));
    }
}
