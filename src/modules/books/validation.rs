//! Request validation for the book endpoints.
//!
//! Every check runs before the store is touched. The first failing check
//! wins, in the order title, author, year, genre.

use std::fmt;

use axum::extract::rejection::JsonRejection;
use bookshelf_http::error::AppError;
use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use thiserror::Error;

use super::models::{BookDraft, BookPayload};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Author,
    Year,
    Genre,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Title => "title",
            Field::Author => "author",
            Field::Year => "year",
            Field::Genre => "genre",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookValidationError {
    #[error("book id was not provided")]
    MissingId,

    #[error("book id is invalid")]
    InvalidId,

    #[error("{0} must be provided")]
    MissingField(Field),

    #[error("year must be a valid number")]
    InvalidYear,

    #[error("request body is invalid: {0}")]
    InvalidBody(String),
}

impl From<BookValidationError> for AppError {
    fn from(err: BookValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<JsonRejection> for BookValidationError {
    fn from(rejection: JsonRejection) -> Self {
        BookValidationError::InvalidBody(rejection.body_text())
    }
}

/// How strictly text fields are checked for presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    /// Not null and not the empty string
    NonEmpty,
    /// Additionally not whitespace-only
    NonBlank,
}

impl Presence {
    fn accepts(self, text: &str) -> bool {
        match self {
            Presence::NonEmpty => !text.is_empty(),
            Presence::NonBlank => !text.trim().is_empty(),
        }
    }
}

/// Parse a path identifier into an ObjectId.
pub fn parse_id(raw: &str) -> Result<ObjectId, BookValidationError> {
    if raw.trim().is_empty() {
        return Err(BookValidationError::MissingId);
    }
    ObjectId::parse_str(raw).map_err(|_| BookValidationError::InvalidId)
}

/// Validate a create body.
pub fn validate_create(payload: &BookPayload) -> Result<BookDraft, BookValidationError> {
    validate(payload, Presence::NonEmpty)
}

/// Validate an update body; blank text counts as missing.
pub fn validate_update(payload: &BookPayload) -> Result<BookDraft, BookValidationError> {
    validate(payload, Presence::NonBlank)
}

fn validate(payload: &BookPayload, presence: Presence) -> Result<BookDraft, BookValidationError> {
    let title = require_text(payload.title.as_ref(), Field::Title, presence)?;
    let author = require_text(payload.author.as_ref(), Field::Author, presence)?;
    let year = require_year(payload.year.as_ref(), presence)?;
    let genre = require_text(payload.genre.as_ref(), Field::Genre, presence)?;

    Ok(BookDraft {
        title,
        author,
        year,
        genre,
    })
}

fn require_text(
    value: Option<&Value>,
    field: Field,
    presence: Presence,
) -> Result<String, BookValidationError> {
    match value {
        Some(Value::String(text)) if presence.accepts(text) => Ok(text.clone()),
        _ => Err(BookValidationError::MissingField(field)),
    }
}

fn require_year(value: Option<&Value>, presence: Presence) -> Result<i64, BookValidationError> {
    match value {
        None => Err(BookValidationError::MissingField(Field::Year)),
        Some(Value::String(text)) if !presence.accepts(text) => {
            Err(BookValidationError::MissingField(Field::Year))
        }
        Some(value) => parse_year(value),
    }
}

/// Coerce a year given as a JSON number or numeric string into an integer.
///
/// Floats are accepted only without a fractional part; strings must parse
/// completely after trimming.
pub fn parse_year(value: &Value) -> Result<i64, BookValidationError> {
    match value {
        Value::Number(number) => {
            if let Some(year) = number.as_i64() {
                return Ok(year);
            }
            match number.as_f64() {
                Some(year) if year.fract() == 0.0 && year.abs() < i64::MAX as f64 => {
                    Ok(year as i64)
                }
                _ => Err(BookValidationError::InvalidYear),
            }
        }
        Value::String(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| BookValidationError::InvalidYear),
        _ => Err(BookValidationError::InvalidYear),
    }
}
