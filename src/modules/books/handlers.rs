//! Request handlers for `/book`.
//!
//! Each handler validates its input, makes one repository call and maps the
//! outcome to a status code. Store faults become 500 responses carrying the
//! fault text.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use bookshelf_http::error::AppError;

use super::models::{
    BookCreatedResponse, BookListResponse, BookPayload, BookResponse, MessageResponse,
};
use super::repository::BookRepository;
use super::validation::{self, BookValidationError};

/// Router state shared by the book handlers.
pub type SharedRepository = Arc<dyn BookRepository>;

type BookBody = Result<Json<BookPayload>, JsonRejection>;

/// `GET /book/{id}`
pub async fn find_book(
    State(books): State<SharedRepository>,
    Path(id): Path<String>,
) -> Result<Json<BookResponse>, AppError> {
    let id = validation::parse_id(&id)?;

    let book = books
        .find_by_id(id)
        .await
        .map_err(|err| AppError::internal("failed to fetch book", err))?
        .ok_or_else(|| AppError::not_found("book not found"))?;

    Ok(Json(BookResponse {
        message: "book found",
        data: book,
    }))
}

/// `GET /book`
pub async fn find_all_books(
    State(books): State<SharedRepository>,
) -> Result<Json<BookListResponse>, AppError> {
    let data = books
        .find_all()
        .await
        .map_err(|err| AppError::internal("failed to fetch books", err))?;

    Ok(Json(BookListResponse {
        message: "books found",
        total: data.len(),
        data,
    }))
}

/// `POST /book`
pub async fn create_book(
    State(books): State<SharedRepository>,
    body: BookBody,
) -> Result<(StatusCode, Json<BookCreatedResponse>), AppError> {
    let Json(payload) = body.map_err(BookValidationError::from)?;
    let draft = validation::validate_create(&payload)?;

    let id = books
        .create(draft)
        .await
        .map_err(|err| AppError::internal("failed to create book", err))?;

    tracing::info!(book_id = %id, "book created");

    Ok((
        StatusCode::CREATED,
        Json(BookCreatedResponse {
            message: "book created",
            id,
        }),
    ))
}

/// `DELETE /book/{id}`
pub async fn delete_book(
    State(books): State<SharedRepository>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = validation::parse_id(&id)?;

    let deleted = books
        .delete(id)
        .await
        .map_err(|err| AppError::internal("failed to delete book", err))?;

    if !deleted {
        return Err(AppError::not_found("book not found for deletion"));
    }

    tracing::info!(book_id = %id, "book deleted");

    Ok(Json(MessageResponse {
        message: "book deleted",
    }))
}

/// `PUT /book/{id}`
///
/// The identifier is checked before the body, so a malformed id wins over a
/// malformed payload.
pub async fn update_book(
    State(books): State<SharedRepository>,
    Path(id): Path<String>,
    body: BookBody,
) -> Result<Json<BookResponse>, AppError> {
    let id = validation::parse_id(&id)?;
    let Json(payload) = body.map_err(BookValidationError::from)?;
    let draft = validation::validate_update(&payload)?;

    let book = books
        .replace(id, draft)
        .await
        .map_err(|err| AppError::internal("failed to update book", err))?
        .ok_or_else(|| AppError::not_found("book not found for update"))?;

    tracing::info!(book_id = %id, "book updated");

    Ok(Json(BookResponse {
        message: "book updated",
        data: book,
    }))
}
