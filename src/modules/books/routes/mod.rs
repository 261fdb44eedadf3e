use axum::{routing::get, Router};

use super::handlers::{self, SharedRepository};

/// Book routes, bound to the repository they read and write through.
pub fn router(repository: SharedRepository) -> Router {
    Router::new()
        .route(
            "/book",
            get(handlers::find_all_books).post(handlers::create_book),
        )
        .route(
            "/book/{id}",
            get(handlers::find_book)
                .put(handlers::update_book)
                .delete(handlers::delete_book),
        )
        .with_state(repository)
}
