pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod store;
pub mod validation;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use axum::Router;
use bookshelf_kernel::{InitCtx, Module};

use repository::BookRepository;

/// Book catalogue module: CRUD over `/book`.
pub struct BooksModule {
    repository: Arc<dyn BookRepository>,
}

impl BooksModule {
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        self.repository
            .ensure_schema()
            .await
            .context("failed to prepare book collection")?;

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(Arc::clone(&self.repository))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(repository: Arc<dyn BookRepository>) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(repository))
}

fn json_response(description: &str, schema: &str) -> serde_json::Value {
    serde_json::json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": format!("#/components/schemas/{schema}") }
            }
        }
    })
}

fn openapi_fragment() -> serde_json::Value {
    let id_param = serde_json::json!([{
        "name": "id",
        "in": "path",
        "required": true,
        "description": "24-character hexadecimal book id",
        "schema": { "type": "string", "pattern": "^[0-9a-fA-F]{24}$" }
    }]);
    let book_body = serde_json::json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/BookInput" }
            }
        }
    });
    let invalid = json_response("Invalid id or body", "ErrorResponse");
    let missing = json_response("Book not found", "ErrorResponse");
    let failed = json_response("Persistence failure", "ErrorResponse");

    serde_json::json!({
        "paths": {
            "/book": {
                "get": {
                    "summary": "List books",
                    "tags": ["Books"],
                    "responses": {
                        "200": json_response("Every stored book", "BookList"),
                        "500": failed
                    }
                },
                "post": {
                    "summary": "Create a book",
                    "tags": ["Books"],
                    "requestBody": book_body,
                    "responses": {
                        "201": json_response("Book created", "BookCreated"),
                        "400": invalid,
                        "500": failed
                    }
                }
            },
            "/book/{id}": {
                "get": {
                    "summary": "Fetch a book",
                    "tags": ["Books"],
                    "parameters": id_param,
                    "responses": {
                        "200": json_response("Book found", "BookEnvelope"),
                        "400": invalid,
                        "404": missing,
                        "500": failed
                    }
                },
                "put": {
                    "summary": "Replace a book",
                    "tags": ["Books"],
                    "parameters": id_param,
                    "requestBody": book_body,
                    "responses": {
                        "200": json_response("Book updated", "BookEnvelope"),
                        "400": invalid,
                        "404": missing,
                        "500": failed
                    }
                },
                "delete": {
                    "summary": "Delete a book",
                    "tags": ["Books"],
                    "parameters": id_param,
                    "responses": {
                        "200": json_response("Book deleted", "Message"),
                        "400": invalid,
                        "404": missing,
                        "500": failed
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" },
                        "title": { "type": "string" },
                        "author": { "type": "string" },
                        "year": { "type": "integer", "format": "int64" },
                        "genre": { "type": "string" }
                    },
                    "required": ["id", "title", "author", "year", "genre"]
                },
                "BookInput": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "author": { "type": "string" },
                        "year": {
                            "oneOf": [{ "type": "integer" }, { "type": "string" }],
                            "description": "Integer or numeric string"
                        },
                        "genre": { "type": "string" }
                    },
                    "required": ["title", "author", "year", "genre"]
                },
                "BookEnvelope": {
                    "type": "object",
                    "properties": {
                        "message": { "type": "string" },
                        "data": { "$ref": "#/components/schemas/Book" }
                    },
                    "required": ["message", "data"]
                },
                "BookList": {
                    "type": "object",
                    "properties": {
                        "message": { "type": "string" },
                        "total": { "type": "integer" },
                        "data": {
                            "type": "array",
                            "items": { "$ref": "#/components/schemas/Book" }
                        }
                    },
                    "required": ["message", "total", "data"]
                },
                "BookCreated": {
                    "type": "object",
                    "properties": {
                        "message": { "type": "string" },
                        "id": { "type": "string" }
                    },
                    "required": ["message", "id"]
                },
                "Message": {
                    "type": "object",
                    "properties": {
                        "message": { "type": "string" }
                    },
                    "required": ["message"]
                }
            }
        }
    })
}
