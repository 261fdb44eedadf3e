//! MongoDB-backed [`BookRepository`].

use anyhow::Context;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::ReturnDocument,
    Collection, Database,
};
use serde::{Deserialize, Serialize};

use super::models::{Book, BookDraft};
use super::repository::BookRepository;

pub const COLLECTION: &str = "books";

/// Stored shape of a book.
#[derive(Debug, Serialize, Deserialize)]
struct BookDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    author: String,
    year: i64,
    genre: String,
}

impl BookDocument {
    fn into_book(self) -> Book {
        Book {
            id: self.id,
            title: self.title,
            author: self.author,
            year: self.year,
            genre: self.genre,
        }
    }
}

#[derive(Clone)]
pub struct MongoBookRepository {
    database: Database,
    collection: Collection<BookDocument>,
}

impl MongoBookRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            database: database.clone(),
            collection: database.collection(COLLECTION),
        }
    }
}

/// `$jsonSchema` validator enforcing the book invariants inside MongoDB.
pub fn schema_validator() -> Document {
    doc! {
        "$jsonSchema": {
            "bsonType": "object",
            "required": ["title", "author", "year", "genre"],
            "properties": {
                "title": { "bsonType": "string", "minLength": 1 },
                "author": { "bsonType": "string", "minLength": 1 },
                "year": { "bsonType": ["int", "long"] },
                "genre": { "bsonType": "string", "minLength": 1 },
            }
        }
    }
}

#[async_trait]
impl BookRepository for MongoBookRepository {
    async fn ensure_schema(&self) -> anyhow::Result<()> {
        let existing = self
            .database
            .list_collection_names()
            .await
            .context("failed to list collections")?;

        if existing.iter().any(|name| name == COLLECTION) {
            tracing::debug!(collection = COLLECTION, "book collection already present");
            return Ok(());
        }

        self.database
            .create_collection(COLLECTION)
            .validator(schema_validator())
            .await
            .with_context(|| format!("failed to create collection '{COLLECTION}'"))?;

        tracing::info!(collection = COLLECTION, "book collection created with schema validator");
        Ok(())
    }

    async fn find_by_id(&self, id: ObjectId) -> anyhow::Result<Option<Book>> {
        let document = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(document.map(BookDocument::into_book))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Book>> {
        let documents: Vec<BookDocument> = self.collection.find(doc! {}).await?.try_collect().await?;
        Ok(documents.into_iter().map(BookDocument::into_book).collect())
    }

    async fn create(&self, draft: BookDraft) -> anyhow::Result<ObjectId> {
        let id = ObjectId::new();
        let document = BookDocument {
            id,
            title: draft.title,
            author: draft.author,
            year: draft.year,
            genre: draft.genre,
        };
        self.collection.insert_one(document).await?;
        Ok(id)
    }

    async fn delete(&self, id: ObjectId) -> anyhow::Result<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn replace(&self, id: ObjectId, draft: BookDraft) -> anyhow::Result<Option<Book>> {
        let update = doc! {
            "$set": {
                "title": draft.title,
                "author": draft.author,
                "year": draft.year,
                "genre": draft.genre,
            }
        };

        let document = self
            .collection
            .find_one_and_update(doc! { "_id": id }, update)
            .return_document(ReturnDocument::After)
            .await?;

        Ok(document.map(BookDocument::into_book))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validator_requires_every_field() {
        let validator = schema_validator();
        let schema = validator.get_document("$jsonSchema").unwrap();
        let required: Vec<&str> = schema
            .get_array("required")
            .unwrap()
            .iter()
            .filter_map(|value| value.as_str())
            .collect();

        assert_eq!(required, ["title", "author", "year", "genre"]);
    }

    #[test]
    fn stored_document_maps_to_book() {
        let id = ObjectId::new();
        let book = BookDocument {
            id,
            title: "Vidas Secas".to_string(),
            author: "Graciliano Ramos".to_string(),
            year: 1938,
            genre: "Romance".to_string(),
        }
        .into_book();

        assert_eq!(book.id, id);
        assert_eq!(book.year, 1938);
    }
}
