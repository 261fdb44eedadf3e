//! Repository doubles for the book tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::anyhow;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use super::models::{Book, BookDraft};
use super::repository::BookRepository;

/// In-memory store counting every call made through it.
#[derive(Default)]
pub struct MemoryBookRepository {
    books: Mutex<BTreeMap<ObjectId, Book>>,
    calls: AtomicUsize,
}

impl MemoryBookRepository {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn find_by_id(&self, id: ObjectId) -> anyhow::Result<Option<Book>> {
        self.touch();
        Ok(self.books.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Book>> {
        self.touch();
        Ok(self.books.lock().unwrap().values().cloned().collect())
    }

    async fn create(&self, draft: BookDraft) -> anyhow::Result<ObjectId> {
        self.touch();
        let id = ObjectId::new();
        self.books
            .lock()
            .unwrap()
            .insert(id, Book::from_draft(id, draft));
        Ok(id)
    }

    async fn delete(&self, id: ObjectId) -> anyhow::Result<bool> {
        self.touch();
        Ok(self.books.lock().unwrap().remove(&id).is_some())
    }

    async fn replace(&self, id: ObjectId, draft: BookDraft) -> anyhow::Result<Option<Book>> {
        self.touch();
        let mut books = self.books.lock().unwrap();
        Ok(books.get_mut(&id).map(|book| {
            *book = Book::from_draft(id, draft);
            book.clone()
        }))
    }
}

/// Store whose every call fails, as a lost connection would.
pub struct FailingBookRepository;

fn connection_lost() -> anyhow::Error {
    anyhow!("connection refused")
}

#[async_trait]
impl BookRepository for FailingBookRepository {
    async fn ensure_schema(&self) -> anyhow::Result<()> {
        Err(connection_lost())
    }

    async fn find_by_id(&self, _id: ObjectId) -> anyhow::Result<Option<Book>> {
        Err(connection_lost())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Book>> {
        Err(connection_lost())
    }

    async fn create(&self, _draft: BookDraft) -> anyhow::Result<ObjectId> {
        Err(connection_lost())
    }

    async fn delete(&self, _id: ObjectId) -> anyhow::Result<bool> {
        Err(connection_lost())
    }

    async fn replace(&self, _id: ObjectId, _draft: BookDraft) -> anyhow::Result<Option<Book>> {
        Err(connection_lost())
    }
}
