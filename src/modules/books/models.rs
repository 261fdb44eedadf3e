use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize, Serializer};

/// A persisted book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    /// Store-assigned identifier, rendered as 24 hex digits
    #[serde(serialize_with = "serialize_object_id")]
    pub id: ObjectId,
    pub title: String,
    pub author: String,
    pub year: i64,
    pub genre: String,
}

impl Book {
    pub fn from_draft(id: ObjectId, draft: BookDraft) -> Self {
        Self {
            id,
            title: draft.title,
            author: draft.author,
            year: draft.year,
            genre: draft.genre,
        }
    }
}

/// Field values that passed validation, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub year: i64,
    pub genre: String,
}

/// Request body accepted by create and update.
///
/// Fields stay loosely typed so validation can report the first offending
/// field by name instead of failing on the whole document.
#[derive(Debug, Default, Deserialize)]
pub struct BookPayload {
    #[serde(default, alias = "titulo")]
    pub title: Option<serde_json::Value>,
    #[serde(default, alias = "autor")]
    pub author: Option<serde_json::Value>,
    #[serde(default, alias = "ano")]
    pub year: Option<serde_json::Value>,
    #[serde(default, alias = "genero")]
    pub genre: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub message: &'static str,
    pub data: Book,
}

#[derive(Debug, Serialize)]
pub struct BookListResponse {
    pub message: &'static str,
    pub total: usize,
    pub data: Vec<Book>,
}

#[derive(Debug, Serialize)]
pub struct BookCreatedResponse {
    pub message: &'static str,
    #[serde(serialize_with = "serialize_object_id")]
    pub id: ObjectId,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

fn serialize_object_id<S: Serializer>(id: &ObjectId, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&id.to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn book_serializes_id_as_hex() {
        let id = ObjectId::parse_str("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
        let book = Book {
            id,
            title: "Dom Casmurro".to_string(),
            author: "Machado de Assis".to_string(),
            year: 1899,
            genre: "Romance".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&book).unwrap(),
            json!({
                "id": "65a1f0c2e4b0a1b2c3d4e5f6",
                "title": "Dom Casmurro",
                "author": "Machado de Assis",
                "year": 1899,
                "genre": "Romance"
            })
        );
    }

    #[test]
    fn payload_accepts_legacy_field_names() {
        let payload: BookPayload = serde_json::from_value(json!({
            "titulo": "X",
            "autor": "Y",
            "ano": "2020",
            "genero": "Z"
        }))
        .unwrap();

        assert_eq!(payload.title, Some(json!("X")));
        assert_eq!(payload.author, Some(json!("Y")));
        assert_eq!(payload.year, Some(json!("2020")));
        assert_eq!(payload.genre, Some(json!("Z")));
    }

    #[test]
    fn payload_treats_null_as_absent() {
        let payload: BookPayload = serde_json::from_value(json!({ "title": null })).unwrap();
        assert!(payload.title.is_none());
        assert!(payload.year.is_none());
    }
}
