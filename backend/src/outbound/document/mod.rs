//! MongoDB-backed mirror of the relational `users` table.
//!
//! Each user is stored as `{id, name, email}` in the `users` collection and
//! addressed by the numeric `id` field, never by `_id`.

use async_trait::async_trait;
use bson::{Document, doc};
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use tracing::{debug, info};

use crate::domain::ports::{DocumentStoreError, UserDocumentStore};
use crate::domain::{User, UserId};

/// Collection holding one document per user.
pub const USERS_COLLECTION: &str = "users";

/// Document-store adapter over a single MongoDB collection.
#[derive(Clone)]
pub struct MongoUserDocumentStore {
    collection: Collection<Document>,
}

impl MongoUserDocumentStore {
    /// Connect to `uri`, select `database` and ping it.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Connection`] when the URI cannot be
    /// parsed or the server does not answer the ping.
    ///
    /// # Examples
    /// ```no_run
    /// # async fn demo() -> Result<(), userhub::domain::ports::DocumentStoreError> {
    /// use userhub::outbound::document::MongoUserDocumentStore;
    ///
    /// let store = MongoUserDocumentStore::connect("mongodb://localhost:27017", "user").await?;
    /// # let _ = store;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(uri: &str, database: &str) -> Result<Self, DocumentStoreError> {
        let options = ClientOptions::parse(uri)
            .await
            .map_err(|err| DocumentStoreError::connection(err.to_string()))?;
        let client = Client::with_options(options)
            .map_err(|err| DocumentStoreError::connection(err.to_string()))?;
        let db = client.database(database);
        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|err| DocumentStoreError::connection(err.to_string()))?;
        info!(database, collection = USERS_COLLECTION, "document store connected");

        Ok(Self {
            collection: db.collection::<Document>(USERS_COLLECTION),
        })
    }
}

fn user_document(user: &User) -> Document {
    doc! {
        "id": user.id().get(),
        "name": user.name(),
        "email": user.email(),
    }
}

fn id_filter(id: UserId) -> Document {
    doc! { "id": id.get() }
}

fn set_fields(user: &User) -> Document {
    doc! {
        "$set": {
            "name": user.name(),
            "email": user.email(),
        }
    }
}

fn map_mongo_error(error: MongoError) -> DocumentStoreError {
    debug!(%error, "document store call failed");
    classify(&error.kind, error.to_string())
}

fn classify(kind: &ErrorKind, message: String) -> DocumentStoreError {
    match kind {
        ErrorKind::Io(_) => DocumentStoreError::connection(message),
        _ => DocumentStoreError::operation(message),
    }
}

#[async_trait]
impl UserDocumentStore for MongoUserDocumentStore {
    async fn insert_one(&self, user: &User) -> Result<(), DocumentStoreError> {
        self.collection
            .insert_one(user_document(user))
            .await
            .map_err(map_mongo_error)?;
        Ok(())
    }

    async fn update_one(&self, user: &User) -> Result<u64, DocumentStoreError> {
        let result = self
            .collection
            .update_one(id_filter(user.id()), set_fields(user))
            .await
            .map_err(map_mongo_error)?;
        Ok(result.matched_count)
    }

    async fn delete_one(&self, id: UserId) -> Result<u64, DocumentStoreError> {
        let result = self
            .collection
            .delete_one(id_filter(id))
            .await
            .map_err(map_mongo_error)?;
        Ok(result.deleted_count)
    }
}
