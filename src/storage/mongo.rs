use anyhow::{Context, Result};
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Bson, Document};
use mongodb::error::{Error, ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};
use mongodb::{Client, Collection, Database, IndexModel};
use serde::Serialize;
use tracing::info;

const USERS: &str = "users";
const SUPPLIES: &str = "supplies";
const DONORS: &str = "donors";
const VOLUNTEERS: &str = "volunteers";
const REVIEWS: &str = "reviews";
const GRATITUDES: &str = "gratitudes";

/// Insert acknowledgment returned to clients.
#[derive(Debug, Serialize)]
pub struct InsertAck {
    pub acknowledged: bool,
    pub inserted_id: Bson,
}

impl From<InsertOneResult> for InsertAck {
    fn from(result: InsertOneResult) -> Self {
        Self {
            acknowledged: true,
            inserted_id: result.inserted_id,
        }
    }
}

/// Update acknowledgment returned to clients.
#[derive(Debug, Serialize)]
pub struct UpdateAck {
    pub matched_count: u64,
    pub modified_count: u64,
}

impl From<UpdateResult> for UpdateAck {
    fn from(result: UpdateResult) -> Self {
        Self {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        }
    }
}

/// Delete acknowledgment returned to clients.
#[derive(Debug, Serialize)]
pub struct DeleteAck {
    pub deleted_count: u64,
}

impl From<DeleteResult> for DeleteAck {
    fn from(result: DeleteResult) -> Self {
        Self {
            deleted_count: result.deleted_count,
        }
    }
}

/// True when a write failed because it violated a unique index.
pub fn is_duplicate_key(err: &Error) -> bool {
    matches!(
        &*err.kind,
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == 11000
    )
}

/// Process-wide document store.
///
/// Owns the single `Database` handle acquired at startup; handlers borrow it
/// through `Arc<MongoStore>` and issue independent operations with no
/// client-side coordination. The driver pools connections internally.
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Connect to MongoDB and verify the server is reachable.
    pub async fn connect(uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .context("failed to parse MongoDB connection string")?;
        let db = client.database(database);

        db.run_command(doc! { "ping": 1 })
            .await
            .context("failed to reach MongoDB server")?;
        info!(database, "Connected to MongoDB");

        Ok(Self { db })
    }

    /// Create the indexes the API relies on.
    ///
    /// The unique index on `users.email` is what makes registration safe
    /// under concurrency: two racing registrations for the same email resolve
    /// to one insert and one duplicate-key error, never two documents.
    pub async fn ensure_indexes(&self) -> Result<()> {
        let options = IndexOptions::builder().unique(true).build();
        let model = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(options)
            .build();

        self.users()
            .create_index(model)
            .await
            .context("failed to create unique email index on users")?;
        Ok(())
    }

    fn users(&self) -> Collection<Document> {
        self.db.collection(USERS)
    }

    fn supplies(&self) -> Collection<Document> {
        self.db.collection(SUPPLIES)
    }

    fn donors(&self) -> Collection<Document> {
        self.db.collection(DONORS)
    }

    fn volunteers(&self) -> Collection<Document> {
        self.db.collection(VOLUNTEERS)
    }

    fn reviews(&self) -> Collection<Document> {
        self.db.collection(REVIEWS)
    }

    fn gratitudes(&self) -> Collection<Document> {
        self.db.collection(GRATITUDES)
    }

    // --- users ---

    pub async fn insert_user(&self, user: Document) -> Result<InsertAck, Error> {
        self.users().insert_one(user).await.map(InsertAck::from)
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<Document>, Error> {
        self.users().find_one(doc! { "email": email }).await
    }

    /// All users, with the password hash projected out.
    pub async fn list_users(&self) -> Result<Vec<Document>, Error> {
        self.users()
            .find(doc! {})
            .projection(doc! { "password": 0 })
            .await?
            .try_collect()
            .await
    }

    // --- supplies ---

    pub async fn list_supplies(&self) -> Result<Vec<Document>, Error> {
        self.supplies().find(doc! {}).await?.try_collect().await
    }

    pub async fn insert_supply(&self, supply: Document) -> Result<InsertAck, Error> {
        self.supplies()
            .insert_one(supply)
            .await
            .map(InsertAck::from)
    }

    /// Replace the given fields on the matching supply. A filter that matches
    /// nothing is not an error; the ack carries `matched_count: 0`.
    pub async fn update_supply(&self, id: ObjectId, fields: Document) -> Result<UpdateAck, Error> {
        self.supplies()
            .update_one(doc! { "_id": id }, doc! { "$set": fields })
            .await
            .map(UpdateAck::from)
    }

    pub async fn delete_supply(&self, id: ObjectId) -> Result<DeleteAck, Error> {
        self.supplies()
            .delete_one(doc! { "_id": id })
            .await
            .map(DeleteAck::from)
    }

    // --- donors ---

    pub async fn insert_donor(&self, donor: Document) -> Result<InsertAck, Error> {
        self.donors().insert_one(donor).await.map(InsertAck::from)
    }

    /// Donors ordered by contribution amount, largest first.
    pub async fn list_donors(&self) -> Result<Vec<Document>, Error> {
        self.donors()
            .find(doc! {})
            .sort(donor_sort())
            .await?
            .try_collect()
            .await
    }

    // --- volunteers ---

    pub async fn insert_volunteer(&self, volunteer: Document) -> Result<InsertAck, Error> {
        self.volunteers()
            .insert_one(volunteer)
            .await
            .map(InsertAck::from)
    }

    pub async fn list_volunteers(&self) -> Result<Vec<Document>, Error> {
        self.volunteers().find(doc! {}).await?.try_collect().await
    }

    // --- reviews ---

    pub async fn insert_review(&self, review: Document) -> Result<InsertAck, Error> {
        self.reviews().insert_one(review).await.map(InsertAck::from)
    }

    pub async fn list_reviews(&self) -> Result<Vec<Document>, Error> {
        self.reviews().find(doc! {}).await?.try_collect().await
    }

    // --- gratitudes ---

    pub async fn insert_gratitude(&self, gratitude: Document) -> Result<InsertAck, Error> {
        self.gratitudes()
            .insert_one(gratitude)
            .await
            .map(InsertAck::from)
    }

    /// Gratitude messages, newest first. Clients have historically written
    /// the timestamp under either `createdAt` or `createTime`, so the sort
    /// covers both keys.
    pub async fn list_gratitudes(&self) -> Result<Vec<Document>, Error> {
        self.gratitudes()
            .find(doc! {})
            .sort(gratitude_sort())
            .await?
            .try_collect()
            .await
    }
}

/// Sort specification for the donor listing: amount descending.
fn donor_sort() -> Document {
    doc! { "amount": -1 }
}

/// Sort specification for the gratitude listing: creation time descending,
/// covering both timestamp keys clients have written.
fn gratitude_sort() -> Document {
    doc! { "createdAt": -1, "createTime": -1 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_detection_ignores_unrelated_errors() {
        let err = Error::custom("connection reset".to_string());
        assert!(!is_duplicate_key(&err));
    }

    #[test]
    fn donors_sort_by_amount_descending() {
        assert_eq!(donor_sort(), doc! { "amount": -1 });
    }

    #[test]
    fn gratitudes_sort_by_creation_time_descending() {
        let sort = gratitude_sort();
        // Key order matters to the server: createdAt is the primary key,
        // createTime the fallback, both descending.
        let keys: Vec<String> = sort.iter().map(|(key, _)| key.clone()).collect();
        assert_eq!(keys, ["createdAt", "createTime"]);
        assert_eq!(sort.get_i32("createdAt").unwrap(), -1);
        assert_eq!(sort.get_i32("createTime").unwrap(), -1);
    }

    #[test]
    fn insert_ack_serializes_inserted_id() {
        let ack = InsertAck {
            acknowledged: true,
            inserted_id: Bson::ObjectId(ObjectId::new()),
        };
        let value = serde_json::to_value(&ack).unwrap();
        assert_eq!(value["acknowledged"], true);
        assert!(value["inserted_id"]["$oid"].is_string());
    }
}
