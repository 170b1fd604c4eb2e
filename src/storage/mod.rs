pub mod mongo;

pub use mongo::{is_duplicate_key, DeleteAck, InsertAck, MongoStore, UpdateAck};
