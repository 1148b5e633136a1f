pub mod media_store;

pub use media_store::{LocalMediaStore, MediaKind, MediaStore, MEDIA_ROUTE};
