pub mod error;
pub mod memory_store;
pub mod notification;
pub mod repository;
pub mod store;
pub mod view;


pub use error::{DiaryError, Result};
pub use memory_store::MemoryDocumentStore;
pub use notification::{Notification, NotificationVariant};
pub use repository::DiaryRepository;
pub use store::{DiaryEntryChanges, DocumentStore, NewDiaryEntry};
pub use view::DiaryView;
