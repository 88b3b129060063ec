pub mod cancel;
pub mod catalog;
pub mod document;
pub mod error;
pub mod filter;
pub mod models;

mod memory;
pub use memory::MemoryStore;

pub use catalog::{Catalog, Collections, DocumentStore, Lessons};
pub use document::{Document, DocumentList};
pub use error::FetchError;
pub use filter::{ResourceFilter, ALL_CATEGORY};
pub use models::{Course, Project, Resource, ResourceCategory};
