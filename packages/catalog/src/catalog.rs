//! # Catalog: typed data access over an abstract document store
//!
//! [`Catalog`] is the only path screens use to read courses, categories,
//! projects and resources. It owns no state besides the injected
//! [`DocumentStore`] and the configured [`Collections`], so two calls with no
//! change on the backend return the same ordered result.
//!
//! ## [`DocumentStore`] trait
//!
//! Two async operations, `list_documents` and `get_document`, each a single
//! call against the hosted database. Implementations: the in-memory
//! [`crate::MemoryStore`] used by tests and the HTTP adapter in the `api` crate.
//!
//! ## Read path
//!
//! | Method | Returns |
//! |--------|---------|
//! | [`list_by_collection`](Catalog::list_by_collection) | Raw documents of one collection, one backend page, backend order. |
//! | [`get_by_id`](Catalog::get_by_id) | One raw document. |
//! | [`list_courses`](Catalog::list_courses) / [`list_projects`](Catalog::list_projects) / [`list_resources`](Catalog::list_resources) | Typed entities; undecodable documents are skipped with a warning. |
//! | [`list_categories`](Catalog::list_categories) | `"All"` plus distinct category names. |
//! | [`get_course`](Catalog::get_course) / [`get_project`](Catalog::get_project) | One typed entity or [`FetchError::NotFound`]. |
//! | [`load_lessons`](Catalog::load_lessons) | Categories and courses fetched concurrently. |
//!
//! ## Degrade-to-default
//!
//! The `*_or_empty` and [`categories_or_all`](Catalog::categories_or_all)
//! variants log the failure and hand back an empty list (`["All"]` for
//! categories). They never fail.

use std::future::Future;

use serde::de::DeserializeOwned;

use crate::document::{Document, DocumentList};
use crate::error::FetchError;
use crate::filter::{category_name, derive_categories, ALL_CATEGORY};
use crate::models::{Course, Project, Resource};

/// Async access to a hosted document database.
pub trait DocumentStore {
    /// The backend's default page of `collection_id`, in backend order.
    fn list_documents(
        &self,
        collection_id: &str,
    ) -> impl Future<Output = Result<DocumentList, FetchError>>;
    fn get_document(
        &self,
        collection_id: &str,
        document_id: &str,
    ) -> impl Future<Output = Result<Document, FetchError>>;
}

/// Collection ids per document type. An empty id means "not configured".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Collections {
    pub categories: String,
    pub courses: String,
    pub projects: String,
    pub resources: String,
}

/// Outcome of the concurrent categories + courses fetch on the courses screen.
///
/// Each half is kept independently: a failed category fetch still leaves the
/// courses usable and vice versa.
#[derive(Clone, Debug, PartialEq)]
pub struct Lessons {
    pub categories: Vec<String>,
    pub courses: Result<Vec<Course>, FetchError>,
}

/// Typed read access to the course catalog.
#[derive(Clone, Debug)]
pub struct Catalog<S: DocumentStore> {
    store: S,
    collections: Collections,
}

impl<S: DocumentStore> Catalog<S> {
    pub fn new(store: S, collections: Collections) -> Self {
        Self { store, collections }
    }

    pub fn collections(&self) -> &Collections {
        &self.collections
    }

    /// All documents of one collection as returned by the backend.
    pub async fn list_by_collection(&self, collection_id: &str) -> Result<Vec<Document>, FetchError> {
        if collection_id.is_empty() {
            return Err(FetchError::not_found(collection_id, None));
        }
        let page = self.store.list_documents(collection_id).await?;
        if page.is_truncated() {
            tracing::warn!(
                collection = collection_id,
                total = page.total,
                returned = page.documents.len(),
                "collection exceeds the default page; only the first page is shown"
            );
        }
        tracing::debug!(collection = collection_id, count = page.documents.len(), "listed documents");
        Ok(page.documents)
    }

    /// One document by id.
    pub async fn get_by_id(&self, collection_id: &str, document_id: &str) -> Result<Document, FetchError> {
        if collection_id.is_empty() || document_id.is_empty() {
            return Err(FetchError::not_found(collection_id, Some(document_id)));
        }
        self.store.get_document(collection_id, document_id).await
    }

    pub async fn list_courses(&self) -> Result<Vec<Course>, FetchError> {
        self.list_typed(&self.collections.courses).await
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, FetchError> {
        self.list_typed(&self.collections.projects).await
    }

    pub async fn list_resources(&self) -> Result<Vec<Resource>, FetchError> {
        self.list_typed(&self.collections.resources).await
    }

    /// `"All"` followed by the distinct category names, first-seen order.
    pub async fn list_categories(&self) -> Result<Vec<String>, FetchError> {
        let docs = self.list_by_collection(&self.collections.categories).await?;
        Ok(derive_categories(docs.iter().filter_map(category_name)))
    }

    pub async fn get_course(&self, id: &str) -> Result<Course, FetchError> {
        self.get_by_id(&self.collections.courses, id).await?.decode()
    }

    pub async fn get_project(&self, id: &str) -> Result<Project, FetchError> {
        self.get_by_id(&self.collections.projects, id).await?.decode()
    }

    pub async fn courses_or_empty(&self) -> Vec<Course> {
        self.list_courses().await.unwrap_or_else(|e| {
            tracing::error!("Error getting courses: {}", e);
            Vec::new()
        })
    }

    pub async fn projects_or_empty(&self) -> Vec<Project> {
        self.list_projects().await.unwrap_or_else(|e| {
            tracing::error!("Error getting projects: {}", e);
            Vec::new()
        })
    }

    pub async fn resources_or_empty(&self) -> Vec<Resource> {
        self.list_resources().await.unwrap_or_else(|e| {
            tracing::error!("Error getting resources: {}", e);
            Vec::new()
        })
    }

    pub async fn categories_or_all(&self) -> Vec<String> {
        self.list_categories().await.unwrap_or_else(|e| {
            tracing::error!("Error getting categories: {}", e);
            vec![ALL_CATEGORY.to_string()]
        })
    }

    /// Fetch categories and courses concurrently.
    pub async fn load_lessons(&self) -> Lessons {
        let (categories, courses) = futures::join!(self.categories_or_all(), self.list_courses());
        if let Err(e) = &courses {
            tracing::error!("Error getting courses: {}", e);
        }
        Lessons { categories, courses }
    }

    async fn list_typed<T: DeserializeOwned>(&self, collection_id: &str) -> Result<Vec<T>, FetchError> {
        let docs = self.list_by_collection(collection_id).await?;
        let mut items = Vec::with_capacity(docs.len());
        for doc in &docs {
            match doc.decode() {
                Ok(item) => items.push(item),
                Err(e) => tracing::warn!(collection = collection_id, "skipping document: {}", e),
            }
        }
        Ok(items)
    }
}
