use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::catalog::DocumentStore;
use crate::document::{Document, DocumentList};
use crate::error::FetchError;

/// Default page size of the hosted database when no limit is sent.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// In-memory DocumentStore for tests and previews.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone, Debug)]
pub struct MemoryStore {
    collections: Arc<Mutex<HashMap<String, Vec<Document>>>>,
    failures: Arc<Mutex<HashMap<String, FetchError>>>,
    stalled: Arc<Mutex<Vec<String>>>,
    calls: Arc<Mutex<usize>>,
    page_size: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            collections: Arc::default(),
            failures: Arc::default(),
            stalled: Arc::default(),
            calls: Arc::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Append a document to a collection, creating the collection if needed.
    pub fn insert(&self, collection_id: &str, doc: Document) {
        lock(&self.collections)
            .entry(collection_id.to_string())
            .or_default()
            .push(doc.in_collection(collection_id));
    }

    /// Make every call against `collection_id` fail with `error`.
    pub fn fail_with(&self, collection_id: &str, error: FetchError) {
        lock(&self.failures).insert(collection_id.to_string(), error);
    }

    /// Make every call against `collection_id` hang forever.
    pub fn stall(&self, collection_id: &str) {
        lock(&self.stalled).push(collection_id.to_string());
    }

    /// Number of list/get calls served so far.
    pub fn calls(&self) -> usize {
        *lock(&self.calls)
    }

    async fn check(&self, collection_id: &str) -> Result<(), FetchError> {
        *lock(&self.calls) += 1;
        let stalled = lock(&self.stalled).iter().any(|c| c == collection_id);
        if stalled {
            futures::future::pending::<()>().await;
        }
        match lock(&self.failures).get(collection_id) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

impl DocumentStore for MemoryStore {
    async fn list_documents(&self, collection_id: &str) -> Result<DocumentList, FetchError> {
        self.check(collection_id).await?;
        let collections = lock(&self.collections);
        let Some(docs) = collections.get(collection_id) else {
            return Err(FetchError::not_found(collection_id, None));
        };
        Ok(DocumentList {
            total: docs.len() as u64,
            documents: docs.iter().take(self.page_size).cloned().collect(),
        })
    }

    async fn get_document(&self, collection_id: &str, document_id: &str) -> Result<Document, FetchError> {
        self.check(collection_id).await?;
        lock(&self.collections)
            .get(collection_id)
            .and_then(|docs| docs.iter().find(|d| d.id == document_id).cloned())
            .ok_or_else(|| FetchError::not_found(collection_id, Some(document_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::{cancellable, CancellationToken};
    use crate::catalog::{Catalog, Collections};
    use crate::filter::{filter_courses, ALL_CATEGORY};
    use serde_json::json;

    fn collections() -> Collections {
        Collections {
            categories: "categories".to_string(),
            courses: "courses".to_string(),
            projects: "projects".to_string(),
            resources: "resources".to_string(),
        }
    }

    fn course_doc(id: &str, category: &str) -> Document {
        Document::new(
            id,
            json!({
                "title": format!("Course {id}"),
                "image": format!("https://img/{id}.png"),
                "category": category,
                "duration": 1800,
                "rating": 4.0
            }),
        )
    }

    #[tokio::test]
    async fn test_list_and_get_courses() {
        let store = MemoryStore::new();
        store.insert("courses", course_doc("c1", "React"));
        store.insert("courses", course_doc("c2", "Node"));
        let catalog = Catalog::new(store, collections());

        let courses = catalog.list_courses().await.unwrap();
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].id, "c1");
        assert_eq!(courses[1].category, "Node");

        let course = catalog.get_course("c2").await.unwrap();
        assert_eq!(course.title, "Course c2");
    }

    #[tokio::test]
    async fn test_documents_with_null_attributes_are_kept() {
        let store = MemoryStore::new();
        store.insert("courses", course_doc("c1", "React"));
        store.insert("courses", Document::new("c2", json!({
            "title": "Rust", "image": null, "category": "Systems",
            "duration": null, "ratings": null, "videoID": null
        })));
        store.insert("projects", Document::new("p1", json!({
            "title": "Shop", "description": null, "banner": null, "technologies": null
        })));
        store.insert("resources", Document::new("r1", json!({
            "title": "CSS", "url": "https://x/css.pdf", "image": null, "category": "Frontend"
        })));
        store.insert("resources", Document::new("r2", json!({
            "title": "App Router", "url": "https://x/app.pdf", "category": "Next.js"
        })));
        let catalog = Catalog::new(store, collections());

        let ids: Vec<_> = catalog.list_courses().await.unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, ["c1", "c2"]);
        assert_eq!(catalog.get_course("c2").await.unwrap().duration, 0);
        assert_eq!(catalog.list_projects().await.unwrap().len(), 1);
        assert!(catalog.get_project("p1").await.unwrap().technologies.is_empty());

        let resources = catalog.list_resources().await.unwrap();
        assert_eq!(resources.len(), 2);
        let nextjs = crate::ResourceFilter::Only(crate::ResourceCategory::Nextjs).apply(&resources);
        assert_eq!(nextjs.len(), 1);
        assert_eq!(nextjs[0].id, "r2");
    }

    #[tokio::test]
    async fn test_get_missing_document_is_not_found() {
        let store = MemoryStore::new();
        store.insert("projects", Document::new("p1", json!({ "title": "Shop" })));
        let catalog = Catalog::new(store, collections());

        let err = catalog.get_project("nope").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err, FetchError::not_found("projects", Some("nope")));
    }

    #[tokio::test]
    async fn test_categories_deduplicated_with_all_first() {
        let store = MemoryStore::new();
        store.insert("categories", Document::new("1", json!({ "name": "React" })));
        store.insert("categories", Document::new("2", json!({ "name": "React" })));
        store.insert("categories", Document::new("3", json!({ "category": "Node" })));
        store.insert("categories", Document::new("4", json!({ "name": "All" })));
        let catalog = Catalog::new(store, collections());

        assert_eq!(catalog.list_categories().await.unwrap(), ["All", "React", "Node"]);
    }

    #[tokio::test]
    async fn test_backend_errors_degrade_to_defaults() {
        let store = MemoryStore::new();
        for collection in ["categories", "courses", "projects", "resources"] {
            store.fail_with(collection, FetchError::Transport("connection refused".into()));
        }
        let catalog = Catalog::new(store, collections());

        assert_eq!(catalog.categories_or_all().await, [ALL_CATEGORY]);
        assert!(catalog.courses_or_empty().await.is_empty());
        assert!(catalog.projects_or_empty().await.is_empty());
        assert!(catalog.resources_or_empty().await.is_empty());

        // The typed variants report the reason instead.
        assert_eq!(
            catalog.list_courses().await,
            Err(FetchError::Transport("connection refused".into()))
        );
    }

    #[tokio::test]
    async fn test_empty_collection_is_not_an_error() {
        let store = MemoryStore::new();
        store.insert("resources", Document::new("r1", json!({
            "title": "CSS", "url": "https://x/css.pdf", "category": "frontend"
        })));
        let catalog = Catalog::new(store, collections());

        let resources = catalog.list_resources().await.unwrap();
        let nextjs = crate::ResourceFilter::Only(crate::ResourceCategory::Nextjs).apply(&resources);
        assert!(nextjs.is_empty());

        let courses = catalog.courses_or_empty().await;
        assert!(filter_courses(&courses, "Go").is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_collection_fails_without_calling_backend() {
        let store = MemoryStore::new();
        let catalog = Catalog::new(
            store.clone(),
            Collections {
                courses: String::new(),
                ..collections()
            },
        );

        let err = catalog.list_courses().await.unwrap_err();
        assert!(err.is_not_found());
        assert!(catalog.get_course("c1").await.unwrap_err().is_not_found());
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_only_default_page_is_returned() {
        let store = MemoryStore::new();
        for i in 0..(DEFAULT_PAGE_SIZE + 5) {
            store.insert("courses", course_doc(&format!("c{i}"), "React"));
        }
        let catalog = Catalog::new(store, collections());

        let courses = catalog.list_courses().await.unwrap();
        assert_eq!(courses.len(), DEFAULT_PAGE_SIZE);
        assert_eq!(courses[0].id, "c0");
    }

    #[tokio::test]
    async fn test_listing_is_repeatable() {
        let store = MemoryStore::new().with_page_size(2);
        for id in ["a", "b", "c"] {
            store.insert("projects", Document::new(id, json!({ "title": id })));
        }
        let catalog = Catalog::new(store, collections());

        let first: Vec<_> = catalog.list_projects().await.unwrap().into_iter().map(|p| p.id).collect();
        let second: Vec<_> = catalog.list_projects().await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(first, ["a", "b"]);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_undecodable_documents_are_skipped() {
        let store = MemoryStore::new();
        store.insert("resources", Document::new("ok", json!({
            "title": "Docker", "url": "https://x/docker.pdf", "category": "backend"
        })));
        store.insert("resources", Document::new("bad", json!({
            "title": "Flutter", "url": "https://x/flutter.pdf", "category": "mobile"
        })));
        let catalog = Catalog::new(store, collections());

        let resources = catalog.list_resources().await.unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].id, "ok");
    }

    #[tokio::test]
    async fn test_load_lessons_keeps_partial_success() {
        let store = MemoryStore::new();
        store.insert("courses", course_doc("c1", "React"));
        store.fail_with("categories", FetchError::Unauthorized("guests".into()));
        let catalog = Catalog::new(store.clone(), collections());

        let lessons = catalog.load_lessons().await;
        assert_eq!(lessons.categories, [ALL_CATEGORY]);
        assert_eq!(lessons.courses.unwrap().len(), 1);

        let store = MemoryStore::new();
        store.insert("categories", Document::new("1", json!({ "name": "React" })));
        store.fail_with("courses", FetchError::RateLimited { retry_after_secs: Some(3) });
        let catalog = Catalog::new(store, collections());

        let lessons = catalog.load_lessons().await;
        assert_eq!(lessons.categories, ["All", "React"]);
        assert!(lessons.courses.unwrap_err().is_retryable());
    }

    #[tokio::test]
    async fn test_cancelled_fetch_on_hung_backend() {
        let store = MemoryStore::new();
        store.stall("courses");
        let catalog = Catalog::new(store, collections());
        let token = CancellationToken::new();
        let canceller = token.clone();

        let (result, ()) = futures::join!(
            cancellable(&token, catalog.list_courses()),
            async move { canceller.cancel() }
        );
        assert_eq!(result, Err(FetchError::Cancelled));
    }
}
