use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::db::error::RepositoryResult;
use crate::db::page::{Page, PageRequest};
use crate::models::{ScheduleTemplate, Weekday};

/// An entity that can be mirrored into a search index.
pub trait SearchDocument: Clone + Send + Sync {
    /// Identifier the index is keyed by. Documents without an id are not
    /// indexable (they have not been persisted yet).
    fn doc_id(&self) -> Option<i64>;

    /// Text the free-text query matches against.
    fn search_text(&self) -> String;
}

impl SearchDocument for Weekday {
    fn doc_id(&self) -> Option<i64> {
        self.id.map(|id| id.value())
    }

    fn search_text(&self) -> String {
        self.name.clone()
    }
}

impl SearchDocument for ScheduleTemplate {
    fn doc_id(&self) -> Option<i64> {
        self.id.map(|id| id.value())
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.start_time, self.end_time)
    }
}

/// Full-text index collaborator: upsert, delete-by-id, and paged query.
#[async_trait]
pub trait SearchRepository<T: SearchDocument>: Send + Sync {
    /// Upsert a document. Documents without an id are ignored.
    async fn save(&self, document: &T) -> RepositoryResult<()>;
    /// Remove a document; removing an unknown id succeeds.
    async fn delete_by_id(&self, id: i64) -> RepositoryResult<()>;
    /// Free-text query with pagination, ordered by document id.
    async fn search(&self, query: &str, page: PageRequest) -> RepositoryResult<Page<T>>;
}

/// In-memory search index.
///
/// Matching is case-insensitive containment of each query token in the
/// document text; a document matches when every token matches. An empty
/// query matches all documents.
#[derive(Default)]
pub struct InMemoryIndex<T: SearchDocument> {
    documents: RwLock<BTreeMap<i64, T>>,
}

impl<T: SearchDocument> InMemoryIndex<T> {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(BTreeMap::new()),
        }
    }

    fn matches(document: &T, query: &str) -> bool {
        let haystack = document.search_text().to_lowercase();
        query
            .split_whitespace()
            .all(|token| haystack.contains(&token.to_lowercase()))
    }
}

#[async_trait]
impl<T: SearchDocument + 'static> SearchRepository<T> for InMemoryIndex<T> {
    async fn save(&self, document: &T) -> RepositoryResult<()> {
        if let Some(id) = document.doc_id() {
            self.documents.write().insert(id, document.clone());
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> RepositoryResult<()> {
        self.documents.write().remove(&id);
        Ok(())
    }

    async fn search(&self, query: &str, page: PageRequest) -> RepositoryResult<Page<T>> {
        let matching: Vec<T> = self
            .documents
            .read()
            .values()
            .filter(|doc| Self::matches(doc, query))
            .cloned()
            .collect();
        Ok(Page::from_slice(&matching, &page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeekdayId;

    fn weekday(id: i64, name: &str) -> Weekday {
        Weekday {
            id: Some(WeekdayId::new(id)),
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn indexes_and_finds_by_token() {
        let index = InMemoryIndex::new();
        index.save(&weekday(1, "Monday")).await.unwrap();
        index.save(&weekday(2, "Tuesday")).await.unwrap();

        let page = index.search("mon", PageRequest::default()).await.unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].name, "Monday");
    }

    #[tokio::test]
    async fn empty_query_matches_all() {
        let index = InMemoryIndex::new();
        index.save(&weekday(1, "Monday")).await.unwrap();
        index.save(&weekday(2, "Tuesday")).await.unwrap();

        let page = index.search("", PageRequest::default()).await.unwrap();
        assert_eq!(page.total_count, 2);
    }

    #[tokio::test]
    async fn all_tokens_must_match() {
        let index = InMemoryIndex::new();
        index.save(&weekday(1, "Monday")).await.unwrap();

        let hit = index
            .search("mon day", PageRequest::default())
            .await
            .unwrap();
        assert_eq!(hit.total_count, 1);

        let miss = index
            .search("mon tuesday", PageRequest::default())
            .await
            .unwrap();
        assert_eq!(miss.total_count, 0);
    }

    #[tokio::test]
    async fn save_upserts_and_delete_is_idempotent() {
        let index = InMemoryIndex::new();
        index.save(&weekday(1, "Monday")).await.unwrap();
        index.save(&weekday(1, "Mon")).await.unwrap();

        let page = index.search("", PageRequest::default()).await.unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].name, "Mon");

        index.delete_by_id(1).await.unwrap();
        index.delete_by_id(1).await.unwrap();
        let page = index.search("", PageRequest::default()).await.unwrap();
        assert_eq!(page.total_count, 0);
    }

    #[tokio::test]
    async fn unsaved_documents_are_not_indexed() {
        let index = InMemoryIndex::new();
        index
            .save(&Weekday {
                id: None,
                name: "Monday".to_string(),
            })
            .await
            .unwrap();
        let page = index.search("", PageRequest::default()).await.unwrap();
        assert_eq!(page.total_count, 0);
    }

    #[tokio::test]
    async fn search_respects_pagination() {
        let index = InMemoryIndex::new();
        for i in 1..=5 {
            index.save(&weekday(i, &format!("day-{}", i))).await.unwrap();
        }
        let page = index.search("day", PageRequest::new(1, 2)).await.unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_count, 5);
        assert_eq!(page.items[0].name, "day-3");
    }
}
