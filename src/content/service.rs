//! Store-backed reads and writes for content documents.

use rand::distr::{Alphanumeric, SampleString};
use serde_json::{Map, Value};

use super::{ContentSource, Document};
use crate::db::DocumentStore;
use crate::error::{AppError, AppResult};
use crate::storage::Storage;

pub const ID_LENGTH: usize = 20;

/// A fresh document id: 20 random alphanumeric characters.
pub fn new_id() -> String {
    Alphanumeric.sample_string(&mut rand::rng(), ID_LENGTH)
}

fn decode<T: Document>(value: Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(doc) => Some(doc),
        Err(e) => {
            tracing::warn!(
                collection = T::COLLECTION.as_str(),
                error = %e,
                "Skipping malformed document"
            );
            None
        }
    }
}

/// Every stored document of `T`'s collection. Malformed entries are skipped.
pub async fn list_typed<T: Document>(store: &DocumentStore) -> AppResult<Vec<T>> {
    let values = store.list(T::COLLECTION).await?;
    Ok(values.into_iter().filter_map(decode::<T>).collect())
}

pub async fn get_typed<T: Document>(store: &DocumentStore, id: &str) -> AppResult<Option<T>> {
    Ok(store.get(T::COLLECTION, id).await?.and_then(decode::<T>))
}

/// Read for public pages. When the store is empty or unreachable and
/// `fallback` is on, the sample dataset is returned instead.
pub async fn load_public<T: Document>(
    store: &DocumentStore,
    fallback: bool,
) -> AppResult<(Vec<T>, ContentSource)> {
    let collection = T::COLLECTION.as_str();
    match list_typed::<T>(store).await {
        Ok(items) if !items.is_empty() => Ok((items, ContentSource::Store)),
        Ok(_) if fallback => {
            tracing::warn!(collection, "Store returned no documents, serving sample content");
            Ok((T::sample(), ContentSource::Sample))
        }
        Ok(items) => Ok((items, ContentSource::Store)),
        Err(e) if fallback => {
            tracing::warn!(collection, error = %e, "Store read failed, serving sample content");
            Ok((T::sample(), ContentSource::Sample))
        }
        Err(e) => Err(e),
    }
}

fn parse_payload<T: Document>(value: Value) -> AppResult<T> {
    serde_json::from_value(value)
        .map_err(|e| AppError::validation(format!("Invalid {} data: {e}", T::LABEL.to_lowercase())))
}

pub async fn create<T: Document>(store: &DocumentStore, payload: Value) -> AppResult<T> {
    let mut doc: T = parse_payload(payload)?;
    doc.normalize();
    doc.validate()?;
    doc.set_id(new_id());

    let value = serde_json::to_value(&doc).map_err(|e| AppError::Internal(e.to_string()))?;
    store.insert(T::COLLECTION, doc.id(), &value).await?;

    tracing::info!(collection = T::COLLECTION.as_str(), id = doc.id(), "Document created");
    Ok(doc)
}

/// Shallow merge: keys in `patch` overwrite the stored ones, `id` is ignored.
pub fn merge_patch(stored: &mut Map<String, Value>, patch: Map<String, Value>) {
    for (key, value) in patch {
        if key != "id" {
            stored.insert(key, value);
        }
    }
}

/// Partial update. Concurrent edits are last-write-wins.
pub async fn update<T: Document>(store: &DocumentStore, id: &str, patch: Value) -> AppResult<T> {
    let Value::Object(patch) = patch else {
        return Err(AppError::validation("Expected a JSON object"));
    };

    let Some(Value::Object(mut stored)) = store.get(T::COLLECTION, id).await? else {
        return Err(AppError::not_found(T::LABEL));
    };
    merge_patch(&mut stored, patch);

    let mut doc: T = parse_payload(Value::Object(stored))?;
    doc.set_id(id.to_string());
    doc.normalize();
    doc.validate()?;

    let value = serde_json::to_value(&doc).map_err(|e| AppError::Internal(e.to_string()))?;
    if !store.put(T::COLLECTION, id, &value).await? {
        return Err(AppError::not_found(T::LABEL));
    }

    tracing::info!(collection = T::COLLECTION.as_str(), id, "Document updated");
    Ok(doc)
}

/// Remove a document and, best-effort, the uploaded image it referenced.
pub async fn delete<T: Document>(store: &DocumentStore, storage: &Storage, id: &str) -> AppResult<()> {
    let existing = get_typed::<T>(store, id).await?;
    if !store.delete(T::COLLECTION, id).await? {
        return Err(AppError::not_found(T::LABEL));
    }

    if let Some(url) = existing.as_ref().and_then(|doc| doc.image_url()) {
        storage.delete_by_url(url).await;
    }

    tracing::info!(collection = T::COLLECTION.as_str(), id, "Document deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::model::{BlogPost, Project, Service, Testimonial};
    use crate::content::Collection;
    use crate::db::MemoryStore;
    use serde_json::json;

    fn service_payload() -> Value {
        json!({
            "title": "API Design",
            "description": "REST and GraphQL APIs",
            "icon": "plug",
            "features": ["OpenAPI docs", " OpenAPI docs ", "Versioning", ""]
        })
    }

    #[test]
    fn test_new_id_shape() {
        let id = new_id();
        assert_eq!(id.len(), ID_LENGTH);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(new_id(), id);
    }

    #[test]
    fn test_merge_patch_ignores_id() {
        let mut stored = json!({"id": "keep", "title": "Old", "icon": "x"})
            .as_object()
            .cloned()
            .unwrap();
        let patch = json!({"id": "other", "title": "New"}).as_object().cloned().unwrap();
        merge_patch(&mut stored, patch);
        assert_eq!(stored["id"], "keep");
        assert_eq!(stored["title"], "New");
        assert_eq!(stored["icon"], "x");
    }

    #[tokio::test]
    async fn test_create_stores_exactly_one_normalized_document() {
        let store = DocumentStore::memory();
        let created: Service = create(&store, service_payload()).await.unwrap();

        assert_eq!(created.id.len(), ID_LENGTH);
        assert_eq!(created.features, vec!["OpenAPI docs", "Versioning"]);

        let all = list_typed::<Service>(&store).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], created);
        assert_eq!(all[0].title, "API Design");
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_payload() {
        let store = DocumentStore::memory();
        let err = create::<Service>(&store, json!({"title": "x", "description": "y", "features": []}))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = create::<Service>(&store, json!({"title": 5})).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.count(Collection::Services).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_post_with_accented_title_derives_ascii_slug() {
        let store = DocumentStore::memory();
        let post: BlogPost = create(
            &store,
            json!({"title": "Café Guide", "excerpt": "Where to work from", "content": "# Cafés"}),
        )
        .await
        .unwrap();
        assert_eq!(post.slug, "caf-guide");
        assert_eq!(store.count(Collection::BlogPosts).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_merges_and_revalidates() {
        let store = DocumentStore::memory();
        let created: Service = create(&store, service_payload()).await.unwrap();

        let updated: Service = update(&store, &created.id, json!({"title": "APIs", "id": "hijack"}))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "APIs");
        assert_eq!(updated.description, created.description);

        let err = update::<Service>(&store, &created.id, json!({"features": []}))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = update::<Service>(&store, "missing", json!({"title": "x"}))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_document_and_upload() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        let file = storage.save("testimonials", "ann.png", &png).await.unwrap();

        let store = DocumentStore::memory();
        let created: Testimonial = create(
            &store,
            json!({
                "name": "Ann",
                "company": "Acme",
                "content": "Great work",
                "avatarUrl": file.url,
                "rating": 5
            }),
        )
        .await
        .unwrap();

        delete::<Testimonial>(&store, &storage, &created.id).await.unwrap();
        assert!(get_typed::<Testimonial>(&store, &created.id).await.unwrap().is_none());
        assert!(storage.list("testimonials").await.unwrap().is_empty());

        let err = delete::<Testimonial>(&store, &storage, &created.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_load_public_falls_back_to_sample() {
        let store = DocumentStore::memory();
        let (items, source) = load_public::<Project>(&store, true).await.unwrap();
        assert_eq!(source, ContentSource::Sample);
        assert_eq!(items.len(), 6);

        let (items, source) = load_public::<Project>(&store, false).await.unwrap();
        assert_eq!(source, ContentSource::Store);
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_load_public_prefers_store_and_handles_errors() {
        let memory = MemoryStore::default();
        let store = DocumentStore::Memory(memory.clone());
        create::<Service>(&store, service_payload()).await.unwrap();

        let (items, source) = load_public::<Service>(&store, true).await.unwrap();
        assert_eq!(source, ContentSource::Store);
        assert_eq!(items.len(), 1);

        memory.set_offline(true);
        let (items, source) = load_public::<Service>(&store, true).await.unwrap();
        assert_eq!(source, ContentSource::Sample);
        assert_eq!(items.len(), 3);
        assert!(load_public::<Service>(&store, false).await.is_err());
    }
}
