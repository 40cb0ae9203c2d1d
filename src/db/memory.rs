use serde_json::Value;
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};
use tokio::sync::RwLock;

use crate::content::Collection;

type Documents = HashMap<Collection, Vec<(String, Value)>>;

/// Process-local document store. Contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: Arc<RwLock<Documents>>,
    offline: Arc<AtomicBool>,
}

impl MemoryStore {
    /// Make every subsequent call fail like an unreachable database.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), sqlx::Error> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }

    pub async fn list(&self, collection: Collection) -> Result<Vec<Value>, sqlx::Error> {
        self.check_online()?;
        let docs = self.documents.read().await;
        Ok(docs
            .get(&collection)
            .map(|entries| entries.iter().map(|(_, v)| v.clone()).collect())
            .unwrap_or_default())
    }

    pub async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>, sqlx::Error> {
        self.check_online()?;
        let docs = self.documents.read().await;
        Ok(docs
            .get(&collection)
            .and_then(|entries| entries.iter().find(|(k, _)| k == id))
            .map(|(_, v)| v.clone()))
    }

    pub async fn insert(&self, collection: Collection, id: &str, data: Value) -> Result<(), sqlx::Error> {
        self.check_online()?;
        let mut docs = self.documents.write().await;
        let entries = docs.entry(collection).or_default();
        if entries.iter().any(|(k, _)| k == id) {
            return Err(sqlx::Error::Protocol(format!(
                "duplicate key {id} in {}",
                collection.as_str()
            )));
        }
        entries.push((id.to_string(), data));
        Ok(())
    }

    pub async fn put(&self, collection: Collection, id: &str, data: Value) -> Result<bool, sqlx::Error> {
        self.check_online()?;
        let mut docs = self.documents.write().await;
        match docs
            .get_mut(&collection)
            .and_then(|entries| entries.iter_mut().find(|(k, _)| k == id))
        {
            Some((_, existing)) => {
                *existing = data;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn delete(&self, collection: Collection, id: &str) -> Result<bool, sqlx::Error> {
        self.check_online()?;
        let mut docs = self.documents.write().await;
        let Some(entries) = docs.get_mut(&collection) else {
            return Ok(false);
        };
        let before = entries.len();
        entries.retain(|(k, _)| k != id);
        Ok(entries.len() != before)
    }
}
