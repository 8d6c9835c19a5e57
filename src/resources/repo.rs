use std::marker::PhantomData;

use anyhow::Context;
use serde_json::Value;

use super::Resource;
use crate::db::Database;

/// Typed view over one document collection.
pub struct Collection<'a, R> {
    db: &'a dyn Database,
    _kind: PhantomData<R>,
}

impl<'a, R: Resource> Collection<'a, R> {
    pub fn new(db: &'a dyn Database) -> Self {
        Self {
            db,
            _kind: PhantomData,
        }
    }

    pub async fn list(&self, filter: Option<(&str, &str)>, limit: i64) -> anyhow::Result<Vec<R>> {
        self.db
            .list_documents(R::COLLECTION, filter, limit)
            .await?
            .into_iter()
            .map(decode::<R>)
            .collect()
    }

    pub async fn get(&self, id: &str) -> anyhow::Result<Option<R>> {
        self.db
            .find_document(R::COLLECTION, id)
            .await?
            .map(decode::<R>)
            .transpose()
    }

    pub async fn insert(&self, item: &R) -> anyhow::Result<()> {
        let doc = serde_json::to_value(item).context("encode document")?;
        self.db.insert_document(R::COLLECTION, item.id(), &doc).await
    }

    pub async fn replace(&self, item: &R) -> anyhow::Result<bool> {
        let doc = serde_json::to_value(item).context("encode document")?;
        self.db.replace_document(R::COLLECTION, item.id(), &doc).await
    }

    pub async fn delete(&self, id: &str) -> anyhow::Result<bool> {
        self.db.delete_document(R::COLLECTION, id).await
    }
}

fn decode<R: Resource>(doc: Value) -> anyhow::Result<R> {
    serde_json::from_value(doc).with_context(|| format!("decode {} document", R::COLLECTION))
}
