//! Durable Backend Adapter
//!
//! Talks to the remote table store (SurrealDB over WebSocket) and
//! translates records to and from its wire representation. The store is
//! used schema-less and key-addressed: every operation goes through
//! `type::thing`/`type::table` binds, and the record key is projected back
//! as a plain string so domain ids never leak the engine's id type.
//!
//! The adapter surfaces every transport/credential/schema failure as
//! [`StoreError::Adapter`]; falling back is the facade's decision, never
//! the adapter's.

use serde_json::Value;

use async_trait::async_trait;
use surrealdb::Surreal;
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;

use super::{ScanFilter, StoreResult, TableBackend};

/// Connection settings for the remote table store.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Host and port, e.g. `127.0.0.1:8000`.
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

#[derive(Clone)]
pub struct RemoteTable {
    db: Surreal<Client>,
}

impl RemoteTable {
    /// Connect and authenticate. Any failure here is reported to the
    /// caller; during initialization the facade treats it as the signal
    /// to downgrade permanently.
    pub async fn connect(config: &RemoteConfig) -> StoreResult<Self> {
        let db = Surreal::new::<Ws>(config.url.as_str()).await?;
        db.signin(Root {
            username: &config.username,
            password: &config.password,
        })
        .await?;
        db.use_ns(&config.namespace).use_db(&config.database).await?;
        Ok(Self { db })
    }

    /// Bounded existence probe against one table. Used exactly once, by
    /// the facade's initialization, to decide the process-wide backend.
    pub async fn probe(&self, table: &str) -> StoreResult<()> {
        let mut response = self
            .db
            .query("SELECT VALUE record::id(id) FROM type::table($tb) LIMIT 1")
            .bind(("tb", table.to_string()))
            .await?;
        let _ids: Vec<String> = response.take(0)?;
        Ok(())
    }
}

#[async_trait]
impl TableBackend for RemoteTable {
    async fn put_item(&self, table: &str, id: &str, item: Value) -> StoreResult<()> {
        // The record key addresses the item; the engine rejects a
        // conflicting `id` field inside the content.
        let mut item = item;
        if let Value::Object(map) = &mut item {
            map.remove("id");
        }
        self.db
            .query("UPSERT type::thing($tb, $key) CONTENT $data")
            .bind(("tb", table.to_string()))
            .bind(("key", id.to_string()))
            .bind(("data", item))
            .await?
            .check()?;
        Ok(())
    }

    async fn get_item(&self, table: &str, id: &str) -> StoreResult<Option<Value>> {
        let mut response = self
            .db
            .query("SELECT *, record::id(id) AS id FROM type::thing($tb, $key)")
            .bind(("tb", table.to_string()))
            .bind(("key", id.to_string()))
            .await?;
        let mut rows: Vec<Value> = response.take(0)?;
        Ok(rows.pop())
    }

    async fn scan_items(&self, table: &str, filter: ScanFilter<'_>) -> StoreResult<Vec<Value>> {
        let mut sql = String::from("SELECT *, record::id(id) AS id FROM type::table($tb)");
        let mut clauses: Vec<String> = Vec::new();
        if filter.kind.is_some() {
            clauses.push("type = $kind".to_string());
        }
        if let Some((owner_path, _)) = filter.owner {
            // Owner paths are compile-time constants from the Entity impls.
            clauses.push(format!("{owner_path} = $owner"));
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY createdAt");

        let mut query = self.db.query(sql).bind(("tb", table.to_string()));
        if let Some(kind) = filter.kind {
            query = query.bind(("kind", kind.to_string()));
        }
        if let Some((_, business_id)) = filter.owner {
            query = query.bind(("owner", business_id.to_string()));
        }

        let mut response = query.await?;
        let rows: Vec<Value> = response.take(0)?;
        Ok(rows)
    }

    async fn delete_item(&self, table: &str, id: &str) -> StoreResult<bool> {
        let mut response = self
            .db
            .query("DELETE type::thing($tb, $key) RETURN BEFORE")
            .bind(("tb", table.to_string()))
            .bind(("key", id.to_string()))
            .await?;
        let removed: Vec<Value> = response.take(0)?;
        Ok(!removed.is_empty())
    }
}
