//! Fallback Store
//!
//! In-process, per-table map from id to record. Lives for the process
//! only; doubles as the write-through cache while the durable backend is
//! active and as the sole store when it is not. Never fails for
//! structurally valid input.

use async_trait::async_trait;
use chrono::DateTime;
use dashmap::DashMap;
use serde_json::Value;

use super::{ScanFilter, StoreResult, TableBackend, merge};

#[derive(Debug, Default)]
pub struct MemStore {
    tables: DashMap<String, DashMap<String, Value>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            tables: DashMap::new(),
        }
    }

    pub fn put(&self, table: &str, id: &str, item: Value) {
        self.tables
            .entry(table.to_string())
            .or_default()
            .insert(id.to_string(), item);
    }

    pub fn get(&self, table: &str, id: &str) -> Option<Value> {
        let table = self.tables.get(table)?;
        table.get(id).map(|entry| entry.value().clone())
    }

    /// Merge `delta` into the stored record under the entry guard, so no
    /// reader observes a partially merged record. Returns the merged
    /// record, or `None` when the id is unknown.
    pub fn merge(&self, table: &str, id: &str, delta: &Value) -> Option<Value> {
        let table = self.tables.get(table)?;
        let mut entry = table.get_mut(id)?;
        merge::merge_fields(entry.value_mut(), delta);
        Some(entry.value().clone())
    }

    /// Linear predicate scan. Results are sorted by creation time then id;
    /// the facade contract leaves ordering unspecified, this just keeps
    /// listings stable.
    pub fn scan(&self, table: &str, filter: ScanFilter<'_>) -> Vec<Value> {
        let Some(table) = self.tables.get(table) else {
            return Vec::new();
        };
        let mut items: Vec<Value> = table
            .iter()
            .filter(|entry| matches_filter(entry.value(), &filter))
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by_key(sort_key);
        items
    }

    pub fn remove(&self, table: &str, id: &str) -> bool {
        self.tables
            .get(table)
            .is_some_and(|table| table.remove(id).is_some())
    }
}

fn matches_filter(item: &Value, filter: &ScanFilter<'_>) -> bool {
    if let Some(kind) = filter.kind
        && item.get("type").and_then(Value::as_str) != Some(kind)
    {
        return false;
    }
    if let Some((path, business_id)) = filter.owner
        && field_at(item, path).and_then(Value::as_str) != Some(business_id)
    {
        return false;
    }
    true
}

/// Resolve a dotted field path (`location.businessId`) inside a record.
fn field_at<'v>(item: &'v Value, path: &str) -> Option<&'v Value> {
    path.split('.').try_fold(item, |value, segment| value.get(segment))
}

fn sort_key(item: &Value) -> (i64, String) {
    let created = item
        .get("createdAt")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(0);
    let id = item
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    (created, id)
}

#[async_trait]
impl TableBackend for MemStore {
    async fn put_item(&self, table: &str, id: &str, item: Value) -> StoreResult<()> {
        self.put(table, id, item);
        Ok(())
    }

    async fn get_item(&self, table: &str, id: &str) -> StoreResult<Option<Value>> {
        Ok(self.get(table, id))
    }

    async fn scan_items(&self, table: &str, filter: ScanFilter<'_>) -> StoreResult<Vec<Value>> {
        Ok(self.scan(table, filter))
    }

    async fn delete_item(&self, table: &str, id: &str) -> StoreResult<bool> {
        Ok(self.remove(table, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn put_then_get_round_trips() {
        let store = MemStore::new();
        store.put("entity", "a", json!({"id": "a", "name": "x"}));
        assert_eq!(store.get("entity", "a"), Some(json!({"id": "a", "name": "x"})));
        assert_eq!(store.get("entity", "missing"), None);
    }

    #[test]
    fn merge_on_unknown_id_is_none() {
        let store = MemStore::new();
        assert!(store.merge("entity", "nope", &json!({"x": 1})).is_none());
    }

    #[test]
    fn scan_filters_by_type_and_owner() {
        let store = MemStore::new();
        store.put(
            "entity",
            "a",
            json!({"id": "a", "type": "location", "businessId": "B1"}),
        );
        store.put(
            "entity",
            "b",
            json!({"id": "b", "type": "location", "businessId": "B2"}),
        );
        store.put(
            "entity",
            "c",
            json!({"id": "c", "type": "user", "businessId": "B1"}),
        );

        let filter = ScanFilter {
            kind: Some("location"),
            owner: Some(("businessId", "B1")),
        };
        let hits = store.scan("entity", filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["id"], "a");
    }

    #[test]
    fn scan_resolves_nested_owner_path() {
        let store = MemStore::new();
        store.put(
            "order",
            "o1",
            json!({"id": "o1", "location": {"businessId": "B1"}}),
        );
        store.put(
            "order",
            "o2",
            json!({"id": "o2", "location": {"businessId": "B2"}}),
        );

        let filter = ScanFilter {
            kind: None,
            owner: Some(("location.businessId", "B2")),
        };
        let hits = store.scan("order", filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["id"], "o2");
    }

    #[test]
    fn concurrent_writers_on_distinct_ids_do_not_corrupt_the_map() {
        let store = Arc::new(MemStore::new());
        let mut handles = Vec::new();
        for worker in 0..8 {
            let store = store.clone();
            handles.push(std::thread::spawn(move || {
                for i in 0..100 {
                    let id = format!("{worker}-{i}");
                    store.put("entity", &id, json!({"id": id, "worker": worker}));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        let all = store.scan("entity", ScanFilter::default());
        assert_eq!(all.len(), 800);
    }
}
