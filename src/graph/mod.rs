use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use crate::config::{Config, GraphBackend};
use crate::error::ChainResult;

pub mod falkor;
pub mod neo4j;
pub mod queries;
pub mod schema;

pub use self::falkor::FalkorStore;
pub use self::neo4j::Neo4jStore;
pub use self::schema::{GraphSchema, Property, RelationshipPattern};

/// One result row, keyed by column name.
pub type Record = serde_json::Map<String, Value>;

/// Lists longer than this are dropped from results (embedding vectors and the like).
pub const LIST_LIMIT: usize = 128;

/// The two operations the chain needs from a graph database.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Introspect labels, relationship types and their properties.
    async fn refresh_schema(&self) -> ChainResult<GraphSchema>;

    /// Run a read query and collect every row.
    async fn query(&self, cypher: &str) -> ChainResult<Vec<Record>>;

    async fn ping(&self) -> ChainResult<()> {
        self.query(queries::templates::PING).await.map(|_| ())
    }
}

/// Build the store selected by `GRAPH_BACKEND`.
pub async fn connect(config: &Config) -> ChainResult<Arc<dyn GraphStore>> {
    let store: Arc<dyn GraphStore> = match config.graph_backend {
        GraphBackend::Neo4j => Arc::new(Neo4jStore::connect(config).await?),
        GraphBackend::FalkorDb => Arc::new(FalkorStore::connect(config).await?),
    };
    info!("Graph store ready ({:?})", config.graph_backend);
    Ok(store)
}

pub fn sanitize_record(record: Record) -> Record {
    record
        .into_iter()
        .filter_map(|(key, value)| sanitize_value(value).map(|v| (key, v)))
        .collect()
}

fn sanitize_value(value: Value) -> Option<Value> {
    match value {
        Value::Array(items) if items.len() > LIST_LIMIT => None,
        Value::Array(items) => Some(Value::Array(
            items.into_iter().filter_map(sanitize_value).collect(),
        )),
        Value::Object(map) => Some(Value::Object(sanitize_record(map))),
        other => Some(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_sanitize_drops_long_lists() {
        let embedding: Vec<f64> = (0..1024).map(|i| i as f64).collect();
        let cleaned = sanitize_record(record(json!({
            "name": "Smash Burger",
            "embedding": embedding,
            "tags": ["beef", "cheese"],
        })));

        assert_eq!(cleaned.get("name"), Some(&json!("Smash Burger")));
        assert!(cleaned.get("embedding").is_none());
        assert_eq!(cleaned.get("tags"), Some(&json!(["beef", "cheese"])));
    }

    #[test]
    fn test_sanitize_recurses_into_nodes() {
        let long: Vec<i64> = (0..200).collect();
        let cleaned = sanitize_record(record(json!({
            "d": { "name": "Ribeye", "vector": long },
        })));
        assert_eq!(cleaned["d"], json!({ "name": "Ribeye" }));
    }

    struct EmptyStore;

    #[async_trait]
    impl GraphStore for EmptyStore {
        async fn refresh_schema(&self) -> ChainResult<GraphSchema> {
            Ok(GraphSchema::default())
        }

        async fn query(&self, cypher: &str) -> ChainResult<Vec<Record>> {
            assert_eq!(cypher, queries::templates::PING);
            Ok(vec![record(json!({ "ok": 1 }))])
        }
    }

    #[test]
    fn test_default_ping_runs_trivial_query() {
        tokio_test::block_on(async {
            assert!(EmptyStore.ping().await.is_ok());
        });
    }

    #[test]
    fn test_list_at_limit_is_kept() {
        let exact: Vec<i64> = (0..LIST_LIMIT as i64).collect();
        let cleaned = sanitize_record(record(json!({ "ids": exact })));
        assert_eq!(cleaned["ids"].as_array().map(Vec::len), Some(LIST_LIMIT));
    }
}
