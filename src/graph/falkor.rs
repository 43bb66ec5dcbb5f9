//! FalkorDB store. Same Cypher surface, no APOC.

use async_trait::async_trait;
use falkordb::{FalkorAsyncClient, FalkorClientBuilder, FalkorConnectionInfo, FalkorValue};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::queries::templates;
use super::schema::{GraphSchema, Property, RelationshipPattern};
use super::{GraphStore, Record};
use crate::config::Config;
use crate::error::{ChainError, ChainResult};

#[derive(Clone)]
pub struct FalkorStore {
    client: Arc<FalkorAsyncClient>,
    graph_name: String,
}

impl FalkorStore {
    pub async fn connect(config: &Config) -> ChainResult<Self> {
        info!(
            "Connecting to FalkorDB at {}:{}, graph: {}",
            config.falkordb_host, config.falkordb_port, config.graph_name
        );

        let connection_string = format!("falkor://{}:{}", config.falkordb_host, config.falkordb_port);
        let connection_info: FalkorConnectionInfo = connection_string
            .as_str()
            .try_into()
            .map_err(|e| ChainError::Configuration(format!("Invalid connection info: {e}")))?;

        let client = FalkorClientBuilder::new_async()
            .with_connection_info(connection_info)
            .build()
            .await
            .map_err(|e| ChainError::Database(format!("Failed to connect to FalkorDB: {e}")))?;

        Ok(Self {
            client: Arc::new(client),
            graph_name: config.graph_name.clone(),
        })
    }

    /// Run a read-only query and return the header with the raw rows.
    async fn rows(&self, cypher: &str) -> Result<(Vec<String>, Vec<Vec<FalkorValue>>), String> {
        let mut graph = self.client.select_graph(&self.graph_name);
        let result = graph
            .ro_query(cypher)
            .execute()
            .await
            .map_err(|e| e.to_string())?;

        let header = result.header.clone();
        let rows: Vec<Vec<FalkorValue>> = result.data.collect();
        Ok((header, rows))
    }

    async fn schema_rows(&self, cypher: &str) -> ChainResult<Vec<Vec<FalkorValue>>> {
        self.rows(cypher)
            .await
            .map(|(_, rows)| rows)
            .map_err(|e| ChainError::Database(format!("Schema introspection failed: {e}")))
    }
}

fn falkor_value_to_json(value: FalkorValue) -> Value {
    match value {
        FalkorValue::String(s) => Value::String(s),
        FalkorValue::I64(i) => Value::from(i),
        FalkorValue::F64(f) => serde_json::json!(f),
        FalkorValue::Bool(b) => Value::Bool(b),
        FalkorValue::None => Value::Null,
        FalkorValue::Array(items) => {
            Value::Array(items.into_iter().map(falkor_value_to_json).collect())
        }
        FalkorValue::Map(map) => properties_to_json(map),
        FalkorValue::Node(node) => properties_to_json(node.properties),
        FalkorValue::Edge(edge) => properties_to_json(edge.properties),
        other => Value::String(format!("{:?}", other)),
    }
}

fn properties_to_json(properties: HashMap<String, FalkorValue>) -> Value {
    Value::Object(
        properties
            .into_iter()
            .map(|(k, v)| (k, falkor_value_to_json(v)))
            .collect(),
    )
}

fn as_string(value: Option<&FalkorValue>) -> Option<String> {
    match value {
        Some(FalkorValue::String(s)) => Some(s.clone()),
        _ => None,
    }
}

/// `typeOf` reports e.g. `String`, `Integer`; normalise to the Neo4j spelling.
fn normalise_type(raw: Option<String>) -> String {
    match raw.as_deref().map(str::to_ascii_uppercase).as_deref() {
        Some("INTEGER") => "INTEGER".to_string(),
        Some("FLOAT") | Some("DOUBLE") => "FLOAT".to_string(),
        Some("BOOLEAN") => "BOOLEAN".to_string(),
        Some("ARRAY") | Some("LIST") => "LIST".to_string(),
        Some("STRING") | None => "STRING".to_string(),
        Some(other) => other.to_string(),
    }
}

#[async_trait]
impl GraphStore for FalkorStore {
    #[instrument(skip(self))]
    async fn refresh_schema(&self) -> ChainResult<GraphSchema> {
        let mut schema = GraphSchema::default();

        for row in self.schema_rows(templates::NODE_LABELS).await? {
            if let Some(label) = as_string(row.first()) {
                schema.add_label(label);
            }
        }
        for row in self.schema_rows(templates::RELATIONSHIP_TYPES).await? {
            if let Some(rel_type) = as_string(row.first()) {
                schema.add_rel_type(rel_type);
            }
        }
        for row in self.schema_rows(templates::FALKOR_NODE_PROPERTIES).await? {
            if let (Some(label), Some(property)) = (as_string(row.first()), as_string(row.get(1))) {
                let prop_type = normalise_type(as_string(row.get(2)));
                schema.add_node_property(label, Property::new(property, prop_type));
            }
        }
        for row in self.schema_rows(templates::FALKOR_REL_PROPERTIES).await? {
            if let (Some(rel_type), Some(property)) = (as_string(row.first()), as_string(row.get(1))) {
                let prop_type = normalise_type(as_string(row.get(2)));
                schema.add_rel_property(rel_type, Property::new(property, prop_type));
            }
        }
        for row in self.schema_rows(templates::FALKOR_RELATIONSHIPS).await? {
            if let (Some(start), Some(rel_type), Some(end)) = (
                as_string(row.first()),
                as_string(row.get(1)),
                as_string(row.get(2)),
            ) {
                schema.add_relationship(RelationshipPattern::new(start, rel_type, end));
            }
        }

        debug!(
            labels = schema.node_props.len(),
            rel_types = schema.rel_props.len(),
            "FalkorDB schema refreshed"
        );
        Ok(schema)
    }

    #[instrument(skip(self))]
    async fn query(&self, cypher: &str) -> ChainResult<Vec<Record>> {
        let (header, rows) = self.rows(cypher).await.map_err(ChainError::Execution)?;

        let records = rows
            .into_iter()
            .map(|row| {
                header
                    .iter()
                    .cloned()
                    .zip(row.into_iter().map(falkor_value_to_json))
                    .collect::<Record>()
            })
            .collect();

        Ok(records)
    }

    async fn ping(&self) -> ChainResult<()> {
        self.rows(templates::PING)
            .await
            .map(|_| ())
            .map_err(|e| ChainError::Database(format!("FalkorDB ping failed: {e}")))
    }
}
