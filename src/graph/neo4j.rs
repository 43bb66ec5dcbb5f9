//! Neo4j store over Bolt.

use async_trait::async_trait;
use neo4rs::{query, ConfigBuilder, Graph, Row};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::queries::templates;
use super::schema::{GraphSchema, Property, RelationshipPattern};
use super::{GraphStore, Record};
use crate::config::Config;
use crate::error::{ChainError, ChainResult};

#[derive(Debug, Deserialize)]
struct NodeOutput {
    labels: String,
    properties: Vec<Property>,
}

#[derive(Debug, Deserialize)]
struct RelOutput {
    #[serde(rename = "type")]
    rel_type: String,
    properties: Vec<Property>,
}

/// Clone is cheap: `Graph` holds its connection pool behind an Arc.
#[derive(Clone)]
pub struct Neo4jStore {
    graph: Graph,
}

impl Neo4jStore {
    pub async fn connect(config: &Config) -> ChainResult<Self> {
        let password = config.neo4j_password.as_deref().ok_or_else(|| {
            ChainError::Configuration("NEO4J_PASSWORD is not set".to_string())
        })?;

        let mut builder = ConfigBuilder::default()
            .uri(config.neo4j_uri.as_str())
            .user(config.neo4j_username.as_str())
            .password(password)
            .max_connections(config.neo4j_max_connections);
        if let Some(db) = &config.neo4j_database {
            builder = builder.db(db.as_str());
        }

        let neo_config = builder
            .build()
            .map_err(|e| ChainError::Configuration(format!("Invalid Neo4j settings: {e}")))?;

        let graph = Graph::connect(neo_config)
            .await
            .map_err(|e| ChainError::Database(format!("Failed to connect to Neo4j: {e}")))?;

        info!(uri = %config.neo4j_uri, "Connected to Neo4j");
        Ok(Self { graph })
    }

    async fn rows(&self, cypher: &str) -> Result<Vec<Row>, neo4rs::Error> {
        let mut stream = self.graph.execute(query(cypher)).await?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }

    async fn schema_rows(&self, cypher: &str) -> ChainResult<Vec<Row>> {
        self.rows(cypher)
            .await
            .map_err(|e| ChainError::Database(format!("Schema introspection failed: {e}")))
    }
}

fn row_to_record(row: &Row) -> ChainResult<Record> {
    let value = row
        .to::<Value>()
        .map_err(|e| ChainError::Execution(format!("Failed to convert row to JSON: {e}")))?;

    Ok(match value {
        Value::Object(map) => map,
        other => {
            let mut map = Record::new();
            map.insert("value".to_string(), other);
            map
        }
    })
}

fn decode<T: serde::de::DeserializeOwned>(row: &Row, column: &str) -> ChainResult<T> {
    row.get::<T>(column)
        .map_err(|e| ChainError::Database(format!("Unexpected schema row: {e}")))
}

#[async_trait]
impl GraphStore for Neo4jStore {
    #[instrument(skip(self))]
    async fn refresh_schema(&self) -> ChainResult<GraphSchema> {
        let mut schema = GraphSchema::default();

        for row in self.schema_rows(templates::NODE_LABELS).await? {
            schema.add_label(decode::<String>(&row, "label")?);
        }
        for row in self.schema_rows(templates::RELATIONSHIP_TYPES).await? {
            schema.add_rel_type(decode::<String>(&row, "relationshipType")?);
        }
        for row in self.schema_rows(templates::NEO4J_NODE_PROPERTIES).await? {
            let output: NodeOutput = decode(&row, "output")?;
            for property in output.properties {
                schema.add_node_property(output.labels.clone(), property);
            }
        }
        for row in self.schema_rows(templates::NEO4J_REL_PROPERTIES).await? {
            let output: RelOutput = decode(&row, "output")?;
            for property in output.properties {
                schema.add_rel_property(output.rel_type.clone(), property);
            }
        }
        for row in self.schema_rows(templates::NEO4J_RELATIONSHIPS).await? {
            schema.add_relationship(decode::<RelationshipPattern>(&row, "output")?);
        }

        debug!(
            labels = schema.node_props.len(),
            rel_types = schema.rel_props.len(),
            "Neo4j schema refreshed"
        );
        Ok(schema)
    }

    #[instrument(skip(self))]
    async fn query(&self, cypher: &str) -> ChainResult<Vec<Record>> {
        let rows = self
            .rows(cypher)
            .await
            .map_err(|e| ChainError::Execution(e.to_string()))?;

        rows.iter().map(row_to_record).collect()
    }

    async fn ping(&self) -> ChainResult<()> {
        self.rows(templates::PING)
            .await
            .map(|_| ())
            .map_err(|e| ChainError::Database(format!("Neo4j ping failed: {e}")))
    }
}
