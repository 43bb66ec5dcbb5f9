#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use graph_chain::error::{ChainError, ChainResult};
use graph_chain::graph::{GraphSchema, GraphStore, Property, Record, RelationshipPattern};
use graph_chain::llm::LanguageModel;

pub const BURGER_QUERY: &str = r#"MATCH (d:Dish)-[:TYPE_OF]->(fc:FoodCategory)
WHERE apoc.text.levenshteinDistance(fc.name, "burger") < 2
RETURN COUNT(d) AS numberOfBurgerDishes"#;

pub fn restaurant_schema() -> GraphSchema {
    let mut schema = GraphSchema::default();
    schema.add_node_property("Dish", Property::new("name", "STRING"));
    schema.add_node_property("Dish", Property::new("price", "FLOAT"));
    schema.add_node_property("Dish", Property::new("description", "STRING"));
    schema.add_node_property("Place", Property::new("name", "STRING"));
    schema.add_node_property("Place", Property::new("description", "STRING"));
    schema.add_node_property("FoodCategory", Property::new("name", "STRING"));
    schema.add_relationship(RelationshipPattern::new("Place", "SERVES", "Dish"));
    schema.add_relationship(RelationshipPattern::new("Dish", "TYPE_OF", "FoodCategory"));
    schema
}

pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

pub fn burger_count() -> Vec<Record> {
    vec![record(json!({"numberOfBurgerDishes": 4}))]
}

/// In-memory graph: a fixed schema and canned rows for every query.
pub struct MockGraphStore {
    schema: GraphSchema,
    records: Vec<Record>,
    fail_with: Option<String>,
    pub executed: Mutex<Vec<String>>,
    pub schema_calls: AtomicUsize,
}

impl MockGraphStore {
    pub fn new(schema: GraphSchema, records: Vec<Record>) -> Self {
        Self {
            schema,
            records,
            fail_with: None,
            executed: Mutex::new(Vec::new()),
            schema_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(schema: GraphSchema, message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::new(schema, Vec::new())
        }
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }

    pub fn schema_calls(&self) -> usize {
        self.schema_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GraphStore for MockGraphStore {
    async fn refresh_schema(&self) -> ChainResult<GraphSchema> {
        self.schema_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.schema.clone())
    }

    async fn query(&self, cypher: &str) -> ChainResult<Vec<Record>> {
        self.executed.lock().unwrap().push(cypher.to_string());
        match &self.fail_with {
            Some(message) => Err(ChainError::Execution(message.clone())),
            None => Ok(self.records.clone()),
        }
    }
}

/// Replays completions in order and keeps every prompt it was given.
pub struct ScriptedModel {
    responses: Mutex<VecDeque<ChainResult<String>>>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_results(responses.into_iter().map(|r| Ok(r.into())))
    }

    pub fn with_results(responses: impl IntoIterator<Item = ChainResult<String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, prompt: &str) -> ChainResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ChainError::Llm("script exhausted".to_string())))
    }
}
