#![recursion_limit = "256"]

pub mod chain;
pub mod config;
pub mod cypher;
pub mod error;
pub mod graph;
pub mod handlers;
pub mod llm;
pub mod models;
pub mod prompt;

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<chain::GraphCypherChain>,
    pub store: Arc<dyn graph::GraphStore>,
    pub config: Arc<config::Config>,
}
