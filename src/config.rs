use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use crate::error::{ChainError, ChainResult};

/// Optional settings file, read before the environment.
pub const CONFIG_FILE: &str = "graph-chain";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum GraphBackend {
    #[default]
    #[serde(rename = "neo4j")]
    Neo4j,
    #[serde(rename = "falkordb")]
    FalkorDb,
}

#[derive(Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub graph_backend: GraphBackend,

    #[serde(default = "default_neo4j_uri")]
    pub neo4j_uri: String,
    #[serde(default = "default_neo4j_username")]
    pub neo4j_username: String,
    #[serde(default)]
    pub neo4j_password: Option<String>,
    #[serde(default)]
    pub neo4j_database: Option<String>,
    #[serde(default = "default_max_connections")]
    pub neo4j_max_connections: usize,

    #[serde(default = "default_falkor_host")]
    pub falkordb_host: String,
    #[serde(default = "default_falkor_port")]
    pub falkordb_port: u16,
    #[serde(default = "default_graph_name")]
    pub graph_name: String,

    #[serde(default)]
    pub openai_api_key: Option<String>,
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    #[serde(default = "default_llm_timeout")]
    pub llm_timeout_secs: u64,

    #[serde(default = "default_few_shot_examples")]
    pub few_shot_examples: usize,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_true")]
    pub validate_cypher: bool,
    #[serde(default = "default_true")]
    pub sanitize_results: bool,
    #[serde(default)]
    pub return_intermediate_steps: bool,
    #[serde(default)]
    pub schema_cache_ttl_secs: u64,

    #[serde(default = "default_question")]
    pub default_question: String,
    #[serde(default = "default_max_question_chars")]
    pub max_question_chars: usize,
}

fn default_port() -> u16 {
    3005
}

fn default_neo4j_uri() -> String {
    "bolt://localhost:7687".to_string()
}

fn default_neo4j_username() -> String {
    "neo4j".to_string()
}

fn default_max_connections() -> usize {
    16
}

fn default_falkor_host() -> String {
    "localhost".to_string()
}

fn default_falkor_port() -> u16 {
    6379
}

fn default_graph_name() -> String {
    "restaurants".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o".to_string()
}

fn default_llm_timeout() -> u64 {
    60
}

fn default_few_shot_examples() -> usize {
    5
}

fn default_top_k() -> usize {
    10
}

fn default_true() -> bool {
    true
}

fn default_question() -> String {
    "How many dishes are burgers?".to_string()
}

fn default_max_question_chars() -> usize {
    1000
}

impl Config {
    /// Load from `graph-chain.toml` (if present) and then the process environment.
    pub fn from_env() -> ChainResult<Self> {
        Self::from_builder(
            config::Config::builder()
                .add_source(config::File::with_name(CONFIG_FILE).required(false))
                .add_source(environment()),
        )
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> ChainResult<Self> {
        let config: Config = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| ChainError::Configuration(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ChainResult<()> {
        if self.openai_api_key.as_deref().map_or(true, str::is_empty) {
            return Err(ChainError::Configuration(
                "OPENAI_API_KEY is not set".to_string(),
            ));
        }
        if self.graph_backend == GraphBackend::Neo4j && self.neo4j_password.is_none() {
            return Err(ChainError::Configuration(
                "NEO4J_PASSWORD is not set".to_string(),
            ));
        }
        if self.top_k == 0 {
            return Err(ChainError::Configuration(
                "TOP_K must be at least 1".to_string(),
            ));
        }
        if self.max_question_chars == 0 {
            return Err(ChainError::Configuration(
                "MAX_QUESTION_CHARS must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    /// `None` means the schema is fetched on every request.
    pub fn schema_cache_ttl(&self) -> Option<Duration> {
        (self.schema_cache_ttl_secs > 0).then(|| Duration::from_secs(self.schema_cache_ttl_secs))
    }
}

/// Values stay strings here; serde converts the numeric and boolean fields,
/// so secrets such as `007` are not turned into numbers.
fn environment() -> config::Environment {
    config::Environment::default()
}

// Hand-written so credentials never reach the logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("graph_backend", &self.graph_backend)
            .field("neo4j_uri", &self.neo4j_uri)
            .field("neo4j_username", &self.neo4j_username)
            .field("neo4j_database", &self.neo4j_database)
            .field("graph_name", &self.graph_name)
            .field("openai_base_url", &self.openai_base_url)
            .field("openai_model", &self.openai_model)
            .field("few_shot_examples", &self.few_shot_examples)
            .field("top_k", &self.top_k)
            .field("validate_cypher", &self.validate_cypher)
            .field("return_intermediate_steps", &self.return_intermediate_steps)
            .finish_non_exhaustive()
    }
}
