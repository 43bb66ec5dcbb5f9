//! Question → Cypher → records → answer.

use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::cypher::{self, ValidationError};
use crate::error::{ChainError, ChainResult};
use crate::graph::{sanitize_record, GraphSchema, GraphStore, Record};
use crate::llm::LanguageModel;
use crate::prompt::{CypherPrompt, QaPrompt, EXAMPLES};

#[derive(Debug, Clone)]
pub struct ChainOptions {
    pub few_shot_examples: usize,
    pub top_k: usize,
    pub validate_cypher: bool,
    pub sanitize_results: bool,
    pub return_intermediate_steps: bool,
    pub schema_cache_ttl: Option<Duration>,
}

impl Default for ChainOptions {
    fn default() -> Self {
        Self {
            few_shot_examples: 5,
            top_k: 10,
            validate_cypher: true,
            sanitize_results: true,
            return_intermediate_steps: false,
            schema_cache_ttl: None,
        }
    }
}

impl From<&Config> for ChainOptions {
    fn from(config: &Config) -> Self {
        Self {
            few_shot_examples: config.few_shot_examples,
            top_k: config.top_k,
            validate_cypher: config.validate_cypher,
            sanitize_results: config.sanitize_results,
            return_intermediate_steps: config.return_intermediate_steps,
            schema_cache_ttl: config.schema_cache_ttl(),
        }
    }
}

/// The query that ran and the records the answer was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntermediateSteps {
    pub query: String,
    pub context: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChainOutput {
    pub answer: String,
    pub intermediate_steps: Option<IntermediateSteps>,
}

pub struct GraphCypherChain {
    store: Arc<dyn GraphStore>,
    llm: Arc<dyn LanguageModel>,
    cypher_prompt: CypherPrompt,
    qa_prompt: QaPrompt,
    options: ChainOptions,
    schema_cache: RwLock<Option<(Instant, Arc<GraphSchema>)>>,
}

impl GraphCypherChain {
    pub fn new(
        store: Arc<dyn GraphStore>,
        llm: Arc<dyn LanguageModel>,
        options: ChainOptions,
    ) -> ChainResult<Self> {
        Ok(Self {
            store,
            llm,
            cypher_prompt: CypherPrompt::new(EXAMPLES, options.few_shot_examples)?,
            qa_prompt: QaPrompt::new()?,
            options,
            schema_cache: RwLock::new(None),
        })
    }

    pub fn from_config(
        store: Arc<dyn GraphStore>,
        llm: Arc<dyn LanguageModel>,
        config: &Config,
    ) -> ChainResult<Self> {
        Self::new(store, llm, ChainOptions::from(config))
    }

    pub fn options(&self) -> &ChainOptions {
        &self.options
    }

    #[instrument(skip(self))]
    pub async fn run(&self, question: &str) -> ChainResult<ChainOutput> {
        let schema = self.schema().await?;

        let prompt = self
            .cypher_prompt
            .render(&schema.to_prompt_text(), question)?;
        let completion = self.llm.complete(&prompt).await?;
        let generated = cypher::extract_cypher(&completion);
        debug!("Generated Cypher: {}", generated);

        let query = if self.options.validate_cypher {
            let validated = cypher::validate(&generated, &schema)?;
            if validated.corrected {
                debug!("Corrected Cypher: {}", validated.query);
            }
            validated.query
        } else if generated.is_empty() {
            return Err(ChainError::InvalidQuery(ValidationError::Empty));
        } else {
            generated
        };

        let mut records = self.store.query(&query).await?;
        info!("Query returned {} records", records.len());

        records.truncate(self.options.top_k);
        if self.options.sanitize_results {
            records = records.into_iter().map(sanitize_record).collect();
        }

        let context = serde_json::to_string(&records)?;
        let qa_prompt = self.qa_prompt.render(question, &context)?;
        let answer = self.llm.complete(&qa_prompt).await?;

        let intermediate_steps = self.options.return_intermediate_steps.then(|| IntermediateSteps {
            query,
            context: records,
        });

        Ok(ChainOutput {
            answer,
            intermediate_steps,
        })
    }

    async fn schema(&self) -> ChainResult<Arc<GraphSchema>> {
        let Some(ttl) = self.options.schema_cache_ttl else {
            return Ok(Arc::new(self.store.refresh_schema().await?));
        };

        if let Some((fetched_at, schema)) = self.schema_cache.read().await.as_ref() {
            if fetched_at.elapsed() < ttl {
                return Ok(Arc::clone(schema));
            }
        }

        let mut cache = self.schema_cache.write().await;
        // Another request may have refreshed it while we waited.
        if let Some((fetched_at, schema)) = cache.as_ref() {
            if fetched_at.elapsed() < ttl {
                return Ok(Arc::clone(schema));
            }
        }

        let schema = Arc::new(self.store.refresh_schema().await?);
        debug!("Schema cached for {:?}", ttl);
        *cache = Some((Instant::now(), Arc::clone(&schema)));
        Ok(schema)
    }
}
