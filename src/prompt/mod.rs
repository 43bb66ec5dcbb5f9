//! Prompts for the two LLM calls: Cypher generation and answer synthesis.

use std::collections::HashMap;

use crate::error::ChainResult;

pub mod examples;
pub mod template;

pub use self::examples::{FewShotExample, EXAMPLES};
pub use self::template::PromptTemplate;

pub const CYPHER_PREFIX: &str = "You are a Neo4j expert. Given an input question, create a syntactically correct Cypher query to run.

Here is the schema information
{schema}.

Always use lowercase when comparing text within a cypher.

Below are a number of examples of questions and their corresponding Cypher queries.";

pub const EXAMPLE_TEMPLATE: &str = "User input: {question}\nCypher query: {query}";

pub const CYPHER_SUFFIX: &str = "User input: {question}\nCypher query: ";

pub const CYPHER_QA_TEMPLATE: &str = "You are an assistant that helps to form nice and human understandable answers.
The information part contains the provided information that you must use to construct an answer.
The provided information is authoritative, you must never doubt it or try to use your internal knowledge to correct it.
Make the answer sound as a response to the question. Do not mention that you based the result on the given information.
Here is an example:

Question: Which places serve pizza?
Context: [{{\"placeName\": \"Pizza Palace\"}}, {{\"placeName\": \"Burtons Grill\"}}]
Helpful Answer: Pizza Palace and Burtons Grill serve pizza.

Follow this example when generating answers.
If the provided information is empty, say that you don't know the answer.
Information:
{context}

Question: {question}
Helpful Answer:";

const SEPARATOR: &str = "\n\n";

/// Few-shot Cypher generation prompt: prefix, examples, suffix.
#[derive(Debug, Clone)]
pub struct CypherPrompt {
    prefix: PromptTemplate,
    example: PromptTemplate,
    suffix: PromptTemplate,
    examples: Vec<FewShotExample>,
}

impl CypherPrompt {
    /// Use the first `count` entries of `examples`.
    pub fn new(examples: &[FewShotExample], count: usize) -> ChainResult<Self> {
        Ok(Self {
            prefix: PromptTemplate::from_template(CYPHER_PREFIX)?,
            example: PromptTemplate::from_template(EXAMPLE_TEMPLATE)?,
            suffix: PromptTemplate::from_template(CYPHER_SUFFIX)?,
            examples: examples.iter().take(count).copied().collect(),
        })
    }

    pub fn examples(&self) -> &[FewShotExample] {
        &self.examples
    }

    pub fn render(&self, schema: &str, question: &str) -> ChainResult<String> {
        let mut parts = Vec::with_capacity(self.examples.len() + 2);
        parts.push(self.prefix.format(&HashMap::from([("schema", schema)]))?);

        for example in &self.examples {
            parts.push(self.example.format(&HashMap::from([
                ("question", example.question),
                ("query", example.query),
            ]))?);
        }

        parts.push(self.suffix.format(&HashMap::from([("question", question)]))?);
        Ok(parts.join(SEPARATOR))
    }
}

/// Answer-synthesis prompt; `context` is the JSON-encoded result rows.
#[derive(Debug, Clone)]
pub struct QaPrompt {
    template: PromptTemplate,
}

impl QaPrompt {
    pub fn new() -> ChainResult<Self> {
        Ok(Self {
            template: PromptTemplate::from_template(CYPHER_QA_TEMPLATE)?,
        })
    }

    pub fn render(&self, question: &str, context: &str) -> ChainResult<String> {
        self.template
            .format(&HashMap::from([("question", question), ("context", context)]))
    }
}
