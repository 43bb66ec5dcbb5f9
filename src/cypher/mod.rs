//! Post-processing and validation of LLM-generated Cypher.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

mod lexer;
pub mod patterns;
pub mod validator;

pub use self::validator::{validate, ValidatedQuery};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("empty query")]
    Empty,

    #[error("write clause not allowed: {0}")]
    WriteClause(String),

    #[error("procedure not allowed: {0}")]
    ProcedureNotAllowed(String),

    #[error("unknown node label: {0}")]
    UnknownLabel(String),

    #[error("unknown relationship type: {0}")]
    UnknownRelationshipType(String),

    #[error("unknown property {variable}.{property}")]
    UnknownProperty { variable: String, property: String },

    #[error("no relationship (:{start})-[:{rel_type}]-(:{end}) in schema")]
    UnsupportedPattern {
        start: String,
        rel_type: String,
        end: String,
    },

    #[error("syntax error: {0}")]
    Syntax(String),
}

lazy_static! {
    static ref CODE_FENCE: Regex =
        Regex::new(r"(?s)```[ \t]*(?:cypher|Cypher|CYPHER)?[ \t]*\r?\n?(.*?)```").unwrap();
}

/// Pull the query out of a completion, unwrapping the first fenced block if any.
pub fn extract_cypher(text: &str) -> String {
    match CODE_FENCE.captures(text).and_then(|c| c.get(1)) {
        Some(block) => block.as_str().trim().to_string(),
        None => text.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_completion() {
        assert_eq!(
            extract_cypher("  MATCH (n) RETURN n\n"),
            "MATCH (n) RETURN n"
        );
    }

    #[test]
    fn test_fenced_completion() {
        let text = "Here you go:\n```cypher\nMATCH (d:Dish) RETURN d\n```\nEnjoy.";
        assert_eq!(extract_cypher(text), "MATCH (d:Dish) RETURN d");
    }

    #[test]
    fn test_fence_without_language() {
        assert_eq!(extract_cypher("```\nRETURN 1\n```"), "RETURN 1");
    }

    #[test]
    fn test_only_first_block_is_used() {
        let text = "```cypher\nRETURN 1\n```\n```cypher\nRETURN 2\n```";
        assert_eq!(extract_cypher(text), "RETURN 1");
    }
}
