use axum::{
    extract::{Query, State},
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::{ChainError, ChainResult};
use crate::models::{AskParams, AskResponse};
use crate::AppState;

#[instrument(skip(state), fields(request_id = %Uuid::new_v4()))]
pub async fn ask_handler(
    State(state): State<AppState>,
    Query(params): Query<AskParams>,
) -> ChainResult<Json<AskResponse>> {
    let start = std::time::Instant::now();

    let question = match params.question {
        Some(question) => question,
        None => state.config.default_question.clone(),
    };
    check_question(&question, state.config.max_question_chars)?;

    let output = state.chain.run(question.trim()).await?;

    info!("Answered in {}ms", start.elapsed().as_millis());

    Ok(Json(AskResponse {
        message: output.answer,
        intermediate_steps: output.intermediate_steps,
    }))
}

fn check_question(question: &str, max_chars: usize) -> ChainResult<()> {
    if question.trim().is_empty() {
        return Err(ChainError::InvalidRequest(
            "question must not be empty".to_string(),
        ));
    }
    if question.chars().count() > max_chars {
        return Err(ChainError::InvalidRequest(format!(
            "question is longer than {} characters",
            max_chars
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_question() {
        assert!(check_question("How many dishes are burgers?", 1000).is_ok());
        assert!(check_question("   ", 1000).is_err());
        assert!(check_question("ab", 1).is_err());
        // counted in characters, not bytes
        assert!(check_question("ééé", 3).is_ok());
    }
}
