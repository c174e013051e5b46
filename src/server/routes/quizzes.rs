use std::collections::HashSet;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::questions::{get_all_questions, get_questions_for_category},
        Question,
    },
    server::{app::AppState, deserializers::LenientId, error::ApiError, quiz::pick_question},
    telemetry::QUIZ_QUESTIONS_SERVED,
};

use super::{ApiResponse, JsonBody};

/// Category id that selects questions from every category.
const ALL_CATEGORIES: i64 = 0;

#[derive(Deserialize)]
struct QuizCategory {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

#[derive(Deserialize)]
struct QuizRequest {
    #[serde(default)]
    previous_questions: Option<Vec<LenientId>>,
    quiz_category: QuizCategory,
}

#[derive(Serialize)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Option<Question>,
}

async fn next_question(
    State(pool): State<SqlitePool>,
    JsonBody(request): JsonBody<QuizRequest>,
) -> ApiResponse<QuizResponse> {
    let category_id = request.quiz_category.id;
    let candidates = if category_id == ALL_CATEGORIES {
        get_all_questions(&pool).await?
    } else {
        get_questions_for_category(&pool, &category_id.to_string()).await?
    };
    if candidates.is_empty() {
        return Err(ApiError::NotFound(format!(
            "no questions in category {category_id}"
        )));
    }

    let previous: HashSet<i64> = request
        .previous_questions
        .unwrap_or_default()
        .into_iter()
        .map(|id| id.0)
        .collect();
    let question = pick_question(&candidates, &previous, &mut rand::rng()).cloned();

    match &question {
        Some(q) => {
            let label = if category_id == ALL_CATEGORIES {
                "all".to_owned()
            } else {
                category_id.to_string()
            };
            QUIZ_QUESTIONS_SERVED
                .with_label_values(&[label.as_str()])
                .inc();
            tracing::debug!("Serving question {} for category {}", q.id, category_id);
        }
        None => tracing::debug!(
            "Quiz for category {} exhausted after {} questions",
            category_id,
            previous.len()
        ),
    }

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
