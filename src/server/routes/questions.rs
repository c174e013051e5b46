use std::collections::BTreeMap;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::get_all_categories,
            questions::{self, get_all_questions, search_questions},
        },
        NewQuestion, Question, StoreError,
    },
    server::{
        app::AppState,
        deserializers::deserialize_option_string_from_number,
        error::ApiError,
        pagination::{page_number, paginate},
    },
    telemetry::{QUESTIONS_CREATED, QUESTIONS_DELETED},
};

use super::{categories::category_map, ApiResponse, JsonBody, QueryParams, QuestionId};

#[derive(Deserialize)]
struct NewQuestionBody {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_string_from_number")]
    category: Option<String>,
    #[serde(default)]
    difficulty: Option<Value>,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Serialize)]
pub struct QuestionsPage {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: Option<String>,
    pub categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
pub struct Deleted {
    pub success: bool,
    pub id: i64,
}

#[derive(Serialize)]
pub struct Created {
    pub success: bool,
}

#[derive(Serialize)]
pub struct SearchResults {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    QueryParams(params): QueryParams<Vec<(String, String)>>,
) -> ApiResponse<QuestionsPage> {
    // a repeated `page` keeps its first value
    let page = page_number(
        params
            .iter()
            .find(|(key, _)| key == "page")
            .map(|(_, value)| value.as_str()),
    );
    let all_questions = get_all_questions(&pool).await?;
    let categories = category_map(get_all_categories(&pool).await?);

    let questions = paginate(&all_questions, page).to_vec();
    if questions.is_empty() {
        return Err(ApiError::NotFound(format!("page {page} has no questions")));
    }

    let current_category = questions
        .first()
        .and_then(|q| q.category.parse::<i64>().ok())
        .and_then(|id| categories.get(&id).cloned());

    Ok(Json(QuestionsPage {
        success: true,
        total_questions: questions.len(),
        questions,
        current_category,
        categories,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    QuestionId(id): QuestionId,
) -> ApiResponse<Deleted> {
    // absent and failed deletes are both reported as unprocessable on this route
    match questions::delete_question(&pool, id).await {
        Ok(()) => {
            QUESTIONS_DELETED.inc();
            tracing::info!("Deleted question {}", id);
            Ok(Json(Deleted { success: true, id }))
        }
        Err(StoreError::NotFound(id)) => {
            Err(ApiError::Unprocessable(format!("question {id} does not exist")))
        }
        Err(StoreError::Database(e)) => Err(ApiError::Unprocessable(e.to_string())),
    }
}

fn required_text(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(ApiError::BadRequest(format!("field {field} is required"))),
    }
}

fn validate(body: NewQuestionBody) -> Result<NewQuestion, ApiError> {
    let question = required_text(body.question, "question")?;
    let answer = required_text(body.answer, "answer")?;
    let category = required_text(body.category, "category")?;
    let difficulty = match body.difficulty {
        None | Some(Value::Null) => {
            return Err(ApiError::BadRequest("field difficulty is required".to_owned()))
        }
        Some(Value::Number(n)) if n.as_i64().is_some() => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    }
    .ok_or_else(|| ApiError::Unprocessable("difficulty must be an integer".to_owned()))?;

    Ok(NewQuestion {
        question,
        answer,
        category,
        difficulty,
    })
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

// a body that is not declared as JSON counts as no body at all
async fn create_question(
    State(pool): State<SqlitePool>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResponse<Created> {
    if !is_json(&headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::NotFound("request body is missing".to_owned()));
    }
    let body = serde_json::from_slice::<Option<NewQuestionBody>>(&body)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
        .ok_or_else(|| ApiError::NotFound("request body is null".to_owned()))?;
    let new_question = validate(body)?;

    let id = questions::create_question(&pool, &new_question)
        .await
        .map_err(|e| ApiError::Unprocessable(e.to_string()))?;
    QUESTIONS_CREATED.inc();
    tracing::info!("Created question {} in category {}", id, new_question.category);

    Ok(Json(Created { success: true }))
}

async fn search(
    State(pool): State<SqlitePool>,
    JsonBody(body): JsonBody<SearchBody>,
) -> ApiResponse<SearchResults> {
    let term = body
        .search_term
        .ok_or_else(|| ApiError::BadRequest("field searchTerm is required".to_owned()))?;
    let questions = search_questions(&pool, &term).await?;
    if questions.is_empty() {
        return Err(ApiError::NotFound(format!("nothing matches {term:?}")));
    }

    Ok(Json(SearchResults {
        success: true,
        total_questions: questions.len(),
        questions,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions))
        .route("/questions/{id}/delete", delete(delete_question))
        .route("/questions/create", post(create_question))
        .route("/questions/search", post(search))
        .with_state(state)
}
