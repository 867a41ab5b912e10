use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;
use std::collections::BTreeMap;

use crate::{
    db::{
        queries::questions::{self, count_questions, get_all_questions, get_question_by_id},
        NewQuestion, Question,
    },
    server::{
        app::AppState,
        deserializers::PageQuery,
        error::{ApiError, ApiResponse, CatalogError},
        extract::{IdPath, QueryParams},
        pagination::paginate,
    },
    telemetry::QUESTIONS_CHANGED,
};

use super::category_index;

// every listing outside a single category reports this literal
const NO_CATEGORY: &str = "None";

#[derive(Deserialize)]
struct NewQuestionBody {
    question: Option<String>,
    answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    category: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    difficulty: Option<i64>,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm", default)]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsResponse {
    success: bool,
    current_category: &'static str,
    categories: BTreeMap<i64, String>,
    questions: Vec<Question>,
    total_questions: i64,
}

#[derive(Serialize)]
struct SearchResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: i64,
    current_category: &'static str,
}

#[derive(Serialize)]
struct DeletedResponse {
    success: bool,
    deleted: i64,
}

#[derive(Serialize)]
struct CreatedResponse {
    success: bool,
    created: i64,
    total_questions: i64,
}

async fn get_questions(
    State(pool): State<SqlitePool>,
    QueryParams(PageQuery { page }): QueryParams<PageQuery>,
) -> ApiResponse<QuestionsResponse> {
    let current = paginate(page, get_all_questions(&pool).await?);
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(QuestionsResponse {
        success: true,
        current_category: NO_CATEGORY,
        categories: category_index(&pool).await?,
        questions: current,
        total_questions: count_questions(&pool).await?,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    IdPath(question_id): IdPath<i64>,
) -> ApiResponse<DeletedResponse> {
    if get_question_by_id(&pool, question_id)
        .await
        .map_err(CatalogError::from)?
        .is_none()
    {
        return Err(CatalogError::QuestionMissing(question_id).into());
    }
    let deleted = questions::delete_question(&pool, question_id)
        .await
        .map_err(CatalogError::from)?;
    if deleted == 0 {
        return Err(CatalogError::QuestionMissing(question_id).into());
    }

    QUESTIONS_CHANGED.with_label_values(&["delete"]).inc();
    tracing::info!("Deleted question {question_id}");
    Ok(Json(DeletedResponse {
        success: true,
        deleted: question_id,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    body: Result<Json<NewQuestionBody>, JsonRejection>,
) -> ApiResponse<CreatedResponse> {
    let Json(body) = body.map_err(CatalogError::from)?;
    let id = questions::create_question(
        &pool,
        NewQuestion {
            question: body.question.as_deref(),
            answer: body.answer.as_deref(),
            category: body.category,
            difficulty: body.difficulty,
        },
    )
    .await
    .map_err(CatalogError::from)?;
    let total_questions = count_questions(&pool).await.map_err(CatalogError::from)?;

    QUESTIONS_CHANGED.with_label_values(&["create"]).inc();
    tracing::info!("Created question {id}");
    Ok(Json(CreatedResponse {
        success: true,
        created: id,
        total_questions,
    }))
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    QueryParams(PageQuery { page }): QueryParams<PageQuery>,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> ApiResponse<SearchResponse> {
    let Json(body) = body?;
    let Some(term) = body.search_term else {
        return Err(ApiError::BadRequest("searchTerm is required".to_owned()));
    };

    let results = questions::search_questions(&pool, &term).await?;
    if results.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(SearchResponse {
        success: true,
        questions: paginate(page, results),
        total_questions: count_questions(&pool).await?,
        current_category: NO_CATEGORY,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(get_questions))
        .route("/questions/{question_id}", delete(delete_question))
        .route("/questions/search", post(search_questions))
        .route("/add", post(create_question))
        .with_state(state)
}
