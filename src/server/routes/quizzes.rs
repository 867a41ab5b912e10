use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::questions::{get_all_questions, get_questions_for_category},
        Question,
    },
    server::{
        app::AppState,
        error::{ApiResponse, CatalogError},
        quiz::pick_question,
    },
    telemetry::QUIZ_QUESTIONS_SERVED,
};

/// `quiz_category.id` that draws from every category.
const ALL_CATEGORIES: i64 = 0;

#[derive(Deserialize)]
struct QuizCategory {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    id: Option<i64>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

#[derive(Deserialize)]
struct QuizRequest {
    #[serde(default)]
    quiz_category: Option<QuizCategory>,
    #[serde(default)]
    previous_questions: Option<Vec<i64>>,
}

#[derive(Serialize)]
struct QuizResponse {
    success: bool,
    question: Question,
}

async fn play_quiz(
    State(pool): State<SqlitePool>,
    body: Result<Json<QuizRequest>, JsonRejection>,
) -> ApiResponse<QuizResponse> {
    let Json(request) = body.map_err(CatalogError::from)?;
    let category = request
        .quiz_category
        .ok_or(CatalogError::MissingQuizCategory)?;
    let category_id = category.id.ok_or(CatalogError::MissingCategoryId)?;
    let previous = request
        .previous_questions
        .ok_or(CatalogError::MissingPreviousQuestions)?;

    let candidates = if category_id == ALL_CATEGORIES {
        get_all_questions(&pool).await
    } else {
        get_questions_for_category(&pool, category_id).await
    }
    .map_err(CatalogError::from)?;

    tracing::debug!(
        "Quiz over category {category_id} ({}), {} candidates, {} already asked",
        category.kind.as_deref().unwrap_or("unnamed"),
        candidates.len(),
        previous.len()
    );
    let question = pick_question(candidates, &previous, &mut rand::thread_rng())?;

    QUIZ_QUESTIONS_SERVED
        .with_label_values(&[category_id.to_string().as_str()])
        .inc();
    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

pub fn quiz_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(play_quiz))
        .with_state(state)
}
