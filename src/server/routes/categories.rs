use std::collections::BTreeMap;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::queries::{
        categories::{count_categories, get_all_categories},
        questions::get_questions_for_category,
    },
    server::{
        app::AppState,
        deserializers::PageQuery,
        error::{ApiError, ApiResponse},
        extract::{IdPath, QueryParams},
        pagination::paginate,
    },
};

use crate::db::Question;

#[derive(Serialize)]
struct CategoriesResponse {
    success: bool,
    categories: BTreeMap<i64, String>,
    total_categories: i64,
}

#[derive(Serialize)]
struct CategoryQuestionsResponse {
    success: bool,
    current_category: i64,
    questions: Vec<Question>,
    total_questions: usize,
}

/// Category id to label, read fresh from the store on every call.
pub async fn category_index(pool: &SqlitePool) -> sqlx::Result<BTreeMap<i64, String>> {
    Ok(get_all_categories(pool)
        .await?
        .into_iter()
        .map(|c| (c.id, c.kind))
        .collect())
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<CategoriesResponse> {
    let categories = category_index(&pool).await?;
    Ok(Json(CategoriesResponse {
        success: true,
        categories,
        total_categories: count_categories(&pool).await?,
    }))
}

async fn questions_for_category(
    State(pool): State<SqlitePool>,
    IdPath(category_id): IdPath<i64>,
    QueryParams(PageQuery { page }): QueryParams<PageQuery>,
) -> ApiResponse<CategoryQuestionsResponse> {
    let questions = get_questions_for_category(&pool, category_id).await?;
    let total_questions = questions.len();
    let current = paginate(page, questions);
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        current_category: category_id,
        questions: current,
        total_questions,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route(
            "/categories/{category_id}/questions",
            get(questions_for_category),
        )
        .with_state(state)
}
