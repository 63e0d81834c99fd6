use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::{
    extractors::Page,
    names,
    rejections::{AppError, ResultExt},
    services::trivia::CategoryQuestionsOutcome,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::CATEGORIES_URL, get(list_categories))
        .route(names::CATEGORY_QUESTIONS_ROUTE, get(category_questions))
}

async fn list_categories(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let categories = state
        .trivia
        .categories()
        .await
        .reject("could not get categories")?;

    Ok(Json(json!({
        "success": true,
        "categories": categories,
    })))
}

async fn category_questions(
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
    Page(page): Page,
) -> Result<Json<Value>, AppError> {
    let outcome = state
        .trivia
        .questions_in_category(category_id, page)
        .await
        .reject("could not get questions for category")?;

    match outcome {
        CategoryQuestionsOutcome::Page { page, category } => Ok(Json(json!({
            "success": true,
            "questions": page.questions,
            "total_questions": page.total_questions,
            "current_category": category.id,
        }))),
        CategoryQuestionsOutcome::CategoryNotFound => Err(AppError::NotFound),
    }
}
