use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};

use crate::{
    extractors::JsonBody,
    models::QuizBody,
    names,
    rejections::{AppError, ResultExt},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route(names::QUIZZES_URL, post(next_question))
}

/// `question` is `null` once every question of the category has been asked.
async fn next_question(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<QuizBody>,
) -> Result<Json<Value>, AppError> {
    let question = state
        .trivia
        .select_next(body.quiz_category.id, &body.previous_questions)
        .await
        .reject("could not select quiz question")?;

    Ok(Json(json!({
        "success": true,
        "question": question,
    })))
}
