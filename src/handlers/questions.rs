use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::{
    extractors::{JsonBody, Page},
    models::{NewQuestionBody, SearchBody},
    names,
    rejections::{AppError, ResultExt},
    services::trivia::{
        CreateQuestionOutcome, DeleteQuestionOutcome, ListQuestionsOutcome, SearchOutcome,
    },
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::QUESTIONS_URL, get(list_questions).post(create_question))
        .route(names::SEARCH_QUESTIONS_URL, post(search_questions))
        .route(names::QUESTION_ROUTE, get(get_question).delete(delete_question))
}

async fn list_questions(
    State(state): State<AppState>,
    Page(page): Page,
) -> Result<Json<Value>, AppError> {
    let outcome = state
        .trivia
        .list_questions(page)
        .await
        .reject("could not list questions")?;

    match outcome {
        ListQuestionsOutcome::Page { page, categories } => Ok(Json(json!({
            "success": true,
            "questions": page.questions,
            "total_questions": page.total_questions,
            "categories": categories,
            "current_category": null,
        }))),
        ListQuestionsOutcome::PageNotFound => Err(AppError::NotFound),
    }
}

async fn get_question(
    State(state): State<AppState>,
    Path(question_id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let question = state
        .trivia
        .get_question(question_id)
        .await
        .reject("could not get question")?
        .ok_or(AppError::NotFound)?;

    Ok(Json(json!({
        "success": true,
        "question": question,
    })))
}

async fn create_question(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewQuestionBody>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let outcome = state
        .trivia
        .create_question(body.into())
        .await
        .reject_input("could not create question")?;

    match outcome {
        CreateQuestionOutcome::Created(question) => {
            tracing::info!("created question {} in category {}", question.id, question.category);
            Ok((
                StatusCode::CREATED,
                Json(json!({
                    "success": true,
                    "created": question.id,
                })),
            ))
        }
        CreateQuestionOutcome::MissingFields => Err(AppError::Input("missing question fields")),
    }
}

async fn delete_question(
    State(state): State<AppState>,
    Path(question_id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let outcome = state
        .trivia
        .delete_question(question_id)
        .await
        .reject_input("could not delete question")?;

    match outcome {
        DeleteQuestionOutcome::Deleted(id) => Ok(Json(json!({
            "success": true,
            "deleted": id,
        }))),
        DeleteQuestionOutcome::NotFound => Err(AppError::NotFound),
    }
}

async fn search_questions(
    State(state): State<AppState>,
    Page(page): Page,
    JsonBody(body): JsonBody<SearchBody>,
) -> Result<Json<Value>, AppError> {
    let outcome = state
        .trivia
        .search(body.search_term.as_deref(), page)
        .await
        .reject("could not search questions")?;

    match outcome {
        SearchOutcome::Results(page) => Ok(Json(json!({
            "success": true,
            "questions": page.questions,
            "total_questions": page.total_questions,
            "current_category": null,
        }))),
        SearchOutcome::MissingTerm => Err(AppError::Input("missing search term")),
    }
}
