mod common;

use std::collections::HashSet;

use common::{add_question, add_questions, create_test_db, science};
use trivia::services::trivia::{
    CreateQuestionOutcome, DeleteQuestionOutcome, ListQuestionsOutcome, NewQuestion,
    SearchOutcome, TriviaService,
};

#[tokio::test]
async fn test_select_next_walks_category_without_repeats() {
    let db = create_test_db().await;
    let science = science(&db).await;
    let category = science.id.to_string();
    let questions = add_questions(&db, 6, &category).await;
    add_questions(&db, 4, "99").await;
    let svc = TriviaService::new(db);

    let expected: HashSet<i32> = questions.iter().map(|q| q.id).collect();
    let mut previous = Vec::new();

    while let Some(next) = svc.select_next(Some(science.id), &previous).await.unwrap() {
        assert_eq!(next.category, category);
        assert!(!previous.contains(&next.id), "question {} served twice", next.id);
        previous.push(next.id);
    }

    let served: HashSet<i32> = previous.iter().copied().collect();
    assert_eq!(served, expected);
}

#[tokio::test]
async fn test_select_next_without_category_draws_from_everything() {
    let db = create_test_db().await;
    let all = add_questions(&db, 3, "1").await;
    add_questions(&db, 2, "2").await;
    let svc = TriviaService::new(db);

    let previous: Vec<i32> = all.iter().map(|q| q.id).collect();

    let next = svc.select_next(None, &previous).await.unwrap().unwrap();
    assert_eq!(next.category, "2");

    let next = svc.select_next(Some(0), &previous).await.unwrap().unwrap();
    assert_eq!(next.category, "2");
}

#[tokio::test]
async fn test_select_next_single_question_scenario() {
    let db = create_test_db().await;
    let science = science(&db).await;
    let question = add_question(&db, "Test question", &science.id.to_string()).await;
    let svc = TriviaService::new(db);

    let next = svc.select_next(Some(science.id), &[]).await.unwrap();
    assert_eq!(next, Some(question.clone()));

    let next = svc.select_next(Some(science.id), &[question.id]).await.unwrap();
    assert!(next.is_none());

    // No questions in another category
    let next = svc.select_next(Some(science.id + 1), &[]).await.unwrap();
    assert!(next.is_none());
}

#[tokio::test]
async fn test_list_questions_pages() {
    let db = create_test_db().await;
    science(&db).await;
    let questions = add_questions(&db, 12, "1").await;
    let svc = TriviaService::new(db);

    let ListQuestionsOutcome::Page { page, categories } = svc.list_questions(1).await.unwrap()
    else {
        panic!("page 1 should exist");
    };
    assert_eq!(page.questions, questions[..10].to_vec());
    assert_eq!(page.total_questions, 12);
    assert_eq!(categories.get(&1).map(String::as_str), Some("Science"));

    let ListQuestionsOutcome::Page { page, .. } = svc.list_questions(2).await.unwrap() else {
        panic!("page 2 should exist");
    };
    assert_eq!(page.questions, questions[10..].to_vec());

    assert!(matches!(
        svc.list_questions(3).await.unwrap(),
        ListQuestionsOutcome::PageNotFound
    ));
}

#[tokio::test]
async fn test_search_through_service() {
    let db = create_test_db().await;
    add_question(&db, "What is the capital of France?", "3").await;
    add_question(&db, "Who painted the Mona Lisa?", "2").await;
    let svc = TriviaService::new(db);

    assert!(matches!(
        svc.search(Some(""), 1).await.unwrap(),
        SearchOutcome::MissingTerm
    ));

    let SearchOutcome::Results(upper) = svc.search(Some("Capital"), 1).await.unwrap() else {
        panic!("expected results");
    };
    let SearchOutcome::Results(lower) = svc.search(Some("capital"), 1).await.unwrap() else {
        panic!("expected results");
    };
    assert_eq!(upper.questions, lower.questions);
    assert_eq!(upper.total_questions, 1);
}

#[tokio::test]
async fn test_create_then_delete_round_trip() {
    let db = create_test_db().await;
    let svc = TriviaService::new(db);

    let outcome = svc
        .create_question(NewQuestion {
            question: Some("What is the capital of France?".to_string()),
            answer: Some("Paris".to_string()),
            category: Some("1".to_string()),
            difficulty: Some(1),
        })
        .await
        .unwrap();
    let CreateQuestionOutcome::Created(created) = outcome else {
        panic!("question should be created");
    };

    let fetched = svc.get_question(created.id).await.unwrap();
    assert_eq!(fetched, Some(created.clone()));

    assert!(matches!(
        svc.delete_question(created.id).await.unwrap(),
        DeleteQuestionOutcome::Deleted(id) if id == created.id
    ));
    assert!(svc.get_question(created.id).await.unwrap().is_none());
    assert!(matches!(
        svc.delete_question(created.id).await.unwrap(),
        DeleteQuestionOutcome::NotFound
    ));
}
