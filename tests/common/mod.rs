#![allow(dead_code)]

use trivia::db::{Category, Db, Question};

pub async fn create_test_db() -> Db {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let path =
        std::env::temp_dir().join(format!("trivia_test_{}_{}.db", std::process::id(), id));
    // Clean up leftover file from previous runs
    let _ = std::fs::remove_file(&path);
    let url = format!("sqlite://{}", path.display());
    Db::new(url).await.expect("failed to create test database")
}

pub async fn science(db: &Db) -> Category {
    db.insert_category("Science")
        .await
        .expect("insert category")
}

pub async fn add_question(db: &Db, question: &str, category: &str) -> Question {
    db.insert_question(question, "Test answer", category, 1)
        .await
        .expect("insert question")
}

/// Inserts `n` questions named "Question 1".."Question n" in `category`.
pub async fn add_questions(db: &Db, n: usize, category: &str) -> Vec<Question> {
    let mut questions = Vec::with_capacity(n);
    for i in 1..=n {
        questions.push(add_question(db, &format!("Question {i}"), category).await);
    }
    questions
}
