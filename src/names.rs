pub const CATEGORIES_URL: &str = "/categories";
pub const QUESTIONS_URL: &str = "/questions";
pub const SEARCH_QUESTIONS_URL: &str = "/questions/search";
pub const QUIZZES_URL: &str = "/quizzes";
pub const QUESTION_ROUTE: &str = "/questions/{id}";
pub const CATEGORY_QUESTIONS_ROUTE: &str = "/categories/{id}/questions";

pub fn question_url(question_id: i32) -> String {
    format!("/questions/{question_id}")
}

pub fn category_questions_url(category_id: i32) -> String {
    format!("/categories/{category_id}/questions")
}

// Listing defaults
pub const QUESTIONS_PER_PAGE: usize = 10;

// Server defaults
pub const DEFAULT_ADDRESS: &str = "127.0.0.1:5000";
pub const DEFAULT_LOG_FILTER: &str = "tracing=info,trivia=debug";
