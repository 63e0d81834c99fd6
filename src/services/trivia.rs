use std::collections::BTreeMap;

use color_eyre::Result;
use rand::seq::SliceRandom;

use crate::db::models::{Category, Question};
use crate::db::Db;
use crate::names;
use crate::pagination;

// ---------------------------------------------------------------------------
// QuestionStore trait (DIP: service defines the abstraction it needs)
// ---------------------------------------------------------------------------

/// Everything is returned in ascending id order.
#[cfg_attr(test, mockall::automock)]
pub trait QuestionStore: Send + Sync {
    fn list_questions(&self) -> impl std::future::Future<Output = Result<Vec<Question>>> + Send;

    fn list_categories(&self) -> impl std::future::Future<Output = Result<Vec<Category>>> + Send;

    fn get_category(
        &self,
        category_id: i32,
    ) -> impl std::future::Future<Output = Result<Option<Category>>> + Send;

    fn get_question(
        &self,
        question_id: i32,
    ) -> impl std::future::Future<Output = Result<Option<Question>>> + Send;

    fn filter_questions_by_category(
        &self,
        category_id: i32,
    ) -> impl std::future::Future<Output = Result<Vec<Question>>> + Send;

    fn filter_questions_excluding(
        &self,
        excluded_ids: &[i32],
    ) -> impl std::future::Future<Output = Result<Vec<Question>>> + Send;

    fn filter_questions_by_category_excluding(
        &self,
        category_id: i32,
        excluded_ids: &[i32],
    ) -> impl std::future::Future<Output = Result<Vec<Question>>> + Send;

    /// Case-insensitive substring match against the question text only.
    fn search_questions_by_text(
        &self,
        term: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Question>>> + Send;

    fn insert_question(
        &self,
        question: &str,
        answer: &str,
        category: &str,
        difficulty: i32,
    ) -> impl std::future::Future<Output = Result<Question>> + Send;

    /// Resolves to `false` when no question had that id.
    fn delete_question(
        &self,
        question_id: i32,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;
}

impl QuestionStore for Db {
    async fn list_questions(&self) -> Result<Vec<Question>> {
        Db::list_questions(self).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        Db::list_categories(self).await
    }

    async fn get_category(&self, category_id: i32) -> Result<Option<Category>> {
        Db::get_category(self, category_id).await
    }

    async fn get_question(&self, question_id: i32) -> Result<Option<Question>> {
        Db::get_question(self, question_id).await
    }

    async fn filter_questions_by_category(&self, category_id: i32) -> Result<Vec<Question>> {
        Db::filter_questions_by_category(self, category_id).await
    }

    async fn filter_questions_excluding(&self, excluded_ids: &[i32]) -> Result<Vec<Question>> {
        Db::filter_questions_excluding(self, excluded_ids).await
    }

    async fn filter_questions_by_category_excluding(
        &self,
        category_id: i32,
        excluded_ids: &[i32],
    ) -> Result<Vec<Question>> {
        Db::filter_questions_by_category_excluding(self, category_id, excluded_ids).await
    }

    async fn search_questions_by_text(&self, term: &str) -> Result<Vec<Question>> {
        Db::search_questions_by_text(self, term).await
    }

    async fn insert_question(
        &self,
        question: &str,
        answer: &str,
        category: &str,
        difficulty: i32,
    ) -> Result<Question> {
        Db::insert_question(self, question, answer, category, difficulty).await
    }

    async fn delete_question(&self, question_id: i32) -> Result<bool> {
        Db::delete_question(self, question_id).await
    }
}

// ---------------------------------------------------------------------------
// Outcome enums
// ---------------------------------------------------------------------------

/// One page of a question listing plus the size of the whole listing.
#[derive(Debug)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

impl QuestionPage {
    fn cut(page: i64, all: Vec<Question>) -> Self {
        let questions = pagination::paginate(page, names::QUESTIONS_PER_PAGE, &all).to_vec();
        Self {
            questions,
            total_questions: all.len(),
        }
    }
}

pub enum ListQuestionsOutcome {
    Page {
        page: QuestionPage,
        categories: BTreeMap<i32, String>,
    },
    /// The requested page holds no questions.
    PageNotFound,
}

pub enum CategoryQuestionsOutcome {
    Page {
        page: QuestionPage,
        category: Category,
    },
    CategoryNotFound,
}

pub enum SearchOutcome {
    Results(QuestionPage),
    /// Empty or absent search term.
    MissingTerm,
}

pub enum CreateQuestionOutcome {
    Created(Question),
    /// Question, answer or category empty, or difficulty absent/zero.
    MissingFields,
}

pub enum DeleteQuestionOutcome {
    Deleted(i32),
    NotFound,
}

/// Fields of a question to create, as received from the caller.
#[derive(Debug, Default)]
pub struct NewQuestion {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<i32>,
}

// ---------------------------------------------------------------------------
// TriviaService
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct TriviaService<S: QuestionStore = Db> {
    store: S,
}

impl<S: QuestionStore> TriviaService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Category id -> type label, for every stored category.
    pub async fn categories(&self) -> Result<BTreeMap<i32, String>> {
        let categories = self.store.list_categories().await?;
        Ok(categories.into_iter().map(|c| (c.id, c.kind)).collect())
    }

    pub async fn lookup_category(&self, category_id: i32) -> Result<Option<Category>> {
        self.store.get_category(category_id).await
    }

    pub async fn get_question(&self, question_id: i32) -> Result<Option<Question>> {
        self.store.get_question(question_id).await
    }

    pub async fn list_questions(&self, page: i64) -> Result<ListQuestionsOutcome> {
        let all = self.store.list_questions().await?;
        let page = QuestionPage::cut(page, all);

        if page.questions.is_empty() {
            return Ok(ListQuestionsOutcome::PageNotFound);
        }

        let categories = self.categories().await?;

        Ok(ListQuestionsOutcome::Page { page, categories })
    }

    pub async fn questions_in_category(
        &self,
        category_id: i32,
        page: i64,
    ) -> Result<CategoryQuestionsOutcome> {
        let Some(category) = self.lookup_category(category_id).await? else {
            return Ok(CategoryQuestionsOutcome::CategoryNotFound);
        };

        let all = self.store.filter_questions_by_category(category_id).await?;

        Ok(CategoryQuestionsOutcome::Page {
            page: QuestionPage::cut(page, all),
            category,
        })
    }

    pub async fn search(&self, term: Option<&str>, page: i64) -> Result<SearchOutcome> {
        let term = match term {
            Some(term) if !term.is_empty() => term,
            _ => return Ok(SearchOutcome::MissingTerm),
        };

        let matches = self.store.search_questions_by_text(term).await?;

        Ok(SearchOutcome::Results(QuestionPage::cut(page, matches)))
    }

    /// The category is stored as given; it is not checked against existing categories.
    pub async fn create_question(&self, new: NewQuestion) -> Result<CreateQuestionOutcome> {
        let (Some(question), Some(answer), Some(category), Some(difficulty)) =
            (new.question, new.answer, new.category, new.difficulty)
        else {
            return Ok(CreateQuestionOutcome::MissingFields);
        };

        if question.is_empty() || answer.is_empty() || category.is_empty() || difficulty == 0 {
            return Ok(CreateQuestionOutcome::MissingFields);
        }

        let created = self
            .store
            .insert_question(&question, &answer, &category, difficulty)
            .await?;

        Ok(CreateQuestionOutcome::Created(created))
    }

    pub async fn delete_question(&self, question_id: i32) -> Result<DeleteQuestionOutcome> {
        if self.store.delete_question(question_id).await? {
            Ok(DeleteQuestionOutcome::Deleted(question_id))
        } else {
            Ok(DeleteQuestionOutcome::NotFound)
        }
    }

    /// Pick the next quiz question uniformly at random among the questions not in
    /// `previous_ids`, restricted to `category_id` unless it is absent or zero.
    ///
    /// `None` means the pool is exhausted. The returned question is not recorded
    /// anywhere; the caller adds its id to `previous_ids` for the next call.
    pub async fn select_next(
        &self,
        category_id: Option<i32>,
        previous_ids: &[i32],
    ) -> Result<Option<Question>> {
        let candidates = match category_id {
            Some(category_id) if category_id != 0 => {
                self.store
                    .filter_questions_by_category_excluding(category_id, previous_ids)
                    .await?
            }
            _ => self.store.filter_questions_excluding(previous_ids).await?,
        };

        tracing::debug!(
            "quiz candidate pool: category={category_id:?}, excluded={}, candidates={}",
            previous_ids.len(),
            candidates.len()
        );

        Ok(candidates.choose(&mut rand::thread_rng()).cloned())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
