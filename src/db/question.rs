use color_eyre::Result;
use sqlx::{QueryBuilder, Sqlite};

use super::models::Question;
use super::Db;

const SELECT_QUESTIONS: &str = "SELECT id, question, answer, category, difficulty FROM questions";

impl Db {
    pub async fn list_questions(&self) -> Result<Vec<Question>> {
        let questions =
            sqlx::query_as::<_, Question>(&format!("{SELECT_QUESTIONS} ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;

        Ok(questions)
    }

    pub async fn get_question(&self, question_id: i32) -> Result<Option<Question>> {
        let question = sqlx::query_as::<_, Question>(&format!("{SELECT_QUESTIONS} WHERE id = ?"))
            .bind(question_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(question)
    }

    pub async fn filter_questions_by_category(&self, category_id: i32) -> Result<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(&format!(
            "{SELECT_QUESTIONS} WHERE category = ? ORDER BY id"
        ))
        .bind(category_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    pub async fn filter_questions_excluding(&self, excluded_ids: &[i32]) -> Result<Vec<Question>> {
        self.filter_questions(None, excluded_ids).await
    }

    pub async fn filter_questions_by_category_excluding(
        &self,
        category_id: i32,
        excluded_ids: &[i32],
    ) -> Result<Vec<Question>> {
        self.filter_questions(Some(category_id), excluded_ids).await
    }

    /// Case-insensitive substring match on the question text.
    ///
    /// Folding happens here rather than in SQL: SQLite's `lower` only maps ASCII letters.
    pub async fn search_questions_by_text(&self, term: &str) -> Result<Vec<Question>> {
        let needle = term.to_lowercase();
        let questions = self
            .list_questions()
            .await?
            .into_iter()
            .filter(|q| q.question.to_lowercase().contains(&needle))
            .collect();

        Ok(questions)
    }

    pub async fn insert_question(
        &self,
        question: &str,
        answer: &str,
        category: &str,
        difficulty: i32,
    ) -> Result<Question> {
        let created = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (question, answer, category, difficulty)
            VALUES (?, ?, ?, ?)
            RETURNING id, question, answer, category, difficulty
            "#,
        )
        .bind(question)
        .bind(answer)
        .bind(category)
        .bind(difficulty)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("new question created with id: {}", created.id);
        Ok(created)
    }

    /// Returns `false` when no question had that id.
    pub async fn delete_question(&self, question_id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM questions WHERE id = ?")
            .bind(question_id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!("question {question_id} deleted");
        }
        Ok(deleted)
    }

    async fn filter_questions(
        &self,
        category_id: Option<i32>,
        excluded_ids: &[i32],
    ) -> Result<Vec<Question>> {
        let mut query = QueryBuilder::<Sqlite>::new(SELECT_QUESTIONS);
        query.push(" WHERE 1 = 1");

        if let Some(category_id) = category_id {
            query.push(" AND category = ").push_bind(category_id.to_string());
        }

        if !excluded_ids.is_empty() {
            query.push(" AND id NOT IN (");
            let mut ids = query.separated(", ");
            for id in excluded_ids {
                ids.push_bind(*id);
            }
            ids.push_unseparated(")");
        }

        query.push(" ORDER BY id");

        let questions = query
            .build_query_as::<Question>()
            .fetch_all(&self.pool)
            .await?;

        Ok(questions)
    }
}
