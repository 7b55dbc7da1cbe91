use crate::{domain::poll::entity::Choice, services::response::ServiceError};

use super::Repository;

impl Repository<Choice> {
	pub async fn list_for_question(
		&self,
		question_id: i64,
	) -> Result<Vec<Choice>, ServiceError> {
		let executor = self.executor.read().await;
		let choices = sqlx::query_as::<_, Choice>(
			"SELECT id, question_id, choice_text, votes FROM choices WHERE question_id = ? ORDER BY id",
		)
		.bind(question_id)
		.fetch_all(executor.connection())
		.await?;
		Ok(choices)
	}

	pub async fn add(
		&self,
		choice: &Choice,
	) -> Result<Choice, ServiceError> {
		let mut executor = self.executor.write().await;
		let stored = sqlx::query_as::<_, Choice>(
			"INSERT INTO choices (question_id, choice_text, votes) VALUES (?, ?, ?) RETURNING id, question_id, choice_text, votes",
		)
		.bind(choice.question_id)
		.bind(&choice.choice_text)
		.bind(choice.votes)
		.fetch_one(&mut **executor.transaction()?)
		.await?;
		Ok(stored)
	}

	/// Adds one vote in SQL. `None` when the choice does not belong to the question.
	pub async fn increment_votes(
		&self,
		question_id: i64,
		choice_id: i64,
	) -> Result<Option<Choice>, ServiceError> {
		let mut executor = self.executor.write().await;
		let updated = sqlx::query_as::<_, Choice>(
			"UPDATE choices SET votes = votes + 1 WHERE id = ? AND question_id = ? RETURNING id, question_id, choice_text, votes",
		)
		.bind(choice_id)
		.bind(question_id)
		.fetch_optional(&mut **executor.transaction()?)
		.await?;
		Ok(updated)
	}
}
