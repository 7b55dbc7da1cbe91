use chrono::{DateTime, Utc};

use crate::{
	domain::poll::entity::{is_storable_pub_date, Question},
	services::response::ServiceError,
};

use super::Repository;

impl Repository<Question> {
	pub async fn get(
		&self,
		id: i64,
	) -> Result<Question, ServiceError> {
		let executor = self.executor.read().await;
		sqlx::query_as::<_, Question>("SELECT id, question_text, pub_date FROM questions WHERE id = ?")
			.bind(id)
			.fetch_optional(executor.connection())
			.await?
			.ok_or(ServiceError::EntityNotFound)
	}

	/// Questions with `pub_date <= now`, newest first.
	pub async fn published_before(
		&self,
		now: DateTime<Utc>,
	) -> Result<Vec<Question>, ServiceError> {
		let executor = self.executor.read().await;
		let questions = sqlx::query_as::<_, Question>(
			"SELECT id, question_text, pub_date FROM questions WHERE pub_date <= ? ORDER BY pub_date DESC, id DESC",
		)
		.bind(now)
		.fetch_all(executor.connection())
		.await?;
		Ok(questions)
	}

	/// Inserts on the open transaction and returns the stored row.
	pub async fn create(
		&self,
		question_text: &str,
		pub_date: DateTime<Utc>,
	) -> Result<Question, ServiceError> {
		if !is_storable_pub_date(&pub_date) {
			return Err(ServiceError::BadRequest(format!("pub_date {pub_date} is outside years 0000-9999")));
		}
		let mut executor = self.executor.write().await;
		let stored = sqlx::query_as::<_, Question>(
			"INSERT INTO questions (question_text, pub_date) VALUES (?, ?) RETURNING id, question_text, pub_date",
		)
		.bind(question_text)
		.bind(pub_date)
		.fetch_one(&mut **executor.transaction()?)
		.await?;
		Ok(stored)
	}
}
