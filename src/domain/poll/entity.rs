use std::fmt::Display;

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Longest `question_text` / `choice_text` accepted on creation.
pub const MAX_TEXT_LENGTH: usize = 200;

/// `pub_date` is stored as RFC 3339 text and compared as text, which only
/// orders chronologically while the year has exactly four unsigned digits.
pub fn is_storable_pub_date(pub_date: &DateTime<Utc>) -> bool {
	(0..=9999).contains(&pub_date.year())
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Hash, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
	pub id: i64,
	pub question_text: String,
	pub pub_date: DateTime<Utc>,
}

impl Question {
	/// Builds an unsaved question. `id` stays 0 until the repository stores it.
	pub fn new(
		question_text: impl Into<String>,
		pub_date: DateTime<Utc>,
	) -> Self {
		Self {
			id: 0,
			question_text: question_text.into(),
			pub_date,
		}
	}

	pub fn was_published_recently(&self) -> bool {
		self.was_published_recently_at(Utc::now())
	}

	/// True iff `now - 1 day <= pub_date <= now`.
	pub fn was_published_recently_at(
		&self,
		now: DateTime<Utc>,
	) -> bool {
		now - Duration::days(1) <= self.pub_date && self.pub_date <= now
	}

	pub fn is_published_at(
		&self,
		now: DateTime<Utc>,
	) -> bool {
		self.pub_date <= now
	}
}

impl Display for Question {
	fn fmt(
		&self,
		f: &mut std::fmt::Formatter<'_>,
	) -> std::fmt::Result {
		write!(f, "{}", self.question_text)
	}
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Hash, Serialize, Deserialize, sqlx::FromRow)]
pub struct Choice {
	pub id: i64,
	pub question_id: i64,
	pub choice_text: String,
	pub votes: i64,
}

impl Choice {
	pub fn new(
		question: &Question,
		choice_text: impl Into<String>,
	) -> Self {
		Self {
			id: 0,
			question_id: question.id,
			choice_text: choice_text.into(),
			votes: 0,
		}
	}
}

impl Display for Choice {
	fn fmt(
		&self,
		f: &mut std::fmt::Formatter<'_>,
	) -> std::fmt::Result {
		write!(f, "{}", self.choice_text)
	}
}
