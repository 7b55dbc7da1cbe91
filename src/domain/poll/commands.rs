use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{is_storable_pub_date, MAX_TEXT_LENGTH};
use crate::services::response::ServiceError;

/// Creates a question along with its choices in one unit of work.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreatePoll {
	pub question_text: String,
	/// Publication instant; the current time when omitted.
	#[serde(default)]
	pub pub_date: Option<DateTime<Utc>>,
	#[serde(default)]
	pub choices: Vec<String>,
}

impl CreatePoll {
	pub(crate) fn validate(&self) -> Result<(), ServiceError> {
		validate_text("question_text", &self.question_text)?;
		if let Some(pub_date) = self.pub_date.as_ref().filter(|pub_date| !is_storable_pub_date(pub_date)) {
			return Err(ServiceError::BadRequest(format!("pub_date {pub_date} is outside years 0000-9999")));
		}
		self.choices.iter().try_for_each(|choice| validate_text("choice_text", choice))
	}
}

/// A vote as submitted by the detail form. `choice` is raw form input.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Vote {
	pub question_id: i64,
	pub choice: Option<String>,
}

impl Vote {
	pub(crate) fn choice_id(&self) -> Option<i64> {
		self.choice.as_deref().and_then(|raw| raw.trim().parse().ok())
	}
}

fn validate_text(
	field: &str,
	value: &str,
) -> Result<(), ServiceError> {
	if value.trim().is_empty() {
		return Err(ServiceError::BadRequest(format!("{field} must not be empty")));
	}
	if value.chars().count() > MAX_TEXT_LENGTH {
		return Err(ServiceError::BadRequest(format!("{field} must be at most {MAX_TEXT_LENGTH} characters")));
	}
	Ok(())
}
