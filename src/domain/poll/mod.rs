use std::ops::Deref;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use self::entity::{Choice, Question};
pub mod commands;
pub mod entity;

/// A question together with its choices, ordered by choice id.
#[derive(Clone, Default, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollAggregate {
	pub(crate) question: Question,
	pub(crate) choices: Vec<Choice>,
}

impl PollAggregate {
	pub fn new(
		question: Question,
		choices: Vec<Choice>,
	) -> Self {
		Self { question, choices }
	}

	pub fn question(&self) -> &Question {
		&self.question
	}

	pub fn choices(&self) -> &[Choice] {
		&self.choices
	}

	pub fn choice(
		&self,
		choice_id: i64,
	) -> Option<&Choice> {
		self.choices.iter().find(|choice| choice.id == choice_id)
	}

	pub fn total_votes(&self) -> i64 {
		self.choices.iter().map(|choice| choice.votes).sum()
	}
}

impl Deref for PollAggregate {
	type Target = Question;
	fn deref(&self) -> &Self::Target {
		&self.question
	}
}

/// Questions visible at `now`, most recently published first.
pub fn latest_question_list(
	now: DateTime<Utc>,
	questions: impl IntoIterator<Item = Question>,
) -> Vec<Question> {
	let mut visible: Vec<Question> = questions.into_iter().filter(|question| question.is_published_at(now)).collect();
	visible.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
	visible
}
