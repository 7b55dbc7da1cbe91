use std::{future::Future, sync::Arc};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::{
	adapters::repositories::{Repository, TRepository},
	database::DatabaseExecutor,
	domain::poll::{
		commands::{CreatePoll, Vote},
		entity::{Choice, Question},
		PollAggregate,
	},
};

use super::response::ServiceError;

pub const NO_CHOICE_SELECTED: &str = "You didn't select a choice.";

#[derive(Debug, Serialize)]
pub struct IndexContext {
	pub latest_question_list: Vec<Question>,
}

#[derive(Debug, Serialize)]
pub struct PollContext {
	pub question: Question,
	pub choices: Vec<Choice>,
	pub total_votes: i64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error_message: Option<&'static str>,
}

impl From<PollAggregate> for PollContext {
	fn from(value: PollAggregate) -> Self {
		let total_votes = value.total_votes();
		Self {
			question: value.question,
			choices: value.choices,
			total_votes,
			error_message: None,
		}
	}
}

#[derive(Debug)]
pub enum VoteOutcome {
	Recorded(Choice),
	NoChoiceSelected(PollContext),
}

pub struct PollHandler;
impl PollHandler {
	pub async fn index(
		executor: Arc<RwLock<DatabaseExecutor>>,
		now: DateTime<Utc>,
	) -> Result<IndexContext, ServiceError> {
		let latest_question_list = Repository::<Question>::new(executor).published_before(now).await?;
		tracing::debug!("{} questions visible", latest_question_list.len());
		Ok(IndexContext { latest_question_list })
	}

	/// Question with its choices. Questions not yet published are reported as missing.
	pub async fn visible_poll(
		executor: Arc<RwLock<DatabaseExecutor>>,
		question_id: i64,
		now: DateTime<Utc>,
	) -> Result<PollAggregate, ServiceError> {
		let question = Repository::<Question>::new(executor.clone()).get(question_id).await?;
		if !question.is_published_at(now) {
			return Err(ServiceError::EntityNotFound);
		}
		let choices = Repository::<Choice>::new(executor).list_for_question(question.id).await?;
		Ok(PollAggregate::new(question, choices))
	}

	pub async fn vote(
		executor: Arc<RwLock<DatabaseExecutor>>,
		vote: Vote,
		now: DateTime<Utc>,
	) -> Result<VoteOutcome, ServiceError> {
		let poll = Self::visible_poll(executor.clone(), vote.question_id, now).await?;

		let Some(choice_id) = vote.choice_id().filter(|id| poll.choice(*id).is_some()) else {
			tracing::info!("Vote on question {} without a valid choice", vote.question_id);
			return Ok(VoteOutcome::NoChoiceSelected(PollContext {
				error_message: Some(NO_CHOICE_SELECTED),
				..PollContext::from(poll)
			}));
		};

		let choices = Repository::<Choice>::new(executor.clone());
		let updated = Self::in_transaction(&executor, choices.increment_votes(vote.question_id, choice_id)).await?;
		match updated {
			Some(choice) => {
				tracing::info!("Vote recorded for choice {} of question {}", choice.id, choice.question_id);
				Ok(VoteOutcome::Recorded(choice))
			}
			None => Err(ServiceError::EntityNotFound),
		}
	}

	pub async fn create_poll(
		executor: Arc<RwLock<DatabaseExecutor>>,
		command: CreatePoll,
		now: DateTime<Utc>,
	) -> Result<PollAggregate, ServiceError> {
		command.validate()?;

		let questions = Repository::<Question>::new(executor.clone());
		let choices = Repository::<Choice>::new(executor.clone());
		let poll = Self::in_transaction(&executor, async {
			let question = questions.create(command.question_text.trim(), command.pub_date.unwrap_or(now)).await?;
			let mut stored = Vec::with_capacity(command.choices.len());
			for choice_text in command.choices.iter() {
				stored.push(choices.add(&Choice::new(&question, choice_text.trim())).await?);
			}
			Ok::<_, ServiceError>(PollAggregate::new(question, stored))
		})
		.await?;

		tracing::info!("Question {} created with {} choices", poll.id, poll.choices().len());
		Ok(poll)
	}

	/// Runs `work` inside a transaction, committing on success and rolling back on error.
	async fn in_transaction<T>(
		executor: &Arc<RwLock<DatabaseExecutor>>,
		work: impl Future<Output = Result<T, ServiceError>>,
	) -> Result<T, ServiceError> {
		executor.write().await.begin().await?;
		match work.await {
			Ok(value) => {
				executor.write().await.commit().await?;
				Ok(value)
			}
			Err(err) => {
				if let Err(rollback_err) = executor.write().await.rollback().await {
					tracing::error!("Rollback failed : {:?}", rollback_err);
				}
				Err(err)
			}
		}
	}
}
