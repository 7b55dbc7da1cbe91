mod polls;

use std::sync::Arc;

use axum::{
	routing::{get, post},
	Router,
};
use sqlx::SqlitePool;
use tokio::sync::RwLock;

use crate::{
	common::clock::{Clock, SystemClock},
	database::DatabaseExecutor,
};

#[derive(Clone)]
pub struct AppState {
	pub pool: SqlitePool,
	pub clock: Arc<dyn Clock>,
}

impl AppState {
	pub fn new(pool: SqlitePool) -> Self {
		Self {
			pool,
			clock: Arc::new(SystemClock),
		}
	}

	pub fn with_clock(
		mut self,
		clock: impl Clock + 'static,
	) -> Self {
		self.clock = Arc::new(clock);
		self
	}

	/// Fresh unit of work for one request.
	pub(crate) fn executor(&self) -> Arc<RwLock<DatabaseExecutor>> {
		DatabaseExecutor::new(self.pool.clone()).into()
	}
}

pub fn create_routes(state: AppState) -> Router {
	Router::new()
		.route("/polls", get(polls::append_slash))
		.route("/polls/", get(polls::index))
		.route("/polls/questions", post(polls::create_question))
		.route("/polls/{question_id}/", get(polls::detail))
		.route("/polls/{question_id}/results/", get(polls::results))
		.route("/polls/{question_id}/vote/", post(polls::vote))
		.with_state(state)
}
