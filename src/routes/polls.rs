use axum::{
	extract::{Path, State},
	response::Redirect,
	Form, Json,
};
use axum_macros::debug_handler;
use serde::Deserialize;

use super::AppState;
use crate::{
	common::templates::{self, DETAIL, INDEX, RESULTS},
	domain::poll::commands::{CreatePoll, Vote},
	services::{
		handlers::{PollContext, PollHandler, VoteOutcome},
		response::{ServiceError, ServiceResponse},
	},
};

#[derive(Debug, Deserialize)]
pub struct VoteForm {
	pub choice: Option<String>,
}

pub async fn append_slash() -> Redirect {
	Redirect::permanent("/polls/")
}

#[debug_handler]
pub async fn index(State(state): State<AppState>) -> Result<ServiceResponse, ServiceError> {
	let context = PollHandler::index(state.executor(), state.clock.now()).await?;
	Ok(ServiceResponse::Page(templates::render(INDEX, &context)?))
}

#[debug_handler]
pub async fn detail(
	State(state): State<AppState>,
	Path(question_id): Path<i64>,
) -> Result<ServiceResponse, ServiceError> {
	let poll = PollHandler::visible_poll(state.executor(), question_id, state.clock.now()).await?;
	Ok(ServiceResponse::Page(templates::render(DETAIL, &PollContext::from(poll))?))
}

#[debug_handler]
pub async fn results(
	State(state): State<AppState>,
	Path(question_id): Path<i64>,
) -> Result<ServiceResponse, ServiceError> {
	let poll = PollHandler::visible_poll(state.executor(), question_id, state.clock.now()).await?;
	Ok(ServiceResponse::Page(templates::render(RESULTS, &PollContext::from(poll))?))
}

#[debug_handler]
pub async fn vote(
	State(state): State<AppState>,
	Path(question_id): Path<i64>,
	Form(form): Form<VoteForm>,
) -> Result<ServiceResponse, ServiceError> {
	let vote = Vote {
		question_id,
		choice: form.choice,
	};
	match PollHandler::vote(state.executor(), vote, state.clock.now()).await? {
		VoteOutcome::Recorded(choice) => Ok(ServiceResponse::Redirect(format!("/polls/{}/results/", choice.question_id))),
		VoteOutcome::NoChoiceSelected(context) => Ok(ServiceResponse::Page(templates::render(DETAIL, &context)?)),
	}
}

#[debug_handler]
pub async fn create_question(
	State(state): State<AppState>,
	Json(command): Json<CreatePoll>,
) -> Result<ServiceResponse, ServiceError> {
	let poll = PollHandler::create_poll(state.executor(), command, state.clock.now()).await?;
	Ok(poll.into())
}

#[cfg(test)]
mod test {
	use axum::{
		body::Body,
		http::{header, Request, StatusCode},
		Router,
	};
	use chrono::Utc;
	use http_body_util::BodyExt;
	use tower::ServiceExt;

	use crate::{
		common::clock::FixedClock,
		database::test_pool,
		domain::poll::PollAggregate,
		routes::{create_routes, AppState},
		services::handlers::{test::create_question, PollHandler},
	};

	async fn set_up() -> (AppState, Router) {
		let state = AppState::new(test_pool().await);
		(state.clone(), create_routes(state))
	}

	async fn get(
		app: Router,
		uri: &str,
	) -> (StatusCode, String) {
		send(app, Request::get(uri).body(Body::empty()).unwrap()).await
	}

	async fn send(
		app: Router,
		request: Request<Body>,
	) -> (StatusCode, String) {
		let response = app.oneshot(request).await.unwrap();
		let status = response.status();
		let body = response.into_body().collect().await.unwrap().to_bytes();
		(status, String::from_utf8(body.to_vec()).unwrap())
	}

	fn vote_request(
		question_id: i64,
		form: &str,
	) -> Request<Body> {
		Request::post(format!("/polls/{question_id}/vote/"))
			.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
			.body(Body::from(form.to_string()))
			.unwrap()
	}

	async fn latest_question_list(state: &AppState) -> Vec<String> {
		PollHandler::index(state.executor(), state.clock.now())
			.await
			.unwrap()
			.latest_question_list
			.into_iter()
			.map(|q| q.question_text)
			.collect()
	}

	#[tokio::test]
	async fn test_no_questions() {
		let (state, app) = set_up().await;

		let (status, body) = get(app, "/polls/").await;

		assert_eq!(status, StatusCode::OK);
		assert!(body.contains("No polls are available."));
		assert!(latest_question_list(&state).await.is_empty());
	}

	#[tokio::test]
	async fn test_index_without_trailing_slash_redirects() {
		let (_, app) = set_up().await;

		let response = app.oneshot(Request::get("/polls").body(Body::empty()).unwrap()).await.unwrap();

		assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
		assert_eq!(response.headers()[header::LOCATION], "/polls/");
	}

	#[tokio::test]
	async fn test_past_question() {
		'_given: {
			let (state, app) = set_up().await;
			let question = create_question(state.executor(), "Past question.", -30, &[]).await;

			'_when: {
				let (status, body) = get(app, "/polls/").await;

				'_then: {
					assert_eq!(status, StatusCode::OK);
					assert!(body.contains("Past question."));
					assert!(body.contains(&format!(r#"href="/polls/{}/""#, question.id)));
					assert_eq!(latest_question_list(&state).await, vec!["Past question."]);
				}
			}
		}
	}

	#[tokio::test]
	async fn test_future_question() {
		let (state, app) = set_up().await;
		create_question(state.executor(), "Future question.", 30, &[]).await;

		let (status, body) = get(app, "/polls/").await;

		assert_eq!(status, StatusCode::OK);
		assert!(body.contains("No polls are available."));
		assert!(!body.contains("Future question."));
		assert!(latest_question_list(&state).await.is_empty());
	}

	#[tokio::test]
	async fn test_future_question_and_past_question() {
		let (state, app) = set_up().await;
		create_question(state.executor(), "Past question.", -30, &[]).await;
		create_question(state.executor(), "Future question.", 30, &[]).await;

		let (_, body) = get(app, "/polls/").await;

		assert!(body.contains("Past question."));
		assert!(!body.contains("Future question."));
		assert_eq!(latest_question_list(&state).await, vec!["Past question."]);
	}

	#[tokio::test]
	async fn test_two_past_questions() {
		let (state, app) = set_up().await;
		create_question(state.executor(), "Past question 1.", -30, &[]).await;
		create_question(state.executor(), "Past question 2.", -5, &[]).await;

		let (_, body) = get(app, "/polls/").await;

		let first = body.find("Past question 2.").unwrap();
		let second = body.find("Past question 1.").unwrap();
		assert!(first < second);
		assert_eq!(latest_question_list(&state).await, vec!["Past question 2.", "Past question 1."]);
	}

	#[tokio::test]
	async fn test_index_uses_state_clock() {
		let pool = test_pool().await;
		let state = AppState::new(pool.clone());
		create_question(state.executor(), "Past question.", -30, &[]).await;

		let frozen = AppState::new(pool).with_clock(FixedClock(Utc::now() - chrono::Duration::days(31)));
		let (_, body) = get(create_routes(frozen), "/polls/").await;

		assert!(body.contains("No polls are available."));
	}

	#[tokio::test]
	async fn test_detail_view() {
		let (state, app) = set_up().await;
		let past = create_question(state.executor(), "Past Question.", -5, &["Yes", "No"]).await;
		let future = create_question(state.executor(), "Future question.", 5, &["Yes"]).await;

		let (status, body) = get(app.clone(), &format!("/polls/{}/", past.id)).await;
		assert_eq!(status, StatusCode::OK);
		assert!(body.contains("Past Question."));
		assert!(body.contains(&format!(r#"value="{}""#, past.choices()[1].id)));

		let (status, _) = get(app.clone(), &format!("/polls/{}/", future.id)).await;
		assert_eq!(status, StatusCode::NOT_FOUND);

		let (status, _) = get(app, "/polls/999/").await;
		assert_eq!(status, StatusCode::NOT_FOUND);
	}

	#[tokio::test]
	async fn test_results_view() {
		let (state, app) = set_up().await;
		let past = create_question(state.executor(), "Past Question.", -5, &["Yes", "No"]).await;
		let future = create_question(state.executor(), "Future question.", 5, &["Yes"]).await;

		let (status, body) = get(app.clone(), &format!("/polls/{}/results/", past.id)).await;
		assert_eq!(status, StatusCode::OK);
		assert!(body.contains("Yes -- 0 votes"));

		let (status, _) = get(app, &format!("/polls/{}/results/", future.id)).await;
		assert_eq!(status, StatusCode::NOT_FOUND);
	}

	#[tokio::test]
	async fn test_vote_redirects_to_results() {
		'_given: {
			let (state, app) = set_up().await;
			let poll = create_question(state.executor(), "Tea or coffee?", -1, &["Tea", "Coffee"]).await;
			let tea = poll.choices()[0].id;

			'_when: {
				let response = app.clone().oneshot(vote_request(poll.id, &format!("choice={tea}"))).await.unwrap();

				'_then: {
					assert_eq!(response.status(), StatusCode::SEE_OTHER);
					assert_eq!(response.headers()[header::LOCATION], format!("/polls/{}/results/", poll.id));

					let (_, body) = get(app, &format!("/polls/{}/results/", poll.id)).await;
					assert!(body.contains("Tea -- 1 vote<"));
					assert!(body.contains("Coffee -- 0 votes"));
				}
			}
		}
	}

	#[tokio::test]
	async fn test_vote_without_choice_redisplays_form() {
		let (state, app) = set_up().await;
		let poll = create_question(state.executor(), "Tea or coffee?", -1, &["Tea", "Coffee"]).await;

		let (status, body) = send(app.clone(), vote_request(poll.id, "")).await;
		assert_eq!(status, StatusCode::OK);
		assert!(body.contains("You didn&#x27;t select a choice."));

		let (status, body) = send(app, vote_request(poll.id, "choice=999")).await;
		assert_eq!(status, StatusCode::OK);
		assert!(body.contains("You didn&#x27;t select a choice."));
	}

	#[tokio::test]
	async fn test_vote_on_future_question() {
		let (state, app) = set_up().await;
		let poll = create_question(state.executor(), "Future question.", 5, &["Yes"]).await;

		let (status, _) = send(app, vote_request(poll.id, &format!("choice={}", poll.choices()[0].id))).await;
		assert_eq!(status, StatusCode::NOT_FOUND);
	}

	#[tokio::test]
	async fn test_create_question_endpoint() {
		let (state, app) = set_up().await;

		let request = Request::post("/polls/questions")
			.header(header::CONTENT_TYPE, "application/json")
			.body(Body::from(r#"{"question_text":"Favourite season?","choices":["Summer","Winter"]}"#))
			.unwrap();
		let (status, body) = send(app.clone(), request).await;

		assert_eq!(status, StatusCode::CREATED);
		let poll: PollAggregate = serde_json::from_str(&body).unwrap();
		assert_eq!(poll.question_text, "Favourite season?");
		assert_eq!(poll.choices().len(), 2);
		assert_eq!(latest_question_list(&state).await, vec!["Favourite season?"]);

		let request = Request::post("/polls/questions")
			.header(header::CONTENT_TYPE, "application/json")
			.body(Body::from(r#"{"question_text":""}"#))
			.unwrap();
		let (status, _) = send(app.clone(), request).await;
		assert_eq!(status, StatusCode::BAD_REQUEST);

		let request = Request::post("/polls/questions")
			.header(header::CONTENT_TYPE, "application/json")
			.body(Body::from(r#"{"question_text":"Far future","pub_date":"+10000-01-01T00:00:00Z"}"#))
			.unwrap();
		let (status, _) = send(app, request).await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(latest_question_list(&state).await, vec!["Favourite season?"]);
	}
}
