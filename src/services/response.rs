use axum::{
	http::{header, StatusCode},
	response::{Html, IntoResponse, Response},
	Json,
};

use crate::domain::poll::PollAggregate;

#[derive(Debug)]
pub enum ServiceResponse {
	Page(String),
	Redirect(String),
	Created(PollAggregate),
}

impl From<PollAggregate> for ServiceResponse {
	fn from(value: PollAggregate) -> Self {
		ServiceResponse::Created(value)
	}
}

impl IntoResponse for ServiceResponse {
	fn into_response(self) -> Response {
		match self {
			ServiceResponse::Page(body) => Html(body).into_response(),
			ServiceResponse::Redirect(location) => (StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response(),
			ServiceResponse::Created(poll) => (StatusCode::CREATED, Json(poll)).into_response(),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
	#[error("EntityNotFound")]
	EntityNotFound,
	#[error("BadRequest: {0}")]
	BadRequest(String),
	#[error("DatabaseError: {0}")]
	DatabaseError(#[from] sqlx::Error),
	#[error("MigrationError: {0}")]
	MigrationError(#[from] sqlx::migrate::MigrateError),
	#[error("TemplateError: {0}")]
	TemplateError(#[from] tera::Error),
	#[error("TransactionError: {0}")]
	TransactionError(&'static str),
	#[error("ConfigError: {0}")]
	ConfigError(String),
	#[error("ServerError: {0}")]
	ServerError(#[from] std::io::Error),
}

impl ServiceError {
	pub fn status_code(&self) -> StatusCode {
		match self {
			ServiceError::EntityNotFound => StatusCode::NOT_FOUND,
			ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl IntoResponse for ServiceError {
	fn into_response(self) -> Response {
		let status = self.status_code();
		let body = match &self {
			ServiceError::EntityNotFound => "Not Found".to_string(),
			ServiceError::BadRequest(message) => message.clone(),
			err => {
				tracing::error!("Request failed : {:?}", err);
				"Internal Server Error".to_string()
			}
		};
		(status, body).into_response()
	}
}
