use axum::{
	http::{HeaderValue, Method},
	Router,
};

use polls::{
	create_routes,
	database::{connect, migrate},
	dependencies::config,
	services::response::ServiceError,
	AppState,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ServiceError> {
	let config = config()?;

	// ! Tracing
	tracing_subscriber::registry()
		.with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
			// axum logs rejections from built-in extractors with the `axum::rejection`
			// target, at `TRACE` level. `axum::rejection=trace` enables showing those events
			format!("{},tower_http=debug,axum::rejection=trace", config.log_level).into()
		}))
		.with(tracing_subscriber::fmt::layer())
		.init();

	// ! Connection
	tracing::info!("Connections Are Being Pooled...");
	let pool = connect(&config.database_url, config.db_max_connections).await?;
	migrate(&pool).await?;

	let origins = config
		.allow_origins
		.iter()
		.map(|origin| origin.parse::<HeaderValue>())
		.collect::<Result<Vec<_>, _>>()
		.map_err(|err| ServiceError::ConfigError(format!("ALLOW_ORIGINS: {err}")))?;

	let app = Router::new()
		.merge(create_routes(AppState::new(pool)))
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(CorsLayer::new().allow_origin(origins).allow_methods([Method::GET, Method::POST])),
		);

	tracing::info!("Start Web Server on {}...", config.server_ip_port);
	let listener = tokio::net::TcpListener::bind(config.server_ip_port).await.map_err(|err| {
		tracing::error!("Cannot bind {} : {:?}", config.server_ip_port, err);
		ServiceError::ServerError(err)
	})?;
	axum::serve(listener, app).await.map_err(|err| {
		tracing::error!("Server stopped : {:?}", err);
		ServiceError::ServerError(err)
	})
}
