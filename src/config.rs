use std::net::SocketAddr;

use crate::services::response::ServiceError;

#[derive(Debug, Clone)]
pub struct Config {
	/// Filter used when `RUST_LOG` is not set
	pub log_level: String,

	/// Address server is listening to
	pub server_ip_port: SocketAddr,
	pub database_url: String,
	pub db_max_connections: u32,
	pub allow_origins: Vec<String>,
}

impl Config {
	pub fn new() -> Result<Config, ServiceError> {
		dotenv::dotenv().ok();
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ServiceError> {
		let log_level = lookup("LOG_LEVEL").unwrap_or("info".to_string());
		let server_ip_port = lookup("SERVER_IP_PORT")
			.unwrap_or("0.0.0.0:8000".into())
			.parse::<SocketAddr>()
			.map_err(|err| ServiceError::ConfigError(format!("SERVER_IP_PORT: {err}")))?;
		let database_url = lookup("DATABASE_URL").unwrap_or("sqlite://polls.db?mode=rwc".to_string());
		let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
			Some(value) => value.parse::<u32>().map_err(|err| ServiceError::ConfigError(format!("DB_MAX_CONNECTIONS: {err}")))?,
			None => 5,
		};
		let allow_origins = lookup("ALLOW_ORIGINS")
			.unwrap_or("http://localhost:3000".to_string())
			.split(',')
			.map(str::trim)
			.filter(|origin| !origin.is_empty())
			.map(String::from)
			.collect();

		Ok(Config {
			log_level,
			server_ip_port,
			database_url,
			db_max_connections,
			allow_origins,
		})
	}
}
