use std::{mem, str::FromStr, sync::Arc};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};

use tokio::sync::RwLock;

use crate::services::response::ServiceError;

/// Unit of work over the pool. Reads go to the pool, writes to the open transaction.
pub struct DatabaseExecutor {
	pool: SqlitePool,
	transaction: Option<Transaction<'static, Sqlite>>,
}

impl DatabaseExecutor {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool, transaction: None }
	}
	pub fn transaction(&mut self) -> Result<&mut Transaction<'static, Sqlite>, ServiceError> {
		self.transaction.as_mut().ok_or(ServiceError::TransactionError("Transaction Has Not Begun!"))
	}
	pub fn connection(&self) -> &SqlitePool {
		&self.pool
	}

	pub(crate) async fn begin(&mut self) -> Result<(), ServiceError> {
		match self.transaction.as_mut() {
			None => {
				self.transaction = Some(self.pool.begin().await?);
				Ok(())
			}
			Some(_trx) => {
				tracing::warn!("Transaction Begun Already!");
				Err(ServiceError::TransactionError("Transaction Begun Already!"))
			}
		}
	}

	pub(crate) async fn commit(&mut self) -> Result<(), ServiceError> {
		let trx = mem::take(&mut self.transaction).ok_or(ServiceError::TransactionError("Transaction Has Not Begun!"))?;
		trx.commit().await.map_err(|err| {
			tracing::error!("Error occurred during commit operation : {:?}", err);
			ServiceError::DatabaseError(err)
		})
	}
	pub(crate) async fn rollback(&mut self) -> Result<(), ServiceError> {
		let trx = mem::take(&mut self.transaction).ok_or(ServiceError::TransactionError("Transaction Has Not Begun!"))?;
		trx.rollback().await.map_err(ServiceError::DatabaseError)
	}
}

impl From<DatabaseExecutor> for Arc<RwLock<DatabaseExecutor>> {
	fn from(value: DatabaseExecutor) -> Self {
		Arc::new(RwLock::new(value))
	}
}

pub async fn connect(
	url: &str,
	max_connections: u32,
) -> Result<SqlitePool, ServiceError> {
	let options = SqliteConnectOptions::from_str(url)?.foreign_keys(true);
	let pool = SqlitePoolOptions::new().max_connections(max_connections).connect_with(options).await?;
	Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), ServiceError> {
	sqlx::migrate!("./migrations").run(pool).await?;
	Ok(())
}

/// Fresh single-connection in-memory database with the schema applied.
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
	let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap().foreign_keys(true);
	let pool = SqlitePoolOptions::new()
		.max_connections(1)
		.idle_timeout(None)
		.max_lifetime(None)
		.connect_with(options)
		.await
		.unwrap();
	migrate(&pool).await.unwrap();
	pool
}

#[cfg(test)]
pub(crate) async fn test_executor() -> Arc<RwLock<DatabaseExecutor>> {
	DatabaseExecutor::new(test_pool().await).into()
}
