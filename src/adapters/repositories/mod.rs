pub(crate) mod choice_repository;
pub(crate) mod question_repository;
use std::{marker::PhantomData, sync::Arc};

use tokio::sync::RwLock;

use crate::database::DatabaseExecutor;

pub trait TRepository {
	fn new(executor: Arc<RwLock<DatabaseExecutor>>) -> Self;
}

pub struct Repository<A> {
	pub executor: Arc<RwLock<DatabaseExecutor>>,
	pub _phantom: PhantomData<A>,
}

impl<A> TRepository for Repository<A> {
	fn new(executor: Arc<RwLock<DatabaseExecutor>>) -> Self {
		Self {
			executor,
			_phantom: Default::default(),
		}
	}
}
