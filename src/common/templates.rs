use std::sync::OnceLock;

use serde::Serialize;
use tera::{Context, Tera};

use crate::services::response::ServiceError;

pub const INDEX: &str = "polls/index.html";
pub const DETAIL: &str = "polls/detail.html";
pub const RESULTS: &str = "polls/results.html";

/// Templates are compiled into the binary so rendering does not depend on the working directory.
fn load() -> Result<Tera, tera::Error> {
	let mut tera = Tera::default();
	tera.add_raw_templates(vec![
		("polls/base.html", include_str!("../../templates/polls/base.html")),
		(INDEX, include_str!("../../templates/polls/index.html")),
		(DETAIL, include_str!("../../templates/polls/detail.html")),
		(RESULTS, include_str!("../../templates/polls/results.html")),
	])?;
	Ok(tera)
}

pub fn engine() -> Result<&'static Tera, ServiceError> {
	static ENGINE: OnceLock<Tera> = OnceLock::new();
	let tera = match ENGINE.get() {
		None => {
			let tera = load()?;

			ENGINE.get_or_init(|| tera)
		}
		Some(tera) => tera,
	};
	Ok(tera)
}

pub fn render(
	template_name: &str,
	context: &impl Serialize,
) -> Result<String, ServiceError> {
	let context = Context::from_serialize(context)?;
	Ok(engine()?.render(template_name, &context)?)
}
