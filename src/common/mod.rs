pub mod clock;
pub mod templates;
