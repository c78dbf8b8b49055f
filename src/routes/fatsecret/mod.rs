mod handler;
mod model;

pub use handler::{food_detail, search};
pub use model::SearchQuery;
