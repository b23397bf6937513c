mod json;
mod text;

pub use json::to_json;
pub use text::{format_outcome, format_plan};
