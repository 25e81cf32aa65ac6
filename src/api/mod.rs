mod answer;
mod api_class;
mod client;

pub use answer::Answer;
pub use api_class::{ApiClass, ApiState, UNEXPECTED_ANSWER};
pub use client::ApiClient;
