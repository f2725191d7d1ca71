//! SNA Web - Single-page news analysis interface
//!
//! Serves one HTML page with an article textarea, an Analyze button and,
//! once an article is present, a question field with a Get Answer button.
//!
//! Author: hephaex@gmail.com

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod view;

pub use routes::create_router;
pub use state::AppState;
