//! Studio API: ATS resume matching plus a handful of AI tools behind one HTTP service.

pub mod config;
pub mod errors;
pub mod extraction;
pub mod generative;
pub mod matching;
pub mod routes;
pub mod state;

pub use routes::build_router;
