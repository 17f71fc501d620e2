//! Resume screening service: scores resumes against a job description and
//! returns a ranked candidate list over HTTP.

pub mod config;
pub mod errors;
pub mod matching;
pub mod presets;
pub mod routes;
pub mod screening;
pub mod state;
