//! Client-side lifecycle for the CV Evaluator service.
//!
//! Uploads a candidate CV and project report, submits an evaluation job and
//! polls the backend until the job reaches a terminal status, surfacing
//! exactly one of in-progress, completed-with-result or failed-with-reason.

pub mod adapters;
pub mod cli;
pub mod core;
pub mod utils;
