//! Resume analysis: validate the upload, pull out its text, ask the model.

pub mod extract;
pub mod handlers;
pub mod prompts;
pub mod retry;
pub mod upload;
