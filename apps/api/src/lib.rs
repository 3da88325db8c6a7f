//! Meeting-transcript summarizer: upload → extract → summarize → edit → send.
//!
//! The HTTP backend lives in `routes` and the per-capability modules; the
//! `wizard` module is the client-side state machine that drives it.

pub mod config;
pub mod email;
pub mod errors;
pub mod extract;
pub mod llm_client;
pub mod routes;
pub mod state;
pub mod summarize;
pub mod wizard;

#[cfg(test)]
pub(crate) mod test_support;
