//! Ticket classification via an external suggestion service.
//!
//! - [`ClassificationGateway`] validates input and turns every service
//!   failure into a default suggestion.
//! - [`SuggestionService`] is the seam between the gateway and the service;
//!   [`ChatCompletionClient`] is the OpenAI-compatible implementation.
//! - [`ClassifierConfig`] carries the credential and endpoint settings.

pub mod client;
pub mod config;
pub mod gateway;

pub use client::{ChatCompletionClient, SuggestionError, SuggestionService};
pub use config::ClassifierConfig;
pub use gateway::ClassificationGateway;
