//! STLC AI - analysis provider for the testing lifecycle assistant
//!
//! One trait, [`AnalysisProvider`], with three implementations:
//! - [`AzureOpenAiProvider`] talks to an Azure OpenAI-compatible
//!   chat-completions endpoint and parses typed JSON results,
//! - [`MockProvider`] produces deterministic offline results,
//! - [`FallbackProvider`] tries the remote and falls back to the mock on
//!   any failure, which is the provider the workflows run against.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod azure;
pub mod error;
pub mod fallback;
pub mod mock;
pub mod provider;

pub use azure::{AzureConfig, AzureOpenAiProvider, DEFAULT_TIMEOUT};
pub use error::AiError;
pub use fallback::FallbackProvider;
pub use mock::{sample_requirements, MockProvider};
pub use provider::AnalysisProvider;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
