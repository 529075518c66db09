//! # Pillar
//!
//! Turns a single topic into a grounded SEO content strategy: one core pillar page plus ten
//! sub-pillars with keywords, difficulty, intent, content angle and internal-linking advice,
//! together with the web sources the model consulted.
//!
//! ## Pipeline
//!
//! topic → [`Orchestrator`] builds the instruction ([`prompt::strategy_instruction`]) → one
//! [`GenerativeBackend`] call with web search grounding → [`normalize`] extracts, validates and
//! assembles a [`Strategy`] → rendering / [`export::to_csv`].
//!
//! The backend cannot combine search grounding with a strict response schema, so the JSON
//! payload is located inside free-form text with a layered fallback (```json fence → any fence →
//! brace slice) and then validated field by field.
//!
//! ## Main modules
//!
//! - [`backend`]: [`GenerativeBackend`] trait, [`GeminiBackend`] (HTTP), [`MockBackend`].
//! - [`normalize`]: [`normalize`], [`extract_sources`], [`locate_payload`].
//! - [`orchestrator`]: [`Orchestrator`].
//! - [`strategy`]: [`Strategy`], [`Pillar`], [`SubPillar`], [`Source`] and the enums.
//! - [`sort`]: table ordering ([`SortConfig`], [`sort_sub_pillars`]).
//! - [`export`]: CSV rows and filename.
//! - [`session`]: [`Session`] state machine (idle → loading → ready | failed).
//! - [`error`]: [`StrategyError`], [`ParseFailure`].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pillar::{GeminiBackend, GeminiConfig, Orchestrator};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = GeminiBackend::new(GeminiConfig::from_env()?);
//! let orchestrator = Orchestrator::new(Arc::new(backend));
//! let strategy = orchestrator.generate("Sustainable Coffee Farming").await?;
//! println!("{}", strategy.pillar.page_title);
//! println!("{}", pillar::export::to_csv(&strategy));
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod error;
pub mod export;
pub mod normalize;
pub mod orchestrator;
pub mod prompt;
pub mod session;
pub mod sort;
pub mod strategy;

pub use backend::{
    BackendError, BackendRequest, BackendResponse, GeminiBackend, GeminiConfig,
    GenerativeBackend, GroundingChunk, MockBackend, WebReference,
};
pub use error::{ParseFailure, StrategyError};
pub use normalize::{extract_sources, locate_payload, normalize, PayloadOrigin};
pub use orchestrator::Orchestrator;
pub use session::{Session, SessionError, SessionState};
pub use sort::{sort_sub_pillars, SortConfig, SortDirection, SortKey};
pub use strategy::{KeywordDifficulty, Pillar, SearchIntent, Source, Strategy, SubPillar};
