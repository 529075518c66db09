//! One generation from the command line: build the backend, run the session, print the result
//! and optionally export CSV.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use pillar::{
    export, BackendError, GeminiBackend, GeminiConfig, GenerativeBackend, MockBackend,
    Orchestrator, Session, SessionError, SessionState, SortConfig, Strategy,
};
use thiserror::Error;

use crate::display;

/// Where the CSV export goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CsvTarget {
    /// `seo-strategy-{topic}.csv` in the current directory.
    Default,
    Path(PathBuf),
}

/// Options shared by one-shot and REPL runs.
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Model id overriding `PILLAR_MODEL`.
    pub model: Option<String>,
    /// Saved `generateContent` response body to replay instead of calling the API.
    pub replay: Option<PathBuf>,
    pub sort: Option<SortConfig>,
    pub csv: Option<CsvTarget>,
    /// Print the strategy as JSON instead of the text report.
    pub json: bool,
    pub pretty: bool,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("{0}")]
    Backend(#[from] BackendError),
    #[error("cannot read replay file {path}: {source}")]
    Replay {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{0}")]
    Session(#[from] SessionError),
    #[error("{0}")]
    Generation(String),
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Builds the backend: a replay of a saved response when `opts.replay` is set, otherwise the
/// Gemini backend configured from the environment.
pub fn build_backend(opts: &RunOptions) -> Result<Arc<dyn GenerativeBackend>, RunError> {
    if let Some(path) = &opts.replay {
        let body = std::fs::read_to_string(path).map_err(|source| RunError::Replay {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "replaying saved response");
        return Ok(Arc::new(MockBackend::from_generate_content_body(&body)?));
    }
    let mut config = GeminiConfig::from_env()?;
    if let Some(model) = &opts.model {
        config = config.with_model(model.clone());
    }
    tracing::info!(model = %config.model, "using gemini backend");
    Ok(Arc::new(GeminiBackend::new(config)))
}

/// Writes the CSV export and returns the path written.
pub fn write_csv(strategy: &Strategy, topic: &str, target: &CsvTarget) -> Result<PathBuf, RunError> {
    let path = match target {
        CsvTarget::Default => PathBuf::from(export::csv_filename(topic)),
        CsvTarget::Path(p) => p.clone(),
    };
    std::fs::write(&path, export::to_csv(strategy)).map_err(|source| RunError::Write {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), "csv exported");
    Ok(path)
}

/// Prints the strategy (text report or JSON) to `out`.
pub fn print_strategy(
    out: &mut impl Write,
    strategy: &Strategy,
    opts: &RunOptions,
) -> Result<(), RunError> {
    if opts.json {
        let s = if opts.pretty {
            serde_json::to_string_pretty(strategy)?
        } else {
            serde_json::to_string(strategy)?
        };
        writeln!(out, "{}", s)?;
    } else {
        write!(out, "{}", display::render_strategy(strategy, opts.sort))?;
    }
    out.flush()?;
    Ok(())
}

/// Runs one topic through `session`, prints the result and exports CSV when requested.
///
/// A failed generation leaves the session in `Failed` and is returned as
/// [`RunError::Generation`].
pub async fn run_topic(
    orchestrator: &Orchestrator,
    session: &mut Session,
    topic: &str,
    opts: &RunOptions,
    out: &mut impl Write,
) -> Result<(), RunError> {
    match session.run(orchestrator, topic).await? {
        SessionState::Ready { topic, strategy } => {
            print_strategy(out, strategy, opts)?;
            if let Some(target) = &opts.csv {
                let path = write_csv(strategy, topic, target)?;
                eprintln!("CSV written to {}", path.display());
            }
            Ok(())
        }
        SessionState::Failed { message, .. } => Err(RunError::Generation(message.clone())),
        other => Err(RunError::Generation(format!(
            "unexpected session state: {:?}",
            other
        ))),
    }
}
