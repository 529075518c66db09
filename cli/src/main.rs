//! Pillar CLI binary: generate a grounded SEO pillar strategy for a topic.
//!
//! One-shot by default (`pillar Sustainable Coffee Farming`); `-i` starts a REPL.

mod log_format;
mod logging;
mod repl;

use std::path::PathBuf;

use clap::Parser;
use cli::{build_backend, run_topic, CsvTarget, RunOptions};
use pillar::{Orchestrator, Session, SortConfig, SortDirection, SortKey};

#[derive(Parser, Debug)]
#[command(name = "pillar")]
#[command(about = "Pillar: generate a grounded SEO pillar and sub-pillar strategy for a topic")]
struct Args {
    /// Topic to research (words are joined with spaces)
    #[arg(value_name = "TOPIC")]
    topic: Vec<String>,

    /// Sort the execution table by column: keyword, difficulty or intent
    #[arg(long, value_name = "KEY")]
    sort: Option<SortKey>,

    /// Sort descending (with --sort)
    #[arg(long, requires = "sort")]
    desc: bool,

    /// Export CSV; without a value writes seo-strategy-<topic>.csv in the current directory
    #[arg(long, value_name = "PATH", num_args = 0..=1, require_equals = true)]
    csv: Option<Option<PathBuf>>,

    /// Print the strategy as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// With --json, pretty-print
    #[arg(long, requires = "json")]
    pretty: bool,

    /// Model id (default: PILLAR_MODEL or gemini-2.5-flash)
    #[arg(long, value_name = "MODEL", env = "PILLAR_MODEL")]
    model: Option<String>,

    /// Normalize a saved generateContent response body instead of calling the API
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,

    /// Interactive REPL: prompt for topics until EOF or quit
    #[arg(short, long)]
    interactive: bool,
}

impl Args {
    fn run_options(&self) -> RunOptions {
        let direction = if self.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        RunOptions {
            model: self.model.clone(),
            replay: self.replay.clone(),
            sort: self.sort.map(|key| SortConfig::new(key, direction)),
            csv: self.csv.clone().map(|p| p.map_or(CsvTarget::Default, CsvTarget::Path)),
            json: self.json,
            pretty: self.pretty,
        }
    }

    fn topic(&self) -> String {
        self.topic.join(" ")
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let loaded = config::load_and_apply("pillar", None);
    logging::init()?;
    match &loaded {
        Ok(report) if !report.is_empty() => {
            tracing::info!(keys = ?report.keys().collect::<Vec<_>>(), "config applied")
        }
        Ok(_) => {}
        Err(e) => tracing::warn!(error = %e, "config not loaded"),
    }

    let args = Args::parse();
    let opts = args.run_options();
    let topic = args.topic();

    if topic.trim().is_empty() && !args.interactive {
        eprintln!("error: a topic is required (or use -i for interactive mode)");
        std::process::exit(2);
    }

    let backend = match build_backend(&opts) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    let orchestrator = Orchestrator::new(backend);
    let mut session = Session::new();

    if !topic.trim().is_empty() {
        let mut stdout = std::io::stdout();
        if let Err(e) = run_topic(&orchestrator, &mut session, &topic, &opts, &mut stdout).await {
            eprintln!("error: {}", e);
            if !args.interactive {
                std::process::exit(1);
            }
        }
    }

    if args.interactive {
        repl::run_repl_loop(&orchestrator, &mut session, opts).await?;
    }
    Ok(())
}
