//! Logging initialization: logs go only to a file (or are dropped), never to the terminal.
//!
//! `RUST_LOG` sets the filter (default `info`), `LOG_FILE` the destination. Without `LOG_FILE`
//! events are discarded so stdout carries only the strategy report.

use std::io::Write;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

const DEFAULT_FILTER: &str = "info,hyper_util=off,reqwest=warn";

/// Installs the global subscriber. Call once, after the config layer has populated the env.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));

    match std::env::var("LOG_FILE") {
        Ok(path) if !path.trim().is_empty() => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)?;
            let layer = tracing_subscriber::fmt::layer()
                .event_format(crate::log_format::SpanTaggedText::new())
                .with_writer(std::sync::Mutex::new(PlainTextWriter::new(file)))
                .with_ansi(false)
                .with_filter(filter);
            tracing_subscriber::registry().with(layer).try_init()?;
            tracing::info!(path = %path, "pillar logging to file");
        }
        _ => {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(std::io::sink)
                .with_filter(filter);
            tracing_subscriber::registry().with(layer).try_init()?;
        }
    }
    Ok(())
}

/// Escape-sequence scanner state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Escape {
    None,
    /// Saw ESC, waiting for `[`.
    Start,
    /// Inside `ESC [ ... `, waiting for the final byte.
    Csi,
}

/// Writer that drops ANSI CSI sequences (`ESC [ params final`) so file logs stay plain text.
/// A lone ESC not followed by `[` is passed through.
struct PlainTextWriter<W> {
    inner: W,
    escape: Escape,
    pending: Vec<u8>,
}

impl<W: Write> PlainTextWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            escape: Escape::None,
            pending: Vec::new(),
        }
    }

    fn step(&mut self, b: u8, out: &mut Vec<u8>) {
        match self.escape {
            Escape::None if b == 0x1b => {
                self.escape = Escape::Start;
                self.pending.push(b);
            }
            Escape::None => out.push(b),
            Escape::Start if b == b'[' => {
                self.escape = Escape::Csi;
                self.pending.push(b);
            }
            Escape::Start => {
                out.append(&mut self.pending);
                self.escape = Escape::None;
                self.step(b, out);
            }
            Escape::Csi if (0x40..=0x7e).contains(&b) => {
                self.pending.clear();
                self.escape = Escape::None;
            }
            Escape::Csi if (0x20..=0x3f).contains(&b) && self.pending.len() < 64 => {
                self.pending.push(b);
            }
            Escape::Csi => {
                out.append(&mut self.pending);
                self.escape = Escape::None;
                self.step(b, out);
            }
        }
    }
}

impl<W: Write> Write for PlainTextWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut out = Vec::with_capacity(buf.len());
        for &b in buf {
            self.step(b, &mut out);
        }
        self.inner.write_all(&out)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if !self.pending.is_empty() {
            self.inner.write_all(&self.pending)?;
            self.pending.clear();
            self.escape = Escape::None;
        }
        self.inner.flush()
    }
}
