//! Plain-text event formatter that tags each line with the enclosing span.
//!
//! Every event inside a span gets `trace_id` (id of the outermost span), `span_id` and the
//! innermost span name, so all lines of one generation can be grepped together.

use std::fmt;

use tracing_core::{Event, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::time::{FormatTime, SystemTime};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;

/// Output: `TIMESTAMP LEVEL target: [trace_id=R span_id=S span=NAME] fields`. Events outside
/// any span omit the bracketed part.
#[derive(Default)]
pub struct SpanTaggedText {
    timer: SystemTime,
}

impl SpanTaggedText {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S, N> FormatEvent<S, N> for SpanTaggedText
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        self.timer.format_time(&mut writer)?;
        write!(writer, " {:>5} {}:", meta.level(), meta.target())?;

        if let Some(span) = ctx.parent_span() {
            let span_id = span.id().into_u64();
            let trace_id = span
                .scope()
                .from_root()
                .next()
                .map(|root| root.id().into_u64())
                .unwrap_or(span_id);
            write!(
                writer,
                " [trace_id={} span_id={} span={}]",
                trace_id,
                span_id,
                span.name()
            )?;
        }

        write!(writer, " ")?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
