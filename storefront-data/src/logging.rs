use std::io::{self, IsTerminal};

use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// `HH:MM:SS.mmm LEVEL target: message fields`, one event per line.
///
/// Only warnings and errors are coloured.
struct CliFmt;

fn level_colour(level: &Level) -> Option<&'static str> {
    match *level {
        Level::ERROR => Some("\x1b[1;31m"),
        Level::WARN => Some("\x1b[1;33m"),
        _ => None,
    }
}

impl<S, N> FormatEvent<S, N> for CliFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();
        let time = Local::now().format("%H:%M:%S%.3f");

        match (ansi, level_colour(meta.level())) {
            (true, Some(colour)) => {
                write!(writer, "{DIM}{time}{RESET} {colour}{:>5}{RESET} ", meta.level())?
            }
            (true, None) => write!(writer, "{DIM}{time}{RESET} {:>5} ", meta.level())?,
            (false, _) => write!(writer, "{time} {:>5} ", meta.level())?,
        }
        write!(writer, "{}: ", meta.target())?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// `RUST_LOG` wins over the configured level.
fn make_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initializes logging to stderr. Call once at startup; later calls are
/// ignored. The level is fixed for the life of the process.
///
/// Output is coloured when stderr is a terminal so that JSON written to
/// stdout stays clean.
pub fn init_logging(default_level: &str) {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(CliFmt)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let _ = tracing_subscriber::registry()
        .with(make_filter(default_level))
        .with(stderr_layer)
        .try_init();
}
