use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "whisper=info,whisper_frontend=info";

/// Forward `tracing` events to the browser console.
///
/// The filter can be set at build time with `WHISPER_LOG`, using the same
/// syntax as `RUST_LOG`. Timestamps are left out, the system clock is not
/// available to wasm and the console adds its own.
pub fn init() {
    let filter = option_env!("WHISPER_LOG").unwrap_or(DEFAULT_FILTER);

    let installed = tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .without_time()
                .with_writer(Console),
        )
        .try_init();

    if installed.is_err() {
        gloo_console::error!("Error installing the log subscriber");
    }
}

struct Console;

/// collects one formatted event and writes it to the console when dropped
struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl<'a> MakeWriter<'a> for Console {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buffer: Vec::new(),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = line(&self.buffer);
        if line.is_empty() {
            return;
        }

        if self.level == Level::ERROR {
            gloo_console::error!(line);
        } else if self.level == Level::WARN {
            gloo_console::warn!(line);
        } else if self.level == Level::INFO {
            gloo_console::info!(line);
        } else {
            gloo_console::debug!(line);
        }
    }
}

fn line(buffer: &[u8]) -> String {
    String::from_utf8_lossy(buffer).trim_end().to_owned()
}
