use std::path::Path;
use std::process;

use gl_helper::cli::{output, CliError, Dispatcher};
use gl_helper::config::Settings;
use gl_helper::infrastructure::ServiceContainer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

fn main() {
    process::exit(run());
}

fn run() -> i32 {
    let settings = match Settings::load(Path::new(".")) {
        Ok(settings) => settings,
        Err(e) => return fail(CliError::from(e)),
    };
    let container = ServiceContainer::new(settings);
    let dispatcher = match Dispatcher::new(&container) {
        Ok(dispatcher) => dispatcher,
        Err(e) => return fail(e),
    };

    match dispatcher.parse(std::env::args_os()) {
        Ok(cli) => {
            setup_logging(cli.verbose);
            dispatcher.complete(&cli)
        }
        Err(e) => dispatcher.report(&e),
    }
}

fn fail(e: CliError) -> i32 {
    output::error(&e);
    e.exit_code()
}

/// `-v` count to log level; anything past `-vvv` stays at trace.
fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn setup_logging(verbosity: u8) {
    let filter = level_for(verbosity);

    // Formatted output directed to stderr so stdout stays the build tool's
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}
