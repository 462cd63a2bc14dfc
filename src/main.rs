use clap::Parser;
use orgchart::cli::args::Cli;
use orgchart::cli::commands::execute_command;
use orgchart::cli::output;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    if let Err(e) = execute_command(&cli) {
        output::error(&e);
        std::process::exit(e.exit_code());
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    // Create a subscriber with formatted output directed to stderr
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

#[cfg(test)]
mod tests {
    use super::*;
    use orgchart::util::testing;
    use tracing::info;

    #[ctor::ctor]
    fn init() {
        testing::init_test_setup();
    }

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
        info!("Debug mode: info");
    }

    #[test]
    fn given_run_with_ops_when_parsing_then_operations_are_typed() {
        use orgchart::cli::args::Commands;
        use orgchart::domain::Operation;

        let cli = Cli::try_parse_from(["orgchart", "-d", "run", "--chart", "c.toml", "move:12:5", "undo"])
            .unwrap();
        assert_eq!(cli.debug, 1);
        match cli.command {
            Some(Commands::Run { ops, .. }) => assert_eq!(
                ops,
                vec![
                    Operation::Move {
                        employee: 12,
                        supervisor: 5
                    },
                    Operation::Undo
                ]
            ),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn given_bad_operation_when_parsing_then_rejected() {
        assert!(Cli::try_parse_from(["orgchart", "run", "promote:1"]).is_err());
    }
}
