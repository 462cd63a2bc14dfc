use std::env;
use std::sync::Once;

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::Employee;

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "debug");
        }
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// The reference chart used throughout the tests.
///
/// ```text
/// Mark Zuckerberg (1)
/// ├── Sarah Donald (2)
/// │   └── Cassandra Reynolds (6)
/// │       ├── Mary Blue (11)
/// │       └── Bob Saget (12)
/// │           └── Tina Teff (14)
/// │               └── Will Turner (15)
/// ├── Tyler Simpson (3)
/// │   ├── Harry Tobs (7)
/// │   │   └── Thomas Brown (13)
/// │   ├── George Carrey (8)
/// │   └── Gary Styles (9)
/// ├── Bruce Willis (4)
/// └── Georgina Flangy (5)
///     └── Sophie Turner (10)
/// ```
pub fn sample_chart() -> Employee {
    Employee::new(1, "Mark Zuckerberg").with_subordinates([
        Employee::new(2, "Sarah Donald").with_subordinates([Employee::new(
            6,
            "Cassandra Reynolds",
        )
        .with_subordinates([
            Employee::new(11, "Mary Blue"),
            Employee::new(12, "Bob Saget").with_subordinates([Employee::new(14, "Tina Teff")
                .with_subordinates([Employee::new(15, "Will Turner")])]),
        ])]),
        Employee::new(3, "Tyler Simpson").with_subordinates([
            Employee::new(7, "Harry Tobs").with_subordinates([Employee::new(13, "Thomas Brown")]),
            Employee::new(8, "George Carrey"),
            Employee::new(9, "Gary Styles"),
        ]),
        Employee::new(4, "Bruce Willis"),
        Employee::new(5, "Georgina Flangy")
            .with_subordinates([Employee::new(10, "Sophie Turner")]),
    ])
}

// test
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_setup() {
        init_test_setup();
    }

    #[test]
    fn given_sample_chart_when_counting_then_fifteen_employees() {
        assert_eq!(sample_chart().headcount(), 15);
    }
}
