pub mod application;
pub mod cli;
pub mod domain;
pub mod storage;

use std::sync::Once;

pub use application::{Ledger, LedgerError, ValidationError};
pub use domain::*;
pub use storage::Repository;

static INIT_TRACING: Once = Once::new();

/// Install the global tracing subscriber (stderr). `RUST_LOG` wins over the
/// default filter; `verbose` lowers the default to debug.
pub fn init_tracing(verbose: bool) {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let default = if verbose { "fintrack=debug" } else { "fintrack=warn" };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
