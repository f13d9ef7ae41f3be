//! Process-wide logger setup for binaries and tests.
//!
//! The collections only emit `trace!`/`debug!` records through the [`log`]
//! facade; nothing is printed unless a logger is installed.

use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Installs an [`env_logger`] logger at `Info`, with this crate's own records
/// shown from `Debug` so table construction is visible. `RUST_LOG` overrides
/// both.
///
/// Safe to call more than once; only the first call has an effect.
pub fn initialize_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Info)
            .filter_module("arrays_hashing", LevelFilter::Debug)
            .format_timestamp_millis()
            .parse_default_env();

        // Another logger may already be installed by the embedding program.
        let _ = builder.try_init();
    });
}
