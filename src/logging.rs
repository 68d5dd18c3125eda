// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber once. `RUST_LOG` wins over `verbosity`.
///
/// Logs go to stderr so tables and JSON on stdout stay machine-readable.
pub fn init_tracing(verbosity: u8) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let level = match verbosity {
            0 => "warn",
            1 => "info",
            _ => "debug",
        };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("pocketledger={level}")));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
