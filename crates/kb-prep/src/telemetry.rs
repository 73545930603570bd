//! Tracing setup shared by the binaries

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber, honouring `RUST_LOG` (default `kb_prep=info`)
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kb_prep=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
