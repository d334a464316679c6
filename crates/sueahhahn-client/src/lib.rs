pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod state;

use sueahhahn_store::{Database, DurableSlot, MemorySlot, Store};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::ClientConfig;
use crate::state::AppState;

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// filter. Calling it again is a no-op.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("sueahhahn_client=debug,sueahhahn_store=info,warn"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

/// Open the marketplace store described by `config` and wrap it in a fresh
/// [`AppState`]. A database that cannot be opened degrades to an in-memory
/// slot rather than failing startup.
pub fn run(config: ClientConfig) -> AppState {
    tracing::info!("Starting Sue AhHahn client");

    let slot = open_slot(&config);
    let store = Store::open(slot, &config.credentials);
    tracing::info!(origin = ?store.origin(), durable = store.is_durable(), "store ready");

    AppState::new(store, config)
}

fn open_slot(config: &ClientConfig) -> Box<dyn DurableSlot> {
    if config.in_memory {
        tracing::info!("Running with in-memory storage");
        return Box::new(MemorySlot::new());
    }

    let opened = match &config.data_dir {
        Some(dir) => Database::open_in_dir(dir),
        None => Database::new(),
    };

    match opened {
        Ok(db) => {
            tracing::info!(path = ?db.path(), "Database opened");
            Box::new(db)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to open database, changes will not persist");
            Box::new(MemorySlot::new())
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use sueahhahn_shared::credential::CredentialConfig;
    use sueahhahn_store::{MemorySlot, Snapshot, Store};

    use crate::config::ClientConfig;
    use crate::state::AppState;

    pub fn cheap_config() -> CredentialConfig {
        CredentialConfig {
            memory_kib: 8,
            time_cost: 1,
            parallelism: 1,
        }
    }

    pub fn config() -> ClientConfig {
        ClientConfig {
            data_dir: None,
            in_memory: true,
            credentials: cheap_config(),
        }
    }

    /// App state over an empty in-memory store, nobody logged in.
    pub fn state() -> AppState {
        let store = Store::from_snapshot(MemorySlot::new(), Snapshot::default()).unwrap();
        AppState::new(store, config())
    }
}
