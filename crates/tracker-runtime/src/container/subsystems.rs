//! # Subsystem Container
//!
//! ## Initialization Order
//!
//! ```text
//! KeyValueStore (memory | rocksdb)
//!   ├── KvRequestStore ──→ LifecycleRequestDirectory ──┐
//!   └── KvVoteStore ─────→ VoteStoreCascade ──┐        │
//!                                             ▼        ▼
//!                              RequestLifecycleService  VotingService
//!                                             └────┬───┘
//!                                                  ▼
//!                                        AppState (ft-03 gateway)
//! ```

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use ft_01_request_lifecycle::{KvRequestStore, RequestLifecycleService};
use ft_02_voting::{KvVoteStore, VotingService};
use ft_03_api_gateway::{
    ApiGatewayService, AppState, GatewayError, StaticTokenResolver, TokenTableError,
};
use shared_types::{InMemoryKVStore, KVStoreError, KeyValueStore, SystemTimeSource, TimeSource};

use crate::adapters::{LifecycleRequestDirectory, VoteStoreCascade};
use crate::container::config::{StorageBackend, TrackerConfig};

/// Request Lifecycle wired to the key-value stores.
pub type ConcreteLifecycleService =
    RequestLifecycleService<KvRequestStore, KvRequestStore, VoteStoreCascade<KvVoteStore>>;

/// Voting wired to the key-value stores.
pub type ConcreteVotingService =
    VotingService<KvVoteStore, LifecycleRequestDirectory<KvRequestStore>>;

/// Startup failures.
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("storage: {0}")]
    Storage(#[from] KVStoreError),

    #[error("identity table: {0}")]
    Identity(#[from] TokenTableError),

    #[error("storage backend {0:?} is not compiled in")]
    BackendUnavailable(StorageBackend),
}

/// Central container holding all subsystem instances.
pub struct TrackerContainer {
    /// Shared key-value backend.
    pub kv: Arc<dyn KeyValueStore>,
    /// Request rows and the activity log.
    pub requests: Arc<KvRequestStore>,
    /// Vote rows.
    pub votes: Arc<KvVoteStore>,
    /// Request Lifecycle (Subsystem 1)
    pub lifecycle: Arc<ConcreteLifecycleService>,
    /// Voting (Subsystem 2)
    pub voting: Arc<ConcreteVotingService>,
    /// Bearer token table.
    pub identity: Arc<StaticTokenResolver>,
    /// Configuration (immutable after initialization).
    pub config: TrackerConfig,
}

impl TrackerContainer {
    /// Opens the configured backend and wires every subsystem.
    pub fn new(config: TrackerConfig) -> Result<Self, ContainerError> {
        let kv = open_store(&config)?;
        Self::with_store(config, kv, Arc::new(SystemTimeSource))
    }

    /// Wires every subsystem over an already-open store.
    pub fn with_store(
        config: TrackerConfig,
        kv: Arc<dyn KeyValueStore>,
        clock: Arc<dyn TimeSource>,
    ) -> Result<Self, ContainerError> {
        let identity = Arc::new(StaticTokenResolver::parse(&config.tokens)?);
        if identity.is_empty() {
            warn!("[runtime] FT_TOKENS is empty; every API call will be rejected with 401");
        }

        let requests = Arc::new(KvRequestStore::open(kv.clone())?);
        let votes = Arc::new(KvVoteStore::new(kv.clone(), clock.clone()));

        let lifecycle = Arc::new(RequestLifecycleService::new(
            requests.clone(),
            requests.clone(),
            Arc::new(VoteStoreCascade::new(votes.clone())),
            clock,
            config.lifecycle(),
        ));
        let voting = Arc::new(VotingService::new(
            votes.clone(),
            Arc::new(LifecycleRequestDirectory::new(requests.clone())),
            config.voting(),
        ));

        info!(
            principals = identity.len(),
            store_timeout_ms = config.store_timeout.as_millis() as u64,
            "[runtime] subsystems initialized"
        );

        Ok(Self {
            kv,
            requests,
            votes,
            lifecycle,
            voting,
            identity,
            config,
        })
    }

    /// Shared state for the HTTP handlers.
    pub fn app_state(&self) -> AppState {
        AppState {
            lifecycle: self.lifecycle.clone(),
            voting: self.voting.clone(),
            identity: self.identity.clone(),
        }
    }

    /// HTTP gateway over this container.
    pub fn gateway(&self) -> Result<ApiGatewayService, GatewayError> {
        ApiGatewayService::new(self.config.gateway.clone(), self.app_state())
    }
}

fn open_store(config: &TrackerConfig) -> Result<Arc<dyn KeyValueStore>, ContainerError> {
    match config.storage.backend {
        StorageBackend::Memory => {
            warn!("[runtime] using in-memory storage; data is lost on shutdown");
            Ok(Arc::new(InMemoryKVStore::new()))
        }
        #[cfg(feature = "rocksdb")]
        StorageBackend::RocksDb => {
            use crate::adapters::storage::{RocksDbConfig, RocksDbStore};

            let path = config.storage.data_dir.join("rocksdb");
            info!(path = %path.display(), "[runtime] opening RocksDB");
            Ok(Arc::new(RocksDbStore::open(RocksDbConfig::at(path))?))
        }
        #[cfg(not(feature = "rocksdb"))]
        backend @ StorageBackend::RocksDb => Err(ContainerError::BackendUnavailable(backend)),
    }
}
