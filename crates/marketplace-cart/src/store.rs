//! Cart state container with best-effort persistence.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use marketplace_kv::{Cache, KeyValueStore};
use tokio::runtime::Handle;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::cart::{CartList, Product};
use crate::config::{CartConfig, WriteMode};
use crate::ids::ProductId;

/// How a scheduled write ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The list reached storage.
    Written,
    /// A newer list had already been persisted, so this one was dropped.
    Superseded,
    /// Storage rejected the write. The failure has been logged.
    Failed,
}

/// Handle to a write scheduled by a cart mutation.
///
/// Dropping it detaches the write; awaiting [`PendingWrite::wait`] reports
/// how it ended. Either way the in-memory cart has already changed.
#[derive(Debug)]
pub struct PendingWrite {
    seq: u64,
    handle: JoinHandle<WriteOutcome>,
}

impl PendingWrite {
    /// Sequence number of this write. Later mutations get larger numbers.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Wait for the write to finish.
    pub async fn wait(self) -> WriteOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(seq = self.seq, error = %e, "cart write task did not complete");
                WriteOutcome::Failed
            }
        }
    }
}

/// Shared cart state.
///
/// Cheap to clone; clones share one cart. The list is replaced, never
/// edited in place, so a snapshot from [`CartStore::products`] stays
/// unchanged after later mutations.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<Inner>,
}

struct Inner {
    state: watch::Sender<Arc<CartList>>,
    cache: Cache,
    config: CartConfig,
    runtime: Handle,
    next_seq: AtomicU64,
    persisted_seq: Mutex<u64>,
}

impl CartStore {
    /// Open the cart, loading whatever list was persisted last.
    ///
    /// A missing, unreadable or malformed stored value yields an empty cart.
    /// Must be called from within a tokio runtime; write tasks are spawned
    /// onto that runtime.
    pub async fn open(store: impl KeyValueStore + 'static, config: CartConfig) -> Self {
        Self::from_cache(Cache::new(store), config).await
    }

    /// Open the cart on an existing [`Cache`].
    pub async fn from_cache(cache: Cache, config: CartConfig) -> Self {
        let products = load_products(&cache, &config.storage_key).await;
        let (state, _) = watch::channel(Arc::new(products));

        Self {
            inner: Arc::new(Inner {
                state,
                cache,
                config,
                runtime: Handle::current(),
                next_seq: AtomicU64::new(0),
                persisted_seq: Mutex::new(0),
            }),
        }
    }

    /// Current cart contents.
    pub fn products(&self) -> Arc<CartList> {
        Arc::clone(&self.inner.state.borrow())
    }

    /// Receiver notified whenever the cart changes.
    pub fn subscribe(&self) -> watch::Receiver<Arc<CartList>> {
        self.inner.state.subscribe()
    }

    /// Configuration the store was opened with.
    pub fn config(&self) -> &CartConfig {
        &self.inner.config
    }

    /// Add one unit of `product`, appending a new entry if needed.
    pub fn add_to_cart(&self, product: Product) -> PendingWrite {
        tracing::debug!(id = %product.id, "add to cart");
        self.apply(WriteMode::AfterMutation, move |list| Some(list.with_added(product)))
    }

    /// Add one unit of `id`. Unknown ids leave the cart unchanged.
    pub fn increment(&self, id: &ProductId) -> PendingWrite {
        tracing::debug!(%id, "increment");
        self.apply(self.inner.config.write_mode, |list| list.with_incremented(id))
    }

    /// Remove one unit of `id`, never going below zero. Unknown ids leave the
    /// cart unchanged.
    pub fn decrement(&self, id: &ProductId) -> PendingWrite {
        tracing::debug!(%id, "decrement");
        let policy = self.inner.config.zero_quantity;
        self.apply(self.inner.config.write_mode, |list| {
            list.with_decremented(id, policy)
        })
    }

    /// Replace the state with `f`'s result (if any) and schedule a write.
    ///
    /// The write is scheduled even when `f` leaves the list unchanged.
    fn apply<F>(&self, mode: WriteMode, f: F) -> PendingWrite
    where
        F: FnOnce(&CartList) -> Option<CartList>,
    {
        let mut seq = 0;
        let mut snapshot = None;

        self.inner.state.send_if_modified(|current| {
            seq = self.inner.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
            let next = f(&**current).map(Arc::new);

            snapshot = Some(match (&next, mode) {
                (Some(next), WriteMode::AfterMutation) => Arc::clone(next),
                _ => Arc::clone(current),
            });

            // An unchanged list (decrement at zero under `Keep`) is still
            // written but does not wake subscribers.
            match next {
                Some(next) if *next != **current => {
                    *current = next;
                    true
                }
                _ => false,
            }
        });

        let list = snapshot.unwrap_or_else(|| self.products());
        self.schedule_write(seq, list)
    }

    fn schedule_write(&self, seq: u64, list: Arc<CartList>) -> PendingWrite {
        let inner = Arc::clone(&self.inner);
        let handle = self
            .inner
            .runtime
            .spawn(async move { inner.persist(seq, list).await });
        PendingWrite { seq, handle }
    }
}

impl Inner {
    async fn persist(&self, seq: u64, list: Arc<CartList>) -> WriteOutcome {
        let key = self.config.storage_key.as_str();
        let mut persisted = self.persisted_seq.lock().await;

        if *persisted > seq {
            tracing::debug!(key, seq, persisted = *persisted, "skipping superseded cart write");
            return WriteOutcome::Superseded;
        }

        match self.cache.set(key, &*list).await {
            Ok(()) => {
                *persisted = seq;
                tracing::debug!(key, seq, items = list.len(), "cart persisted");
                WriteOutcome::Written
            }
            Err(e) => {
                tracing::error!(key, seq, error = %e, "failed to persist cart");
                WriteOutcome::Failed
            }
        }
    }
}

async fn load_products(cache: &Cache, key: &str) -> CartList {
    match cache.get::<CartList>(key).await {
        Ok(Some(list)) => {
            tracing::debug!(key, items = list.len(), "loaded stored cart");
            list
        }
        Ok(None) => CartList::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "could not load stored cart, starting empty");
            CartList::new()
        }
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("products", &self.products())
            .field("config", &self.inner.config)
            .finish()
    }
}
