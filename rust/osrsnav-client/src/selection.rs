use std::future::Future;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use osrsnav_core::DataSelection;
use tracing::{debug, info};

/// Write-once cell for the server's [`DataSelection`].
///
/// Empty until a fetch succeeds, then fixed for the life of the process. Clones share the cell.
/// Concurrent first fetches may all reach the server; the first to store wins and the others
/// adopt its value.
#[derive(Clone, Debug)]
pub struct SelectionCache {
    cell: Arc<ArcSwapOption<DataSelection>>,
}

impl Default for SelectionCache {
    fn default() -> Self { Self::new() }
}

impl SelectionCache {
    pub fn new() -> Self { Self { cell: Arc::new(ArcSwapOption::empty()) } }

    pub fn get(&self) -> Option<Arc<DataSelection>> { self.cell.load_full() }

    pub fn is_populated(&self) -> bool { self.cell.load().is_some() }

    /// Store `fetched` unless another writer already did; returns whichever value is cached.
    pub fn store(&self, fetched: DataSelection) -> Arc<DataSelection> {
        let fetched = Arc::new(fetched);
        let empty: Option<Arc<DataSelection>> = None;
        let previous = self.cell.compare_and_swap(&empty, Some(Arc::clone(&fetched)));
        match &*previous {
            Some(winner) => {
                debug!("selection already cached by a concurrent fetch");
                Arc::clone(winner)
            }
            None => {
                info!(
                    varps = fetched.varps.len(),
                    varbits = fetched.varbits.len(),
                    items = fetched.items.len(),
                    skills = fetched.skills.len(),
                    "selection cached"
                );
                fetched
            }
        }
    }

    /// Cached value, or the result of `fetch` if it succeeds. Failures are not remembered.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Option<Arc<DataSelection>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<DataSelection>>,
    {
        if let Some(cached) = self.get() {
            return Some(cached);
        }
        fetch().await.map(|fetched| self.store(fetched))
    }
}
