//! Memo table for built price tables.
//!
//! Readers load an `Arc<HashMap<..>>` snapshot without locking; a miss builds
//! the table and swaps in a new snapshot containing it. Entries are never
//! evicted, only dropped wholesale by [`PriceTableCache::clear`].

use std::{collections::HashMap, sync::Arc};

use arc_swap::ArcSwap;
use market_data_ingestor::providers::{DataProvider, ProviderError};
use tracing::{debug, info};

use crate::{
    price_table::{PriceTable, build_price_table},
    tickers::TickerMap,
};

/// `(days, TickerMap::serialized())`
type CacheKey = (u32, String);

type Tables = HashMap<CacheKey, Arc<PriceTable>>;

pub struct PriceTableCache {
    tables: ArcSwap<Tables>,
}

impl Default for PriceTableCache {
    fn default() -> Self {
        Self {
            tables: ArcSwap::from_pointee(Tables::new()),
        }
    }
}

impl PriceTableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached table for `(days, tickers)`, building and storing it
    /// on the first request.
    ///
    /// Failed builds are not stored, so the next call retries the provider.
    pub async fn get_or_build<P>(
        &self,
        provider: &P,
        days: u32,
        tickers: &TickerMap,
    ) -> Result<Arc<PriceTable>, ProviderError>
    where
        P: DataProvider + ?Sized,
    {
        let key: CacheKey = (days, tickers.serialized());
        if let Some(table) = self.tables.load().get(&key) {
            debug!(days, "price table cache hit");
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(build_price_table(provider, days, tickers).await?);
        self.tables.rcu(|current| {
            let mut next = Tables::clone(current);
            next.insert(key.clone(), Arc::clone(&table));
            next
        });
        info!(days, rows = table.len(), "price table cached");
        Ok(table)
    }

    /// Cached table for `(days, tickers)`, without fetching.
    pub fn get(&self, days: u32, tickers: &TickerMap) -> Option<Arc<PriceTable>> {
        self.tables
            .load()
            .get(&(days, tickers.serialized()))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.tables.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.load().is_empty()
    }

    /// Drops every cached table.
    pub fn clear(&self) {
        self.tables.store(Arc::new(Tables::new()));
    }
}
