//! Async wrapper around [`FranchiseClient`] for use in async runtimes (Tokio).
//!
//! Runs every request on the blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//! Page loads that need several independent fetches issue them concurrently
//! and join the results; a [`CancelToken`] lets a consumer that goes away
//! discard a load before it completes.
//!
//! # Example
//!
//! ```no_run
//! use franchise_insights::{AsyncFranchiseClient, CancelToken};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = AsyncFranchiseClient::builder().from_env().build().await.unwrap();
//!
//!     let token = CancelToken::new();
//!     let page = client.load_browse_with_cancel(&token).await.unwrap();
//!     println!("{} listings in {} categories", page.listings.len(), page.categories.len());
//! }
//! ```

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::warn;

use crate::error::{FranchiseError, Result};
use crate::models::{AiQuestion, Category, HealthStatus, IndustryInsight, Listing};
use crate::queries::ListingFilter;
use crate::stats::{self, ListingStatistics};
use crate::{FranchiseClient, FranchiseClientBuilder};

// ---------------------------------------------------------------------------
// CancelToken
// ---------------------------------------------------------------------------

/// Cooperative cancellation shared between a consumer and its pending loads.
///
/// Cloning yields a handle to the same token.
#[derive(Debug, Clone)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once [`cancel`](Self::cancel) has been called.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as `self`, so this only ends on cancel.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }

    /// Run `fut` unless cancelled first; cancellation wins ties.
    pub async fn run<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.is_cancelled() {
            return Err(FranchiseError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.cancelled() => Err(FranchiseError::Cancelled),
            result = fut => result,
        }
    }
}

// ---------------------------------------------------------------------------
// Page payloads
// ---------------------------------------------------------------------------

/// Data for the browse page.
#[derive(Debug, Clone, Default)]
pub struct BrowseData {
    pub listings: Vec<Listing>,
    pub categories: Vec<Category>,
}

/// Data for the home page. Listings and insights degrade independently:
/// a failed fetch leaves its part empty.
#[derive(Debug, Clone)]
pub struct HomeData {
    pub health: HealthStatus,
    pub listing_count: usize,
    pub statistics: Option<ListingStatistics>,
    pub insights: Vec<IndustryInsight>,
}

// ---------------------------------------------------------------------------
// AsyncFranchiseClientBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncFranchiseClient`].
#[derive(Debug, Clone, Default)]
pub struct AsyncFranchiseClientBuilder {
    inner: FranchiseClientBuilder,
}

impl AsyncFranchiseClientBuilder {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.inner = self.inner.url(url);
        self
    }

    pub fn anon_key(mut self, key: impl Into<String>) -> Self {
        self.inner = self.inner.anon_key(key);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    pub fn from_env(mut self) -> Self {
        self.inner = self.inner.from_env();
        self
    }

    /// Build the async client.
    ///
    /// Construction of the blocking HTTP client runs on the blocking thread
    /// pool so it won't block the async event loop.
    pub async fn build(self) -> Result<AsyncFranchiseClient> {
        let inner = self.inner;
        tokio::task::spawn_blocking(move || {
            let client = inner.build()?;
            Ok(AsyncFranchiseClient {
                inner: Arc::new(client),
            })
        })
        .await
        .map_err(|e| FranchiseError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncFranchiseClient
// ---------------------------------------------------------------------------

/// Async wrapper around [`FranchiseClient`].
///
/// Cheap to clone; clones share the underlying HTTP client.
#[derive(Clone)]
pub struct AsyncFranchiseClient {
    inner: Arc<FranchiseClient>,
}

impl AsyncFranchiseClient {
    pub fn builder() -> AsyncFranchiseClientBuilder {
        AsyncFranchiseClientBuilder::default()
    }

    /// Run a sync client operation on the blocking thread pool.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use franchise_insights::AsyncFranchiseClient;
    /// # async fn example(client: AsyncFranchiseClient) -> franchise_insights::Result<()> {
    /// let categories = client.run(|c| c.categories().list()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&FranchiseClient) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let client = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&client))
            .await
            .map_err(|e| FranchiseError::InvalidArgument(format!("Task join error: {e}")))?
    }

    pub async fn health_check(&self) -> HealthStatus {
        match self.run(|c| Ok(c.health_check())).await {
            Ok(status) => status,
            Err(e) => HealthStatus::failed(e.to_string()),
        }
    }

    pub async fn listings(&self, filter: ListingFilter) -> Result<Vec<Listing>> {
        self.run(move |c| c.listings().list(&filter)).await
    }

    pub async fn listing(&self, id: &str) -> Result<Option<Listing>> {
        let id = id.to_string();
        self.run(move |c| c.listings().get(&id)).await
    }

    pub async fn categories(&self) -> Result<Vec<Category>> {
        self.run(|c| c.categories().list()).await
    }

    pub async fn insights(&self) -> Vec<IndustryInsight> {
        self.run(|c| Ok(c.insights().list())).await.unwrap_or_default()
    }

    pub async fn questions(&self) -> Vec<AiQuestion> {
        self.run(|c| Ok(c.questions().list())).await.unwrap_or_default()
    }

    pub async fn statistics(&self, filter: ListingFilter) -> Result<ListingStatistics> {
        self.run(move |c| c.listings().statistics(&filter)).await
    }

    // -- Joined page loads -------------------------------------------------

    /// Fetch listings and categories concurrently. Fails if either fails.
    pub async fn load_browse(&self) -> Result<BrowseData> {
        let (listings, categories) =
            tokio::try_join!(self.listings(ListingFilter::default()), self.categories())?;
        Ok(BrowseData { listings, categories })
    }

    /// Check connectivity, then fetch listings and insights concurrently.
    ///
    /// Only the health check decides success; a failed listing fetch yields
    /// a zero count and no statistics, failed insights an empty list.
    pub async fn load_home(&self) -> HomeData {
        let health = self.health_check().await;
        if !health.ok {
            return HomeData {
                health,
                listing_count: 0,
                statistics: None,
                insights: Vec::new(),
            };
        }

        let (listings, insights) =
            tokio::join!(self.listings(ListingFilter::default()), self.insights());
        let listings = listings.unwrap_or_else(|e| {
            warn!(error = %e, "home page listing fetch failed");
            Vec::new()
        });

        HomeData {
            health,
            listing_count: listings.len(),
            statistics: (!listings.is_empty()).then(|| stats::build_statistics(&listings)),
            insights,
        }
    }

    pub async fn load_browse_with_cancel(&self, token: &CancelToken) -> Result<BrowseData> {
        token.run(self.load_browse()).await
    }

    pub async fn load_home_with_cancel(&self, token: &CancelToken) -> Result<HomeData> {
        token.run(async { Ok(self.load_home().await) }).await
    }

    pub async fn listing_with_cancel(&self, id: &str, token: &CancelToken) -> Result<Option<Listing>> {
        token.run(self.listing(id)).await
    }

    /// Return a reference to the wrapped blocking client.
    pub fn blocking(&self) -> &FranchiseClient {
        &self.inner
    }
}
