//! Dashboard view state.
//!
//! [`Dashboard`] owns the last KPI snapshot and product list that were
//! successfully fetched together. A refresh either replaces both or neither:
//! when one of the two reads fails, the previous data stays in place and the
//! failure is recorded so the view can mark it stale instead of showing an
//! empty inventory.

use chrono::{DateTime, Utc};
use stockr_core::{ItemForm, KpiSnapshot, Product};

use crate::client::InventoryClient;
use crate::error::ClientError;

/// Result of a successful product submission.
///
/// The product exists on the backend in both cases; only the follow-up
/// refresh may have failed.
#[derive(Debug)]
pub enum SubmitOutcome {
    Refreshed,
    RefreshFailed(ClientError),
}

pub struct Dashboard {
    client: InventoryClient,
    kpis: Option<KpiSnapshot>,
    products: Vec<Product>,
    last_refreshed_at: Option<DateTime<Utc>>,
    last_error: Option<String>,
    submit_error: Option<String>,
}

impl Dashboard {
    #[must_use]
    pub fn new(client: InventoryClient) -> Self {
        Self {
            client,
            kpis: None,
            products: Vec::new(),
            last_refreshed_at: None,
            last_error: None,
            submit_error: None,
        }
    }

    /// KPI snapshot from the last successful refresh.
    #[must_use]
    pub fn kpis(&self) -> Option<&KpiSnapshot> {
        self.kpis.as_ref()
    }

    /// Products from the last successful refresh, in backend order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn last_refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.last_refreshed_at
    }

    /// Message of the most recent refresh failure, cleared by the next
    /// successful refresh.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Message of the most recent failed submission, cleared by the next
    /// successful one. Does not affect [`Dashboard::is_stale`].
    #[must_use]
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// `true` once at least one refresh has been applied.
    #[must_use]
    pub fn has_loaded(&self) -> bool {
        self.last_refreshed_at.is_some()
    }

    /// `true` when data is shown but the latest refresh failed.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.has_loaded() && self.last_error.is_some()
    }

    /// Fetches KPIs and products concurrently and applies both at once.
    ///
    /// # Errors
    ///
    /// Returns the first [`ClientError`] from either request. The previously
    /// applied KPIs and products are left untouched.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let fetched = tokio::try_join!(self.client.get_kpis(), self.client.list_products());

        match fetched {
            Ok((kpis, products)) => {
                tracing::debug!(products = products.len(), "dashboard refreshed");
                self.kpis = Some(kpis);
                self.products = products;
                self.last_refreshed_at = Some(Utc::now());
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "dashboard refresh failed; keeping last known data");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Validates and submits the form.
    ///
    /// On success the form is reset to its defaults and the dashboard is
    /// refreshed exactly once. On any failure the form is left exactly as
    /// entered.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Validation`] if the form is invalid; nothing is sent.
    /// - Any [`ClientError`] from the create request.
    pub async fn submit(&mut self, form: &mut ItemForm) -> Result<SubmitOutcome, ClientError> {
        let payload = form.to_new_product(Utc::now())?;

        if let Err(e) = self.client.create_product(&payload).await {
            tracing::warn!(error = %e, name = %payload.name, "product submission failed");
            self.submit_error = Some(format!("could not save '{}': {e}", payload.name));
            return Err(e);
        }

        self.submit_error = None;
        form.reset();

        match self.refresh().await {
            Ok(()) => Ok(SubmitOutcome::Refreshed),
            Err(e) => Ok(SubmitOutcome::RefreshFailed(e)),
        }
    }
}
