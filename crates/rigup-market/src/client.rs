use async_trait::async_trait;
use tracing::info;

use rigup_model::{CreateRequest, Instance, InstanceId, Offer, OfferId, OfferQuery};
use rigup_wait::StatusSource;

use crate::config::{MarketConfig, MarketTransport};
use crate::errors::MarketError;

/// Client for the rental marketplace.
///
/// One instance per process is enough; it is cheap to clone the
/// underlying HTTP client and every call is independent. All responses
/// cross into typed models here, so malformed marketplace JSON fails
/// with [`MarketError::Decode`] at the boundary.
pub struct MarketClient {
    pub(crate) config: MarketConfig,
    pub(crate) http: reqwest::Client,
}

impl MarketClient {
    pub fn new(config: MarketConfig) -> Result<Self, MarketError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Search rentable offers matching `query`, in its sort order.
    pub async fn search_offers(&self, query: &OfferQuery) -> Result<Vec<Offer>, MarketError> {
        match &self.config.transport {
            MarketTransport::Http => self.http_search_offers(query).await,
            MarketTransport::Cli { program } => self.cli_search_offers(program, query).await,
        }
    }

    /// Cheapest offer matching `query`, or [`MarketError::NoOffers`].
    pub async fn best_offer(&self, query: &OfferQuery) -> Result<Offer, MarketError> {
        let mut offers = self.search_offers(query).await?;
        if offers.is_empty() {
            return Err(MarketError::NoOffers);
        }
        offers.sort_by(|a, b| a.dph_total.total_cmp(&b.dph_total));
        Ok(offers.remove(0))
    }

    /// Accept an offer and create an instance from it. Returns the
    /// rental contract id, which tracks the instance from here on.
    pub async fn create_instance(
        &self,
        offer: OfferId,
        request: &CreateRequest,
    ) -> Result<InstanceId, MarketError> {
        let id = match &self.config.transport {
            MarketTransport::Http => self.http_create_instance(offer, request).await?,
            MarketTransport::Cli { program } => {
                self.cli_create_instance(program, offer, request).await?
            }
        };
        info!(offer, instance = id, image = %request.image, "instance created");
        Ok(id)
    }

    /// Fresh status snapshots of every instance in the account.
    pub async fn list_instances(&self) -> Result<Vec<Instance>, MarketError> {
        match &self.config.transport {
            MarketTransport::Http => self.http_list_instances().await,
            MarketTransport::Cli { program } => self.cli_list_instances(program).await,
        }
    }

    /// Locate one instance in the listing. Absence here is strict:
    /// the instance was never created or has been destroyed.
    pub async fn instance(&self, id: InstanceId) -> Result<Instance, MarketError> {
        self.list_instances()
            .await?
            .into_iter()
            .find(|instance| instance.id == id)
            .ok_or(MarketError::InstanceNotFound(id))
    }

    /// Boot/runtime log tail of an instance.
    pub async fn logs(&self, id: InstanceId) -> Result<String, MarketError> {
        match &self.config.transport {
            MarketTransport::Http => self.http_logs(id).await,
            MarketTransport::Cli { program } => self.cli_logs(program, id).await,
        }
    }

    /// Destroy an instance and end its billing.
    pub async fn destroy_instance(&self, id: InstanceId) -> Result<(), MarketError> {
        match &self.config.transport {
            MarketTransport::Http => self.http_destroy_instance(id).await?,
            MarketTransport::Cli { program } => self.cli_destroy_instance(program, id).await?,
        }
        info!(instance = id, "instance destroyed");
        Ok(())
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.api_url.as_str().trim_end_matches('/'),
            path
        )
    }
}

/// The waiter's fetch-status capability: one fresh listing per poll.
#[async_trait]
impl StatusSource for MarketClient {
    type Status = Instance;
    type Error = MarketError;

    async fn fetch(&self) -> Result<Vec<Instance>, MarketError> {
        self.list_instances().await
    }
}
