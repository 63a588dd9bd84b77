//! REST transport: one function per marketplace endpoint.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use rigup_model::{CreateRequest, Instance, InstanceId, Offer, OfferId, OfferQuery};

use crate::client::MarketClient;
use crate::errors::MarketError;
use crate::response::{AckResponse, CreateResponse};

#[derive(Debug, Deserialize)]
struct OffersResponse {
    offers: Vec<Offer>,
}

#[derive(Debug, Deserialize)]
struct InstancesResponse {
    instances: Vec<Instance>,
}

impl MarketClient {
    pub(crate) async fn http_search_offers(
        &self,
        query: &OfferQuery,
    ) -> Result<Vec<Offer>, MarketError> {
        let rendered = query.render();
        debug!(query = %rendered, order = query.order(), "searching offers");
        let response = self
            .http
            .get(self.endpoint("bundles"))
            .query(&[("q", rendered.as_str()), ("order", query.order())])
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;
        let body: OffersResponse = decode(response, "offer search response").await?;
        Ok(body.offers)
    }

    pub(crate) async fn http_create_instance(
        &self,
        offer: OfferId,
        request: &CreateRequest,
    ) -> Result<InstanceId, MarketError> {
        let response = self
            .http
            .put(self.endpoint(&format!("asks/{offer}")))
            .bearer_auth(&self.config.api_key)
            .json(&create_body(request))
            .send()
            .await?;
        let created: CreateResponse = decode(response, "create instance response").await?;
        if created.success == Some(false) {
            return Err(MarketError::Rejected("create instance"));
        }
        Ok(created.new_contract)
    }

    pub(crate) async fn http_list_instances(&self) -> Result<Vec<Instance>, MarketError> {
        let response = self
            .http
            .get(self.endpoint("instances"))
            .query(&[("owner", "me")])
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;
        let body: InstancesResponse = decode(response, "instance listing").await?;
        Ok(body.instances)
    }

    pub(crate) async fn http_logs(&self, id: InstanceId) -> Result<String, MarketError> {
        let response = self
            .http
            .get(self.endpoint(&format!("instances/{id}/logs")))
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(MarketError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    pub(crate) async fn http_destroy_instance(&self, id: InstanceId) -> Result<(), MarketError> {
        let response = self
            .http
            .delete(self.endpoint(&format!("instances/{id}")))
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;
        let ack: AckResponse = decode(response, "destroy instance response").await?;
        if !ack.success {
            return Err(MarketError::Rejected("destroy instance"));
        }
        Ok(())
    }
}

/// Map the creation request onto the marketplace's ask-acceptance body.
fn create_body(request: &CreateRequest) -> serde_json::Value {
    let env: serde_json::Map<String, serde_json::Value> = request
        .env
        .iter()
        .map(|(key, value)| (key.clone(), serde_json::Value::from(value.clone())))
        .collect();
    json!({
        "image": request.image,
        "disk": request.disk_gb,
        "onstart": request.onstart_cmd,
        "runtype": if request.jupyter { "jupyter" } else { "ssh" },
        "use_jupyter_lab": request.jupyter_lab,
        "env": env,
    })
}

/// Read the body once, map non-2xx to [`MarketError::Api`] with the
/// body preserved, and decode the rest into `T` with schema context.
async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
    context: &'static str,
) -> Result<T, MarketError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(MarketError::Api {
            status: status.as_u16(),
            body,
        });
    }
    serde_json::from_str(&body).map_err(|source| MarketError::Decode { context, source })
}
