use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::Response;

use crate::api::error::{EntitlementError, RemoteError};
use crate::api::types::catalog::EntitledAndAssignedServices;
use crate::api::types::service_plans::SetServicePlansRequest;
use crate::api::{EntitlementsAPI, EntitlementsTransport};

const ASSIGNMENTS_PATH: &str = "entitlements/v1/assignments";
const SERVICE_PLANS_PATH: &str = "entitlements/v1/subaccountServicePlans";

impl EntitlementsAPI {
    pub(crate) async fn assignments(
        &self,
        entity_id: &str,
        service_name: &str,
    ) -> Result<EntitledAndAssignedServices, EntitlementError> {
        let mut url = self.config.endpoint(ASSIGNMENTS_PATH)?;
        url.query_pairs_mut()
            .append_pair("subaccountGUID", entity_id)
            .append_pair("assignedServiceName", service_name);
        debug!("Fetching assignments from {}", url);
        match self.authorized_get_client(url).send().await {
            Ok(response) => {
                if response.status().is_success() {
                    match response.json().await {
                        Ok(catalog) => Ok(catalog),
                        Err(e) => {
                            error!("{:?}", e);
                            Err(RemoteError::transport(format!(
                                "cannot decode assignments: {}",
                                e
                            ))
                            .into())
                        }
                    }
                } else {
                    Err(EntitlementsAPI::failed_response(response).await.into())
                }
            }
            Err(e) => {
                error!("{:?}", e);
                Err(RemoteError::transport(e.to_string()).into())
            }
        }
    }

    pub(crate) async fn service_plans(
        &self,
        request: &SetServicePlansRequest,
    ) -> Result<(), EntitlementError> {
        let url = self.config.endpoint(SERVICE_PLANS_PATH)?;
        match self.authorized_put_client(url).json(request).send().await {
            Ok(response) => {
                if response.status().is_success() {
                    Ok(())
                } else {
                    Err(EntitlementsAPI::failed_response(response).await.into())
                }
            }
            Err(e) => {
                error!("{:?}", e);
                Err(RemoteError::transport(e.to_string()).into())
            }
        }
    }

    async fn failed_response(response: Response) -> RemoteError {
        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body.to_vec(),
            Err(e) => {
                error!("{:?}", e);
                Vec::new()
            }
        };
        warn!("{} result: {}", status, String::from_utf8_lossy(&body));
        RemoteError::response(status.as_u16(), body)
    }
}

#[async_trait]
impl EntitlementsTransport for EntitlementsAPI {
    async fn get_assignments(
        &self,
        entity_id: &str,
        service_name: &str,
    ) -> Result<EntitledAndAssignedServices, EntitlementError> {
        self.assignments(entity_id, service_name).await
    }

    async fn set_service_plans(
        &self,
        request: &SetServicePlansRequest,
    ) -> Result<(), EntitlementError> {
        self.service_plans(request).await
    }
}
