use serde::{Deserialize, Serialize};

/// Body of the set service plans mutation
#[allow(missing_docs)]
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetServicePlansRequest {
    pub subaccount_service_plans: Vec<ServicePlanAssignment>,
}

#[allow(missing_docs)]
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePlanAssignment {
    pub service_name: String,
    pub service_plan_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_plan_unique_identifier: Option<String>,
    pub assignment_info: Vec<SubaccountServicePlan>,
}

/// Quota to apply to one entity
///
/// Exactly one of `amount` and `enable` is set when built from a
/// [`RequiredState`](crate::api::types::entitlement::RequiredState).
#[allow(missing_docs)]
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubaccountServicePlan {
    #[serde(rename = "subaccountGUID")]
    pub subaccount_guid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
}
