use serde::{Deserialize, Serialize};

/// Response of the assignments endpoint
///
/// Carries both the catalog of what can be ordered and the catalog of what is
/// currently assigned.
#[allow(missing_docs)]
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitledAndAssignedServices {
    #[serde(default)]
    pub entitled_services: Vec<EntitledService>,
    #[serde(default)]
    pub assigned_services: Vec<AssignedService>,
}

#[allow(missing_docs)]
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitledService {
    #[serde(default)]
    pub name: String,
    pub display_name: Option<String>,
    #[serde(default)]
    pub service_plans: Vec<EntitledServicePlan>,
}

#[allow(missing_docs)]
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitledServicePlan {
    #[serde(default)]
    pub name: String,
    pub display_name: Option<String>,
    pub unique_identifier: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub unlimited: bool,
    pub amount: Option<f64>,
}

#[allow(missing_docs)]
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedService {
    #[serde(default)]
    pub name: String,
    pub display_name: Option<String>,
    #[serde(default)]
    pub service_plans: Vec<AssignedServicePlan>,
}

#[allow(missing_docs)]
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedServicePlan {
    #[serde(default)]
    pub name: String,
    pub unique_identifier: Option<String>,
    #[serde(default)]
    pub assignment_info: Vec<AssignmentRecord>,
}

/// Quota state of one plan for one subaccount or directory
#[allow(missing_docs)]
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRecord {
    #[serde(default)]
    pub entity_id: String,
    pub entity_type: Option<String>,
    pub entity_state: Option<String>,
    pub state_message: Option<String>,
    pub amount: Option<f64>,
    pub requested_amount: Option<f64>,
    pub enabled: Option<bool>,
    pub unlimited_amount_assigned: Option<bool>,
}
