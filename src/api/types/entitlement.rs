use serde::{Deserialize, Serialize};

use crate::api::types::catalog::{AssignmentRecord, EntitledServicePlan};

/// Entitlement the caller wants to exist
///
/// Built fresh by the caller on every reconcile pass.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesiredEntitlement {
    /// Technical name of the service
    pub service_name: String,
    /// Name of the plan within the service
    pub service_plan_name: String,
    /// Disambiguates plans sharing a display name
    pub service_plan_unique_identifier: Option<String>,
    /// GUID of the subaccount or directory receiving the quota
    pub entity_id: String,
    /// Numeric quota, absent for enable-only plans
    pub amount: Option<i64>,
}

impl DesiredEntitlement {
    /// Creates a desired entitlement without unique identifier or amount
    pub fn new<S: Into<String>>(service_name: S, service_plan_name: S, entity_id: S) -> Self {
        DesiredEntitlement {
            service_name: service_name.into(),
            service_plan_name: service_plan_name.into(),
            service_plan_unique_identifier: None,
            entity_id: entity_id.into(),
            amount: None,
        }
    }

    /// Sets the numeric quota
    pub fn with_amount(mut self, amount: i64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Sets the plan unique identifier
    pub fn with_unique_identifier<S: Into<String>>(mut self, unique_identifier: S) -> Self {
        self.service_plan_unique_identifier = Some(unique_identifier.into());
        self
    }
}

/// Quota state pushed to the remote service
///
/// The quota model is fixed once per entitlement, so a value never switches
/// between the two variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RequiredState {
    /// Bounded by an amount
    Numeric(i64),
    /// Enable-only plan
    Enabled(bool),
}

impl RequiredState {
    /// Whether this entitlement uses numeric quota
    pub fn is_numeric(&self) -> bool {
        matches!(self, RequiredState::Numeric(_))
    }

    /// State that revokes the quota while keeping the quota model
    pub fn removal(&self) -> RequiredState {
        match self {
            RequiredState::Numeric(_) => RequiredState::Numeric(0),
            RequiredState::Enabled(_) => RequiredState::Enabled(false),
        }
    }

    /// Amount to send, if numeric
    pub fn amount(&self) -> Option<i64> {
        match self {
            RequiredState::Numeric(amount) => Some(*amount),
            RequiredState::Enabled(_) => None,
        }
    }

    /// Enable flag to send, if boolean
    pub fn enable(&self) -> Option<bool> {
        match self {
            RequiredState::Numeric(_) => None,
            RequiredState::Enabled(enabled) => Some(*enabled),
        }
    }
}

/// Orderable plan together with its current assignment
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    /// Plan as listed in the entitled catalog
    pub entitled_service_plan: EntitledServicePlan,
    /// `None` when the entity was never granted this plan
    pub assignment: Option<AssignmentRecord>,
}

/// Change needed to reach the required state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// No assignment exists yet
    Assign,
    /// An assignment exists with different quota
    Update,
    /// Already converged
    None,
}

impl Instance {
    /// Compares the observed assignment against the required state
    pub fn is_up_to_date(&self, required: &RequiredState) -> bool {
        let assignment = match &self.assignment {
            Some(assignment) => assignment,
            None => return false,
        };
        match required {
            RequiredState::Numeric(amount) => assignment.amount == Some(*amount as f64),
            // an assignment without the flag is an active one
            RequiredState::Enabled(enabled) => assignment.enabled.unwrap_or(true) == *enabled,
        }
    }

    /// Minimal mutation to converge on `required`
    pub fn mutation(&self, required: &RequiredState) -> Mutation {
        if self.assignment.is_none() {
            Mutation::Assign
        } else if self.is_up_to_date(required) {
            Mutation::None
        } else {
            Mutation::Update
        }
    }
}

/// Result of an observe pass
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Matched plan and assignment
    pub instance: Instance,
    /// Quota derived from the matched plan and the desired entitlement
    pub required: RequiredState,
}

impl Observation {
    /// Whether the entitlement exists remotely
    pub fn exists(&self) -> bool {
        self.instance.assignment.is_some()
    }

    /// Whether the remote state matches the required state
    pub fn is_up_to_date(&self) -> bool {
        self.instance.is_up_to_date(&self.required)
    }

    /// Mutation the control loop should issue next
    pub fn mutation(&self) -> Mutation {
        self.instance.mutation(&self.required)
    }
}

#[cfg(test)]
mod tests {
    use super::{Instance, Mutation, RequiredState};
    use crate::api::types::catalog::{AssignmentRecord, EntitledServicePlan};

    fn instance(assignment: Option<AssignmentRecord>) -> Instance {
        Instance {
            entitled_service_plan: EntitledServicePlan {
                name: "application".to_string(),
                ..Default::default()
            },
            assignment,
        }
    }

    fn record(amount: Option<f64>, enabled: Option<bool>) -> AssignmentRecord {
        AssignmentRecord {
            entity_id: "sa-1".to_string(),
            amount,
            enabled,
            ..Default::default()
        }
    }

    #[test]
    fn removal_keeps_quota_model() {
        assert_eq!(RequiredState::Numeric(3).removal(), RequiredState::Numeric(0));
        assert_eq!(RequiredState::Enabled(true).removal(), RequiredState::Enabled(false));
    }

    #[test]
    fn exactly_one_field_is_set() {
        let numeric = RequiredState::Numeric(2);
        assert_eq!(numeric.amount(), Some(2));
        assert_eq!(numeric.enable(), None);
        let boolean = RequiredState::Enabled(true);
        assert_eq!(boolean.amount(), None);
        assert_eq!(boolean.enable(), Some(true));
    }

    #[test]
    fn absent_assignment_needs_assign() {
        let instance = instance(None);
        assert!(!instance.is_up_to_date(&RequiredState::Enabled(true)));
        assert_eq!(instance.mutation(&RequiredState::Enabled(true)), Mutation::Assign);
    }

    #[test]
    fn numeric_amount_drift_needs_update() {
        let instance = instance(Some(record(Some(1.0), None)));
        assert_eq!(instance.mutation(&RequiredState::Numeric(3)), Mutation::Update);
        assert_eq!(instance.mutation(&RequiredState::Numeric(1)), Mutation::None);
    }

    #[test]
    fn missing_enabled_flag_counts_as_enabled() {
        let instance = instance(Some(record(None, None)));
        assert!(instance.is_up_to_date(&RequiredState::Enabled(true)));
        assert!(!instance.is_up_to_date(&RequiredState::Enabled(false)));
    }
}
