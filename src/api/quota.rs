use crate::api::types::catalog::EntitledServicePlan;
use crate::api::types::entitlement::{DesiredEntitlement, RequiredState};

/// Decides whether an entitlement is bounded by an amount
///
/// Catalog metadata may be incomplete, so the caller's intent (an amount was
/// given) is consulted as well. An unlimited plan is never numeric.
pub fn is_numeric_quota(unlimited: bool, amount: Option<i64>) -> bool {
    if unlimited {
        return false;
    }
    amount.is_some()
}

impl RequiredState {
    /// Classifies once and returns the state to push on create and update
    pub fn derive(plan: &EntitledServicePlan, desired: &DesiredEntitlement) -> RequiredState {
        match desired.amount {
            Some(amount) if is_numeric_quota(plan.unlimited, desired.amount) => {
                RequiredState::Numeric(amount)
            }
            _ => RequiredState::Enabled(true),
        }
    }

    /// Like [`RequiredState::derive`], but keeps the quota model of `established`
    ///
    /// Catalog metadata may change between passes (for instance `unlimited`
    /// going missing), so once a model is known only its value is refreshed.
    pub fn resolve(
        plan: &EntitledServicePlan,
        desired: &DesiredEntitlement,
        established: Option<RequiredState>,
    ) -> RequiredState {
        match established {
            Some(RequiredState::Numeric(amount)) => {
                RequiredState::Numeric(desired.amount.unwrap_or(amount))
            }
            Some(RequiredState::Enabled(_)) => RequiredState::Enabled(true),
            None => RequiredState::derive(plan, desired),
        }
    }
}
