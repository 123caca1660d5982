use log::{debug, info};

use crate::api::error::{specify_api_error, EntitlementError};
use crate::api::matcher::{find_assignment, find_entitled_plan};
use crate::api::types::entitlement::{DesiredEntitlement, Instance, Observation, RequiredState};
use crate::api::types::service_plans::{
    ServicePlanAssignment, SetServicePlansRequest, SubaccountServicePlan,
};
use crate::api::EntitlementsTransport;
use crate::Entitlements;

/// What a delete call ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    /// The entitlement was gone on the last observe
    AlreadyAbsent,
    /// Other owners still need the boolean entitlement, left untouched
    Shared,
    /// Quota was revoked by pushing this state
    Revoked(RequiredState),
}

impl<T: EntitlementsTransport> Entitlements<T> {
    /// Reads the entitled plan and the current assignment for `desired`
    ///
    /// A missing assignment is returned as `assignment: None`, not as an error.
    /// `established` is the required state of an earlier pass; its quota model
    /// is kept, only the first pass classifies.
    pub async fn observe(
        &self,
        desired: &DesiredEntitlement,
        established: Option<RequiredState>,
    ) -> Result<Observation, EntitlementError> {
        let catalog = match self
            .transport
            .get_assignments(&desired.entity_id, &desired.service_name)
            .await
        {
            Ok(catalog) => catalog,
            Err(e) => {
                return Err(specify_api_error(e, |source| {
                    EntitlementError::ReadAssignments {
                        service: desired.service_name.clone(),
                        source: Box::new(source),
                    }
                }))
            }
        };

        let entitled_service_plan =
            find_entitled_plan(&catalog, &desired.service_name, &desired.service_plan_name)?;
        let assignment = find_assignment(
            &catalog,
            &desired.service_name,
            &desired.service_plan_name,
            desired.service_plan_unique_identifier.as_deref(),
            &desired.entity_id,
        )?;

        let required = RequiredState::resolve(entitled_service_plan, desired, established);
        debug!(
            "Observed {}/{} for {}: assigned={} required={:?}",
            desired.service_name,
            desired.service_plan_name,
            desired.entity_id,
            assignment.is_some(),
            required
        );

        Ok(Observation {
            instance: Instance {
                entitled_service_plan: entitled_service_plan.clone(),
                assignment: assignment.cloned(),
            },
            required,
        })
    }

    /// Assigns the plan, same call as [`Entitlements::update`]
    pub async fn create(
        &self,
        desired: &DesiredEntitlement,
        required: RequiredState,
    ) -> Result<(), EntitlementError> {
        self.update(desired, required).await
    }

    /// Pushes `required` for the desired plan and entity
    pub async fn update(
        &self,
        desired: &DesiredEntitlement,
        required: RequiredState,
    ) -> Result<(), EntitlementError> {
        let request = service_plans_request(desired, required);
        info!(
            "Setting {}/{} for {} to {:?}",
            desired.service_name, desired.service_plan_name, desired.entity_id, required
        );
        match self.transport.set_service_plans(&request).await {
            Ok(()) => Ok(()),
            Err(e) => Err(specify_api_error(e, |source| {
                EntitlementError::SetEntitlement {
                    service: desired.service_name.clone(),
                    plan: desired.service_plan_name.clone(),
                    source: Box::new(source),
                }
            })),
        }
    }

    /// Revokes the entitlement observed in `observation`
    ///
    /// `sibling_count` is the number of entitlements owning this same plan
    /// assignment. A boolean entitlement with other owners is left in place.
    pub async fn delete(
        &self,
        desired: &DesiredEntitlement,
        observation: &Observation,
        sibling_count: usize,
    ) -> Result<Deletion, EntitlementError> {
        // a sibling delete may already have removed the assignment
        if observation.instance.assignment.is_none() {
            info!(
                "{}/{} for {} already removed",
                desired.service_name, desired.service_plan_name, desired.entity_id
            );
            return Ok(Deletion::AlreadyAbsent);
        }

        if !observation.required.is_numeric() && sibling_count > 1 {
            info!(
                "{}/{} for {} still used by {} entitlements, skipping removal",
                desired.service_name,
                desired.service_plan_name,
                desired.entity_id,
                sibling_count - 1
            );
            return Ok(Deletion::Shared);
        }

        let removal = observation.required.removal();
        self.update(desired, removal).await?;
        Ok(Deletion::Revoked(removal))
    }
}

fn service_plans_request(
    desired: &DesiredEntitlement,
    required: RequiredState,
) -> SetServicePlansRequest {
    SetServicePlansRequest {
        subaccount_service_plans: vec![ServicePlanAssignment {
            service_name: desired.service_name.clone(),
            service_plan_name: desired.service_plan_name.clone(),
            service_plan_unique_identifier: desired.service_plan_unique_identifier.clone(),
            assignment_info: vec![SubaccountServicePlan {
                subaccount_guid: desired.entity_id.clone(),
                amount: required.amount(),
                enable: required.enable(),
            }],
        }],
    }
}
