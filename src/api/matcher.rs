use log::debug;

use crate::api::error::EntitlementError;
use crate::api::types::catalog::{
    AssignedService, AssignedServicePlan, AssignmentRecord, EntitledAndAssignedServices,
    EntitledService, EntitledServicePlan,
};

/// Finds the orderable plan `plan_name` of service `service_name`
///
/// Names match exactly and the first match wins.
pub fn find_entitled_plan<'a>(
    catalog: &'a EntitledAndAssignedServices,
    service_name: &str,
    plan_name: &str,
) -> Result<&'a EntitledServicePlan, EntitlementError> {
    let service = find_entitled_service(catalog, service_name)?;
    match service.service_plans.iter().find(|plan| plan.name == plan_name) {
        Some(plan) => Ok(plan),
        None => Err(EntitlementError::PlanNotFound(plan_name.to_string())),
    }
}

fn find_entitled_service<'a>(
    catalog: &'a EntitledAndAssignedServices,
    service_name: &str,
) -> Result<&'a EntitledService, EntitlementError> {
    match catalog
        .entitled_services
        .iter()
        .find(|service| service.name == service_name)
    {
        Some(service) => Ok(service),
        None => Err(EntitlementError::ServiceNotFound(service_name.to_string())),
    }
}

/// Finds the assignment of a plan to `entity_id`
///
/// `Ok(None)` means the entity has not been granted the plan yet. When a
/// unique identifier is given the plan must match on both name and
/// identifier. More than one record for the entity is an error.
pub fn find_assignment<'a>(
    catalog: &'a EntitledAndAssignedServices,
    service_name: &str,
    plan_name: &str,
    unique_identifier: Option<&str>,
    entity_id: &str,
) -> Result<Option<&'a AssignmentRecord>, EntitlementError> {
    let service = match find_assigned_service(catalog, service_name) {
        Some(service) => service,
        None => {
            debug!("No assignment for service {}", service_name);
            return Ok(None);
        }
    };

    let plan = match find_assigned_plan(service, plan_name, unique_identifier) {
        Some(plan) => plan,
        None => {
            debug!("No assignment for plan {}/{}", service_name, plan_name);
            return Ok(None);
        }
    };

    filter_assignment_info(plan, entity_id)
}

fn find_assigned_service<'a>(
    catalog: &'a EntitledAndAssignedServices,
    service_name: &str,
) -> Option<&'a AssignedService> {
    catalog
        .assigned_services
        .iter()
        .find(|service| service.name == service_name)
}

fn find_assigned_plan<'a>(
    service: &'a AssignedService,
    plan_name: &str,
    unique_identifier: Option<&str>,
) -> Option<&'a AssignedServicePlan> {
    match unique_identifier {
        Some(id) => service.service_plans.iter().find(|plan| {
            plan.name == plan_name && plan.unique_identifier.as_deref() == Some(id)
        }),
        None => service.service_plans.iter().find(|plan| plan.name == plan_name),
    }
}

fn filter_assignment_info<'a>(
    plan: &'a AssignedServicePlan,
    entity_id: &str,
) -> Result<Option<&'a AssignmentRecord>, EntitlementError> {
    let mut found: Option<&AssignmentRecord> = None;
    for record in plan.assignment_info.iter() {
        if record.entity_id == entity_id {
            if found.is_some() {
                return Err(EntitlementError::MultipleAssignments);
            }
            found = Some(record);
        }
    }
    Ok(found)
}
