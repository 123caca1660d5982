/// Tests for the HTTP transport against a mock entitlements service
///
/// They cover the full observe/update/delete chain through `EntitlementsAPI`,
/// including request shape, authorization and error body handling.
use btp_entitlements::api::config::EntitlementsConfig;
use btp_entitlements::api::convergence::Deletion;
use btp_entitlements::api::error::EntitlementError;
use btp_entitlements::api::{EntitlementsAPI, EntitlementsTransport};
use btp_entitlements::{DesiredEntitlement, Entitlements, Mutation, RequiredState};
use mockito::{Matcher, Server, ServerGuard};

fn assignments_body() -> String {
    serde_json::json!({
        "entitledServices": [{
            "name": "xsuaa",
            "servicePlans": [
                {"name": "application", "uniqueIdentifier": "xsuaa-application", "unlimited": false},
                {"name": "broker", "uniqueIdentifier": "xsuaa-broker", "unlimited": false}
            ]
        }],
        "assignedServices": [{
            "name": "xsuaa",
            "servicePlans": [{
                "name": "application",
                "uniqueIdentifier": "xsuaa-application",
                "assignmentInfo": [
                    {"entityId": "sa-1", "entityType": "SUBACCOUNT", "amount": 1},
                    {"entityId": "sa-2", "entityType": "SUBACCOUNT", "amount": 5}
                ]
            }]
        }]
    })
    .to_string()
}

fn config(server: &ServerGuard) -> EntitlementsConfig {
    EntitlementsConfig::parse(&server.url(), "t0k3n").expect("valid url")
}

fn desired() -> DesiredEntitlement {
    DesiredEntitlement::new("xsuaa", "application", "sa-1").with_amount(3)
}

async fn mock_assignments(server: &mut ServerGuard) -> mockito::Mock {
    server
        .mock("GET", "/entitlements/v1/assignments")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("subaccountGUID".into(), "sa-1".into()),
            Matcher::UrlEncoded("assignedServiceName".into(), "xsuaa".into()),
        ]))
        .match_header("authorization", "Bearer t0k3n")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(assignments_body())
        .create_async()
        .await
}

#[tokio::test]
async fn observe_reads_assignment() {
    let mut server = Server::new_async().await;
    let mock = mock_assignments(&mut server).await;

    let engine = Entitlements::new(config(&server)).expect("client");
    let observation = engine.observe(&desired(), None).await.expect("observe");

    let assignment = observation.instance.assignment.clone().expect("assigned");
    assert_eq!(assignment.entity_id, "sa-1");
    assert_eq!(assignment.amount, Some(1.0));
    assert_eq!(observation.required, RequiredState::Numeric(3));
    assert_eq!(observation.mutation(), Mutation::Update);
    mock.assert_async().await;
}

#[tokio::test]
async fn update_sends_numeric_quota() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/entitlements/v1/subaccountServicePlans")
        .match_header("authorization", "Bearer t0k3n")
        .match_body(Matcher::Json(serde_json::json!({
            "subaccountServicePlans": [{
                "serviceName": "xsuaa",
                "servicePlanName": "application",
                "assignmentInfo": [{"subaccountGUID": "sa-1", "amount": 3}]
            }]
        })))
        .with_status(202)
        .create_async()
        .await;

    let engine = Entitlements::new(config(&server)).expect("client");
    engine
        .update(&desired(), RequiredState::Numeric(3))
        .await
        .expect("update");
    mock.assert_async().await;
}

#[tokio::test]
async fn delete_zeroes_numeric_quota() {
    let mut server = Server::new_async().await;
    let get = mock_assignments(&mut server).await;
    let put = server
        .mock("PUT", "/entitlements/v1/subaccountServicePlans")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "subaccountServicePlans": [{
                "assignmentInfo": [{"subaccountGUID": "sa-1", "amount": 0}]
            }]
        })))
        .with_status(202)
        .create_async()
        .await;

    let engine = Entitlements::new(config(&server)).expect("client");
    let observation = engine.observe(&desired(), None).await.expect("observe");
    let deletion = engine
        .delete(&desired(), &observation, 1)
        .await
        .expect("delete");

    assert_eq!(deletion, Deletion::Revoked(RequiredState::Numeric(0)));
    get.assert_async().await;
    put.assert_async().await;
}

#[tokio::test]
async fn structured_error_body_is_translated() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/entitlements/v1/subaccountServicePlans")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":{"code":11006,"message":"Quota exceeded","correlationID":"abc"}}"#)
        .create_async()
        .await;

    let engine = Entitlements::new(config(&server)).expect("client");
    let err = engine
        .update(&desired(), RequiredState::Numeric(3))
        .await
        .expect_err("should fail");

    assert_eq!(err.to_string(), "API Error: Quota exceeded, Code 11006");
    assert!(!err.is_terminal());
    mock.assert_async().await;
}

#[tokio::test]
async fn raw_error_body_is_translated() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/entitlements/v1/subaccountServicePlans")
        .with_status(503)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let engine = Entitlements::new(config(&server)).expect("client");
    let err = engine
        .update(&desired(), RequiredState::Numeric(3))
        .await
        .expect_err("should fail");

    assert_eq!(err.to_string(), "API Error: upstream unavailable");
    mock.assert_async().await;
}

#[tokio::test]
async fn failed_read_keeps_remote_error() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/entitlements/v1/assignments")
        .match_query(Matcher::Any)
        .with_status(401)
        .create_async()
        .await;

    let api = EntitlementsAPI::new(config(&server)).expect("client");
    match api.get_assignments("sa-1", "xsuaa").await {
        Err(EntitlementError::Remote(remote)) => {
            assert_eq!(remote.status, Some(401));
            assert!(remote.model.is_none());
            assert!(remote.body.is_none());
        }
        other => panic!("unexpected {:?}", other),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn failed_observe_translates_error_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/entitlements/v1/assignments")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":{"code":11002,"message":"Subaccount sa-1 not found"}}"#)
        .create_async()
        .await;

    let engine = Entitlements::new(config(&server)).expect("client");
    let err = engine
        .observe(&desired(), None)
        .await
        .expect_err("should fail");

    assert_eq!(err.to_string(), "API Error: Subaccount sa-1 not found, Code 11002");
    assert!(!err.is_terminal());
    mock.assert_async().await;
}

#[tokio::test]
async fn failed_observe_without_body_names_service() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/entitlements/v1/assignments")
        .match_query(Matcher::Any)
        .with_status(401)
        .create_async()
        .await;

    let engine = Entitlements::new(config(&server)).expect("client");
    let err = engine
        .observe(&desired(), None)
        .await
        .expect_err("should fail");

    assert!(matches!(err, EntitlementError::ReadAssignments { .. }));
    assert!(err.to_string().contains("xsuaa"));
    mock.assert_async().await;
}

#[tokio::test]
async fn base_url_path_prefix_is_kept() {
    let mut server = Server::new_async().await;
    let get = server
        .mock("GET", "/btp/entitlements/v1/assignments")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(assignments_body())
        .create_async()
        .await;
    let put = server
        .mock("PUT", "/btp/entitlements/v1/subaccountServicePlans")
        .with_status(202)
        .create_async()
        .await;

    let config =
        EntitlementsConfig::parse(&format!("{}/btp/", server.url()), "t0k3n").expect("valid url");
    let engine = Entitlements::new(config).expect("client");
    let observation = engine.observe(&desired(), None).await.expect("observe");
    engine
        .update(&desired(), observation.required)
        .await
        .expect("update");

    get.assert_async().await;
    put.assert_async().await;
}
