//! End-to-end tests of the MCP surface over an in-process duplex transport.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rmcp::model::{CallToolRequestParams, CallToolResult, ClientInfo, ReadResourceRequestParams};
use rmcp::{ClientHandler, ServerHandler, ServiceExt};

use tourism_booking::adapters::clock::FixedClock;
use tourism_booking::adapters::memory::{
    MemoryBookingStore, MemoryEstablishmentStore, MemoryUserDirectory,
};
use tourism_booking::domain::actor::{Role, UserProfile};
use tourism_booking::domain::establishment::{Category, Establishment};
use tourism_booking::domain::pricing::PricingPolicy;
use tourism_booking::engine::coordinator::{BookingPolicy, Stores};
use tourism_booking::engine::{AvailabilityIndex, Catalog, ReservationCoordinator};
use tourism_booking::mcp::server::BookingMcpServer;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn venue(id: &str, name: &str, verified: bool) -> Establishment {
    Establishment {
        id: id.into(),
        operator_id: "op-1".into(),
        name: name.into(),
        description: "Chambres avec vue sur la mer".into(),
        category: Category::Hotel,
        location: "Pointe-Noire".into(),
        address: "Boulevard Charles de Gaulle".into(),
        city: "Pointe-Noire".into(),
        images: vec![],
        price: Some(20000),
        rating: None,
        latitude: None,
        longitude: None,
        is_verified: verified,
    }
}

fn profile(id: &str, role: Role) -> UserProfile {
    UserProfile {
        id: id.into(),
        email: format!("{id}@example.com"),
        first_name: "Test".into(),
        last_name: id.into(),
        role,
        avatar: None,
    }
}

fn build_server() -> BookingMcpServer {
    let stores = Stores {
        establishments: Arc::new(MemoryEstablishmentStore::with_establishments([
            venue("e-1", "Hôtel Atlantic", true),
            venue("e-2", "Lodge en attente", false),
        ])),
        bookings: Arc::new(MemoryBookingStore::new()),
        users: Arc::new(MemoryUserDirectory::with_users([
            profile("guest-1", Role::User),
            profile("guest-2", Role::User),
            profile("op-1", Role::Operator),
        ])),
    };
    let availability = Arc::new(AvailabilityIndex::new());
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 5, 20, 9, 0, 0).unwrap(),
    ));
    let coordinator = Arc::new(ReservationCoordinator::new(
        stores.clone(),
        Arc::clone(&availability),
        PricingPolicy::default(),
        BookingPolicy::default(),
        clock,
    ));
    let catalog = Arc::new(Catalog::new(stores, availability));
    BookingMcpServer::new(coordinator, catalog)
}

#[derive(Debug, Clone, Default)]
struct DummyClient;

impl ClientHandler for DummyClient {
    fn get_info(&self) -> ClientInfo {
        ClientInfo::default()
    }
}

fn extract_json(result: &CallToolResult) -> serde_json::Value {
    let text = result
        .content
        .first()
        .and_then(|c| c.raw.as_text())
        .map(|t| t.text.clone())
        .unwrap_or_default();
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("not JSON ({e}): {text}"))
}

fn is_success(result: &CallToolResult) -> bool {
    result.is_error.is_none() || result.is_error == Some(false)
}

#[allow(clippy::needless_pass_by_value)]
fn tool_params(name: &str, args: serde_json::Value) -> CallToolRequestParams {
    CallToolRequestParams {
        meta: None,
        name: std::borrow::Cow::Owned(name.to_string()),
        arguments: Some(args.as_object().unwrap().clone()),
        task: None,
    }
}

async fn setup() -> (
    rmcp::service::RunningService<rmcp::RoleClient, DummyClient>,
    tokio::task::JoinHandle<anyhow::Result<()>>,
) {
    let (server_transport, client_transport) = tokio::io::duplex(65536);

    let server = build_server();
    let server_handle = tokio::spawn(async move {
        server.serve(server_transport).await?.waiting().await?;
        anyhow::Ok(())
    });

    let client = DummyClient
        .serve(client_transport)
        .await
        .expect("client should connect");

    (client, server_handle)
}

async fn teardown(
    client: rmcp::service::RunningService<rmcp::RoleClient, DummyClient>,
    server_handle: tokio::task::JoinHandle<anyhow::Result<()>>,
) {
    let _ = client.cancel().await;
    let _ = server_handle.await;
}

fn book(actor_id: &str, check_in: &str, check_out: &str) -> CallToolRequestParams {
    tool_params(
        "create_booking",
        serde_json::json!({
            "actor_id": actor_id,
            "actor_role": "USER",
            "establishment_id": "e-1",
            "check_in": check_in,
            "check_out": check_out,
            "guests": 2,
        }),
    )
}

// ---------------------------------------------------------------------------
// Server info and tool listing
// ---------------------------------------------------------------------------

#[test]
fn server_info_advertises_tools_and_resources() {
    let info = build_server().get_info();
    assert!(info.capabilities.tools.is_some());
    assert!(info.capabilities.resources.is_some());
    let instructions = info.instructions.unwrap();
    assert!(instructions.contains("create_booking"));
    assert!(instructions.contains("tourism://establishment/{id}"));
}

#[tokio::test]
async fn list_tools_returns_20() {
    let (client, server_handle) = setup().await;

    let tools = client
        .list_tools(None)
        .await
        .expect("list_tools should work");
    let mut names: Vec<String> = tools.tools.iter().map(|t| t.name.to_string()).collect();
    names.sort();

    let mut expected = vec![
        "admin_stats",
        "admin_users",
        "cancel_booking",
        "check_availability",
        "complete_due_bookings",
        "create_booking",
        "delete_establishment",
        "get_booking",
        "get_establishment",
        "my_bookings",
        "my_establishments",
        "operator_bookings",
        "pending_establishments",
        "quote_price",
        "register_establishment",
        "reject_establishment",
        "search_establishments",
        "update_booking_status",
        "update_establishment",
        "validate_establishment",
    ];
    expected.sort_unstable();
    assert_eq!(names, expected);

    teardown(client, server_handle).await;
}

// ---------------------------------------------------------------------------
// Booking flow
// ---------------------------------------------------------------------------

#[tokio::test]
async fn overlapping_stay_conflicts_until_first_is_cancelled() {
    let (client, server_handle) = setup().await;

    let first = client
        .call_tool(book("guest-1", "2024-06-01", "2024-06-03"))
        .await
        .expect("call_tool should succeed");
    assert!(is_success(&first));
    let first = extract_json(&first);
    assert_eq!(first["status"], "PENDING");
    assert_eq!(first["totalPrice"], 40000);

    let clash = client
        .call_tool(book("guest-2", "2024-06-02", "2024-06-04"))
        .await
        .expect("call_tool should succeed");
    assert!(!is_success(&clash));
    assert_eq!(extract_json(&clash)["error"]["code"], "CONFLICT");

    let cancelled = client
        .call_tool(tool_params(
            "cancel_booking",
            serde_json::json!({
                "actor_id": "guest-1",
                "actor_role": "USER",
                "booking_id": first["id"],
            }),
        ))
        .await
        .expect("call_tool should succeed");
    assert_eq!(extract_json(&cancelled)["status"], "CANCELLED");

    let retry = client
        .call_tool(book("guest-2", "2024-06-02", "2024-06-04"))
        .await
        .expect("call_tool should succeed");
    assert!(is_success(&retry));
    assert_eq!(extract_json(&retry)["userId"], "guest-2");

    teardown(client, server_handle).await;
}

#[tokio::test]
async fn operator_sees_bookings_on_own_venues() {
    let (client, server_handle) = setup().await;

    client
        .call_tool(book("guest-1", "2024-07-01", "2024-07-05"))
        .await
        .expect("call_tool should succeed");

    let result = client
        .call_tool(tool_params(
            "operator_bookings",
            serde_json::json!({ "actor_id": "op-1", "actor_role": "OPERATOR" }),
        ))
        .await
        .expect("call_tool should succeed");
    let json = extract_json(&result);
    let bookings = json.as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["establishment"]["name"], "Hôtel Atlantic");
    assert_eq!(bookings[0]["user"]["email"], "guest-1@example.com");

    teardown(client, server_handle).await;
}

#[tokio::test]
async fn unverified_venue_cannot_be_booked() {
    let (client, server_handle) = setup().await;

    let result = client
        .call_tool(tool_params(
            "create_booking",
            serde_json::json!({
                "actor_id": "guest-1",
                "actor_role": "USER",
                "establishment_id": "e-2",
                "check_in": "2024-06-01",
                "check_out": "2024-06-02",
                "guests": 1,
            }),
        ))
        .await
        .expect("call_tool should succeed");
    assert!(!is_success(&result));
    assert_eq!(extract_json(&result)["error"]["code"], "NOT_VERIFIED");

    teardown(client, server_handle).await;
}

#[tokio::test]
async fn callers_cannot_claim_system_role() {
    let (client, server_handle) = setup().await;

    let result = client
        .call_tool(tool_params(
            "complete_due_bookings",
            serde_json::json!({ "actor_id": "anyone", "actor_role": "SYSTEM" }),
        ))
        .await;
    match result {
        Err(_) => {}
        Ok(result) => assert!(!is_success(&result), "SYSTEM role must be refused"),
    }

    teardown(client, server_handle).await;
}

#[tokio::test]
async fn admin_lists_users_and_deletes_unbooked_venue() {
    let (client, server_handle) = setup().await;

    let users = client
        .call_tool(tool_params(
            "admin_users",
            serde_json::json!({ "actor_id": "admin-1", "actor_role": "ADMIN" }),
        ))
        .await
        .expect("call_tool should succeed");
    let users = extract_json(&users);
    let ids: Vec<&str> = users
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["guest-1", "guest-2", "op-1"]);

    let deleted = client
        .call_tool(tool_params(
            "delete_establishment",
            serde_json::json!({ "actor_id": "op-1", "actor_role": "OPERATOR", "id": "e-2" }),
        ))
        .await
        .expect("call_tool should succeed");
    assert!(is_success(&deleted));

    let pending = client
        .call_tool(tool_params(
            "pending_establishments",
            serde_json::json!({ "actor_id": "admin-1", "actor_role": "ADMIN" }),
        ))
        .await
        .expect("call_tool should succeed");
    assert_eq!(extract_json(&pending), serde_json::json!([]));

    teardown(client, server_handle).await;
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_resources_shows_verified_establishments() {
    let (client, server_handle) = setup().await;

    let result = client
        .list_resources(None)
        .await
        .expect("list_resources should succeed");
    let uris: Vec<&str> = result.resources.iter().map(|r| r.raw.uri.as_str()).collect();
    assert_eq!(uris, vec!["tourism://establishment/e-1"]);

    teardown(client, server_handle).await;
}

#[tokio::test]
async fn read_calendar_resource_after_booking() {
    let (client, server_handle) = setup().await;

    client
        .call_tool(book("guest-1", "2024-06-01", "2024-06-03"))
        .await
        .expect("call_tool should succeed");

    let result = client
        .peer()
        .read_resource(ReadResourceRequestParams {
            uri: "tourism://establishment/e-1/calendar".into(),
            meta: None,
        })
        .await
        .expect("read_resource should succeed");
    assert_eq!(result.contents.len(), 1);

    teardown(client, server_handle).await;
}

#[tokio::test]
async fn read_resource_not_found_returns_error() {
    let (client, server_handle) = setup().await;

    for uri in [
        "tourism://establishment/e-2",
        "tourism://establishment/missing",
        "other://establishment/e-1",
    ] {
        let result = client
            .peer()
            .read_resource(ReadResourceRequestParams {
                uri: uri.into(),
                meta: None,
            })
            .await;
        assert!(result.is_err(), "{uri} should not resolve");
    }

    teardown(client, server_handle).await;
}
