use std::sync::Arc;

use chrono::NaiveDate;
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, Implementation, ListResourceTemplatesResult, ListResourcesResult,
        PaginatedRequestParams, ProtocolVersion, RawResource, RawResourceTemplate,
        ReadResourceRequestParams, ReadResourceResult, Resource, ResourceContents,
        ResourceTemplate, ServerCapabilities, ServerInfo,
    },
    schemars,
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use serde::Serialize;

use crate::domain::actor::{Actor, Role};
use crate::domain::availability::CommittedStay;
use crate::domain::booking::{BookingStatus, CreateBookingRequest, StayRange, parse_date};
use crate::domain::establishment::{Category, EstablishmentPatch, NewEstablishment, SearchFilters};
use crate::engine::{Catalog, ReservationCoordinator};
use crate::error::BookingError;

const ESTABLISHMENT_URI: &str = "tourism://establishment/";

// ---------- Tool parameter types ----------

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ActorParams {
    /// Id of the account performing the call
    pub actor_id: String,
    /// Role of that account: USER, OPERATOR, ADMIN or SUPER_ADMIN
    pub actor_role: Role,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SearchToolParams {
    /// Free text matched against name and description (case-insensitive)
    pub query: Option<String>,
    /// HOTEL, RESTAURANT, ACTIVITY or SITE_TOURISTIQUE
    pub category: Option<Category>,
    /// Minimum nightly price
    pub min_price: Option<u64>,
    /// Maximum nightly price
    pub max_price: Option<u64>,
    /// Matched against location and city (case-insensitive)
    pub location: Option<String>,
    /// Check-in date (YYYY-MM-DD). Must be paired with check_out; only venues
    /// free for the stay are returned.
    pub check_in: Option<String>,
    /// Check-out date (YYYY-MM-DD), exclusive.
    pub check_out: Option<String>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetEstablishmentToolParams {
    /// Establishment id
    pub id: String,
    /// Optional caller id; owners and administrators also see venues awaiting moderation
    pub actor_id: Option<String>,
    /// Role of the optional caller
    pub actor_role: Option<Role>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct RegisterEstablishmentToolParams {
    pub actor_id: String,
    pub actor_role: Role,
    /// Owning operator; required when an administrator lists the venue
    pub operator_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub images: Vec<String>,
    /// Nightly price in whole currency units
    pub price: Option<u64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct UpdateEstablishmentToolParams {
    pub actor_id: String,
    pub actor_role: Role,
    /// Establishment id
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub location: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub images: Option<Vec<String>>,
    pub price: Option<u64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct StayToolParams {
    /// Establishment id
    pub establishment_id: String,
    /// Check-in date (YYYY-MM-DD), inclusive
    pub check_in: String,
    /// Check-out date (YYYY-MM-DD), exclusive
    pub check_out: String,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct QuoteToolParams {
    /// Establishment id
    pub establishment_id: String,
    /// Check-in date (YYYY-MM-DD), inclusive
    pub check_in: String,
    /// Check-out date (YYYY-MM-DD), exclusive
    pub check_out: String,
    /// Number of guests (default: 1)
    pub guests: Option<u32>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CreateBookingToolParams {
    pub actor_id: String,
    pub actor_role: Role,
    /// Establishment id
    pub establishment_id: String,
    /// Check-in date (YYYY-MM-DD), inclusive
    pub check_in: String,
    /// Check-out date (YYYY-MM-DD), exclusive
    pub check_out: String,
    /// Number of guests, at least 1
    pub guests: u32,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct BookingToolParams {
    pub actor_id: String,
    pub actor_role: Role,
    /// Booking id
    pub booking_id: String,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct UpdateStatusToolParams {
    pub actor_id: String,
    pub actor_role: Role,
    /// Booking id
    pub booking_id: String,
    /// Target status: CONFIRMED, CANCELLED or COMPLETED
    pub status: BookingStatus,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct OperatorBookingsToolParams {
    pub actor_id: String,
    pub actor_role: Role,
    /// Restrict to one of the caller's establishments
    pub establishment_id: Option<String>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ModerationToolParams {
    pub actor_id: String,
    pub actor_role: Role,
    /// Establishment id
    pub id: String,
}

// ---------- Result helpers ----------

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("failed to encode result: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

fn error_result(error: &BookingError) -> CallToolResult {
    let text = serde_json::to_string_pretty(&error.to_body()).unwrap_or_else(|_| error.to_string());
    CallToolResult::error(vec![Content::text(text)])
}

fn respond<T: Serialize>(result: crate::error::Result<T>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(value) => json_result(&value),
        Err(e) => Ok(error_result(&e)),
    }
}

fn optional_stay(
    check_in: Option<&str>,
    check_out: Option<&str>,
) -> crate::error::Result<Option<StayRange>> {
    match (check_in, check_out) {
        (Some(check_in), Some(check_out)) => StayRange::parse(check_in, check_out).map(Some),
        (None, None) => Ok(None),
        _ => Err(BookingError::invalid_range(
            "check_in and check_out must be given together",
        )),
    }
}

fn parse_dates(check_in: &str, check_out: &str) -> crate::error::Result<(NaiveDate, NaiveDate)> {
    Ok((parse_date(check_in)?, parse_date(check_out)?))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AvailabilityReport {
    establishment_id: String,
    #[serde(flatten)]
    stay: StayRange,
    available: bool,
    committed: Vec<CommittedStay>,
}

#[derive(Serialize)]
struct SweepReport {
    completed: Vec<String>,
}

// ---------- Server ----------

#[derive(Clone)]
pub struct BookingMcpServer {
    coordinator: Arc<ReservationCoordinator>,
    catalog: Arc<Catalog>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl BookingMcpServer {
    pub fn new(coordinator: Arc<ReservationCoordinator>, catalog: Arc<Catalog>) -> Self {
        Self {
            coordinator,
            catalog,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "search_establishments",
        description = "Search verified establishments by text, category, price range and location. When check_in and check_out are both given, only venues free for that stay are returned.",
        annotations(read_only_hint = true, open_world_hint = false)
    )]
    async fn search_establishments(
        &self,
        Parameters(params): Parameters<SearchToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let stay = match optional_stay(params.check_in.as_deref(), params.check_out.as_deref()) {
            Ok(stay) => stay,
            Err(e) => return Ok(error_result(&e)),
        };
        let filters = SearchFilters {
            query: params.query,
            category: params.category,
            min_price: params.min_price,
            max_price: params.max_price,
            location: params.location,
        };
        respond(self.catalog.search(&filters, stay).await)
    }

    #[tool(
        name = "get_establishment",
        description = "Get one establishment by id. Venues awaiting moderation are only visible to their operator and administrators.",
        annotations(read_only_hint = true, open_world_hint = false)
    )]
    async fn get_establishment(
        &self,
        Parameters(params): Parameters<GetEstablishmentToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = match (params.actor_id, params.actor_role) {
            (Some(id), Some(role)) => {
                self.catalog
                    .get_for(&Actor::new(id, role), &params.id)
                    .await
            }
            _ => self.catalog.get_public(&params.id).await,
        };
        respond(result)
    }

    #[tool(
        name = "register_establishment",
        description = "List a new establishment. Operators list for themselves; administrators must pass operator_id. New venues await moderation before they can be searched or booked."
    )]
    async fn register_establishment(
        &self,
        Parameters(params): Parameters<RegisterEstablishmentToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let actor = Actor::new(params.actor_id, params.actor_role);
        let new = NewEstablishment {
            name: params.name,
            description: params.description,
            category: params.category,
            location: params.location,
            address: params.address,
            city: params.city,
            images: params.images,
            price: params.price,
            latitude: params.latitude,
            longitude: params.longitude,
        };
        respond(self.catalog.register(&actor, new, params.operator_id).await)
    }

    #[tool(
        name = "update_establishment",
        description = "Edit an establishment's details. Only the owning operator or an administrator may edit; moderation state cannot be changed here."
    )]
    async fn update_establishment(
        &self,
        Parameters(params): Parameters<UpdateEstablishmentToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let actor = Actor::new(params.actor_id, params.actor_role);
        let patch = EstablishmentPatch {
            name: params.name,
            description: params.description,
            category: params.category,
            location: params.location,
            address: params.address,
            city: params.city,
            images: params.images,
            price: params.price,
            latitude: params.latitude,
            longitude: params.longitude,
        };
        respond(self.catalog.update(&actor, &params.id, patch).await)
    }

    #[tool(
        name = "delete_establishment",
        description = "Delete an establishment that has never been booked. Only the owning operator or an administrator may delete; venues with bookings on record fail with CONFLICT and should be rejected instead.",
        annotations(destructive_hint = true, open_world_hint = false)
    )]
    async fn delete_establishment(
        &self,
        Parameters(params): Parameters<ModerationToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let actor = Actor::new(params.actor_id, params.actor_role);
        respond(self.catalog.delete(&actor, &params.id).await)
    }

    #[tool(
        name = "my_establishments",
        description = "List the calling operator's establishments, including those awaiting moderation.",
        annotations(read_only_hint = true, open_world_hint = false)
    )]
    async fn my_establishments(
        &self,
        Parameters(params): Parameters<ActorParams>,
    ) -> Result<CallToolResult, McpError> {
        let actor = Actor::new(params.actor_id, params.actor_role);
        respond(self.catalog.my_establishments(&actor).await)
    }

    #[tool(
        name = "check_availability",
        description = "Check whether a verified establishment is free for [check_in, check_out) and list the stays already committed on its calendar.",
        annotations(read_only_hint = true, open_world_hint = false)
    )]
    async fn check_availability(
        &self,
        Parameters(params): Parameters<StayToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let stay = match StayRange::parse(&params.check_in, &params.check_out) {
            Ok(stay) => stay,
            Err(e) => return Ok(error_result(&e)),
        };
        if let Err(e) = self.catalog.get_public(&params.establishment_id).await {
            return Ok(error_result(&e));
        }
        let index = self.coordinator.availability();
        let available = match index
            .is_available(&params.establishment_id, stay.check_in(), stay.check_out())
            .await
        {
            Ok(available) => available,
            Err(e) => return Ok(error_result(&e)),
        };
        let committed = index.committed(&params.establishment_id).await;
        json_result(&AvailabilityReport {
            establishment_id: params.establishment_id,
            stay,
            available,
            committed,
        })
    }

    #[tool(
        name = "quote_price",
        description = "Price a stay without reserving it. Returns nights, nightly price, total and whether the dates are currently free.",
        annotations(read_only_hint = true, open_world_hint = false)
    )]
    async fn quote_price(
        &self,
        Parameters(params): Parameters<QuoteToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let (check_in, check_out) = match parse_dates(&params.check_in, &params.check_out) {
            Ok(dates) => dates,
            Err(e) => return Ok(error_result(&e)),
        };
        respond(
            self.coordinator
                .quote(
                    &params.establishment_id,
                    check_in,
                    check_out,
                    params.guests.unwrap_or(1),
                )
                .await,
        )
    }

    #[tool(
        name = "create_booking",
        description = "Reserve [check_in, check_out) at a verified establishment. The booking starts PENDING with its total price fixed. Overlapping an existing PENDING or CONFIRMED stay fails with CONFLICT."
    )]
    async fn create_booking(
        &self,
        Parameters(params): Parameters<CreateBookingToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let actor = Actor::new(params.actor_id, params.actor_role);
        let (check_in, check_out) = match parse_dates(&params.check_in, &params.check_out) {
            Ok(dates) => dates,
            Err(e) => return Ok(error_result(&e)),
        };
        let request = CreateBookingRequest {
            establishment_id: params.establishment_id,
            check_in,
            check_out,
            guests: params.guests,
        };
        respond(self.coordinator.create_booking(&actor, request).await)
    }

    #[tool(
        name = "get_booking",
        description = "Get one booking with establishment and guest summaries. Visible to the guest, the establishment's operator and administrators.",
        annotations(read_only_hint = true, open_world_hint = false)
    )]
    async fn get_booking(
        &self,
        Parameters(params): Parameters<BookingToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let actor = Actor::new(params.actor_id, params.actor_role);
        respond(self.coordinator.get_booking(&actor, &params.booking_id).await)
    }

    #[tool(
        name = "my_bookings",
        description = "List the caller's own bookings, newest first.",
        annotations(read_only_hint = true, open_world_hint = false)
    )]
    async fn my_bookings(
        &self,
        Parameters(params): Parameters<ActorParams>,
    ) -> Result<CallToolResult, McpError> {
        let actor = Actor::new(params.actor_id, params.actor_role);
        respond(self.coordinator.my_bookings(&actor).await)
    }

    #[tool(
        name = "operator_bookings",
        description = "List bookings on the calling operator's establishments, optionally for a single establishment. Administrators see every booking.",
        annotations(read_only_hint = true, open_world_hint = false)
    )]
    async fn operator_bookings(
        &self,
        Parameters(params): Parameters<OperatorBookingsToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let actor = Actor::new(params.actor_id, params.actor_role);
        respond(
            self.coordinator
                .operator_bookings(&actor, params.establishment_id.as_deref())
                .await,
        )
    }

    #[tool(
        name = "update_booking_status",
        description = "Move a booking along its lifecycle: PENDING -> CONFIRMED (operator/admin), PENDING or CONFIRMED -> CANCELLED, CONFIRMED -> COMPLETED (admin, after check-out). CANCELLED and COMPLETED are final."
    )]
    async fn update_booking_status(
        &self,
        Parameters(params): Parameters<UpdateStatusToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let actor = Actor::new(params.actor_id, params.actor_role);
        respond(
            self.coordinator
                .update_status(&actor, &params.booking_id, params.status)
                .await,
        )
    }

    #[tool(
        name = "cancel_booking",
        description = "Cancel a booking and free its dates. Guests may cancel a confirmed stay only until the cancellation cutoff before check-in."
    )]
    async fn cancel_booking(
        &self,
        Parameters(params): Parameters<BookingToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let actor = Actor::new(params.actor_id, params.actor_role);
        respond(self.coordinator.cancel(&actor, &params.booking_id).await)
    }

    #[tool(
        name = "complete_due_bookings",
        description = "Run the completion sweep now: every CONFIRMED booking whose check-out has passed becomes COMPLETED. Administrators only; idempotent."
    )]
    async fn complete_due_bookings(
        &self,
        Parameters(params): Parameters<ActorParams>,
    ) -> Result<CallToolResult, McpError> {
        let actor = Actor::new(params.actor_id, params.actor_role);
        respond(
            self.coordinator
                .complete_due(&actor)
                .await
                .map(|completed| SweepReport { completed }),
        )
    }

    #[tool(
        name = "pending_establishments",
        description = "List establishments awaiting moderation. Administrators only.",
        annotations(read_only_hint = true, open_world_hint = false)
    )]
    async fn pending_establishments(
        &self,
        Parameters(params): Parameters<ActorParams>,
    ) -> Result<CallToolResult, McpError> {
        let actor = Actor::new(params.actor_id, params.actor_role);
        respond(self.catalog.pending(&actor).await)
    }

    #[tool(
        name = "validate_establishment",
        description = "Approve an establishment so it appears in search and accepts bookings. Administrators only."
    )]
    async fn validate_establishment(
        &self,
        Parameters(params): Parameters<ModerationToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let actor = Actor::new(params.actor_id, params.actor_role);
        respond(self.catalog.validate(&actor, &params.id).await)
    }

    #[tool(
        name = "reject_establishment",
        description = "Withdraw an establishment from search and booking. Existing bookings are kept. Administrators only."
    )]
    async fn reject_establishment(
        &self,
        Parameters(params): Parameters<ModerationToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let actor = Actor::new(params.actor_id, params.actor_role);
        respond(self.catalog.reject(&actor, &params.id).await)
    }

    #[tool(
        name = "admin_users",
        description = "List every registered account with its role, ordered by name. Administrators only.",
        annotations(read_only_hint = true, open_world_hint = false)
    )]
    async fn admin_users(
        &self,
        Parameters(params): Parameters<ActorParams>,
    ) -> Result<CallToolResult, McpError> {
        let actor = Actor::new(params.actor_id, params.actor_role);
        respond(self.catalog.users(&actor).await)
    }

    #[tool(
        name = "admin_stats",
        description = "Marketplace totals: users, establishments, pending moderation, bookings by status and revenue from confirmed and completed stays. Administrators only.",
        annotations(read_only_hint = true, open_world_hint = false)
    )]
    async fn admin_stats(
        &self,
        Parameters(params): Parameters<ActorParams>,
    ) -> Result<CallToolResult, McpError> {
        let actor = Actor::new(params.actor_id, params.actor_role);
        respond(self.catalog.stats(&actor).await)
    }
}

impl BookingMcpServer {
    async fn read_establishment_resource(&self, path: &str) -> crate::error::Result<String> {
        let text = match path.split_once('/') {
            None => serde_json::to_string_pretty(&self.catalog.get_public(path).await?)?,
            Some((id, "calendar")) => {
                self.catalog.get_public(id).await?;
                let committed = self.coordinator.availability().committed(id).await;
                serde_json::to_string_pretty(&committed)?
            }
            Some(_) => return Err(BookingError::not_found("Resource", path)),
        };
        Ok(text)
    }
}

#[tool_handler]
impl ServerHandler for BookingMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Tourism marketplace booking server: establishments, availability, pricing and reservations.\n\
                 \n\
                 Every call that depends on who is asking takes actor_id and actor_role \
                 (USER, OPERATOR, ADMIN, SUPER_ADMIN). Dates are YYYY-MM-DD; a stay covers \
                 [check_in, check_out), so back-to-back stays never conflict.\n\
                 \n\
                 ## Discovery\n\
                 - search_establishments: verified venues by text, category, price, location and free dates\n\
                 - get_establishment: one venue by id\n\
                 - check_availability: is a stay free, and which stays are already committed\n\
                 - quote_price: total for a stay without reserving it\n\
                 \n\
                 ## Bookings\n\
                 - create_booking: reserve dates; starts PENDING, fails with CONFLICT on overlap\n\
                 - get_booking, my_bookings: read bookings\n\
                 - update_booking_status: confirm, cancel or complete\n\
                 - cancel_booking: cancel and free the dates\n\
                 \n\
                 ## Operators\n\
                 - register_establishment, update_establishment, delete_establishment, my_establishments\n\
                 - operator_bookings: bookings on your establishments\n\
                 \n\
                 ## Administration\n\
                 - pending_establishments, validate_establishment, reject_establishment: moderation\n\
                 - complete_due_bookings: run the completion sweep now\n\
                 - admin_users: registered accounts and their roles\n\
                 - admin_stats: marketplace totals and revenue\n\
                 \n\
                 ## Resources\n\
                 Verified establishments are exposed as tourism://establishment/{id} and their \
                 committed calendar as tourism://establishment/{id}/calendar.\n\
                 \n\
                 Failures return an error envelope: {\"success\": false, \"error\": {\"code\", \"message\", \"status\"}}."
                    .into(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let establishments = self
            .catalog
            .search(&SearchFilters::default(), None)
            .await
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        let resources: Vec<Resource> = establishments
            .into_iter()
            .map(|e| Resource {
                annotations: None,
                raw: RawResource {
                    uri: format!("{ESTABLISHMENT_URI}{}", e.id),
                    name: e.name,
                    title: None,
                    description: Some(format!("{} in {}", e.category, e.city)),
                    mime_type: Some("application/json".into()),
                    size: None,
                    icons: None,
                    meta: None,
                },
            })
            .collect();
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        let templates = vec![
            ResourceTemplate {
                annotations: None,
                raw: RawResourceTemplate {
                    uri_template: "tourism://establishment/{id}".into(),
                    name: "Establishment".into(),
                    title: Some("Establishment details".into()),
                    description: Some("A verified establishment as JSON".into()),
                    mime_type: Some("application/json".into()),
                    icons: None,
                },
            },
            ResourceTemplate {
                annotations: None,
                raw: RawResourceTemplate {
                    uri_template: "tourism://establishment/{id}/calendar".into(),
                    name: "Availability Calendar".into(),
                    title: Some("Committed stays".into()),
                    description: Some(
                        "PENDING and CONFIRMED stays holding the establishment's dates".into(),
                    ),
                    mime_type: Some("application/json".into()),
                    icons: None,
                },
            },
        ];
        Ok(ListResourceTemplatesResult {
            resource_templates: templates,
            next_cursor: None,
            meta: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let Some(path) = request.uri.strip_prefix(ESTABLISHMENT_URI) else {
            return Err(McpError::resource_not_found(
                format!("resource not found: {}", request.uri),
                None,
            ));
        };
        match self.read_establishment_resource(path).await {
            Ok(text) => Ok(ReadResourceResult {
                contents: vec![ResourceContents::text(text, request.uri)],
            }),
            Err(e) => Err(McpError::resource_not_found(
                format!("resource not found: {}: {e}", request.uri),
                None,
            )),
        }
    }
}

impl std::fmt::Debug for BookingMcpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingMcpServer").finish_non_exhaustive()
    }
}
