use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::engine::camera::{CompassHeading, VerticalDirection, VerticalNavRequest};
use crate::error::ViewerError;
use crate::tools::filter::{ApplyFilters, FilterCriteria, ResetFilters};
use crate::tools::navigation::{find_unit, floor_plan_navigation, property_navigation};
use crate::tools::selection::FloorSelectRequest;
use crate::tools::session::ViewerSession;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

impl RpcError {
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: "Method not found".to_string(),
            data: Some(serde_json::json!({ "method": method })),
        }
    }
}

impl From<ViewerError> for RpcError {
    fn from(err: ViewerError) -> Self {
        Self {
            code: err.rpc_code(),
            message: err.to_string(),
            data: None,
        }
    }
}

/// Outgoing message queues, flushed to the parent window once per frame.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the front end without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }

    #[cfg(test)]
    pub fn notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }

    #[cfg(test)]
    pub fn responses(&self) -> &[RpcResponse] {
        &self.outgoing_responses
    }
}

/// Plugin establishing the postMessage bridge for iframe deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (process_incoming_messages, handle_rpc_messages).chain(),
            )
            .add_systems(Last, send_outgoing_messages);

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Only string payloads that look like JSON-RPC are queued.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        window
            .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            .expect("Failed to register message listener");
    }

    // Ownership moves to JS; the listener lives as long as the page.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Raw message received from the front end.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Everything request handlers may read or trigger.
#[derive(SystemParam)]
pub struct RpcContext<'w> {
    session: Res<'w, ViewerSession>,
    compass: Res<'w, CompassHeading>,
    filters: EventWriter<'w, ApplyFilters>,
    resets: EventWriter<'w, ResetFilters>,
    floors: EventWriter<'w, FloorSelectRequest>,
    vertical: EventWriter<'w, VerticalNavRequest>,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut ctx: RpcContext,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("Processing RPC method: {}", request.method);
                if let Some(response) = handle_rpc_request(&request, &mut ctx) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Discarding malformed RPC message: {parse_error}");
            }
        }
    }
}

/// Run one request. A response is produced only when the request carries an id.
fn handle_rpc_request(request: &RpcRequest, ctx: &mut RpcContext) -> Option<RpcResponse> {
    let params = &request.params;
    let result = match request.method.as_str() {
        "apply_filters" => handle_apply_filters(params, ctx),
        "reset_filters" => handle_reset_filters(ctx),
        "select_floor" => handle_select_floor(params, ctx),
        "navigate_vertical" => handle_navigate_vertical(params, ctx),
        "get_selection" => to_value(ctx.session.snapshot()),
        "open_property" => handle_open_property(params, ctx),
        "open_floor_plan" => handle_open_floor_plan(params, ctx),
        "get_compass" => Ok(serde_json::json!({ "degrees": ctx.compass.degrees })),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            Err(RpcError::method_not_found(&request.method))
        }
    };

    let id = request.id.clone()?;
    Some(match result {
        Ok(result_value) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        },
        Err(error) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        },
    })
}

fn parse_params<T: DeserializeOwned>(
    method: &'static str,
    params: &serde_json::Value,
) -> Result<T, ViewerError> {
    serde_json::from_value(params.clone())
        .map_err(|source| ViewerError::InvalidParams { method, source })
}

fn to_value<T: Serialize>(value: T) -> Result<serde_json::Value, RpcError> {
    serde_json::to_value(value).map_err(|err| RpcError {
        code: -32603,
        message: err.to_string(),
        data: None,
    })
}

fn handle_apply_filters(
    params: &serde_json::Value,
    ctx: &mut RpcContext,
) -> Result<serde_json::Value, RpcError> {
    let criteria: FilterCriteria = parse_params("apply_filters", params)?;
    info!("Applying filters: {:?}", criteria);
    ctx.filters.write(ApplyFilters(criteria));
    Ok(serde_json::json!({ "success": true }))
}

fn handle_reset_filters(ctx: &mut RpcContext) -> Result<serde_json::Value, RpcError> {
    info!("Resetting filters");
    ctx.resets.write(ResetFilters);
    Ok(serde_json::json!({ "success": true }))
}

fn handle_select_floor(
    params: &serde_json::Value,
    ctx: &mut RpcContext,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct SelectFloorParams {
        floor: i32,
        mesh_name: String,
    }

    let SelectFloorParams { floor, mesh_name } = parse_params("select_floor", params)?;
    info!("Floor {floor} selected from calendar ({mesh_name})");
    ctx.floors.write(FloorSelectRequest { floor, mesh_name });
    Ok(serde_json::json!({ "success": true }))
}

fn handle_navigate_vertical(
    params: &serde_json::Value,
    ctx: &mut RpcContext,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct NavigateParams {
        direction: String,
    }

    let NavigateParams { direction } = parse_params("navigate_vertical", params)?;
    let parsed: VerticalDirection = direction.parse()?;
    ctx.vertical.write(VerticalNavRequest(parsed));
    Ok(serde_json::json!({ "success": true, "direction": direction }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UnitParams {
    #[serde(default)]
    unit_id: Option<String>,
}

fn handle_open_property(
    params: &serde_json::Value,
    ctx: &mut RpcContext,
) -> Result<serde_json::Value, RpcError> {
    let UnitParams { unit_id } = parse_params("open_property", params)?;
    let unit_id = unit_id.unwrap_or_default();
    let unit = find_unit(&ctx.session, &unit_id)?;
    to_value(property_navigation(unit))
}

fn handle_open_floor_plan(
    params: &serde_json::Value,
    ctx: &mut RpcContext,
) -> Result<serde_json::Value, RpcError> {
    let UnitParams { unit_id } = parse_params("open_floor_plan", params)?;
    let unit = match unit_id.as_deref() {
        Some(id) => Some(find_unit(&ctx.session, id)?),
        None => None,
    };
    to_value(floor_plan_navigation(&ctx.session, unit))
}

/// Send queued notifications and responses to the front end.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::mesh_metadata::MeshMeta;
    use crate::tools::session::SelectionDetails;
    use serde_json::json;

    fn rpc_app() -> App {
        let mut app = App::new();
        app.init_resource::<WebRpcInterface>()
            .init_resource::<ViewerSession>()
            .init_resource::<CompassHeading>()
            .add_event::<IncomingRpcMessage>()
            .add_event::<ApplyFilters>()
            .add_event::<ResetFilters>()
            .add_event::<FloorSelectRequest>()
            .add_event::<VerticalNavRequest>()
            .add_systems(Update, handle_rpc_messages);
        app
    }

    fn call(app: &mut App, message: serde_json::Value) -> Option<RpcResponse> {
        app.world_mut().send_event(IncomingRpcMessage {
            content: message.to_string(),
        });
        app.update();
        app.world().resource::<WebRpcInterface>().responses().last().cloned()
    }

    fn events<E: Event + Clone>(app: &App) -> Vec<E> {
        let events = app.world().resource::<Events<E>>();
        events.get_cursor().read(events).cloned().collect()
    }

    #[test]
    fn filter_request_becomes_event() {
        let mut app = rpc_app();
        let response = call(
            &mut app,
            json!({
                "jsonrpc": "2.0",
                "method": "apply_filters",
                "params": {"status": ["Available"], "priceRange": [3, 10]},
                "id": 1
            }),
        )
        .unwrap();
        assert_eq!(response.result, Some(json!({"success": true})));

        let sent = events::<ApplyFilters>(&app);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0.status, vec!["Available".to_string()]);
        assert_eq!(sent[0].0.price_range, (3.0, 10.0));
    }

    #[test]
    fn notifications_run_without_response() {
        let mut app = rpc_app();
        let response = call(
            &mut app,
            json!({"jsonrpc": "2.0", "method": "navigate_vertical", "params": {"direction": "top"}}),
        );
        assert!(response.is_none());
        let sent = events::<VerticalNavRequest>(&app);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, VerticalDirection::Top);
    }

    #[test]
    fn bad_parameters_report_invalid_params() {
        let mut app = rpc_app();
        let response = call(
            &mut app,
            json!({"jsonrpc": "2.0", "method": "navigate_vertical", "params": {"direction": "left"}, "id": 2}),
        )
        .unwrap();
        assert_eq!(response.error.unwrap().code, -32602);

        let response = call(
            &mut app,
            json!({"jsonrpc": "2.0", "method": "select_floor", "params": {"floor": "x"}, "id": 3}),
        )
        .unwrap();
        assert_eq!(response.error.unwrap().code, -32602);
        assert!(events::<FloorSelectRequest>(&app).is_empty());
    }

    #[test]
    fn unknown_method_is_reported() {
        let mut app = rpc_app();
        let response = call(
            &mut app,
            json!({"jsonrpc": "2.0", "method": "teleport", "id": "a"}),
        )
        .unwrap();
        let error = response.error.unwrap();
        assert_eq!(error.code, -32601);
        assert_eq!(error.data, Some(json!({"method": "teleport"})));
    }

    #[test]
    fn property_navigation_uses_current_details() {
        let mut app = rpc_app();
        {
            let mut session = app.world_mut().resource_mut::<ViewerSession>();
            session.selected_floor = Some(12);
            session.details = Some(SelectionDetails {
                base_name: "Plane100".into(),
                meta: Some(MeshMeta {
                    floor: 12,
                    property: vec![serde_json::from_value(json!({"id": "A", "propertyId": 7})).unwrap()],
                }),
            });
        }

        let response = call(
            &mut app,
            json!({"jsonrpc": "2.0", "method": "open_property", "params": {"unitId": "A"}, "id": 4}),
        )
        .unwrap();
        assert_eq!(
            response.result,
            Some(json!({"route": "/v3/property", "state": {"propertyId": "7"}}))
        );

        let response = call(
            &mut app,
            json!({"jsonrpc": "2.0", "method": "open_floor_plan", "params": {"unitId": "B"}, "id": 5}),
        )
        .unwrap();
        assert_eq!(response.error.unwrap().code, -32602);

        let response = call(
            &mut app,
            json!({"jsonrpc": "2.0", "method": "get_selection", "id": 6}),
        )
        .unwrap();
        assert_eq!(response.result.unwrap()["selectedFloor"], 12);
    }
}
