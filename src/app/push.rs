use crate::adapters::WebPushSender;
use crate::ports::PushSender;
use crate::push as push_service;
use crate::state;
use crate::templates;
use crate::types::push::{NotificationFields, NotificationPayload, Subscription, VapidConfig};

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

#[derive(Serialize)]
pub(crate) struct MessageResponse {
    pub(crate) message: &'static str,
}

#[derive(Serialize)]
pub(crate) struct ErrorResponse {
    pub(crate) error: &'static str,
}

#[derive(Serialize)]
pub(crate) struct SendErrorResponse {
    pub(crate) message: &'static str,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub(crate) error: String,
}

#[derive(Serialize)]
pub(crate) struct PublicKeyResponse {
    #[serde(rename = "publicKey")]
    pub(crate) public_key: String,
}

pub(crate) async fn subscribe_page(
    State(state): State<state::AppState>,
) -> templates::SubscribeTemplate {
    let push_configured = matches!(
        push_service::load_vapid_config(&state.config),
        push_service::VapidConfigStatus::Ready(_)
    );
    templates::SubscribeTemplate {
        app_name: state.config.app_name,
        push_configured,
    }
}

pub(crate) async fn push_public_key(
    State(state): State<state::AppState>,
) -> Result<Json<PublicKeyResponse>, (StatusCode, Json<ErrorResponse>)> {
    let vapid = match push_service::load_vapid_config(&state.config) {
        push_service::VapidConfigStatus::Ready(vapid) => vapid,
        push_service::VapidConfigStatus::Invalid => {
            return Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse {
                    error: "The configured VAPID public key is malformed.",
                }),
            ));
        }
        push_service::VapidConfigStatus::Incomplete | push_service::VapidConfigStatus::Missing => {
            return Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse {
                    error: "Push notifications are not configured.",
                }),
            ));
        }
    };

    Ok(Json(PublicKeyResponse {
        public_key: vapid.public_key,
    }))
}

pub(crate) async fn save_subscription(
    State(state): State<state::AppState>,
    Json(subscription): Json<Subscription>,
) -> (StatusCode, Json<MessageResponse>) {
    state.store.put(subscription);
    (
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Subscription saved",
        }),
    )
}

// Success regardless of whether a record existed; the client only needs
// to know the server no longer holds its subscription.
pub(crate) async fn remove_subscription(
    State(state): State<state::AppState>,
    Json(subscription): Json<Subscription>,
) -> Json<MessageResponse> {
    state.store.remove(&subscription.endpoint);
    Json(MessageResponse {
        message: "Subscription removed",
    })
}

#[derive(Debug, Deserialize)]
pub(crate) struct SendNotificationRequest {
    pub(crate) subscription: Subscription,
    #[serde(flatten)]
    pub(crate) fields: NotificationFields,
}

pub(crate) async fn send_notification(
    State(state): State<state::AppState>,
    Json(request): Json<SendNotificationRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<SendErrorResponse>)> {
    let vapid = require_vapid(&state)?;
    let payload = serialize_payload(request.fields)?;
    let sender = init_sender(vapid)?;

    if let Err(err) = sender.send(&request.subscription, &payload).await {
        eprintln!("push send error: {err} ({})", request.subscription.endpoint);
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(SendErrorResponse {
                message: "Error sending notification",
                error: err.to_string(),
            }),
        ));
    }

    Ok(Json(MessageResponse {
        message: "Notification sent",
    }))
}

#[derive(Debug, Deserialize)]
pub(crate) struct BroadcastRequest {
    #[serde(flatten)]
    pub(crate) fields: NotificationFields,
}

pub(crate) async fn send_notification_to_all(
    State(state): State<state::AppState>,
    Json(request): Json<BroadcastRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<SendErrorResponse>)> {
    let vapid = require_vapid(&state)?;
    let payload = serialize_payload(request.fields)?;
    let sender = init_sender(vapid)?;

    let outcome = push_service::broadcast_with_sender(&sender, &state.store, &payload).await;
    if outcome.pruned > 0 {
        eprintln!(
            "push broadcast: pruned {} gone subscription(s), {} remaining",
            outcome.pruned,
            state.store.len()
        );
    }

    Ok(Json(MessageResponse {
        message: "Notifications sent",
    }))
}

fn require_vapid(
    state: &state::AppState,
) -> Result<VapidConfig, (StatusCode, Json<SendErrorResponse>)> {
    match push_service::load_vapid_config(&state.config) {
        push_service::VapidConfigStatus::Ready(vapid) => Ok(vapid),
        _ => Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(SendErrorResponse {
                message: "Push notifications are not configured",
                error: String::new(),
            }),
        )),
    }
}

fn serialize_payload(
    fields: NotificationFields,
) -> Result<String, (StatusCode, Json<SendErrorResponse>)> {
    serde_json::to_string(&NotificationPayload::from_fields(fields)).map_err(|err| {
        eprintln!("push payload error: {err}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(SendErrorResponse {
                message: "Error sending notification",
                error: err.to_string(),
            }),
        )
    })
}

fn init_sender(vapid: VapidConfig) -> Result<WebPushSender, (StatusCode, Json<SendErrorResponse>)> {
    WebPushSender::new(vapid).map_err(|err| {
        eprintln!("push send error: failed to init web-push ({err})");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(SendErrorResponse {
                message: "Error sending notification",
                error: err.to_string(),
            }),
        )
    })
}
