use serde::{Deserialize, Serialize};

/// A browser push subscription in its `PushSubscription.toJSON()` shape.
/// The endpoint and keys are opaque to us; the endpoint doubles as the
/// subscription's identity. Extra fields such as `expirationTime` are
/// ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub endpoint: String,
    pub keys: SubscriptionKeys,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionKeys {
    pub p256dh: String,
    pub auth: String,
}

#[derive(Debug, Clone)]
pub struct VapidConfig {
    pub private_key: String,
    pub public_key: String,
    pub subject: String,
}

/// Optional notification fields as accepted on the send endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationFields {
    pub title: Option<String>,
    pub body: Option<String>,
    pub icon: Option<String>,
    pub badge: Option<String>,
    pub url: Option<String>,
}

/// The JSON document delivered to the service worker. No validation is
/// applied; the worker treats it as a display instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub data: PayloadData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<NotificationAction>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadData {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

const DEFAULT_TITLE: &str = "New Notification";
const DEFAULT_BODY: &str = "This is a push notification";
const DEFAULT_ICON: &str = "/icon.png";
const DEFAULT_BADGE: &str = "/badge.png";
const DEFAULT_URL: &str = "/";

impl NotificationPayload {
    pub fn from_fields(fields: NotificationFields) -> Self {
        Self {
            title: fields.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            body: fields.body.unwrap_or_else(|| DEFAULT_BODY.to_string()),
            icon: fields.icon.unwrap_or_else(|| DEFAULT_ICON.to_string()),
            badge: fields.badge.unwrap_or_else(|| DEFAULT_BADGE.to_string()),
            data: PayloadData {
                url: fields.url.unwrap_or_else(|| DEFAULT_URL.to_string()),
            },
            actions: None,
        }
    }
}
