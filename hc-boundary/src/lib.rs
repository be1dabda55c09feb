use serde::{Deserialize, Deserializer, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;

/// Distinguishes a missing field from an explicit `null`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub country     : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub state       : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub county      : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub city        : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub borough     : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub lat         : Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub lng         : Option<f64>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(
    feature = "extra-derive",
    derive(Debug, Clone, Copy, PartialEq, Eq, Hash)
)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Open,
    Accepted,
    Delivered,
    Received,
    Completed,
    Removed,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(
    feature = "extra-derive",
    derive(Debug, Clone, Copy, PartialEq, Eq, Hash)
)]
#[serde(rename_all = "lowercase")]
pub enum RequestSize {
    Tiny,
    Small,
    Medium,
    Large,
    Xlarge,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(
    feature = "extra-derive",
    derive(Debug, Clone, Copy, PartialEq, Eq, Hash)
)]
#[serde(rename_all = "snake_case")]
pub enum RequestVisibility {
    All,
    Trusted,
    SameOrganization,
    InviteOnly,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Request {
    pub id              : String,
    pub creator_id      : String,
    pub organization_id : String,
    pub status          : RequestStatus,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub provider_id     : Option<String>,
    pub title           : String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description     : Option<String>,
    pub destination     : Location,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub origin          : Option<Location>,
    pub size            : RequestSize,
    /// `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub needed_before   : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub kilograms       : Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub url             : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub photo_id        : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub meeting_id      : Option<String>,
    pub visibility      : RequestVisibility,
    /// `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub completed_on    : Option<String>,
    pub created_at      : i64,
    pub updated_at      : i64,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct NewRequest {
    pub organization_id : String,
    pub title           : String,
    #[serde(default)]
    pub description     : Option<String>,
    #[serde(default)]
    pub destination     : Option<Location>,
    #[serde(default)]
    pub origin          : Option<Location>,
    #[serde(default)]
    pub size            : Option<RequestSize>,
    #[serde(default)]
    pub needed_before   : Option<String>,
    #[serde(default)]
    pub kilograms       : Option<f64>,
    #[serde(default)]
    pub url             : Option<String>,
    #[serde(default)]
    pub photo_id        : Option<String>,
    #[serde(default)]
    pub meeting_id      : Option<String>,
    #[serde(default)]
    pub visibility      : Option<RequestVisibility>,
}

/// Changes of a request. Missing fields stay as they are,
/// `null` clears an optional field.
#[rustfmt::skip]
#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct RequestUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title           : Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub description     : Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination     : Option<Location>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub origin          : Option<Option<Location>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size            : Option<RequestSize>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub needed_before   : Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub kilograms       : Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub url             : Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub photo_id        : Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility      : Option<RequestVisibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id : Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_id      : Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status          : Option<RequestStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id     : Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_status : Option<RequestStatus>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct StatusUpdate {
    pub status: RequestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    /// The status the client believes to be current.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_status: Option<RequestStatus>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
#[serde(rename_all = "snake_case")]
pub enum OfferAction {
    Add,
    Withdraw,
    Reject { user_id: String },
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct RequestHistory {
    pub actor_id: String,
    pub old_status: RequestStatus,
    pub new_status: RequestStatus,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub old_provider_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub new_provider_id: Option<String>,
    pub created_at: i64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Message {
    pub id: String,
    pub thread_id: String,
    pub sender_id: String,
    pub content: String,
    pub created_at: i64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct NewMessage {
    /// Continue an existing thread
    #[serde(default)]
    pub thread_id: Option<String>,
    /// Start or continue the own thread on a request
    #[serde(default)]
    pub request_id: Option<String>,
    pub content: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct Thread {
    pub id: String,
    pub request_id: String,
    pub participant_ids: Vec<String>,
    pub unread: u64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_message: Option<Message>,
    pub updated_at: i64,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct Watch {
    pub id          : String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name        : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub destination : Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub origin      : Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub meeting_id  : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub search_text : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub size_floor  : Option<RequestSize>,
    pub created_at  : i64,
}

#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct NewWatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub destination: Option<Location>,
    #[serde(default)]
    pub origin: Option<Location>,
    #[serde(default)]
    pub meeting_id: Option<String>,
    #[serde(default)]
    pub search_text: Option<String>,
    #[serde(default)]
    pub size_floor: Option<RequestSize>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct UploadedFile {
    pub id: String,
    pub filename: String,
    pub url: String,
    pub content_type: String,
    pub size: u64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct SiteStatus {
    pub status: String,
    pub version: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct ServiceJob {
    pub job: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, thiserror::Error))]
#[cfg_attr(feature = "extra-derive", error("{http_status}:{key}:{message}"))]
pub struct Error {
    pub http_status: u16,
    /// A stable identifier that clients can localize.
    pub key: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub details: Option<String>,
}
