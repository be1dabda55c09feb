#![allow(clippy::extra_unused_lifetimes)]

// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamp in **milli**seconds.

use super::schema::*;

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = locations, treat_none_as_null = true)]
pub struct NewLocation<'a> {
    pub description: Option<&'a str>,
    pub country: Option<&'a str>,
    pub state: Option<&'a str>,
    pub county: Option<&'a str>,
    pub city: Option<&'a str>,
    pub borough: Option<&'a str>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = locations)]
pub struct LocationEntity {
    pub rowid: i64,
    pub description: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub county: Option<String>,
    pub city: Option<String>,
    pub borough: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Insertable)]
#[diesel(table_name = files)]
pub struct NewFile<'a> {
    pub id: String,
    pub name: &'a str,
    pub size: i64,
    pub content_type: &'a str,
    pub url: &'a str,
    pub url_expires_at: Option<i64>,
    pub created_at: i64,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = files)]
pub struct FileEntity {
    pub id: String,
    pub name: String,
    pub size: i64,
    pub content_type: String,
    pub url: String,
    pub url_expires_at: Option<i64>,
    pub created_at: i64,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = users, treat_none_as_null = true)]
pub struct NewUser<'a> {
    pub id: String,
    pub email: &'a str,
    pub nickname: &'a str,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub avatar_id: Option<String>,
    pub home_location_rowid: Option<i64>,
    pub admin_role: i16,
    pub language: &'a str,
    pub weight_unit: &'a str,
    pub time_zone: Option<&'a str>,
    pub created_at: i64,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
pub struct UserEntity {
    pub id: String,
    pub email: String,
    pub nickname: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_id: Option<String>,
    pub home_location_rowid: Option<i64>,
    pub admin_role: i16,
    pub language: String,
    pub weight_unit: String,
    pub time_zone: Option<String>,
    pub created_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = organizations)]
pub struct NewOrganization<'a> {
    pub id: String,
    pub name: &'a str,
    pub url: Option<&'a str>,
    pub auth_type: &'a str,
    pub auth_config: Option<&'a str>,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = organizations)]
pub struct OrganizationEntity {
    pub id: String,
    pub name: String,
    pub url: Option<String>,
    pub auth_type: String,
    pub auth_config: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = organization_domains)]
pub struct NewOrganizationDomain<'a> {
    pub organization_id: String,
    pub domain: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = organization_trusts)]
pub struct NewOrganizationTrust {
    pub organization_id: String,
    pub trusted_organization_id: String,
}

#[derive(Insertable)]
#[diesel(table_name = user_organizations)]
pub struct NewUserOrganization<'a> {
    pub user_id: String,
    pub organization_id: String,
    pub auth_id: Option<&'a str>,
    pub auth_email: Option<&'a str>,
    pub role: i16,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = user_organizations)]
pub struct UserOrganizationEntity {
    pub user_id: String,
    pub organization_id: String,
    pub auth_id: Option<String>,
    pub auth_email: Option<String>,
    pub role: i16,
}

#[derive(Insertable, Queryable, Selectable)]
#[diesel(table_name = access_tokens)]
pub struct AccessTokenEntity {
    pub token_hash: String,
    pub user_id: String,
    pub organization_id: Option<String>,
    pub created_at: i64,
    pub expires_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = meetings)]
pub struct NewMeeting<'a> {
    pub id: String,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub start_date: String,
    pub end_date: String,
    pub creator_id: String,
    pub location_rowid: i64,
    pub image_id: Option<String>,
    pub more_info_url: Option<&'a str>,
    pub invite_code: Option<&'a str>,
    pub created_at: i64,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = meetings)]
pub struct MeetingEntity {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub creator_id: String,
    pub location_rowid: i64,
    pub image_id: Option<String>,
    pub more_info_url: Option<String>,
    pub invite_code: Option<String>,
    pub created_at: i64,
}

#[derive(Insertable, Queryable, Selectable)]
#[diesel(table_name = meeting_participants)]
pub struct MeetingParticipantEntity {
    pub meeting_id: String,
    pub user_id: String,
    pub is_organizer: bool,
}

#[derive(Insertable)]
#[diesel(table_name = meeting_invites)]
pub struct NewMeetingInvite<'a> {
    pub meeting_id: String,
    pub inviter_id: String,
    pub invitee_email: &'a str,
    pub secret_token: &'a str,
    pub created_at: i64,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = meeting_invites)]
pub struct MeetingInviteEntity {
    pub meeting_id: String,
    pub inviter_id: String,
    pub invitee_email: String,
    pub secret_token: String,
    pub created_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = requests)]
pub struct NewRequest<'a> {
    pub id: String,
    pub creator_id: String,
    pub organization_id: String,
    pub status: &'a str,
    pub provider_id: Option<String>,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub destination_rowid: i64,
    pub origin_rowid: Option<i64>,
    pub size: i16,
    pub needed_before: Option<String>,
    pub kilograms: Option<f64>,
    pub url: Option<&'a str>,
    pub photo_id: Option<String>,
    pub meeting_id: Option<String>,
    pub visibility: &'a str,
    pub completed_on: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// All fields that may change without a status transition.
#[derive(AsChangeset)]
#[diesel(table_name = requests, treat_none_as_null = true)]
pub struct RequestFieldsChangeset<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub origin_rowid: Option<i64>,
    pub size: i16,
    pub needed_before: Option<String>,
    pub kilograms: Option<f64>,
    pub url: Option<&'a str>,
    pub photo_id: Option<String>,
    pub visibility: &'a str,
    pub updated_at: i64,
}

#[derive(AsChangeset)]
#[diesel(table_name = requests, treat_none_as_null = true)]
pub struct RequestStatusChangeset<'a> {
    pub status: &'a str,
    pub provider_id: Option<String>,
    pub completed_on: Option<String>,
    pub updated_at: i64,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = requests)]
pub struct RequestEntity {
    pub id: String,
    pub creator_id: String,
    pub organization_id: String,
    pub status: String,
    pub provider_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub destination_rowid: i64,
    pub origin_rowid: Option<i64>,
    pub size: i16,
    pub needed_before: Option<String>,
    pub kilograms: Option<f64>,
    pub url: Option<String>,
    pub photo_id: Option<String>,
    pub meeting_id: Option<String>,
    pub visibility: String,
    pub completed_on: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Insertable, Queryable, Selectable)]
#[diesel(table_name = request_history)]
pub struct RequestHistoryEntity {
    pub request_id: String,
    pub actor_id: String,
    pub old_status: String,
    pub new_status: String,
    pub old_provider_id: Option<String>,
    pub new_provider_id: Option<String>,
    pub created_at: i64,
}

#[derive(Insertable, Queryable, Selectable)]
#[diesel(table_name = potential_providers)]
pub struct PotentialProviderEntity {
    pub request_id: String,
    pub user_id: String,
    pub created_at: i64,
}

#[derive(Insertable, Queryable, Selectable)]
#[diesel(table_name = threads)]
pub struct ThreadEntity {
    pub id: String,
    pub request_id: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Insertable, Queryable, Selectable)]
#[diesel(table_name = thread_participants)]
pub struct ThreadParticipantEntity {
    pub thread_id: String,
    pub user_id: String,
    pub last_viewed_at: Option<i64>,
}

#[derive(Insertable, Queryable, Selectable)]
#[diesel(table_name = messages)]
pub struct MessageEntity {
    pub id: String,
    pub thread_id: String,
    pub sender_id: String,
    pub content: String,
    pub created_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = watches)]
pub struct NewWatch<'a> {
    pub id: String,
    pub owner_id: String,
    pub name: Option<&'a str>,
    pub destination_rowid: Option<i64>,
    pub origin_rowid: Option<i64>,
    pub meeting_id: Option<String>,
    pub search_text: Option<&'a str>,
    pub size_floor: Option<i16>,
    pub created_at: i64,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = watches)]
pub struct WatchEntity {
    pub id: String,
    pub owner_id: String,
    pub name: Option<String>,
    pub destination_rowid: Option<i64>,
    pub origin_rowid: Option<i64>,
    pub meeting_id: Option<String>,
    pub search_text: Option<String>,
    pub size_floor: Option<i16>,
    pub created_at: i64,
}
