///////////////////////////////////////////////////////////////////////
// Locations and files
///////////////////////////////////////////////////////////////////////

table! {
    locations (rowid) {
        rowid -> BigInt,
        description -> Nullable<Text>,
        country -> Nullable<Text>,
        state -> Nullable<Text>,
        county -> Nullable<Text>,
        city -> Nullable<Text>,
        borough -> Nullable<Text>,
        latitude -> Nullable<Double>,
        longitude -> Nullable<Double>,
    }
}

table! {
    files (rowid) {
        rowid -> BigInt,
        id -> Text,
        name -> Text,
        size -> BigInt,
        content_type -> Text,
        url -> Text,
        url_expires_at -> Nullable<BigInt>,
        created_at -> BigInt,
    }
}

///////////////////////////////////////////////////////////////////////
// Users and organizations
///////////////////////////////////////////////////////////////////////

table! {
    users (rowid) {
        rowid -> BigInt,
        id -> Text,
        email -> Text,
        nickname -> Text,
        first_name -> Nullable<Text>,
        last_name -> Nullable<Text>,
        avatar_id -> Nullable<Text>,
        home_location_rowid -> Nullable<BigInt>,
        admin_role -> SmallInt,
        language -> Text,
        weight_unit -> Text,
        time_zone -> Nullable<Text>,
        created_at -> BigInt,
    }
}

table! {
    organizations (rowid) {
        rowid -> BigInt,
        id -> Text,
        name -> Text,
        url -> Nullable<Text>,
        auth_type -> Text,
        auth_config -> Nullable<Text>,
    }
}

table! {
    organization_domains (organization_id, domain) {
        organization_id -> Text,
        domain -> Text,
    }
}

table! {
    organization_trusts (organization_id, trusted_organization_id) {
        organization_id -> Text,
        trusted_organization_id -> Text,
    }
}

table! {
    user_organizations (rowid) {
        rowid -> BigInt,
        user_id -> Text,
        organization_id -> Text,
        auth_id -> Nullable<Text>,
        auth_email -> Nullable<Text>,
        role -> SmallInt,
    }
}

table! {
    access_tokens (token_hash) {
        token_hash -> Text,
        user_id -> Text,
        organization_id -> Nullable<Text>,
        created_at -> BigInt,
        expires_at -> BigInt,
    }
}

///////////////////////////////////////////////////////////////////////
// Meetings
///////////////////////////////////////////////////////////////////////

table! {
    meetings (rowid) {
        rowid -> BigInt,
        id -> Text,
        name -> Text,
        description -> Nullable<Text>,
        start_date -> Text,
        end_date -> Text,
        creator_id -> Text,
        location_rowid -> BigInt,
        image_id -> Nullable<Text>,
        more_info_url -> Nullable<Text>,
        invite_code -> Nullable<Text>,
        created_at -> BigInt,
    }
}

table! {
    meeting_participants (meeting_id, user_id) {
        meeting_id -> Text,
        user_id -> Text,
        is_organizer -> Bool,
    }
}

table! {
    meeting_invites (rowid) {
        rowid -> BigInt,
        meeting_id -> Text,
        inviter_id -> Text,
        invitee_email -> Text,
        secret_token -> Text,
        created_at -> BigInt,
    }
}

///////////////////////////////////////////////////////////////////////
// Requests
///////////////////////////////////////////////////////////////////////

table! {
    requests (rowid) {
        rowid -> BigInt,
        id -> Text,
        creator_id -> Text,
        organization_id -> Text,
        status -> Text,
        provider_id -> Nullable<Text>,
        title -> Text,
        description -> Nullable<Text>,
        destination_rowid -> BigInt,
        origin_rowid -> Nullable<BigInt>,
        size -> SmallInt,
        needed_before -> Nullable<Text>,
        kilograms -> Nullable<Double>,
        url -> Nullable<Text>,
        photo_id -> Nullable<Text>,
        meeting_id -> Nullable<Text>,
        visibility -> Text,
        completed_on -> Nullable<Text>,
        created_at -> BigInt,
        updated_at -> BigInt,
    }
}

table! {
    request_history (rowid) {
        rowid -> BigInt,
        request_id -> Text,
        actor_id -> Text,
        old_status -> Text,
        new_status -> Text,
        old_provider_id -> Nullable<Text>,
        new_provider_id -> Nullable<Text>,
        created_at -> BigInt,
    }
}

table! {
    potential_providers (request_id, user_id) {
        request_id -> Text,
        user_id -> Text,
        created_at -> BigInt,
    }
}

///////////////////////////////////////////////////////////////////////
// Threads and messages
///////////////////////////////////////////////////////////////////////

table! {
    threads (rowid) {
        rowid -> BigInt,
        id -> Text,
        request_id -> Text,
        created_at -> BigInt,
        updated_at -> BigInt,
    }
}

table! {
    thread_participants (thread_id, user_id) {
        thread_id -> Text,
        user_id -> Text,
        last_viewed_at -> Nullable<BigInt>,
    }
}

table! {
    messages (rowid) {
        rowid -> BigInt,
        id -> Text,
        thread_id -> Text,
        sender_id -> Text,
        content -> Text,
        created_at -> BigInt,
    }
}

///////////////////////////////////////////////////////////////////////
// Watches
///////////////////////////////////////////////////////////////////////

table! {
    watches (rowid) {
        rowid -> BigInt,
        id -> Text,
        owner_id -> Text,
        name -> Nullable<Text>,
        destination_rowid -> Nullable<BigInt>,
        origin_rowid -> Nullable<BigInt>,
        meeting_id -> Nullable<Text>,
        search_text -> Nullable<Text>,
        size_floor -> Nullable<SmallInt>,
        created_at -> BigInt,
    }
}

allow_tables_to_appear_in_same_query!(
    locations,
    files,
    users,
    organizations,
    organization_domains,
    organization_trusts,
    user_organizations,
    access_tokens,
    meetings,
    meeting_participants,
    meeting_invites,
    requests,
    request_history,
    potential_providers,
    threads,
    thread_participants,
    messages,
    watches,
);
