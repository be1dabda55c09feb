use crate::{deadline::DeadlineExceeded, repositories, util::validate::RequestInvalidation};
use thiserror::Error;

/// The user-visible category of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    BadInput,
    NotAuthenticated,
    NotFound,
    Forbidden,
    Conflict,
    Unprocessable,
    Internal,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("The title is invalid")]
    Title,
    #[error("The description is too long")]
    Description,
    #[error("The message content is invalid")]
    MessageContent,
    #[error("Invalid nickname")]
    Nickname,
    #[error("Invalid email address")]
    Email,
    #[error("Invalid URL")]
    Url,
    #[error("Invalid location")]
    Location,
    #[error("Invalid weight")]
    Kilograms,
    #[error("Invalid name")]
    Name,
    #[error("The end date is before the start")]
    EndDateBeforeStart,
    #[error("The meeting has already ended")]
    MeetingEnded,
    #[error("A watch needs at least one criterion")]
    WatchWithoutCriteria,
    #[error("Organization and creator of a request cannot be changed")]
    ImmutableField,
    #[error("The nickname is already taken")]
    NicknameTaken,
    #[error("The user already exists")]
    UserExists,
    #[error("The organization already exists")]
    OrganizationExists,
    #[error("An offer has already been made")]
    AlreadyOffered,
    #[error("The request is not open")]
    RequestNotOpen,
    #[error("The request status has changed in the meantime")]
    StaleStatus,
    #[error("The status transition is not allowed")]
    IllegalTransition,
    #[error("A provider is required")]
    MissingProvider,
    #[error("The provider is not affiliated with a trusted organization")]
    BadProvider,
    #[error("This is not allowed")]
    Forbidden,
    #[error("This is not allowed without auth")]
    Unauthorized,
    #[error("Token invalid")]
    TokenInvalid,
    #[error("Token expired")]
    TokenExpired,
    #[error("The requested object could not be found")]
    NotFound,
    #[error(transparent)]
    Deadline(#[from] DeadlineExceeded),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

impl Error {
    /// A stable identifier that clients can localize.
    pub fn key(&self) -> &'static str {
        use repositories::Error as RepoError;
        match self {
            Self::Title => "request.invalid_title",
            Self::Description => "request.invalid_description",
            Self::MessageContent => "message.invalid_content",
            Self::Nickname => "user.invalid_nickname",
            Self::Email => "user.invalid_email",
            Self::Url => "invalid_url",
            Self::Location => "invalid_location",
            Self::Kilograms => "request.invalid_kilograms",
            Self::Name => "invalid_name",
            Self::EndDateBeforeStart => "meeting.end_before_start",
            Self::MeetingEnded => "meeting.ended",
            Self::WatchWithoutCriteria => "watch.no_criteria",
            Self::ImmutableField => "request.immutable_field",
            Self::NicknameTaken => "user.nickname_taken",
            Self::UserExists => "user.exists",
            Self::OrganizationExists => "organization.exists",
            Self::AlreadyOffered => "request.already_offered",
            Self::RequestNotOpen => "request.not_open",
            Self::StaleStatus => "request.stale_status",
            Self::IllegalTransition => "request.illegal_transition",
            Self::MissingProvider => "request.missing_provider",
            Self::BadProvider => "request.bad_provider",
            Self::Forbidden => "forbidden",
            Self::Unauthorized => "not_authenticated",
            Self::TokenInvalid => "token.invalid",
            Self::TokenExpired => "token.expired",
            Self::NotFound | Self::Repo(RepoError::NotFound) => "not_found",
            Self::Repo(RepoError::AlreadyExists) => "conflict",
            Self::Deadline(_) => "deadline_exceeded",
            Self::Repo(_) => "db_failure",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        use repositories::Error as RepoError;
        use ErrorCategory as C;
        match self {
            Self::Title
            | Self::Description
            | Self::MessageContent
            | Self::Nickname
            | Self::Email
            | Self::Url
            | Self::Location
            | Self::Kilograms
            | Self::Name
            | Self::EndDateBeforeStart
            | Self::WatchWithoutCriteria
            | Self::ImmutableField
            | Self::IllegalTransition
            | Self::MissingProvider
            | Self::BadProvider => C::BadInput,
            Self::MeetingEnded | Self::RequestNotOpen => C::Unprocessable,
            Self::NicknameTaken
            | Self::UserExists
            | Self::OrganizationExists
            | Self::AlreadyOffered
            | Self::StaleStatus
            | Self::Repo(RepoError::AlreadyExists) => C::Conflict,
            Self::Forbidden => C::Forbidden,
            Self::Unauthorized | Self::TokenInvalid | Self::TokenExpired => C::NotAuthenticated,
            Self::NotFound | Self::Repo(RepoError::NotFound) => C::NotFound,
            Self::Deadline(_) | Self::Repo(_) => C::Internal,
        }
    }
}

impl From<RequestInvalidation> for Error {
    fn from(err: RequestInvalidation) -> Self {
        match err {
            RequestInvalidation::Title => Self::Title,
            RequestInvalidation::Description => Self::Description,
            RequestInvalidation::Url => Self::Url,
            RequestInvalidation::Kilograms => Self::Kilograms,
        }
    }
}

impl From<hc_entities::email::EmailAddressParseError> for Error {
    fn from(_: hc_entities::email::EmailAddressParseError) -> Self {
        Self::Email
    }
}
