use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive as _, ToPrimitive as _};
use strum::{AsRefStr, EnumIter, EnumString};
use thiserror::Error;

use crate::{email::EmailAddress, id::Id, location::Location, time::Timestamp};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id            : Id,
    pub email         : EmailAddress,
    pub nickname      : String,
    pub first_name    : Option<String>,
    pub last_name     : Option<String>,
    pub avatar        : Option<Id>,
    pub home_location : Option<Location>,
    pub admin_role    : AdminRole,
    pub preferences   : Preferences,
    pub created_at    : Timestamp,
}

impl User {
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(name), None) | (None, Some(name)) => name.clone(),
            (None, None) => self.nickname.clone(),
        }
    }
}

pub type AdminRolePrimitive = i16;

/// Platform-wide role of a user, independent of any organization.
#[rustfmt::skip]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, FromPrimitive, ToPrimitive, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AdminRole {
    #[default]
    User       = 0,
    SalesAdmin = 1,
    Admin      = 2,
    SuperAdmin = 3,
}

impl AdminRole {
    /// Super and sales admins may act on any request.
    pub fn overrides_requests(self) -> bool {
        matches!(self, Self::SuperAdmin | Self::SalesAdmin)
    }
}

#[derive(Debug, Error)]
#[error("Invalid admin role primitive: {0}")]
pub struct InvalidAdminRolePrimitive(AdminRolePrimitive);

impl TryFrom<AdminRolePrimitive> for AdminRole {
    type Error = InvalidAdminRolePrimitive;
    fn try_from(from: AdminRolePrimitive) -> Result<Self, Self::Error> {
        Self::from_i16(from).ok_or(InvalidAdminRolePrimitive(from))
    }
}

impl From<AdminRole> for AdminRolePrimitive {
    fn from(from: AdminRole) -> Self {
        from.to_i16().unwrap_or_default()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Language {
    #[default]
    En,
    Fr,
    Es,
    Ko,
    Pt,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WeightUnit {
    #[default]
    Kg,
    Lb,
}

#[rustfmt::skip]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub language    : Language,
    pub weight_unit : WeightUnit,
    pub time_zone   : Option<String>,
}

pub type OrgRolePrimitive = i16;

#[rustfmt::skip]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, FromPrimitive, ToPrimitive, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum OrgRole {
    #[default]
    User  = 0,
    Admin = 1,
}

#[derive(Debug, Error)]
#[error("Invalid organization role primitive: {0}")]
pub struct InvalidOrgRolePrimitive(OrgRolePrimitive);

impl TryFrom<OrgRolePrimitive> for OrgRole {
    type Error = InvalidOrgRolePrimitive;
    fn try_from(from: OrgRolePrimitive) -> Result<Self, Self::Error> {
        Self::from_i16(from).ok_or(InvalidOrgRolePrimitive(from))
    }
}

impl From<OrgRole> for OrgRolePrimitive {
    fn from(from: OrgRole) -> Self {
        from.to_i16().unwrap_or_default()
    }
}

/// Membership of a user in an organization.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserOrganization {
    pub user_id         : Id,
    pub organization_id : Id,
    pub auth_id         : Option<String>,
    pub auth_email      : Option<String>,
    pub role            : OrgRole,
}

/// A bearer credential. Only the hash of the plain token is kept.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token_hash      : String,
    pub user_id         : Id,
    pub organization_id : Option<Id>,
    pub created_at      : Timestamp,
    pub expires_at      : Timestamp,
}

impl AccessToken {
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_role_primitives() {
        assert_eq!(AdminRolePrimitive::from(AdminRole::SuperAdmin), 3);
        assert_eq!(AdminRole::try_from(1).unwrap(), AdminRole::SalesAdmin);
        assert!(AdminRole::try_from(4).is_err());
    }

    #[test]
    fn admin_role_names() {
        assert_eq!(AdminRole::SalesAdmin.as_ref(), "sales_admin");
        assert_eq!("SUPER_ADMIN".parse::<AdminRole>().unwrap(), AdminRole::SuperAdmin);
    }

    #[test]
    fn only_super_and_sales_admins_override() {
        assert!(AdminRole::SuperAdmin.overrides_requests());
        assert!(AdminRole::SalesAdmin.overrides_requests());
        assert!(!AdminRole::Admin.overrides_requests());
        assert!(!AdminRole::User.overrides_requests());
    }

    #[test]
    fn parse_language() {
        assert_eq!("ko".parse::<Language>().unwrap(), Language::Ko);
        assert_eq!("PT".parse::<Language>().unwrap(), Language::Pt);
        assert!("de".parse::<Language>().is_err());
    }
}
