use strum::{AsRefStr, EnumString};

use crate::id::Id;

/// How members of an organization authenticate.
///
/// The configuration blob is stored but never interpreted here.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AuthType {
    #[default]
    None,
    Saml,
    Oauth,
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub id          : Id,
    pub name        : String,
    pub url         : Option<String>,
    pub auth_type   : AuthType,
    pub auth_config : Option<String>,
}

/// An email domain owned by an organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationDomain {
    pub organization_id: Id,
    pub domain: String,
}

/// One direction of a trust relationship.
///
/// Trust is always stored as a pair of rows, one per direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrganizationTrust {
    pub organization_id: Id,
    pub trusted_organization_id: Id,
}

impl OrganizationTrust {
    pub const fn reversed(self) -> Self {
        Self {
            organization_id: self.trusted_organization_id,
            trusted_organization_id: self.organization_id,
        }
    }
}
