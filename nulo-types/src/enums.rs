use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

/// Returned when a stored or submitted string does not name a known variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

// Enums are persisted as their wire strings, so each one round-trips through
// `as_str` / `FromStr` as well as serde.
macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident => $kind:literal { $($variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    other => Err(UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

string_enum!(
    /// Account role
    UserType => "user type" {
        Tenant => "tenant",
        Landlord => "landlord",
        Admin => "admin",
    }
);

string_enum!(
    VerificationStatus => "verification status" {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
        Partial => "partial",
    }
);

string_enum!(
    PropertyType => "property type" {
        Apartment => "apartment",
        House => "house",
        Duplex => "duplex",
        Studio => "studio",
        Penthouse => "penthouse",
    }
);

string_enum!(
    /// Listing lifecycle; only `Active` listings are searchable
    PropertyStatus => "property status" {
        Draft => "draft",
        Active => "active",
        Rented => "rented",
        Inactive => "inactive",
    }
);

string_enum!(
    ApplicationStatus => "application status" {
        Submitted => "submitted",
        UnderReview => "under_review",
        Approved => "approved",
        Rejected => "rejected",
    }
);

string_enum!(
    /// Escrow state of the rent held for an application
    TransactionStatus => "transaction status" {
        Held => "held",
        Released => "released",
        Refunded => "refunded",
    }
);

string_enum!(
    SortOrder => "sort order" {
        Newest => "newest",
        PriceLow => "price_low",
        PriceHigh => "price_high",
    }
);

impl ApplicationStatus {
    /// Whether a landlord may still approve or reject the application
    pub fn is_pending(&self) -> bool {
        matches!(self, ApplicationStatus::Submitted | ApplicationStatus::UnderReview)
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Newest
    }
}

impl Default for PropertyType {
    fn default() -> Self {
        PropertyType::Apartment
    }
}

impl Default for PropertyStatus {
    fn default() -> Self {
        PropertyStatus::Draft
    }
}
