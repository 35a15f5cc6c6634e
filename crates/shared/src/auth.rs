//! Authenticated principal and permission types.
//!
//! Sign-in and token verification happen in the identity provider. What
//! reaches the ledger is a [`Principal`]: the user id plus the permission
//! claims the provider granted.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// A permission claim granted by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Permission {
    /// View the dashboard and combined feed.
    ViewDashboard,
    /// List and read bank transfers.
    ViewBankTransactions,
    /// Create, edit, confirm and delete bank transfers.
    ManageBankTransactions,
    /// List and read hawala transfers.
    ViewHawalaTransactions,
    /// Create, edit, confirm and delete hawala transfers.
    ManageHawalaTransactions,
    /// Add and remove banks, markets and accounts.
    ManageReferenceData,
}

impl Permission {
    /// Every permission, in display order.
    pub const ALL: [Self; 6] = [
        Self::ViewDashboard,
        Self::ViewBankTransactions,
        Self::ManageBankTransactions,
        Self::ViewHawalaTransactions,
        Self::ManageHawalaTransactions,
        Self::ManageReferenceData,
    ];

    /// Returns the claim string used by the identity provider.
    #[must_use]
    pub const fn as_claim(&self) -> &'static str {
        match self {
            Self::ViewDashboard => "dashboard:view",
            Self::ViewBankTransactions => "bank_transactions:view",
            Self::ManageBankTransactions => "bank_transactions:manage",
            Self::ViewHawalaTransactions => "hawala_transactions:view",
            Self::ManageHawalaTransactions => "hawala_transactions:manage",
            Self::ManageReferenceData => "reference_data:manage",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_claim())
    }
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let claim = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|permission| permission.as_claim() == claim)
            .ok_or_else(|| format!("Unknown permission: {s}"))
    }
}

impl TryFrom<String> for Permission {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Permission> for String {
    fn from(value: Permission) -> Self {
        value.as_claim().to_string()
    }
}

/// A page of the application, shown only to principals allowed to see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    /// Combined feed of both transfer kinds.
    Dashboard,
    /// Bank transfer history.
    BankTransactions,
    /// Hawala transfer history.
    HawalaTransactions,
    /// Bank reference list.
    Banks,
    /// Hawala market reference list.
    Markets,
    /// Account reference list.
    Accounts,
}

impl Page {
    /// Every page, in navigation order.
    pub const ALL: [Self; 6] = [
        Self::Dashboard,
        Self::BankTransactions,
        Self::HawalaTransactions,
        Self::Banks,
        Self::Markets,
        Self::Accounts,
    ];

    /// The permission needed to see this page.
    #[must_use]
    pub const fn required_permission(&self) -> Permission {
        match self {
            Self::Dashboard => Permission::ViewDashboard,
            Self::BankTransactions => Permission::ViewBankTransactions,
            Self::HawalaTransactions => Permission::ViewHawalaTransactions,
            Self::Banks | Self::Markets | Self::Accounts => Permission::ManageReferenceData,
        }
    }
}

/// An authenticated user and the permissions granted to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// The authenticated user.
    pub user_id: UserId,
    /// Granted permissions.
    pub permissions: BTreeSet<Permission>,
}

impl Principal {
    /// Creates a principal with the given permissions.
    #[must_use]
    pub fn new(user_id: UserId, permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            user_id,
            permissions: permissions.into_iter().collect(),
        }
    }

    /// Builds a principal from raw claim strings, ignoring claims this
    /// application does not know about.
    #[must_use]
    pub fn from_claims<'a>(user_id: UserId, claims: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(user_id, claims.into_iter().filter_map(|c| c.parse().ok()))
    }

    /// Returns true if the principal holds `permission`.
    ///
    /// Managing a transfer kind implies viewing it.
    #[must_use]
    pub fn has(&self, permission: Permission) -> bool {
        if self.permissions.contains(&permission) {
            return true;
        }
        match permission {
            Permission::ViewBankTransactions => {
                self.permissions.contains(&Permission::ManageBankTransactions)
            }
            Permission::ViewHawalaTransactions => {
                self.permissions.contains(&Permission::ManageHawalaTransactions)
            }
            _ => false,
        }
    }

    /// Pages this principal may navigate to.
    #[must_use]
    pub fn visible_pages(&self) -> Vec<Page> {
        Page::ALL
            .into_iter()
            .filter(|page| self.has(page.required_permission()))
            .collect()
    }
}
