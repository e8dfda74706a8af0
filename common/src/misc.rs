use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Purchasable content-access level. Ordered so that a comparison
/// expresses "at least standard".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Free,
    Standard,
    Premium,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Free => write!(f, "free"),
            Tier::Standard => write!(f, "standard"),
            Tier::Premium => write!(f, "premium"),
        }
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Tier::Free),
            "standard" => Ok(Tier::Standard),
            "premium" => Ok(Tier::Premium),
            other => Err(format!("unknown tier '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStatus {
    Active,
    PastDue,
    Canceled,
    Pending,
}

impl fmt::Display for ProfileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileStatus::Active => write!(f, "active"),
            ProfileStatus::PastDue => write!(f, "past_due"),
            ProfileStatus::Canceled => write!(f, "canceled"),
            ProfileStatus::Pending => write!(f, "pending"),
        }
    }
}

impl FromStr for ProfileStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ProfileStatus::Active),
            "past_due" => Ok(ProfileStatus::PastDue),
            "canceled" => Ok(ProfileStatus::Canceled),
            "pending" => Ok(ProfileStatus::Pending),
            other => Err(format!("unknown profile status '{}'", other)),
        }
    }
}

/// Lifecycle state of a payment request. Moves only forward:
/// pending -> verified | rejected, and either of those -> refunded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Verified,
    Rejected,
    Refunded,
}

impl PaymentStatus {
    pub fn can_transition_to(self, next: PaymentStatus) -> bool {
        matches!(
            (self, next),
            (PaymentStatus::Pending, PaymentStatus::Verified)
                | (PaymentStatus::Pending, PaymentStatus::Rejected)
                | (PaymentStatus::Verified, PaymentStatus::Refunded)
                | (PaymentStatus::Rejected, PaymentStatus::Refunded)
        )
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Verified => write!(f, "verified"),
            PaymentStatus::Rejected => write!(f, "rejected"),
            PaymentStatus::Refunded => write!(f, "refunded"),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "verified" => Ok(PaymentStatus::Verified),
            "rejected" => Ok(PaymentStatus::Rejected),
            "refunded" => Ok(PaymentStatus::Refunded),
            other => Err(format!("unknown payment status '{}'", other)),
        }
    }
}
