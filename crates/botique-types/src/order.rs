use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a committed order, assigned by the order ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub i64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Chat profile fields recorded against a user on their first order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Platform handle, when the user has one.
    pub username: Option<String>,
    /// Given name as reported by the chat platform.
    pub first_name: String,
    /// Family name, when reported.
    pub last_name: Option<String>,
}

/// One line of a committed order, as read back from the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Catalog code of the ordered product.
    pub code: String,
    /// Units ordered.
    pub quantity: u32,
    /// Unit price captured at checkout time.
    pub unit_price: i64,
}

/// A committed order with its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Ledger-assigned order id.
    pub order_id: OrderId,
    /// Total charged, in minor currency units.
    pub total: i64,
    /// When the ledger committed the order.
    pub created_at: DateTime<Utc>,
    /// The order's lines.
    pub lines: Vec<OrderLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_display_and_parse() {
        let id = OrderId(77);
        assert_eq!(id.to_string(), "77");
        assert_eq!("77".parse::<OrderId>().unwrap(), id);
    }

    #[test]
    fn test_user_profile_serde() {
        let profile = UserProfile {
            username: Some("ivan_petrov".to_string()),
            first_name: "Ivan".to_string(),
            last_name: None,
        };
        let json = serde_json::to_string(&profile).unwrap();
        let back: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn test_order_record_serde() {
        let record = OrderRecord {
            order_id: OrderId(5),
            total: 38480,
            created_at: Utc::now(),
            lines: vec![OrderLine {
                code: "cpu-7700".to_string(),
                quantity: 1,
                unit_price: 27990,
            }],
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: OrderRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
