//! Unique identifier types for exchange entities
//!
//! Traders are identified by UUID v7 (time-sortable); orders carry a
//! plain monotonic sequence number assigned by the engine, because the
//! order id doubles as the time-priority tie-breaker in the book.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a trader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraderId(Uuid);

impl TraderId {
    /// Create a new TraderId with current timestamp.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create from existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TraderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TraderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a resting limit order.
///
/// Monotonically increasing: a lower id means the order was placed
/// earlier and wins priority among equal prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Create from a sequence number.
    pub fn from_u64(sequence: u64) -> Self {
        Self(sequence)
    }

    /// Get the sequence number.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trader_id_creation() {
        let id1 = TraderId::new();
        let id2 = TraderId::new();
        assert_ne!(id1, id2, "TraderIds should be unique");
    }

    #[test]
    fn test_trader_id_serialization() {
        let id = TraderId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: TraderId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_order_id_ordering_follows_sequence() {
        let earlier = OrderId::from_u64(1);
        let later = OrderId::from_u64(2);
        assert!(earlier < later);
    }

    #[test]
    fn test_order_id_serialization() {
        let id = OrderId::from_u64(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");
        let deserialized: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
