//! The transaction submitted for screening.

use llock_core::{AccountId, CountryCode};
use serde::{Deserialize, Serialize};

/// A transfer between two KYC accounts.
///
/// Amounts and balances are whole currency units. Unknown fields are
/// rejected so a typo in an input file cannot silently drop a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Transaction {
    /// Transferred amount.
    pub amount: u64,
    /// Sender balance before the transfer.
    pub sender_balance: u64,
    /// Receiver balance before the transfer.
    pub receiver_balance: u64,
    /// Settlement speed bucket; lower is faster.
    pub transaction_speed: u32,
    pub sender_country: CountryCode,
    pub receiver_country: CountryCode,
    pub sender_id: AccountId,
    pub receiver_id: AccountId,
}

impl Transaction {
    /// True when sender and receiver are in different countries.
    pub fn is_cross_border(&self) -> bool {
        self.sender_country != self.receiver_country
    }

    /// Parse a JSON array of transactions.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str(json)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_input_shape() {
        let tx: Transaction = serde_json::from_value(json!({
            "amount": 5000, "sender_balance": 20000, "receiver_balance": 15000,
            "transaction_speed": 2, "sender_country": "IN", "receiver_country": "US",
            "sender_id": "IN12345", "receiver_id": "US67890"
        }))
        .unwrap();
        assert_eq!(tx, transaction());
        assert!(tx.is_cross_border());
    }

    #[test]
    fn rejects_invalid_fields() {
        let bad_country = json!({
            "amount": 1, "sender_balance": 1, "receiver_balance": 1,
            "transaction_speed": 1, "sender_country": "india", "receiver_country": "US",
            "sender_id": "IN12345", "receiver_id": "US67890"
        });
        assert!(serde_json::from_value::<Transaction>(bad_country).is_err());

        let fractional = json!({
            "amount": 12.5, "sender_balance": 1, "receiver_balance": 1,
            "transaction_speed": 1, "sender_country": "IN", "receiver_country": "US",
            "sender_id": "IN12345", "receiver_id": "US67890"
        });
        assert!(serde_json::from_value::<Transaction>(fractional).is_err());

        let mut extra = serde_json::to_value(transaction()).unwrap();
        extra["memo"] = json!("x");
        assert!(serde_json::from_value::<Transaction>(extra).is_err());
    }

    #[test]
    fn domestic_transfer_is_not_cross_border() {
        let mut tx = transaction();
        tx.receiver_country = country("IN");
        assert!(!tx.is_cross_border());
    }

    #[test]
    fn parses_list() {
        let json = serde_json::to_string(&vec![transaction(), transaction()]).unwrap();
        assert_eq!(Transaction::list_from_json(&json).unwrap().len(), 2);
    }
}
