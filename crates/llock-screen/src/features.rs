//! # Feature Encoding
//!
//! Converts a [`Transaction`] into the column vector a fraud model was
//! trained on. Column names follow the one-hot convention of the training
//! pipeline:
//!
//! - numeric: `amount`, `sender_balance`, `receiver_balance`, `transaction_speed`
//! - one-hot: `sender_country_XX`, `receiver_country_XX`
//!
//! The output has exactly the configured columns in the configured order.
//! A configured column the transaction does not produce is `0`; a column the
//! transaction would produce but the model does not know is dropped.

use crate::transaction::Transaction;

const SENDER_COUNTRY_PREFIX: &str = "sender_country_";
const RECEIVER_COUNTRY_PREFIX: &str = "receiver_country_";

/// Column names used when no model feature list is configured.
pub fn default_feature_names() -> Vec<String> {
    let mut names: Vec<String> = [
        "amount",
        "sender_balance",
        "receiver_balance",
        "transaction_speed",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    for prefix in [SENDER_COUNTRY_PREFIX, RECEIVER_COUNTRY_PREFIX] {
        for code in ["IN", "SG", "UK", "US"] {
            names.push(format!("{prefix}{code}"));
        }
    }
    names
}

/// An ordered list of model columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureEncoder {
    names: Vec<String>,
}

impl FeatureEncoder {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Column names in model order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Encode `tx` into one value per configured column.
    pub fn encode(&self, tx: &Transaction) -> FeatureVector {
        let columns = self
            .names
            .iter()
            .map(|name| (name.clone(), column_value(tx, name)))
            .collect();
        FeatureVector { columns }
    }
}

impl Default for FeatureEncoder {
    fn default() -> Self {
        Self::new(default_feature_names())
    }
}

fn column_value(tx: &Transaction, name: &str) -> f64 {
    match name {
        "amount" => tx.amount as f64,
        "sender_balance" => tx.sender_balance as f64,
        "receiver_balance" => tx.receiver_balance as f64,
        "transaction_speed" => f64::from(tx.transaction_speed),
        _ => {
            if let Some(code) = name.strip_prefix(SENDER_COUNTRY_PREFIX) {
                one_hot(tx.sender_country.as_str() == code)
            } else if let Some(code) = name.strip_prefix(RECEIVER_COUNTRY_PREFIX) {
                one_hot(tx.receiver_country.as_str() == code)
            } else {
                0.0
            }
        }
    }
}

fn one_hot(hit: bool) -> f64 {
    if hit {
        1.0
    } else {
        0.0
    }
}

/// Named model inputs, in model column order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    columns: Vec<(String, f64)>,
}

impl FeatureVector {
    /// Value of column `name`, if the column exists.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    /// Iterate `(name, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.columns.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Values only, in column order.
    pub fn values(&self) -> Vec<f64> {
        self.columns.iter().map(|(_, v)| *v).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
