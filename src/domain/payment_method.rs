use serde::{Deserialize, Serialize};

/// Category of a configured payment option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentMethodKind {
    CreditCard,
    PaypalAccount,
    VenmoAccount,
}

/// Tokenization details attached to a payment method.
///
/// `bin` is the issuer identification number of the underlying card; step-up
/// verification requires it alongside the nonce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodDetails {
    pub bin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_two: Option<String>,
}

impl PaymentMethodDetails {
    pub fn from_bin(bin: impl Into<String>) -> Self {
        Self {
            bin: bin.into(),
            last_two: None,
        }
    }
}

/// A configured payment option the payer may choose.
///
/// The coordination model holds these in insertion order and treats duplicates
/// as distinct entries; identity is positional, not value-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub nonce: String,
    #[serde(rename = "type")]
    pub kind: PaymentMethodKind,
    pub details: PaymentMethodDetails,
}

impl PaymentMethod {
    /// Convenience constructor for a tokenized card.
    pub fn card(nonce: impl Into<String>, bin: impl Into<String>) -> Self {
        Self {
            nonce: nonce.into(),
            kind: PaymentMethodKind::CreditCard,
            details: PaymentMethodDetails::from_bin(bin),
        }
    }
}
