use crate::domain::payment_method::PaymentMethod;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// ACS window size requested when the caller does not specify one.
pub const DEFAULT_ACS_WINDOW_SIZE: &str = "03";

/// Data portion of a verification request, as handed to the SDK.
///
/// Field names follow the SDK's wire contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationFields {
    pub nonce: String,
    pub bin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Value>,
    pub additional_information: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
}

/// Continuation supplied by the SDK at the lookup phase.
pub type LookupContinue = Box<dyn FnOnce() + Send>;

/// Callback invoked by the SDK during the lookup phase; the implementation
/// must call the continuation for verification to proceed.
pub type LookupCallback = Box<dyn Fn(LookupContinue) + Send + Sync>;

/// Full request passed to `VerificationHandle::verify_card`.
pub struct VerificationRequest {
    pub fields: VerificationFields,
    pub on_lookup_complete: LookupCallback,
}

impl fmt::Debug for VerificationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationRequest")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// Outcome of a step-up verification, passed through from the SDK verbatim.
///
/// `liablity_shift_possible` preserves the upstream field name as received,
/// spelling included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub nonce: String,
    pub liability_shifted: bool,
    pub liablity_shift_possible: bool,
}

/// Builds the merged request fields for one verification attempt.
///
/// Merge order: the `acsWindowSize` default, then the configuration's stored
/// `additionalInformation`, then caller overrides (caller wins per key).
/// `amount` comes from the overrides when present, else from the
/// configuration. `nonce` and `bin` always come from the payment method;
/// override keys by those names are discarded. `billingAddress` and `email`
/// appear only when the caller supplied them.
pub fn build_verification_fields(
    config: &Map<String, Value>,
    method: &PaymentMethod,
    overrides: &Map<String, Value>,
) -> VerificationFields {
    let mut additional_information = Map::new();
    additional_information.insert(
        "acsWindowSize".to_owned(),
        Value::String(DEFAULT_ACS_WINDOW_SIZE.to_owned()),
    );
    for source in [config, overrides] {
        if let Some(Value::Object(entries)) = source.get("additionalInformation") {
            for (key, value) in entries {
                additional_information.insert(key.clone(), value.clone());
            }
        }
    }

    VerificationFields {
        nonce: method.nonce.clone(),
        bin: method.details.bin.clone(),
        amount: overrides
            .get("amount")
            .or_else(|| config.get("amount"))
            .cloned(),
        additional_information,
        billing_address: overrides.get("billingAddress").cloned(),
        email: overrides.get("email").cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config_with_amount(amount: &str) -> Map<String, Value> {
        let mut config = Map::new();
        config.insert("amount".to_owned(), json!(amount));
        config
    }

    #[test]
    fn test_defaults_when_no_overrides() {
        let method = PaymentMethod::card("old-nonce", "123456");
        let fields = build_verification_fields(&config_with_amount("10.00"), &method, &Map::new());

        assert_eq!(fields.nonce, "old-nonce");
        assert_eq!(fields.bin, "123456");
        assert_eq!(fields.amount, Some(json!("10.00")));
        assert_eq!(
            Value::Object(fields.additional_information),
            json!({ "acsWindowSize": "03" })
        );
        assert!(fields.billing_address.is_none());
        assert!(fields.email.is_none());
    }

    #[test]
    fn test_override_amount_wins() {
        let method = PaymentMethod::card("old-nonce", "123456");
        let mut overrides = Map::new();
        overrides.insert("amount".to_owned(), json!("3.00"));

        let fields = build_verification_fields(&config_with_amount("10.00"), &method, &overrides);
        assert_eq!(fields.amount, Some(json!("3.00")));
    }

    #[test]
    fn test_nonce_and_bin_cannot_be_overridden() {
        let method = PaymentMethod::card("old-nonce", "123456");
        let mut overrides = Map::new();
        overrides.insert("nonce".to_owned(), json!("bad-nonce"));
        overrides.insert("bin".to_owned(), json!("bad-bin"));

        let fields = build_verification_fields(&config_with_amount("10.00"), &method, &overrides);
        assert_eq!(fields.nonce, "old-nonce");
        assert_eq!(fields.bin, "123456");
    }

    #[test]
    fn test_additional_information_shallow_merge() {
        let method = PaymentMethod::card("old-nonce", "123456");
        let mut overrides = Map::new();
        overrides.insert(
            "additionalInformation".to_owned(),
            json!({ "shippingMethod": "01" }),
        );

        let fields = build_verification_fields(&config_with_amount("10.00"), &method, &overrides);
        assert_eq!(
            Value::Object(fields.additional_information),
            json!({ "acsWindowSize": "03", "shippingMethod": "01" })
        );
    }

    #[test]
    fn test_stored_additional_information_overlays_default() {
        let method = PaymentMethod::card("old-nonce", "123456");
        let mut config = config_with_amount("10.00");
        config.insert(
            "additionalInformation".to_owned(),
            json!({ "acsWindowSize": "05" }),
        );

        let fields = build_verification_fields(&config, &method, &Map::new());
        assert_eq!(
            Value::Object(fields.additional_information),
            json!({ "acsWindowSize": "05" })
        );
    }

    #[test]
    fn test_result_wire_names_preserved() {
        let result = VerificationResult {
            nonce: "a-nonce".to_owned(),
            liability_shifted: true,
            liablity_shift_possible: true,
        };
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["liabilityShifted"], true);
        assert_eq!(json["liablityShiftPossible"], true);
    }
}
