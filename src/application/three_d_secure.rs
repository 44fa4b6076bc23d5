use crate::domain::payment_method::PaymentMethod;
use crate::domain::ports::{SdkOptions, VerificationHandleBox, VerificationSdkBox};
use crate::domain::verification::{
    VerificationRequest, VerificationResult, build_verification_fields,
};
use crate::error::{CheckoutError, Result};
use serde_json::{Map, Value};

/// Protocol version requested from the verification SDK.
pub const VERIFICATION_PROTOCOL_VERSION: u32 = 2;

/// Bridge between the checkout widget and the external step-up verification
/// SDK.
///
/// Owns the SDK instance between `initialize` and `teardown`, builds
/// verification requests with the configured merge policy, and passes SDK
/// results and failures through unchanged.
pub struct ThreeDSecure {
    sdk: VerificationSdkBox,
    client_handle: String,
    label: String,
    config: Map<String, Value>,
    instance: Option<VerificationHandleBox>,
}

impl ThreeDSecure {
    /// Creates an adapter bound to a client handle, an initial configuration
    /// mapping, and a display label for the verification sheet.
    pub fn new(
        sdk: VerificationSdkBox,
        client_handle: impl Into<String>,
        config: Map<String, Value>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            sdk,
            client_handle: client_handle.into(),
            label: label.into(),
            config,
            instance: None,
        }
    }

    /// Creates the underlying SDK instance. A creation failure passes
    /// through unchanged and leaves the adapter uninitialized.
    pub async fn initialize(&mut self) -> Result<()> {
        let instance = self
            .sdk
            .create(SdkOptions {
                client_handle: self.client_handle.clone(),
                version: VERIFICATION_PROTOCOL_VERSION,
            })
            .await?;
        self.instance = Some(instance);
        Ok(())
    }

    /// Runs step-up verification for one payment method.
    ///
    /// Caller overrides merge into the stored configuration per the policy in
    /// [`build_verification_fields`]. The lookup-complete callback always
    /// signals the SDK to continue; no confirmation UI sits in this path.
    /// The SDK's resolved payload is returned verbatim and its failures
    /// propagate unchanged.
    pub async fn verify(
        &self,
        method: &PaymentMethod,
        overrides: Option<&Map<String, Value>>,
    ) -> Result<VerificationResult> {
        let instance = self.instance.as_ref().ok_or(CheckoutError::NotInitialized)?;

        let empty = Map::new();
        let fields =
            build_verification_fields(&self.config, method, overrides.unwrap_or(&empty));
        let request = VerificationRequest {
            fields,
            on_lookup_complete: Box::new(|proceed| proceed()),
        };

        instance.verify_card(request).await
    }

    /// Cancels the in-flight verification. The SDK's outcome passes through.
    pub async fn cancel_verify_card(&self) -> Result<()> {
        self.instance
            .as_ref()
            .ok_or(CheckoutError::NotInitialized)?
            .cancel_verify_card()
            .await
    }

    /// Tears down the SDK instance. After this resolves the adapter accepts
    /// no further verification calls.
    pub async fn teardown(&mut self) -> Result<()> {
        let instance = self.instance.take().ok_or(CheckoutError::NotInitialized)?;
        instance.teardown().await
    }

    /// Replaces exactly one key of the stored configuration. Neither the key
    /// nor the value is validated.
    pub fn update_configuration(&mut self, key: impl Into<String>, value: Value) {
        self.config.insert(key.into(), value);
    }

    pub fn configuration(&self) -> &Map<String, Value> {
        &self.config
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_initialized(&self) -> bool {
        self.instance.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::scripted::ScriptedSdk;
    use serde_json::json;

    fn adapter_with(sdk: &ScriptedSdk) -> ThreeDSecure {
        let mut config = Map::new();
        config.insert("amount".to_owned(), json!("10.00"));
        ThreeDSecure::new(
            Box::new(sdk.clone()),
            "a-client-handle",
            config,
            "Card Verification",
        )
    }

    #[tokio::test]
    async fn test_initialize_requests_protocol_version_2() {
        let sdk = ScriptedSdk::new();
        let mut tds = adapter_with(&sdk);

        tds.initialize().await.unwrap();

        assert!(tds.is_initialized());
        assert_eq!(
            sdk.created_with(),
            vec![SdkOptions {
                client_handle: "a-client-handle".to_owned(),
                version: 2,
            }]
        );
    }

    #[tokio::test]
    async fn test_verify_before_initialize_is_rejected() {
        let sdk = ScriptedSdk::new();
        let tds = adapter_with(&sdk);

        let err = tds
            .verify(&PaymentMethod::card("old-nonce", "123456"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::NotInitialized));
    }

    #[tokio::test]
    async fn test_update_configuration_replaces_single_key() {
        let sdk = ScriptedSdk::new();
        let mut config = Map::new();
        config.insert("amount".to_owned(), json!("10.00"));
        config.insert("foo".to_owned(), json!("bar"));
        let mut tds =
            ThreeDSecure::new(Box::new(sdk), "a-client-handle", config, "Card Verification");

        tds.update_configuration("amount", json!("23.45"));

        assert_eq!(
            Value::Object(tds.configuration().clone()),
            json!({ "amount": "23.45", "foo": "bar" })
        );
    }
}
