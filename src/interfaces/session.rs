use crate::domain::payment_method::PaymentMethod;
use crate::domain::verification::VerificationResult;
use crate::error::Result;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::io::Read;

/// A checkout session script: payment methods to register and an optional
/// step-up verification step with its scripted SDK outcome.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionScript {
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethod>,
    pub verification: Option<VerificationStep>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationStep {
    /// Caller overrides merged into the verification request.
    #[serde(default)]
    pub overrides: Map<String, Value>,
    pub outcome: ScriptedOutcome,
}

/// Outcome the scripted SDK should produce for the verification step.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum ScriptedOutcome {
    Success {
        #[serde(flatten)]
        result: VerificationResult,
    },
    Failure {
        message: String,
    },
}

/// Reads a session script from a JSON source.
pub struct SessionReader<R: Read> {
    source: R,
}

impl<R: Read> SessionReader<R> {
    /// Creates a new `SessionReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn read(self) -> Result<SessionScript> {
        Ok(serde_json::from_reader(self.source)?)
    }
}
