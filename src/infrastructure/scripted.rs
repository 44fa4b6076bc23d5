use crate::domain::ports::{
    SdkOptions, VerificationHandle, VerificationHandleBox, VerificationSdk,
};
use crate::domain::verification::{VerificationFields, VerificationRequest, VerificationResult};
use crate::error::{CheckoutError, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

type ScriptedOutcome = std::result::Result<VerificationResult, String>;

/// Everything a scripted handle observed, shared with the owning
/// [`ScriptedSdk`] for assertions.
#[derive(Debug, Default)]
struct Journal {
    requests: Vec<VerificationFields>,
    lookup_completions: usize,
    cancels: usize,
    teardowns: usize,
}

/// In-memory verification SDK with queued outcomes.
///
/// Stands in for the hosted SDK in tests and the demo binary: `verify_card`
/// drives the lookup callback, records the request fields, and pops the next
/// scripted outcome. Clones share the same queue and journal.
#[derive(Clone, Default)]
pub struct ScriptedSdk {
    outcomes: Arc<Mutex<VecDeque<ScriptedOutcome>>>,
    journal: Arc<Mutex<Journal>>,
    created_with: Arc<Mutex<Vec<SdkOptions>>>,
    create_failure: Arc<Mutex<Option<String>>>,
}

impl ScriptedSdk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful verification payload.
    pub fn enqueue_success(&self, result: VerificationResult) {
        self.outcomes.lock().unwrap().push_back(Ok(result));
    }

    /// Queues a verification failure with the given message.
    pub fn enqueue_failure(&self, message: impl Into<String>) {
        self.outcomes.lock().unwrap().push_back(Err(message.into()));
    }

    /// Makes the next `create` call fail with the given message.
    pub fn fail_create(&self, message: impl Into<String>) {
        *self.create_failure.lock().unwrap() = Some(message.into());
    }

    /// Options every `create` call was made with, in order.
    pub fn created_with(&self) -> Vec<SdkOptions> {
        self.created_with.lock().unwrap().clone()
    }

    /// Request fields of every `verify_card` call, in order.
    pub fn requests(&self) -> Vec<VerificationFields> {
        self.journal.lock().unwrap().requests.clone()
    }

    /// Number of lookup callbacks that invoked the continuation.
    pub fn lookup_completions(&self) -> usize {
        self.journal.lock().unwrap().lookup_completions
    }

    pub fn cancels(&self) -> usize {
        self.journal.lock().unwrap().cancels
    }

    pub fn teardowns(&self) -> usize {
        self.journal.lock().unwrap().teardowns
    }
}

#[async_trait]
impl VerificationSdk for ScriptedSdk {
    async fn create(&self, options: SdkOptions) -> Result<VerificationHandleBox> {
        if let Some(message) = self.create_failure.lock().unwrap().take() {
            return Err(CheckoutError::Verification { message });
        }
        self.created_with.lock().unwrap().push(options);
        Ok(Box::new(ScriptedHandle {
            outcomes: Arc::clone(&self.outcomes),
            journal: Arc::clone(&self.journal),
        }))
    }
}

#[derive(Debug)]
struct ScriptedHandle {
    outcomes: Arc<Mutex<VecDeque<ScriptedOutcome>>>,
    journal: Arc<Mutex<Journal>>,
}

#[async_trait]
impl VerificationHandle for ScriptedHandle {
    async fn verify_card(&self, request: VerificationRequest) -> Result<VerificationResult> {
        // Drive the lookup phase the way the hosted SDK does: hand the
        // caller's callback a continuation and see whether it gets invoked.
        let continued = Arc::new(Mutex::new(false));
        let flag = Arc::clone(&continued);
        (request.on_lookup_complete)(Box::new(move || {
            *flag.lock().unwrap() = true;
        }));

        {
            let mut journal = self.journal.lock().unwrap();
            if *continued.lock().unwrap() {
                journal.lookup_completions += 1;
            }
            journal.requests.push(request.fields.clone());
        }

        match self.outcomes.lock().unwrap().pop_front() {
            Some(Ok(result)) => Ok(result),
            Some(Err(message)) => Err(CheckoutError::Verification { message }),
            None => Err(CheckoutError::Verification {
                message: "no scripted verification outcome queued".to_owned(),
            }),
        }
    }

    async fn cancel_verify_card(&self) -> Result<()> {
        self.journal.lock().unwrap().cancels += 1;
        Ok(())
    }

    async fn teardown(&self) -> Result<()> {
        self.journal.lock().unwrap().teardowns += 1;
        Ok(())
    }
}
