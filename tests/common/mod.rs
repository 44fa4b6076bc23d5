#![allow(dead_code)]

use checkout_core::domain::payment_method::PaymentMethod;
use checkout_core::domain::verification::VerificationResult;
use std::io::{Error, Write};
use std::path::Path;

pub fn card(nonce: &str, bin: &str) -> PaymentMethod {
    PaymentMethod::card(nonce, bin)
}

pub fn approved_result(nonce: &str) -> VerificationResult {
    VerificationResult {
        nonce: nonce.to_owned(),
        liability_shifted: true,
        liablity_shift_possible: true,
    }
}

pub fn write_session_script(path: &Path, script: &serde_json::Value) -> Result<(), Error> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(script.to_string().as_bytes())?;
    file.flush()?;
    Ok(())
}
