use checkout_core::application::model::{CoordinationModel, EventKind, ModelEvent, ModelOptions};
use checkout_core::application::three_d_secure::ThreeDSecure;
use checkout_core::infrastructure::scripted::ScriptedSdk;
use checkout_core::interfaces::session::{ScriptedOutcome, SessionReader};
use clap::Parser;
use miette::{IntoDiagnostic, Result, miette};
use serde_json::{Map, Value, json};
use std::fs::File;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Checkout session script (JSON)
    input: PathBuf,

    /// Transaction amount used for step-up verification
    #[arg(long, default_value = "10.00")]
    amount: String,

    /// Client handle passed to the verification SDK
    #[arg(long, default_value = "demo-client")]
    client: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let file = File::open(cli.input).into_diagnostic()?;
    let script = SessionReader::new(file).read().into_diagnostic()?;

    let model = Rc::new(CoordinationModel::new(ModelOptions::default()));
    model.subscribe(EventKind::PaymentMethodAdded, |event| {
        if let ModelEvent::PaymentMethodAdded(method) = event {
            eprintln!("registered payment method {}", method.nonce);
        }
    });
    model.subscribe(EventKind::AsyncDependenciesReady, |_| {
        eprintln!("all payment method views ready");
    });

    // Each registered method stands in for one UI module's async setup task.
    for _ in &script.payment_methods {
        model.async_dependency_starting();
    }
    for method in script.payment_methods.clone() {
        model.add_payment_method(method);
        model.async_dependency_ready();
    }

    let mut summary = json!({
        "paymentMethods": model.payment_methods(),
        "activePaymentMethod": model.active_payment_method(),
    });

    if let Some(step) = script.verification {
        let sdk = ScriptedSdk::new();
        match step.outcome {
            ScriptedOutcome::Success { result } => sdk.enqueue_success(result),
            ScriptedOutcome::Failure { message } => sdk.enqueue_failure(message),
        }

        let mut config = Map::new();
        config.insert("amount".to_owned(), Value::String(cli.amount.clone()));
        let mut tds = ThreeDSecure::new(
            Box::new(sdk),
            cli.client.clone(),
            config,
            "Card Verification",
        );
        tds.initialize().await.into_diagnostic()?;

        let active = model
            .active_payment_method()
            .ok_or_else(|| miette!("session script has no payment method to verify"))?;
        match tds.verify(&active, Some(&step.overrides)).await {
            Ok(result) => {
                summary["verification"] = serde_json::to_value(&result).into_diagnostic()?;
            }
            Err(e) => {
                eprintln!("verification failed: {}", e);
                summary["verification"] = json!({ "error": e.to_string() });
            }
        }

        tds.teardown().await.into_diagnostic()?;
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&summary).into_diagnostic()?
    );

    Ok(())
}
