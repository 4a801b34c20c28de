use anyhow::{Context, Result};
use swap_form::{
    config::{DemoConfig, FormConfig},
    form::SwapFormStore,
    models::SwapPreview,
    utils,
    validation::{self, InputValidationStatus, ValidationOptions},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    utils::init_logging();

    let form_config = FormConfig::load()?;
    let demo = DemoConfig::load()?;
    tracing::info!(
        ?form_config,
        preview = %demo.preview_path.display(),
        "[INIT] swap-form starting"
    );

    let preview = SwapPreview::from_json_file(&demo.preview_path)
        .with_context(|| format!("loading preview from {}", demo.preview_path.display()))?;

    let store = SwapFormStore::new(&form_config);

    // Observer ------------------------------------------------------------
    let mut rx = store.subscribe();
    let observer = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let snapshot = rx.borrow_and_update().clone();
            tracing::info!(
                input_amount = %snapshot.inputs.input_amount,
                output_amount = %snapshot.inputs.output_amount,
                valid_swap = snapshot.outputs.valid_swap,
                chart_segments = snapshot.trade_composition.swaps.len(),
                "[FORM] snapshot"
            );
        }
    });

    // Typed amount ----------------------------------------------------------
    if let Some(amount) = &demo.input_amount {
        let status =
            validation::number_input_validation_status(amount, ValidationOptions::default());
        if status != InputValidationStatus::Valid {
            store.set_error_message(status.to_string());
            tracing::warn!(%amount, %status, "[INPUT] rejected");
        } else if store.is_input_amount_stale(amount) {
            store.set_input_amount(amount.clone());
        }
    }

    // Preview ---------------------------------------------------------------
    if preview.valid_swap() {
        store.set_output_from_preview(preview.clone());
    } else {
        store.set_valid_swap(false);
        store.set_error_message(InputValidationStatus::NoPools.to_string());
    }
    store.set_trade_composition(&preview);

    let chart = store.trade_composition();
    println!("{}", serde_json::to_string_pretty(&chart)?);

    drop(store);
    observer.await?;
    Ok(())
}
