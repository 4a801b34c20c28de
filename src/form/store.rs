//! Publishing container for the swap form.
//!
//! The current [`FormState`] lives in a `watch` channel. Each mutation
//! computes the next snapshot and replaces the old one while holding the
//! channel's write lock, so readers see either the old or the new snapshot
//! and concurrent writers are applied one after another.

use tokio::sync::watch;
use tracing::debug;

use super::state::{AssetModalPatch, FormState, InputsPatch, OutputsPatch};
use crate::composition::{ChartData, derive_from_preview, reset_composition};
use crate::config::FormConfig;
use crate::errors::{AppError, Result};
use crate::models::{InputFocus, SwapMethod, SwapPreview};
use crate::validation::{self, InputValidationStatus, ValidationOptions};

pub struct SwapFormStore {
    state: watch::Sender<FormState>,
}

impl SwapFormStore {
    pub fn new(config: &FormConfig) -> Self {
        let (state, _) = watch::channel(FormState::new(config));
        Self { state }
    }

    /// Receiver notified after every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> FormState {
        self.state.borrow().clone()
    }

    fn publish(&self, op: &'static str, next: impl FnOnce(&FormState) -> FormState) {
        self.state.send_modify(|current| {
            let updated = next(&*current);
            *current = updated;
        });
        debug!(op, "[FORM] snapshot published");
    }

    pub fn update_inputs(&self, patch: InputsPatch) {
        self.publish("update_inputs", |s| s.with_inputs(patch));
    }

    pub fn update_outputs(&self, patch: OutputsPatch) {
        self.publish("update_outputs", |s| s.with_outputs(patch));
    }

    pub fn set_output_from_preview(&self, preview: SwapPreview) {
        let method = preview.method();
        self.publish("set_output_from_preview", |s| s.with_preview(preview));
        debug!(%method, "[FORM] preview applied");
    }

    /// Apply a preview whose method arrives as a separate tag.
    ///
    /// Unknown tags and tags that disagree with the preview are rejected
    /// before anything is published.
    pub fn set_output_from_tagged(&self, method: &str, preview: SwapPreview) -> Result<()> {
        let expected: SwapMethod = method.parse()?;
        let actual = preview.method();
        if expected != actual {
            return Err(AppError::PreviewMethodMismatch { expected, actual });
        }
        self.set_output_from_preview(preview);
        Ok(())
    }

    pub fn set_input_focus(&self, element: InputFocus) {
        self.publish("set_input_focus", |s| FormState {
            inputs: s.inputs.focused(element),
            ..s.clone()
        });
    }

    pub fn set_input_focus_tagged(&self, element: &str) -> Result<()> {
        let element: InputFocus = element.parse()?;
        self.set_input_focus(element);
        Ok(())
    }

    pub fn set_error_message(&self, message: impl Into<String>) {
        let message = message.into();
        self.publish("set_error_message", |s| {
            s.with_outputs(OutputsPatch {
                active_error_message: Some(message),
                ..Default::default()
            })
        });
    }

    pub fn clear_error_message(&self) {
        self.set_error_message(String::new());
    }

    pub fn has_error_message(&self) -> bool {
        self.state.borrow().has_error_message()
    }

    pub fn error_message(&self) -> String {
        self.state.borrow().outputs.active_error_message.clone()
    }

    pub fn slippage_cell(&self) -> usize {
        self.state.borrow().slippage_cell
    }

    pub fn set_slippage_cell(&self, cell: usize) {
        self.publish("set_slippage_cell", |s| FormState {
            slippage_cell: cell,
            ..s.clone()
        });
    }

    pub fn extra_slippage_allowance(&self) -> String {
        self.state.borrow().inputs.extra_slippage_allowance.clone()
    }

    pub fn set_extra_slippage_allowance(&self, value: impl Into<String>) {
        let value = value.into();
        self.update_inputs(InputsPatch {
            extra_slippage_allowance: Some(value),
            ..Default::default()
        });
    }

    pub fn slippage_selector_error_status(&self) -> InputValidationStatus {
        self.state.borrow().inputs.extra_slippage_allowance_error_status
    }

    pub fn set_slippage_selector_error_status(&self, status: InputValidationStatus) {
        self.update_inputs(InputsPatch {
            extra_slippage_allowance_error_status: Some(status),
            ..Default::default()
        });
    }

    pub fn set_valid_swap(&self, valid: bool) {
        self.update_outputs(OutputsPatch {
            valid_swap: Some(valid),
            ..Default::default()
        });
    }

    pub fn set_input_amount(&self, value: impl Into<String>) {
        let value = value.into();
        self.update_inputs(InputsPatch {
            input_amount: Some(value),
            ..Default::default()
        });
    }

    pub fn set_output_amount(&self, value: impl Into<String>) {
        let value = value.into();
        self.update_inputs(InputsPatch {
            output_amount: Some(value),
            ..Default::default()
        });
    }

    pub fn set_trade_composition_open(&self, open: bool) {
        self.publish("set_trade_composition_open", |s| FormState {
            trade_composition_open: open,
            ..s.clone()
        });
    }

    pub fn set_slippage_selector_open(&self, open: bool) {
        self.publish("set_slippage_selector_open", |s| FormState {
            slippage_selector_open: open,
            ..s.clone()
        });
    }

    pub fn set_asset_modal_state(&self, patch: AssetModalPatch) {
        self.publish("set_asset_modal_state", |s| FormState {
            asset_modal: s.asset_modal.merged(patch),
            ..s.clone()
        });
    }

    pub fn set_asset_select_filter(&self, filter: impl Into<String>) {
        let filter = filter.into();
        self.publish("set_asset_select_filter", |s| FormState {
            asset_select_filter: filter,
            ..s.clone()
        });
    }

    /// Flip trade direction: input and output token trade places.
    pub fn switch_input_output_values(&self) {
        self.publish("switch_input_output_values", |s| FormState {
            inputs: s.inputs.flipped(),
            ..s.clone()
        });
    }

    pub fn clear_inputs(&self) {
        self.publish("clear_inputs", FormState::cleared);
    }

    pub fn is_input_amount_stale(&self, candidate: &impl ToString) -> bool {
        self.state.borrow().is_input_amount_stale(candidate)
    }

    pub fn is_output_amount_stale(&self, candidate: &impl ToString) -> bool {
        self.state.borrow().is_output_amount_stale(candidate)
    }

    pub fn trade_composition(&self) -> ChartData {
        self.state.borrow().trade_composition.clone()
    }

    /// Replace the chart with the breakdown of `preview`.
    pub fn set_trade_composition(&self, preview: &SwapPreview) {
        let chart = derive_from_preview(preview);
        self.publish("set_trade_composition", |s| FormState {
            trade_composition: chart,
            ..s.clone()
        });
    }

    pub fn clear_trade_composition(&self) {
        self.reset_trade_composition();
    }

    pub fn reset_trade_composition(&self) {
        self.publish("reset_trade_composition", |s| FormState {
            trade_composition: reset_composition(),
            ..s.clone()
        });
    }

    pub fn is_valid_status(&self, status: InputValidationStatus) -> bool {
        validation::is_valid_status(status)
    }

    pub fn is_valid_input(&self, value: &str) -> bool {
        validation::is_valid_input(value)
    }

    pub fn number_input_validation_status(
        &self,
        value: &str,
        options: ValidationOptions,
    ) -> InputValidationStatus {
        validation::number_input_validation_status(value, options)
    }
}
