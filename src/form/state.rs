use crate::composition::{ChartData, reset_composition};
use crate::config::FormConfig;
use crate::models::{InputFocus, SwapLeg, SwapMethod, SwapPreview};
use crate::utils::{decimal_string, format_pct_string, from_wei};
use crate::validation::InputValidationStatus;

/// What the user typed or selected.
#[derive(Debug, Clone, PartialEq)]
pub struct Inputs {
    pub input_token: String,
    pub output_token: String,
    pub input_amount: String,
    pub output_amount: String,
    pub extra_slippage_allowance: String,
    pub extra_slippage_allowance_error_status: InputValidationStatus,
    pub input_ticker: String,
    pub output_ticker: String,
    pub input_precision: u32,
    pub output_precision: u32,
    pub input_icon_address: String,
    pub output_icon_address: String,
    pub swap_method: SwapMethod,
    pub output_limit: String,
    pub input_limit: String,
    pub limit_price: String,
    pub buy_focus: bool,
    pub sell_focus: bool,
    pub swaps: Vec<SwapLeg>,
}

impl Inputs {
    pub fn new(config: &FormConfig) -> Self {
        Self {
            input_token: String::new(),
            output_token: String::new(),
            input_amount: String::new(),
            output_amount: String::new(),
            extra_slippage_allowance: config.slippage_allowance.clone(),
            extra_slippage_allowance_error_status: InputValidationStatus::Valid,
            input_ticker: String::new(),
            output_ticker: String::new(),
            input_precision: config.precision,
            output_precision: config.precision,
            input_icon_address: String::new(),
            output_icon_address: String::new(),
            swap_method: SwapMethod::ExactIn,
            output_limit: "0".into(),
            input_limit: "0".into(),
            limit_price: "0".into(),
            buy_focus: false,
            sell_focus: false,
            swaps: Vec::new(),
        }
    }

    /// Shallow merge: fields left `None` in the patch keep their value.
    pub fn merged(&self, patch: InputsPatch) -> Self {
        let mut next = self.clone();
        if let Some(v) = patch.input_token {
            next.input_token = v;
        }
        if let Some(v) = patch.output_token {
            next.output_token = v;
        }
        if let Some(v) = patch.input_amount {
            next.input_amount = v;
        }
        if let Some(v) = patch.output_amount {
            next.output_amount = v;
        }
        if let Some(v) = patch.extra_slippage_allowance {
            next.extra_slippage_allowance = v;
        }
        if let Some(v) = patch.extra_slippage_allowance_error_status {
            next.extra_slippage_allowance_error_status = v;
        }
        if let Some(v) = patch.input_ticker {
            next.input_ticker = v;
        }
        if let Some(v) = patch.output_ticker {
            next.output_ticker = v;
        }
        if let Some(v) = patch.input_precision {
            next.input_precision = v;
        }
        if let Some(v) = patch.output_precision {
            next.output_precision = v;
        }
        if let Some(v) = patch.input_icon_address {
            next.input_icon_address = v;
        }
        if let Some(v) = patch.output_icon_address {
            next.output_icon_address = v;
        }
        if let Some(v) = patch.swap_method {
            next.swap_method = v;
        }
        if let Some(v) = patch.output_limit {
            next.output_limit = v;
        }
        if let Some(v) = patch.input_limit {
            next.input_limit = v;
        }
        if let Some(v) = patch.limit_price {
            next.limit_price = v;
        }
        if let Some(v) = patch.swaps {
            next.swaps = v;
        }
        next
    }

    /// Exchange the input and output token along with its display metadata.
    pub fn flipped(&self) -> Self {
        Self {
            input_token: self.output_token.clone(),
            output_token: self.input_token.clone(),
            input_ticker: self.output_ticker.clone(),
            output_ticker: self.input_ticker.clone(),
            input_icon_address: self.output_icon_address.clone(),
            output_icon_address: self.input_icon_address.clone(),
            input_precision: self.output_precision,
            output_precision: self.input_precision,
            ..self.clone()
        }
    }

    pub fn focused(&self, element: InputFocus) -> Self {
        Self {
            buy_focus: element == InputFocus::Buy,
            sell_focus: element == InputFocus::Sell,
            ..self.clone()
        }
    }
}

/// Subset of [`Inputs`] to overwrite. Focus flags go through
/// [`Inputs::focused`] so they stay mutually exclusive.
#[derive(Debug, Clone, Default)]
pub struct InputsPatch {
    pub input_token: Option<String>,
    pub output_token: Option<String>,
    pub input_amount: Option<String>,
    pub output_amount: Option<String>,
    pub extra_slippage_allowance: Option<String>,
    pub extra_slippage_allowance_error_status: Option<InputValidationStatus>,
    pub input_ticker: Option<String>,
    pub output_ticker: Option<String>,
    pub input_precision: Option<u32>,
    pub output_precision: Option<u32>,
    pub input_icon_address: Option<String>,
    pub output_icon_address: Option<String>,
    pub swap_method: Option<SwapMethod>,
    pub output_limit: Option<String>,
    pub input_limit: Option<String>,
    pub limit_price: Option<String>,
    pub swaps: Option<Vec<SwapLeg>>,
}

/// Values derived from the latest preview, shown back to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Outputs {
    pub input_amount: String,
    pub output_amount: String,
    pub effective_price: String,
    pub spot_price: String,
    pub expected_slippage: String,
    pub output_limit: String,
    pub swaps: Vec<SwapLeg>,
    pub valid_swap: bool,
    /// Empty means no error.
    pub active_error_message: String,
}

impl Default for Outputs {
    fn default() -> Self {
        Self {
            input_amount: String::new(),
            output_amount: String::new(),
            effective_price: String::new(),
            spot_price: String::new(),
            expected_slippage: "0".into(),
            output_limit: String::new(),
            swaps: Vec::new(),
            valid_swap: false,
            active_error_message: String::new(),
        }
    }
}

impl Outputs {
    pub fn merged(&self, patch: OutputsPatch) -> Self {
        let mut next = self.clone();
        if let Some(v) = patch.input_amount {
            next.input_amount = v;
        }
        if let Some(v) = patch.output_amount {
            next.output_amount = v;
        }
        if let Some(v) = patch.effective_price {
            next.effective_price = v;
        }
        if let Some(v) = patch.spot_price {
            next.spot_price = v;
        }
        if let Some(v) = patch.expected_slippage {
            next.expected_slippage = v;
        }
        if let Some(v) = patch.output_limit {
            next.output_limit = v;
        }
        if let Some(v) = patch.swaps {
            next.swaps = v;
        }
        if let Some(v) = patch.valid_swap {
            next.valid_swap = v;
        }
        if let Some(v) = patch.active_error_message {
            next.active_error_message = v;
        }
        next
    }
}

#[derive(Debug, Clone, Default)]
pub struct OutputsPatch {
    pub input_amount: Option<String>,
    pub output_amount: Option<String>,
    pub effective_price: Option<String>,
    pub spot_price: Option<String>,
    pub expected_slippage: Option<String>,
    pub output_limit: Option<String>,
    pub swaps: Option<Vec<SwapLeg>>,
    pub valid_swap: Option<bool>,
    pub active_error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssetModalState {
    pub open: bool,
    /// Form field the selected asset is written to.
    pub input: String,
}

impl Default for AssetModalState {
    fn default() -> Self {
        Self {
            open: false,
            input: "inputAmount".into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AssetModalPatch {
    pub open: Option<bool>,
    pub input: Option<String>,
}

impl AssetModalState {
    pub fn merged(&self, patch: AssetModalPatch) -> Self {
        Self {
            open: patch.open.unwrap_or(self.open),
            input: patch.input.unwrap_or_else(|| self.input.clone()),
        }
    }
}

/// Immutable snapshot of the whole swap form.
///
/// Every transition returns a new snapshot; `outputs` is always derived
/// from `preview` and `inputs`.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub inputs: Inputs,
    pub outputs: Outputs,
    pub preview: Option<SwapPreview>,
    pub trade_composition: ChartData,
    pub trade_composition_open: bool,
    pub slippage_selector_open: bool,
    pub asset_modal: AssetModalState,
    pub asset_select_filter: String,
    pub slippage_cell: usize,
}

impl FormState {
    pub fn new(config: &FormConfig) -> Self {
        Self {
            inputs: Inputs::new(config),
            outputs: Outputs::default(),
            preview: None,
            trade_composition: reset_composition(),
            trade_composition_open: false,
            slippage_selector_open: false,
            asset_modal: AssetModalState::default(),
            asset_select_filter: String::new(),
            slippage_cell: config.slippage_cell,
        }
    }

    pub fn with_inputs(&self, patch: InputsPatch) -> Self {
        Self {
            inputs: self.inputs.merged(patch),
            ..self.clone()
        }
    }

    pub fn with_outputs(&self, patch: OutputsPatch) -> Self {
        Self {
            outputs: self.outputs.merged(patch),
            ..self.clone()
        }
    }

    /// Write the opposite-side amount and the preview's prices.
    pub fn with_preview(&self, preview: SwapPreview) -> Self {
        let inputs = match &preview {
            SwapPreview::ExactIn(p) => self.inputs.merged(InputsPatch {
                output_amount: Some(decimal_string(&from_wei(p.total_output))),
                ..Default::default()
            }),
            SwapPreview::ExactOut(p) => self.inputs.merged(InputsPatch {
                input_amount: Some(decimal_string(&from_wei(p.total_input))),
                ..Default::default()
            }),
        };

        let outputs = self.outputs.merged(OutputsPatch {
            effective_price: Some(decimal_string(preview.effective_price())),
            spot_price: Some(decimal_string(preview.spot_price())),
            expected_slippage: Some(format_pct_string(preview.expected_slippage())),
            swaps: Some(preview.swaps().to_vec()),
            valid_swap: Some(true),
            ..Default::default()
        });

        Self {
            inputs,
            outputs,
            preview: Some(preview),
            ..self.clone()
        }
    }

    /// Both amounts and the error message cleared together.
    pub fn cleared(&self) -> Self {
        Self {
            inputs: self.inputs.merged(InputsPatch {
                input_amount: Some(String::new()),
                output_amount: Some(String::new()),
                ..Default::default()
            }),
            outputs: self.outputs.merged(OutputsPatch {
                active_error_message: Some(String::new()),
                ..Default::default()
            }),
            ..self.clone()
        }
    }

    pub fn has_error_message(&self) -> bool {
        !self.outputs.active_error_message.is_empty()
    }

    pub fn is_input_amount_stale(&self, candidate: &impl ToString) -> bool {
        candidate.to_string() != self.inputs.input_amount
    }

    pub fn is_output_amount_stale(&self, candidate: &impl ToString) -> bool {
        candidate.to_string() != self.inputs.output_amount
    }
}
