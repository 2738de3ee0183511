use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Loan
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_loan_emi(input_json: String) -> NapiResult<String> {
    let input: realty_calc_core::loan::LoanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = realty_calc_core::loan::calculate_emi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Appreciation
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_appreciation(input_json: String) -> NapiResult<String> {
    let input: realty_calc_core::appreciation::AppreciationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        realty_calc_core::appreciation::calculate_appreciation(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Stamp duty
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_stamp_duty(input_json: String) -> NapiResult<String> {
    let input: realty_calc_core::stamp_duty::StampDutyInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        realty_calc_core::stamp_duty::calculate_stamp_duty(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Brokerage
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_brokerage(input_json: String) -> NapiResult<String> {
    let input: realty_calc_core::brokerage::BrokerageInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        realty_calc_core::brokerage::calculate_brokerage(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
