//! Wire types for the trial matching API.

use serde::{Deserialize, Serialize};

/// Number of ranked trials requested per submission. Fixed contract with
/// the matching service; never user-controlled.
pub(crate) const TOP_K: u32 = 10;

/// Request body for a match submission. Blank form fields are omitted from
/// the serialized JSON rather than sent as zero; `pregnant` and `top_k` are
/// always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct PatientQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) bmi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) hba1c: Option<f64>,
    pub(crate) pregnant: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) clinical_context: Option<String>,
    pub(crate) top_k: u32,
}

/// One ranked trial as scored by the server. Scores are probability-like
/// values in [0, 1]; a missing score deserializes to 0 so a sparse entry
/// never renders as NaN.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct TrialMatch {
    pub(crate) nct_id: String,
    #[serde(default)]
    pub(crate) inclusion_score: f64,
    #[serde(default)]
    pub(crate) exclusion_score: f64,
}

/// The three response shapes the server can return, discriminated by field
/// presence. A body carrying `top_trial` is a match result even if it also
/// carries `message`; a body with neither is unrecognized.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum MatchResponse {
    Matches {
        top_trial: TrialMatch,
        #[serde(default)]
        other_trials: Vec<TrialMatch>,
        explanation: Option<String>,
    },
    NoMatch {
        message: String,
    },
    Unrecognized(serde_json::Value),
}
