//! The submit pipeline: validate the form snapshot, dispatch one request,
//! render the outcome.

use tracing::error;

use crate::api::PatientQuery;
use crate::client::ApiClient;
use crate::form::FormState;
use crate::render::{self, Report};

/// A validated submission, ready to dispatch.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PreparedQuery {
    pub(crate) url: String,
    pub(crate) query: PatientQuery,
}

/// The rendered result of a dispatched submission. `failed` distinguishes a
/// handled failure (error panel) from a rendered server response, so the
/// one-shot mode can exit nonzero.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SubmitResult {
    pub(crate) report: Report,
    pub(crate) failed: bool,
}

/// Validates the form before anything is sent. A blank URL or unparseable
/// numeric text blocks the submission here; no request is constructed.
pub(crate) fn prepare(form: &FormState) -> anyhow::Result<PreparedQuery> {
    let url = form.endpoint()?.to_string();
    let query = form.build_query()?;
    Ok(PreparedQuery { url, query })
}

/// Dispatches one prepared submission. Every failure past this point
/// (unreachable host, non-2xx status, malformed body) is caught here and
/// rendered as an error report; nothing propagates to the caller.
pub(crate) async fn dispatch(client: &ApiClient, prepared: &PreparedQuery) -> SubmitResult {
    match client.match_trials(&prepared.url, &prepared.query).await {
        Ok(response) => SubmitResult {
            report: render::render_response(&response),
            failed: false,
        },
        Err(err) => {
            error!("match request failed: {err:#}");
            SubmitResult {
                report: render::render_error(&format!("{err:#}"), &prepared.url),
                failed: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_url_blocks_before_any_request() {
        let form = FormState::default();
        let error = prepare(&form).unwrap_err();
        assert!(error.to_string().contains("API URL"));
    }

    #[test]
    fn bad_field_blocks_before_any_request() {
        let form = FormState {
            api_url: "http://localhost:8000/match-trials".to_string(),
            age: "forty-five".to_string(),
            ..FormState::default()
        };
        let error = prepare(&form).unwrap_err();
        assert!(error.to_string().contains("age"));
    }

    #[test]
    fn prepare_snapshots_the_form() {
        let form = FormState {
            api_url: " http://localhost:8000/match-trials ".to_string(),
            age: "45".to_string(),
            pregnant: true,
            ..FormState::default()
        };
        let prepared = prepare(&form).unwrap();
        assert_eq!(prepared.url, "http://localhost:8000/match-trials");
        assert_eq!(prepared.query.age, Some(45));
        assert!(prepared.query.pregnant);
        assert_eq!(prepared.query.top_k, 10);
    }
}
