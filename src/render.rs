//! Pure rendering of submission outcomes into terminal text.
//!
//! Every function here maps data to lines without touching I/O, so the
//! display rules stay testable independently of the shell.

use crate::api::{MatchResponse, TrialMatch};

const REGISTRY_URL: &str = "https://clinicaltrials.gov/study";

/// A rendered results panel: the visible match count plus the card or
/// panel lines below it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Report {
    pub(crate) count: String,
    pub(crate) lines: Vec<String>,
}

impl Report {
    pub(crate) fn to_text(&self) -> String {
        let mut text = format!("Matching trials: {}\n", self.count);
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}

/// The placeholder shown while a request is in flight.
pub(crate) fn loading_text() -> String {
    "Finding matching clinical trials...".to_string()
}

/// The initial empty-state prompt, also restored by `clear`.
pub(crate) fn idle_report() -> Report {
    Report {
        count: "0".to_string(),
        lines: vec![
            "Enter patient details to find matching trials".to_string(),
            "Fill out the form and run 'submit'".to_string(),
        ],
    }
}

/// Renders a parsed response. The display list is the top trial followed by
/// the other trials; the explanation block appears only on the top card.
pub(crate) fn render_response(response: &MatchResponse) -> Report {
    match response {
        MatchResponse::Matches {
            top_trial,
            other_trials,
            explanation,
        } => {
            let trials: Vec<&TrialMatch> =
                std::iter::once(top_trial).chain(other_trials.iter()).collect();
            let mut lines = Vec::new();
            for (index, trial) in trials.iter().enumerate() {
                if index > 0 {
                    lines.push(String::new());
                }
                lines.push(format!(
                    "{}: {} ({} Match)",
                    rank_label(index),
                    trial.nct_id,
                    format_percent(trial.inclusion_score)
                ));
                lines.push(format!(
                    "  Inclusion Score: {} | Exclusion Score: {}",
                    format_percent(trial.inclusion_score),
                    format_percent(trial.exclusion_score)
                ));
                lines.push(format!("  {}", registry_url(&trial.nct_id)));
                if index == 0 {
                    if let Some(text) = explanation.as_deref() {
                        if !text.is_empty() {
                            lines.push(format!("  Recommendation: {text}"));
                        }
                    }
                }
            }
            Report {
                count: trials.len().to_string(),
                lines,
            }
        }
        MatchResponse::NoMatch { message } => Report {
            count: "0".to_string(),
            lines: vec![
                message.clone(),
                "Try adjusting the patient criteria".to_string(),
            ],
        },
        MatchResponse::Unrecognized(_) => Report {
            count: "0".to_string(),
            lines: vec!["Unexpected response format".to_string()],
        },
    }
}

/// Renders a caught submission failure: the underlying message plus the
/// hint that the server may not be reachable at the given URL.
pub(crate) fn render_error(message: &str, url: &str) -> Report {
    Report {
        count: "0".to_string(),
        lines: vec![
            format!("Error: {message}"),
            "Unable to load results".to_string(),
            format!("Make sure the API server is running at {url}"),
        ],
    }
}

/// "Top Match" for the first card, "2.", "3.", ... for the rest.
pub(crate) fn rank_label(index: usize) -> String {
    if index == 0 {
        "Top Match".to_string()
    } else {
        format!("{}.", index + 1)
    }
}

/// A [0, 1] score as a percentage with one decimal place.
pub(crate) fn format_percent(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

pub(crate) fn registry_url(nct_id: &str) -> String {
    format!("{REGISTRY_URL}/{nct_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trial(nct_id: &str, inclusion: f64, exclusion: f64) -> TrialMatch {
        TrialMatch {
            nct_id: nct_id.to_string(),
            inclusion_score: inclusion,
            exclusion_score: exclusion,
        }
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(format_percent(0.873), "87.3%");
        assert_eq!(format_percent(0.92), "92.0%");
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(1.0), "100.0%");
    }

    #[test]
    fn rank_labels() {
        assert_eq!(rank_label(0), "Top Match");
        assert_eq!(rank_label(1), "2.");
        assert_eq!(rank_label(4), "5.");
    }

    #[test]
    fn registry_link_uses_nct_id() {
        assert_eq!(
            registry_url("NCT001"),
            "https://clinicaltrials.gov/study/NCT001"
        );
    }

    #[test]
    fn matches_render_as_ranked_cards() {
        let response = MatchResponse::Matches {
            top_trial: trial("NCT001", 0.92, 0.05),
            other_trials: vec![trial("NCT002", 0.81, 0.10)],
            explanation: Some("Best fit due to HbA1c range.".to_string()),
        };
        let report = render_response(&response);
        assert_eq!(report.count, "2");

        let text = report.to_text();
        assert!(text.contains("Top Match: NCT001 (92.0% Match)"));
        assert!(text.contains("Inclusion Score: 92.0% | Exclusion Score: 5.0%"));
        assert!(text.contains("https://clinicaltrials.gov/study/NCT001"));
        assert!(text.contains("Recommendation: Best fit due to HbA1c range."));
        assert!(text.contains("2.: NCT002 (81.0% Match)"));

        // The explanation belongs to the top card only.
        let recommendation_at = text.find("Recommendation").unwrap();
        let second_card_at = text.find("2.: NCT002").unwrap();
        assert!(recommendation_at < second_card_at);
        assert_eq!(text.matches("Recommendation").count(), 1);
    }

    #[test]
    fn count_includes_top_trial() {
        let response = MatchResponse::Matches {
            top_trial: trial("NCT001", 0.9, 0.1),
            other_trials: (2..=5)
                .map(|n| trial(&format!("NCT00{n}"), 0.5, 0.5))
                .collect(),
            explanation: None,
        };
        assert_eq!(render_response(&response).count, "5");
    }

    #[test]
    fn no_explanation_block_when_absent_or_empty() {
        let response = MatchResponse::Matches {
            top_trial: trial("NCT001", 0.9, 0.1),
            other_trials: vec![],
            explanation: None,
        };
        assert!(!render_response(&response).to_text().contains("Recommendation"));

        let response = MatchResponse::Matches {
            top_trial: trial("NCT001", 0.9, 0.1),
            other_trials: vec![],
            explanation: Some(String::new()),
        };
        assert!(!render_response(&response).to_text().contains("Recommendation"));
    }

    #[test]
    fn no_match_shows_message_verbatim() {
        let response = MatchResponse::NoMatch {
            message: "No eligible trials found".to_string(),
        };
        let report = render_response(&response);
        assert_eq!(report.count, "0");
        assert_eq!(report.lines[0], "No eligible trials found");
        assert!(report.lines[1].contains("adjusting the patient criteria"));
    }

    #[test]
    fn unrecognized_shape_gets_generic_panel() {
        let response = MatchResponse::Unrecognized(serde_json::json!({"trials": []}));
        let report = render_response(&response);
        assert_eq!(report.count, "0");
        assert_eq!(report.lines, vec!["Unexpected response format"]);
    }

    #[test]
    fn error_report_carries_message_and_hint() {
        let report = render_error("HTTP 500: Internal Server Error", "http://localhost:8000");
        assert_eq!(report.count, "0");
        assert_eq!(report.lines[0], "Error: HTTP 500: Internal Server Error");
        assert!(report.lines[2].contains("http://localhost:8000"));
    }

    #[test]
    fn missing_scores_render_as_zero() {
        let response = MatchResponse::Matches {
            top_trial: trial("NCT001", 0.0, 0.0),
            other_trials: vec![],
            explanation: None,
        };
        let text = render_response(&response).to_text();
        assert!(text.contains("0.0% Match"));
        assert!(!text.contains("NaN"));
    }
}
