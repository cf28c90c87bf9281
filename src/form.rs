//! The live form state and its translation into a request body.
//!
//! Fields are kept as the raw text the user typed; parsing happens only at
//! submission time so a half-edited field never corrupts the session.

use anyhow::{bail, Result};
use std::fmt;
use std::str::FromStr;

use crate::api::{PatientQuery, TOP_K};

/// Names of the seven form fields, as accepted by `set`.
pub(crate) const FIELD_NAMES: &[&str] =
    &["url", "age", "gender", "bmi", "hba1c", "pregnant", "clinical"];

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct FormState {
    pub(crate) api_url: String,
    pub(crate) age: String,
    pub(crate) gender: String,
    pub(crate) bmi: String,
    pub(crate) hba1c: String,
    pub(crate) pregnant: bool,
    pub(crate) clinical: String,
}

impl FormState {
    /// Returns every field to its empty/false default.
    pub(crate) fn clear(&mut self) {
        *self = FormState::default();
    }

    /// The trimmed endpoint URL. The only required field; a blank value
    /// blocks submission before any request is constructed.
    pub(crate) fn endpoint(&self) -> Result<&str> {
        let url = self.api_url.trim();
        if url.is_empty() {
            bail!("Please enter the API URL");
        }
        Ok(url)
    }

    /// Snapshots the current fields into a request body. Blank text maps to
    /// an absent field, never to zero; unparseable numeric text is an error.
    pub(crate) fn build_query(&self) -> Result<PatientQuery> {
        Ok(PatientQuery {
            age: parse_optional("age", &self.age)?,
            gender: optional_text(&self.gender),
            bmi: parse_optional("bmi", &self.bmi)?,
            hba1c: parse_optional("hba1c", &self.hba1c)?,
            pregnant: self.pregnant,
            clinical_context: optional_text(&self.clinical),
            top_k: TOP_K,
        })
    }

    /// Assigns one field by name. `value` is the verbatim text after the
    /// field name, so free-text fields keep their internal spaces.
    pub(crate) fn set(&mut self, field: &str, value: &str) -> Result<()> {
        match field {
            "url" => self.api_url = value.to_string(),
            "age" => self.age = value.to_string(),
            "gender" => self.gender = value.to_string(),
            "bmi" => self.bmi = value.to_string(),
            "hba1c" => self.hba1c = value.to_string(),
            "pregnant" => self.pregnant = parse_flag(value)?,
            "clinical" => self.clinical = value.to_string(),
            other => bail!(
                "unknown field '{other}'; expected one of: {}",
                FIELD_NAMES.join(", ")
            ),
        }
        Ok(())
    }
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_optional<T>(field: &str, value: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse() {
        Ok(parsed) => Ok(Some(parsed)),
        Err(error) => bail!("invalid value '{trimmed}' for {field}: {error}"),
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => bail!("invalid value '{other}' for pregnant; expected true or false"),
    }
}
