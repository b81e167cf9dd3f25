//! Form values and path-addressed reads/writes over them.

use crate::error::FormError;
use crate::path::FieldPath;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};

/// One institution/percentage row of the donations list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationEntry {
    #[serde(default)]
    pub institution: String,
    /// `None` when the input is blank.
    #[serde(default, deserialize_with = "number_or_blank")]
    pub percentage: Option<f64>,
}

impl DonationEntry {
    pub fn new(institution: impl Into<String>, percentage: f64) -> Self {
        Self {
            institution: institution.into(),
            percentage: Some(percentage),
        }
    }
}

impl Default for DonationEntry {
    fn default() -> Self {
        Self::new("", 0.0)
    }
}

/// Everything the donor has entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValues {
    #[serde(default)]
    pub full_name: String,
    #[serde(default, deserialize_with = "number_or_blank")]
    pub donations_amount: Option<f64>,
    #[serde(default, rename = "termsAndCondition", alias = "termsAccepted")]
    pub terms_accepted: bool,
    #[serde(default)]
    pub donations: Vec<DonationEntry>,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            donations_amount: Some(0.0),
            terms_accepted: false,
            donations: vec![DonationEntry::default()],
        }
    }
}

impl FormValues {
    /// Read the value at `path` as JSON.
    pub fn get(&self, path: &FieldPath) -> Result<Value, FormError> {
        Ok(match path {
            FieldPath::FullName => json!(self.full_name),
            FieldPath::DonationsAmount => json!(self.donations_amount),
            FieldPath::TermsAndCondition => json!(self.terms_accepted),
            FieldPath::Donations => json!(self.donations),
            FieldPath::Entry(i) => json!(self.entry(*i)?),
            FieldPath::Institution(i) => json!(self.entry(*i)?.institution),
            FieldPath::Percentage(i) => json!(self.entry(*i)?.percentage),
        })
    }

    /// Write `value` at `path`, coercing raw input text where a field is numeric.
    pub fn set(&mut self, path: &FieldPath, value: Value) -> Result<(), FormError> {
        match path {
            FieldPath::FullName => self.full_name = text(path, &value)?,
            FieldPath::DonationsAmount => self.donations_amount = number(path, &value)?,
            FieldPath::TermsAndCondition => self.terms_accepted = flag(path, &value)?,
            FieldPath::Donations => {
                self.donations = serde_json::from_value(value.clone())
                    .map_err(|_| mismatch(path, "a list of donation entries", &value))?;
            }
            FieldPath::Entry(i) => {
                let entry: DonationEntry = serde_json::from_value(value.clone())
                    .map_err(|_| mismatch(path, "a donation entry", &value))?;
                *self.entry_mut(*i)? = entry;
            }
            FieldPath::Institution(i) => {
                let institution = text(path, &value)?;
                self.entry_mut(*i)?.institution = institution;
            }
            FieldPath::Percentage(i) => {
                let percentage = number(path, &value)?;
                self.entry_mut(*i)?.percentage = percentage;
            }
        }
        Ok(())
    }

    /// Every path currently addressable in these values.
    pub fn paths(&self) -> Vec<FieldPath> {
        let mut paths = vec![
            FieldPath::FullName,
            FieldPath::DonationsAmount,
            FieldPath::TermsAndCondition,
            FieldPath::Donations,
        ];
        for i in 0..self.donations.len() {
            paths.push(FieldPath::Institution(i));
            paths.push(FieldPath::Percentage(i));
        }
        paths
    }

    fn entry(&self, index: usize) -> Result<&DonationEntry, FormError> {
        let len = self.donations.len();
        self.donations
            .get(index)
            .ok_or(FormError::EntryOutOfRange { index, len })
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut DonationEntry, FormError> {
        let len = self.donations.len();
        self.donations
            .get_mut(index)
            .ok_or(FormError::EntryOutOfRange { index, len })
    }
}

/// Coerce a JSON value into an optional number.
///
/// `null` and blank strings are absent; numeric strings are parsed the way a
/// number input hands over its raw text.
pub fn coerce_number(value: &Value) -> Option<Option<f64>> {
    match value {
        Value::Null => Some(None),
        Value::Number(n) => n.as_f64().map(Some),
        Value::String(s) if s.trim().is_empty() => Some(None),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()).map(Some),
        _ => None,
    }
}

fn number_or_blank<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let raw = Value::deserialize(deserializer)?;
    coerce_number(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("expected a number or blank, got {raw}")))
}

fn text(path: &FieldPath, value: &Value) -> Result<String, FormError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Null => Ok(String::new()),
        other => Err(mismatch(path, "text", other)),
    }
}

fn number(path: &FieldPath, value: &Value) -> Result<Option<f64>, FormError> {
    coerce_number(value).ok_or_else(|| mismatch(path, "a number or blank", value))
}

fn flag(path: &FieldPath, value: &Value) -> Result<bool, FormError> {
    value
        .as_bool()
        .ok_or_else(|| mismatch(path, "true or false", value))
}

fn mismatch(path: &FieldPath, expected: &'static str, found: &Value) -> FormError {
    FormError::TypeMismatch {
        path: path.to_string(),
        expected,
        found: found.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_match_blank_form() {
        let values = FormValues::default();
        assert_eq!(values.full_name, "");
        assert_eq!(values.donations_amount, Some(0.0));
        assert!(!values.terms_accepted);
        assert_eq!(values.donations, vec![DonationEntry::new("", 0.0)]);
    }

    #[test]
    fn deserializes_blank_numbers_and_terms_alias() {
        let values: FormValues = serde_json::from_value(json!({
            "fullName": "Jane",
            "donationsAmount": "",
            "termsAccepted": true,
            "donations": [{ "institution": "A", "percentage": "60" }]
        }))
        .expect("values deserialize");

        assert_eq!(values.donations_amount, None);
        assert!(values.terms_accepted);
        assert_eq!(values.donations[0].percentage, Some(60.0));
    }

    #[test]
    fn set_and_get_round_through_paths() {
        let mut values = FormValues::default();
        values
            .set(&FieldPath::Percentage(0), json!("45"))
            .expect("numeric text is accepted");
        values
            .set(&FieldPath::Institution(0), json!("Red Cross"))
            .expect("institution is text");

        assert_eq!(values.get(&FieldPath::Percentage(0)), Ok(json!(45.0)));
        assert_eq!(
            values.get(&FieldPath::Entry(0)),
            Ok(json!({ "institution": "Red Cross", "percentage": 45.0 }))
        );
    }

    #[test]
    fn set_rejects_wrong_types_and_missing_entries() {
        let mut values = FormValues::default();
        assert!(matches!(
            values.set(&FieldPath::TermsAndCondition, json!("yes")),
            Err(FormError::TypeMismatch { .. })
        ));
        assert!(matches!(
            values.set(&FieldPath::DonationsAmount, json!("ten")),
            Err(FormError::TypeMismatch { .. })
        ));
        assert_eq!(
            values.set(&FieldPath::Institution(4), json!("X")),
            Err(FormError::EntryOutOfRange { index: 4, len: 1 })
        );
    }
}
