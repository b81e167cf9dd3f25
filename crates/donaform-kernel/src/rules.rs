//! Declarative validation rules.
//!
//! A [`RuleSet`] is data: an ordered list of per-field constraint
//! descriptors plus one standalone cross-field [`SumRule`]. Evaluation is a
//! pure function of the full [`FormValues`]; there is no incremental state.
//!
//! ```text
//! FieldRule { target, constraint, message }   × N   (in declaration order)
//! SumRule   { total }                          × 1   (after field rules)
//!         │
//!         ▼
//! evaluate(&FormValues) -> ValidationResult
//! ```
//!
//! Declaration order decides which message is primary when several rules
//! fail on the same path.

use crate::config::Limits;
use crate::path::FieldPath;
use crate::validation::ValidationResult;
use crate::values::FormValues;
use serde::{Deserialize, Serialize};

/// Which field (or per-entry field family) a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleTarget {
    FullName,
    DonationsAmount,
    TermsAndCondition,
    Donations,
    /// Fans out to `donations[i].institution` for every entry.
    Institution,
    /// Fans out to `donations[i].percentage` for every entry.
    Percentage,
}

/// A single constraint descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "bound", rename_all = "snake_case")]
pub enum Constraint {
    /// Text must be non-empty, numbers must be present. Booleans always pass.
    Required,
    /// Upper bound on text length in UTF-16 code units.
    MaxChars(usize),
    /// Inclusive lower bound; absent numbers pass (see `Required`).
    Min(f64),
    /// Inclusive upper bound; absent numbers pass.
    Max(f64),
    IsTrue,
    MinItems(usize),
    MaxItems(usize),
}

/// The shape of a value as a constraint sees it.
#[derive(Debug, Clone, Copy)]
enum Probe<'a> {
    Text(&'a str),
    Number(Option<f64>),
    Flag(bool),
    Count(usize),
}

impl Constraint {
    fn holds(&self, probe: Probe<'_>) -> bool {
        match (self, probe) {
            (Self::Required, Probe::Text(s)) => !s.is_empty(),
            (Self::Required, Probe::Number(n)) => n.is_some(),
            (Self::Required, _) => true,
            (Self::MaxChars(max), Probe::Text(s)) => s.encode_utf16().count() <= *max,
            (Self::Min(min), Probe::Number(Some(n))) => n >= *min,
            (Self::Max(max), Probe::Number(Some(n))) => n <= *max,
            (Self::IsTrue, Probe::Flag(b)) => b,
            (Self::MinItems(min), Probe::Count(c)) => c >= *min,
            (Self::MaxItems(max), Probe::Count(c)) => c <= *max,
            _ => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    pub target: RuleTarget,
    pub constraint: Constraint,
    pub message: String,
}

impl FieldRule {
    pub fn new(target: RuleTarget, constraint: Constraint, message: impl Into<String>) -> Self {
        Self {
            target,
            constraint,
            message: message.into(),
        }
    }
}

/// Cross-field rule: all entry percentages must add up to `total` exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SumRule {
    pub total: f64,
}

impl SumRule {
    /// Sum of the percentages, or `None` while any of them is blank.
    pub fn sum(values: &FormValues) -> Option<f64> {
        values
            .donations
            .iter()
            .try_fold(0.0, |acc, entry| entry.percentage.map(|p| acc + p))
    }

    fn message(&self, sum: f64) -> String {
        format!(
            "Percentage should add upto {}%, but you have {sum}%",
            self.total
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub fields: Vec<FieldRule>,
    pub sum: SumRule,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::from_limits(&Limits::default())
    }
}

impl RuleSet {
    /// Build the donation form rules, with messages quoting the limits.
    pub fn from_limits(limits: &Limits) -> Self {
        use Constraint::*;
        use RuleTarget::*;

        let fields = vec![
            FieldRule::new(FullName, Required, "Required"),
            FieldRule::new(
                FullName,
                MaxChars(limits.full_name_max_chars),
                format!("Max {} characters allowed", limits.full_name_max_chars),
            ),
            FieldRule::new(DonationsAmount, Required, "Required"),
            FieldRule::new(
                DonationsAmount,
                Min(limits.min_donation_amount),
                format!("Minimum donation amount is Rs. {}", limits.min_donation_amount),
            ),
            FieldRule::new(TermsAndCondition, Required, "Required"),
            FieldRule::new(TermsAndCondition, IsTrue, "Accept terms and conditions"),
            FieldRule::new(
                Donations,
                MinItems(limits.min_entries),
                format!("At least {} donation required", limits.min_entries),
            ),
            FieldRule::new(
                Donations,
                MaxItems(limits.max_entries),
                format!("Upto {} donations accepted", limits.max_entries),
            ),
            FieldRule::new(Institution, Required, "Required"),
            FieldRule::new(Percentage, Required, "Required"),
            FieldRule::new(
                Percentage,
                Min(limits.percentage_min),
                format!("Minimum {} percent", limits.percentage_min),
            ),
            FieldRule::new(
                Percentage,
                Max(limits.percentage_max),
                format!("Maximum {} percent", limits.percentage_max),
            ),
        ];

        Self {
            fields,
            sum: SumRule {
                total: limits.percentage_total,
            },
        }
    }

    /// Evaluate every rule against `values`.
    pub fn evaluate(&self, values: &FormValues) -> ValidationResult {
        let mut result = ValidationResult::default();

        for rule in &self.fields {
            for (path, probe) in probes(rule.target, values) {
                if !rule.constraint.holds(probe) {
                    result.push(path, rule.message.clone());
                }
            }
        }

        if let Some(sum) = SumRule::sum(values).filter(|sum| *sum != self.sum.total) {
            result.push(FieldPath::Donations, self.sum.message(sum));
        }

        result
    }
}

fn probes(target: RuleTarget, values: &FormValues) -> Vec<(FieldPath, Probe<'_>)> {
    match target {
        RuleTarget::FullName => vec![(FieldPath::FullName, Probe::Text(&values.full_name))],
        RuleTarget::DonationsAmount => vec![(
            FieldPath::DonationsAmount,
            Probe::Number(values.donations_amount),
        )],
        RuleTarget::TermsAndCondition => vec![(
            FieldPath::TermsAndCondition,
            Probe::Flag(values.terms_accepted),
        )],
        RuleTarget::Donations => vec![(
            FieldPath::Donations,
            Probe::Count(values.donations.len()),
        )],
        RuleTarget::Institution => values
            .donations
            .iter()
            .enumerate()
            .map(|(i, e)| (FieldPath::Institution(i), Probe::Text(&e.institution)))
            .collect(),
        RuleTarget::Percentage => values
            .donations
            .iter()
            .enumerate()
            .map(|(i, e)| (FieldPath::Percentage(i), Probe::Number(e.percentage)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::DonationEntry;

    fn valid_values() -> FormValues {
        FormValues {
            full_name: "Jane Doe".to_string(),
            donations_amount: Some(50.0),
            terms_accepted: true,
            donations: vec![DonationEntry::new("A", 60.0), DonationEntry::new("B", 40.0)],
        }
    }

    #[test]
    fn valid_form_has_no_errors() {
        let result = RuleSet::default().evaluate(&valid_values());
        assert!(result.is_valid(), "unexpected errors: {result:?}");
    }

    #[test]
    fn required_on_flag_never_fails() {
        assert!(Constraint::Required.holds(Probe::Flag(false)));
        assert!(!Constraint::IsTrue.holds(Probe::Flag(false)));
    }

    #[test]
    fn bounds_skip_absent_numbers() {
        assert!(Constraint::Min(1.0).holds(Probe::Number(None)));
        assert!(Constraint::Max(100.0).holds(Probe::Number(None)));
        assert!(!Constraint::Required.holds(Probe::Number(None)));
    }

    #[test]
    fn max_chars_counts_utf16_units_not_bytes() {
        let name = "é".repeat(50);
        assert!(Constraint::MaxChars(50).holds(Probe::Text(&name)));
        let name = "é".repeat(51);
        assert!(!Constraint::MaxChars(50).holds(Probe::Text(&name)));
    }

    #[test]
    fn astral_characters_count_twice_towards_max_chars() {
        let name = "🎉".repeat(25);
        assert!(Constraint::MaxChars(50).holds(Probe::Text(&name)));
        let name = "🎉".repeat(26);
        assert!(!Constraint::MaxChars(50).holds(Probe::Text(&name)));
    }

    #[test]
    fn rule_set_round_trips_through_json() {
        let rules = RuleSet::default();
        let json = serde_json::to_value(&rules).expect("rules serialize");

        assert_eq!(json["sum"]["total"], 100.0);
        assert_eq!(json["fields"][0]["target"], "full_name");
        assert_eq!(json["fields"][1]["constraint"]["kind"], "max_chars");
        assert_eq!(json["fields"][1]["constraint"]["bound"], 50);

        let back: RuleSet = serde_json::from_value(json).expect("rules deserialize");
        assert_eq!(back, rules);
    }

    #[test]
    fn sum_mismatch_quotes_actual_sum() {
        let mut values = valid_values();
        values.donations[1].percentage = Some(30.0);

        let result = RuleSet::default().evaluate(&values);
        assert_eq!(
            result.get(&FieldPath::Donations),
            Some("Percentage should add upto 100%, but you have 90%")
        );
    }

    #[test]
    fn sum_rule_waits_for_every_percentage() {
        let mut values = valid_values();
        values.donations[1].percentage = None;

        let result = RuleSet::default().evaluate(&values);
        assert_eq!(result.get(&FieldPath::Donations), None);
        assert_eq!(result.get(&FieldPath::Percentage(1)), Some("Required"));
    }

    #[test]
    fn out_of_range_percentages_still_count_towards_sum() {
        let mut values = valid_values();
        values.donations = vec![DonationEntry::new("A", 150.0), DonationEntry::new("B", -50.0)];

        let result = RuleSet::default().evaluate(&values);
        assert_eq!(result.get(&FieldPath::Percentage(0)), Some("Maximum 100 percent"));
        assert_eq!(result.get(&FieldPath::Percentage(1)), Some("Minimum 1 percent"));
        assert_eq!(result.get(&FieldPath::Donations), None);
        assert!(!result.is_valid());
    }

    #[test]
    fn too_many_entries_reports_cap_before_sum() {
        let mut values = valid_values();
        values.donations = vec![
            DonationEntry::new("A", 25.0),
            DonationEntry::new("B", 25.0),
            DonationEntry::new("C", 25.0),
            DonationEntry::new("D", 20.0),
        ];

        let result = RuleSet::default().evaluate(&values);
        assert_eq!(
            result.messages(&FieldPath::Donations),
            [
                "Upto 3 donations accepted".to_string(),
                "Percentage should add upto 100%, but you have 95%".to_string(),
            ]
        );
    }

    #[test]
    fn empty_list_fails_length_and_sum() {
        let mut values = valid_values();
        values.donations.clear();

        let result = RuleSet::default().evaluate(&values);
        assert_eq!(
            result.get(&FieldPath::Donations),
            Some("At least 1 donation required")
        );
        assert_eq!(result.messages(&FieldPath::Donations).len(), 2);
    }

    #[test]
    fn messages_follow_configured_limits() {
        let limits = Limits {
            full_name_max_chars: 5,
            min_donation_amount: 25.0,
            ..Limits::default()
        };
        let mut values = valid_values();
        values.donations_amount = Some(20.0);

        let result = RuleSet::from_limits(&limits).evaluate(&values);
        assert_eq!(
            result.get(&FieldPath::FullName),
            Some("Max 5 characters allowed")
        );
        assert_eq!(
            result.get(&FieldPath::DonationsAmount),
            Some("Minimum donation amount is Rs. 25")
        );
    }
}
