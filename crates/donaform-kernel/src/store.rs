//! The form state store.
//!
//! Owns the single [`FormValues`] of a session together with the last
//! [`ValidationResult`] derived from it. Every mutation re-runs the whole
//! rule set; the result is never patched in place.

use crate::error::FormError;
use crate::path::FieldPath;
use crate::rules::RuleSet;
use crate::validation::ValidationResult;
use crate::values::FormValues;
use serde_json::Value;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct FormStore {
    values: FormValues,
    rules: RuleSet,
    result: ValidationResult,
    touched: BTreeSet<FieldPath>,
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new(FormValues::default(), RuleSet::default())
    }
}

impl FormStore {
    /// Build a store and validate its initial values.
    pub fn new(values: FormValues, rules: RuleSet) -> Self {
        let result = rules.evaluate(&values);
        Self {
            values,
            rules,
            result,
            touched: BTreeSet::new(),
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Owned copy of the current values.
    pub fn snapshot(&self) -> FormValues {
        self.values.clone()
    }

    /// Write `value` at `path` (raw path text) and re-validate.
    pub fn set_field(&mut self, path: &str, value: Value) -> Result<(), FormError> {
        let path: FieldPath = path.parse()?;
        self.set(&path, value)
    }

    /// Write `value` at a parsed path and re-validate.
    pub fn set(&mut self, path: &FieldPath, value: Value) -> Result<(), FormError> {
        self.values.set(path, value)?;
        self.touched.insert(*path);
        self.prune_touched();
        self.revalidate();
        Ok(())
    }

    pub fn get_value(&self, path: &str) -> Result<Value, FormError> {
        self.values.get(&path.parse()?)
    }

    /// Primary error at `path`. Unparseable paths have no error.
    pub fn get_error(&self, path: &str) -> Option<&str> {
        path.parse::<FieldPath>()
            .ok()
            .and_then(|path| self.result.get(&path))
    }

    pub fn errors(&self) -> &ValidationResult {
        &self.result
    }

    pub fn is_valid(&self) -> bool {
        self.result.is_valid()
    }

    /// Mark `path` as visited without changing its value.
    pub fn touch(&mut self, path: &str) -> Result<(), FormError> {
        let path: FieldPath = path.parse()?;
        if let Some(index) = path.entry_index() {
            let len = self.values.donations.len();
            if index >= len {
                return Err(FormError::EntryOutOfRange { index, len });
            }
        }
        self.touched.insert(path);
        Ok(())
    }

    /// Mark every currently addressable path as visited.
    pub fn touch_all(&mut self) {
        self.touched.extend(self.values.paths());
    }

    pub fn is_touched(&self, path: &FieldPath) -> bool {
        self.touched.contains(path)
    }

    /// Primary error at `path`, only once the path has been touched.
    pub fn visible_error(&self, path: &str) -> Option<&str> {
        let path: FieldPath = path.parse().ok()?;
        if self.is_touched(&path) {
            self.result.get(&path)
        } else {
            None
        }
    }

    /// Mutable access for structural edits; the caller must revalidate.
    pub(crate) fn values_mut(&mut self) -> &mut FormValues {
        &mut self.values
    }

    pub(crate) fn touched_mut(&mut self) -> &mut BTreeSet<FieldPath> {
        &mut self.touched
    }

    /// Forget touched entry paths past the end of the list.
    fn prune_touched(&mut self) {
        let len = self.values.donations.len();
        self.touched.retain(|path| path.entry_index().is_none_or(|index| index < len));
    }

    pub(crate) fn revalidate(&mut self) {
        self.result = self.rules.evaluate(&self.values);
        tracing::debug!(
            error_paths = self.result.len(),
            valid = self.result.is_valid(),
            "form revalidated"
        );
    }
}
