//! Structural edits of the donations list.
//!
//! Entries are addressed by position. Removing one shifts every later entry
//! (and its touched state) down by one; there are no stable entry ids.

use crate::path::FieldPath;
use crate::store::FormStore;
use crate::values::DonationEntry;

impl FormStore {
    /// Append a blank entry and re-validate. Returns its index.
    ///
    /// The entry cap is not enforced here; an over-long list is reported by
    /// validation instead.
    pub fn add_entry(&mut self) -> usize {
        let donations = &mut self.values_mut().donations;
        donations.push(DonationEntry::default());
        let index = donations.len() - 1;
        self.revalidate();
        index
    }

    /// Remove the entry at `index` and re-validate.
    ///
    /// Out-of-range indices are a no-op and return `false`.
    pub fn remove_entry(&mut self, index: usize) -> bool {
        if index >= self.values().donations.len() {
            return false;
        }
        self.values_mut().donations.remove(index);

        let touched = std::mem::take(self.touched_mut());
        *self.touched_mut() = touched
            .into_iter()
            .filter_map(|path| shift_after_removal(path, index))
            .collect();

        self.revalidate();
        true
    }

    pub fn entry_count(&self) -> usize {
        self.values().donations.len()
    }
}

fn shift_after_removal(path: FieldPath, removed: usize) -> Option<FieldPath> {
    let Some(i) = path.entry_index() else {
        return Some(path);
    };
    if i == removed {
        return None;
    }
    let i = if i > removed { i - 1 } else { i };
    Some(match path {
        FieldPath::Entry(_) => FieldPath::Entry(i),
        FieldPath::Institution(_) => FieldPath::Institution(i),
        FieldPath::Percentage(_) => FieldPath::Percentage(i),
        other => other,
    })
}
