//! # Donaform Kernel
//!
//! A donation form without a renderer: the donor's name, a total amount, a
//! terms flag and 1–3 institution/percentage rows whose percentages must add
//! up to exactly 100.
//!
//! The kernel owns values, derives validation from them, and gates
//! submission. Drawing fields and buttons is left to whatever sits on top of
//! [`FormView`].
//!
//! ## Architecture
//!
//! ```text
//! RuleSet               ← Field rule descriptors + one cross-field sum rule
//!     │
//! FormStore             ← FormValues, last ValidationResult, touched paths
//!     │
//! add/remove_entry      ← Positional edits of the donations list
//!     │
//! SubmissionController  ← Idle ⇄ Submitting around a SubmitCollaborator
//!     │
//! FormSession           ← FormEvent in, FormView out
//! ```

pub mod config;
pub mod editor;
pub mod error;
pub mod path;
pub mod rules;
pub mod session;
pub mod store;
pub mod submit;
pub mod validation;
pub mod values;

pub use config::{ConfigError, FormConfig, Limits, SubmitSettings};
pub use error::{FormError, SubmitError};
pub use path::FieldPath;
pub use rules::{Constraint, FieldRule, RuleSet, RuleTarget, SumRule};
pub use session::{EventOutcome, FormEvent, FormSession, FormView};
pub use store::FormStore;
pub use submit::{
    InFlight, LoggingSubmitter, SubmissionController, SubmissionReceipt, SubmissionState,
    SubmitCollaborator,
};
pub use validation::ValidationResult;
pub use values::{DonationEntry, FormValues};
