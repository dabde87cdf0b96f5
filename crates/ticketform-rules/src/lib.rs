//! Rule predicates for the ticket submission form.
//!
//! Rules are a closed enum registered explicitly per configuration. The
//! validator evaluates them and tracks displayed messages; attaching the
//! soft-suppress marker to elements is the caller's job.

pub mod binding;
pub mod kind;
pub mod messages;
pub mod outcome;
pub mod validator;

pub use binding::{RuleBinding, RuleSet};
pub use kind::{RuleKind, Severity};
pub use outcome::{FieldVerdict, RuleOutcome};
pub use validator::Validator;
