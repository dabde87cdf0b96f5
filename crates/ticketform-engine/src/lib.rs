//! Reactive rule engine for the ticket submission form.
//!
//! The engine never touches a real page. It talks to a [`FormDocument`],
//! derives visibility from current values, re-validates dependent fields
//! and writes back only what changed.

pub mod binder;
pub mod controller;
pub mod document;
pub mod memory;
pub mod options;
pub mod session;
pub mod visibility;

pub use binder::ValidationBinder;
pub use controller::{Applied, VisibilityController};
pub use document::{FormDocument, NumericBounds};
pub use memory::{FieldSnapshot, FormSnapshot, MemoryDocument};
pub use options::ExtensionReasons;
pub use session::{ChangeReport, FormSession, SubmissionReport};
pub use visibility::{GroupState, Transition, VisibilityPlan};
