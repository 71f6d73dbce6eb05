//! Statement recording.
//!
//! A turn is persisted as one [`TurnCommit`]: the new statement plus the
//! meeting and participant aggregate updates (and, when the turn answered a
//! question, the question's status). Stores apply a commit as a unit.
//! [`reconcile`] repairs aggregates from the statement history.

pub mod commit;
pub mod reconcile;

pub use commit::{CommitRejection, StatementRecorder, TurnCommit};
pub use reconcile::{ReconcileReport, reconcile};
