//! Attendance derivation: the submission-window policy and the per-employee
//! reduction of a day's entries to a single status. Nothing here touches the
//! store or the clock.

pub mod policy;
pub mod status;
