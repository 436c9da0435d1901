//! Change notification: a monotonic "last updated" marker that writers bump
//! and dashboard observers poll instead of re-querying on every paint.

pub mod marker;
pub mod observer;
pub mod watcher;
