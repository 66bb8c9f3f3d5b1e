//! Core business logic - framework-agnostic operations over the subdivision store.
//!
//! Every function takes the database handle explicitly; nothing here keeps state of its
//! own. The HTTP layer in `crate::api` is a thin adapter over these functions.

/// Blocks, tracked counters and consumption roll-ups
pub mod block;
/// Construction and renovation records
pub mod construction;
/// Household status, consumption and billing
pub mod household;
/// Admin announcements
pub mod notification;
/// Moving users between households and the availability view
pub mod occupancy;
/// Dues payments
pub mod payment;
/// Drift repair for incrementally maintained tallies
pub mod reconcile;
/// Incident reports
pub mod report;
/// Seeding blocks and households from configuration
pub mod seed;
/// Owner portal service requests
pub mod service_request;
/// Accounts and login
pub mod user;
