//! Catalog management for the Sudokuzen toolkit.
//!
//! This crate handles the published side of the pipeline:
//!
//! - [`LevelRecord`]: the camelCase wire form of a catalog entry
//! - [`LevelsFile`]: catalogs embedded in source-like files as a single
//!   array literal, parsed and re-emitted without disturbing the
//!   surrounding text
//! - [`filter_levels`]: acceptance filtering with a reject-reason tally
//!   for every dropped entry
//! - [`audit_catalog`]: quality analytics over scored entries —
//!   repetition runs, difficulty-curve spikes, fake-hard candidates

pub mod audit;
pub mod filter;
pub mod level;
pub mod levels_file;

pub use self::{
    audit::{
        AuditConfig, AuditFindings, CurveSpike, FakeHard, RepetitionRun, audit_catalog,
        ensure_metrics,
    },
    filter::{Candidate, FilterConfig, FilterReport, Reject, RejectReason, filter_levels},
    level::LevelRecord,
    levels_file::{LevelsFile, LevelsFileError},
};
