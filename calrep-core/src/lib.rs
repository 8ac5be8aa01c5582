//! Proportional event replication for academic semester calendars.
//!
//! Given a source calendar with professor-authored events and a target
//! calendar with a different date range and holiday layout, this crate
//! computes a deterministic, order-preserving mapping of each source event
//! onto a workable day of the target:
//! - [`workable`] derives the ordered space of replication-eligible days
//!   and resolves the evaluation window (first PAF1 assessment, with
//!   template and end-date fallbacks)
//! - [`replicate`] runs the proportional allocator with radial
//!   collision resolution and advisory confidence scoring
//! - [`unplaced`] holds events that found no slot until a caller places or
//!   dismisses them

pub mod calendar;
pub mod dates;
pub mod error;
pub mod event;
pub mod replicate;
pub mod semester;
pub mod unplaced;
pub mod workable;

pub use calendar::Calendar;
pub use error::{ReplicaError, ReplicaResult};
pub use event::{Category, Event, EventType};
pub use replicate::{AllocationResult, PlacementRecord, replicate};
pub use semester::{SemesterInfo, SemesterTemplate, SystemRange};
pub use unplaced::{UnplacedEntry, UnplacedReason, UnplacedStore};
pub use workable::{WorkableSpace, analyze_workable_space, resolve_evaluation_end};
