//! Turn flow: phases, the Selection barrier, the state machine and its
//! reports.
//!
//! ## Key Types
//!
//! - `Phase`: the thirteen steps of a turn
//! - `SelectionBarrier`: commit-then-reveal with a logical deadline
//! - `RemoteSelections`: the same barrier across threads, joined with a timeout
//! - `TurnEngine`: `begin_turn` and `resolve_turn`
//! - `TurnReport`: revealed selections and the ordered event log of a turn

pub mod barrier;
pub mod engine;
pub mod phase;
pub mod report;

pub use barrier::{RemoteSelections, SelectionBarrier, SelectionHandle};
pub use engine::TurnEngine;
pub use phase::Phase;
pub use report::{AttackSource, TurnEvent, TurnLog, TurnReport};
