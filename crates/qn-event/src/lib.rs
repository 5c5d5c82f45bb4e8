//! `qn-event` — the future-event list of the simulator.
//!
//! # Crate layout
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`event`]       | `Event` (`Arrival`, `ServiceComplete`), `EventKey`     |
//! | [`event_queue`] | `EventQueue` (`BTreeMap<(SimTime, seq), Event>`)       |
//!
//! # Ordering model
//!
//! Every scheduled event gets a monotonically increasing sequence number.
//! Events pop in `(time, seq)` order, so two events at the same instant run
//! in the order they were scheduled.  That is the only tie-break rule the
//! simulator needs, and it makes runs reproducible.

pub mod event;
pub mod event_queue;


pub use event::{Event, EventKey};
pub use event_queue::EventQueue;
