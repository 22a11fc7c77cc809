//! Paginated List Controller.
//!
//! One shared implementation of infinite-scroll loading for every list view
//! (explore grids, search results, related lists, trending). The logic is
//! split in two layers:
//!
//! - [`ListSession`] is a synchronous state machine. Issuing a fetch returns
//!   a [`PageRequest`] ticket; its result is fed back through
//!   [`ListSession::complete`]. The guard checks and the state change that
//!   follows them happen in one call, so no signal can observe a stale
//!   "fetching" value.
//! - [`ListController`] owns a session behind a lock plus a
//!   [`CatalogSource`](crate::client::CatalogSource), and drives tickets
//!   through the network without holding the lock across the await.
//!
//! Every ticket carries the session generation it was issued under. A
//! reset bumps the generation, so a response that arrives after an identity
//! change is dropped instead of committed.

mod controller;
mod scroll;
mod session;
mod state;

pub use controller::ListController;
pub use scroll::{ScrollMetrics, NEAR_BOTTOM_THRESHOLD};
pub use session::{Completion, ListSession, PageRequest};
pub use state::{FailureStage, ListStatus, PageState};
