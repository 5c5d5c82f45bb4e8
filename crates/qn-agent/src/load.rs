//! Read-only server snapshot handed to routing policies.

use qn_core::NodeId;

/// What a scheduling agent may know about one server at routing time.
///
/// Built by the simulator from the live server state just before
/// `select` is called; agents never touch servers directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServerLoad {
    pub id:         NodeId,
    /// Remaining service time of the task in service plus the service times
    /// of everything queued behind it.
    pub work_left:  f64,
    /// Queued tasks plus the one in service.
    pub tasks_left: usize,
}

/// Index of the smallest `key` in `servers`, ties going to the lowest id.
///
/// Callers guarantee `servers` is non-empty.
pub(crate) fn argmin_by<F>(servers: &[ServerLoad], mut key: F) -> NodeId
where
    F: FnMut(&ServerLoad) -> f64,
{
    let mut best_id = servers[0].id;
    let mut best = key(&servers[0]);
    for s in &servers[1..] {
        let k = key(s);
        if k < best || (k == best && s.id < best_id) {
            best = k;
            best_id = s.id;
        }
    }
    best_id
}
