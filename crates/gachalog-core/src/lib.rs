// Domain model shared by the client crates: task identity, wire protocol,
// the per-category pool store, and pure presentation helpers.

pub mod category;
pub mod identity;
pub mod notify;
pub mod presentation;
pub mod protocol;
pub mod store;
