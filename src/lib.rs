//! Status list library: codec and status evaluation for verifiable credential status lists.
pub use statuslist_core;
pub use statuslist_http;

pub use statuslist_core::bitstring::{decode, encode, get_status, StatusList, StatusListError};
