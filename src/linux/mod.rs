pub mod attr;
pub mod cmd;
pub mod consts;
pub mod netns;
pub mod nla;
pub mod set;
mod socket;

pub use netns::NetNs;
pub use socket::{RouteSocket, WgSocket};
