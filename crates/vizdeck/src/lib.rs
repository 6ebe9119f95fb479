#![forbid(unsafe_code)]

//! Facade crate: re-exports the vizdeck core and, behind the `client`
//! feature, the REST client.

pub use vizdeck_core::*;

#[cfg(feature = "client")]
pub use vizdeck_client as client;
