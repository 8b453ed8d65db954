//! Composition of LTI 1.1 / 1.3 resource-link launches.
//!
//! A launch loads its records through the [`stores`] traits, threads a flat
//! parameter map through the [`resolvers`] chain (custom parameters are
//! expanded by [`substitution`]), then packages the result either as a signed
//! 1.1 form post or as a 1.3 claim set plus login initiation request
//! ([`claims`], [`message`]).

pub mod claims;
pub mod constants;
pub mod errors;
pub mod message;
pub mod model;
pub mod resolvers;
pub mod services;
pub mod stores;
pub mod substitution;
pub mod utils;

pub use errors::{LaunchError, LaunchErrorKind};
pub use message::Message;
pub use services::{LaunchResult, LaunchService};
