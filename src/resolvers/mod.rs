//! Parameter resolvers and the builder that chains them.
//!
//! Each resolver takes the flat map built so far and returns it with its own
//! keys added (or, for the privacy resolver, removed). Order is chosen by the
//! caller; [`chain::ResourceLinkChain`] assembles the standard order.

pub mod builder;
pub mod chain;
pub mod consumer;
pub mod context;
pub mod custom;
pub mod lis;
pub mod normalize;
pub mod outcome;
pub mod presentation;
pub mod privacy;
pub mod service;

use crate::errors::LaunchError;
use crate::model::ParameterMap;

pub use builder::ParametersBuilder;
pub use chain::ResourceLinkChain;
pub use consumer::ToolConsumerResolver;
pub use context::ContextResolver;
pub use custom::{CustomParametersResolver, SubstitutionScope};
pub use lis::LisResolver;
pub use normalize::{normalize_key_name, KeyNormalizationResolver};
pub use outcome::OutcomeResolver;
pub use presentation::LaunchPresentationResolver;
pub use privacy::PrivacyResolver;
pub use service::ServiceParametersResolver;

pub trait ParameterResolver {
    /// Short stable name used in logs.
    fn name(&self) -> &'static str;

    fn resolve(&self, params: ParameterMap) -> Result<ParameterMap, LaunchError>;
}
