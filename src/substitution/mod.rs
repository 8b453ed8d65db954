//! Variable substitution for custom launch parameters.
//!
//! A value starting with `$` names a variable (`$User.id`); a value starting
//! with `\` is a literal with the backslash removed. Everything else passes
//! through untouched.

pub mod calculated;
pub mod custom_params;
pub mod dictionary;
pub mod policy;
pub mod resolver;

pub use custom_params::{split_custom_parameters, CustomParameterParser};
pub use dictionary::{BoundObject, SubstitutionDictionary, SubstitutionSource};
pub use policy::{AllowAll, AllowList, SubstitutionPolicy};
pub use resolver::{SubstitutionBindings, SubstitutionResolver};
