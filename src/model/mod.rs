pub mod context;
pub mod link;
pub mod params;
pub mod people;
pub mod tool;

pub use context::{LaunchContext, LaunchOptions};
pub use link::ResourceLink;
pub use params::{ParamValue, ParameterMap};
pub use people::{LaunchCourse, LaunchUser};
pub use tool::{
    KeyNormalization, LaunchContainer, LtiVersion, SignatureMethod, ToolConfiguration, ToolSetting,
};
