pub mod feature_flags;
pub mod html;
pub mod paths;
pub mod text;
pub mod urls;
