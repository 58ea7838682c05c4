pub mod profile;
pub mod roast;
