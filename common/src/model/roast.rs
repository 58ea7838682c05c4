use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::profile::ProfileSummary;

/// The generated roast text. Opaque to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoastText(pub String);

impl RoastText {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoastText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Successful body of `POST /roast`. Profile and roast always arrive together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoastResponse {
    pub roast: RoastText,
    pub profile: ProfileSummary,
}
