use serde::{Deserialize, Serialize};

/// GitHub profile data returned by the roast service alongside the roast.
///
/// Only `login` is required. The service passes most fields through from the
/// GitHub users API and older deployments name the login `username`, so every
/// other field falls back to its default when absent or `null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfileSummary {
    #[serde(alias = "username")]
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub public_repos: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub followers: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub following: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub public_gists: u64,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    /// Personal website, as GitHub names it.
    #[serde(default)]
    pub blog: Option<String>,
    /// ISO-8601 timestamp of account creation, kept verbatim.
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub years_on_github: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub top_repos: Vec<TopRepo>,
    /// `(language, repository count)` pairs, most used first.
    #[serde(default, deserialize_with = "null_as_default")]
    pub top_languages: Vec<(String, u32)>,
}

impl ProfileSummary {
    /// The display name, or the login when the account has none.
    pub fn display_name(&self) -> &str {
        non_blank(self.name.as_deref()).unwrap_or(&self.login)
    }

    pub fn display_bio(&self) -> &str {
        non_blank(self.bio.as_deref()).unwrap_or("No bio available")
    }
}

/// One of the user's most starred repositories.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TopRepo {
    pub name: String,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub forks: u64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
