use std::fmt;

use async_graphql::{Enum, SimpleObject};
use serde::{Deserialize, Serialize};

use crate::constants::audience_profiles;

/// Target audience a prompt material is written for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize, Enum)]
pub enum AudienceGroup {
    #[default]
    #[serde(rename = "business")]
    Business,
    #[serde(rename = "public")]
    PublicSector,
    #[serde(rename = "univ")]
    University,
    #[serde(rename = "school")]
    School,
    #[serde(rename = "adult")]
    AdultLearner,
}

impl AudienceGroup {
    pub const ALL: [AudienceGroup; 5] = [
        AudienceGroup::Business,
        AudienceGroup::PublicSector,
        AudienceGroup::University,
        AudienceGroup::School,
        AudienceGroup::AdultLearner,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            AudienceGroup::Business => "business",
            AudienceGroup::PublicSector => "public",
            AudienceGroup::University => "univ",
            AudienceGroup::School => "school",
            AudienceGroup::AdultLearner => "adult",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::ALL.into_iter().find(|group| group.id() == id)
    }

    /// Unknown or absent ids fall back to the business audience.
    pub fn resolve(id: Option<&str>) -> Self {
        id.and_then(Self::from_id).unwrap_or_default()
    }

    pub fn profile(&self) -> &'static AudienceProfile {
        audience_profiles::profile_for(*self)
    }
}

impl fmt::Display for AudienceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Persona and tone used to address one audience group in a generation brief.
#[derive(Debug, PartialEq, Eq)]
pub struct AudienceProfile {
    pub group: AudienceGroup,
    pub role: &'static str,
    pub context: &'static str,
    pub topics: &'static str,
    pub tone: &'static str,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct AudienceProfileDto {
    pub group: AudienceGroup,
    pub id: String,
    pub role: String,
    pub context: String,
    pub topics: String,
    pub tone: String,
}

impl From<&AudienceProfile> for AudienceProfileDto {
    fn from(profile: &AudienceProfile) -> Self {
        AudienceProfileDto {
            group: profile.group,
            id: profile.group.id().to_string(),
            role: profile.role.to_string(),
            context: profile.context.to_string(),
            topics: profile.topics.to_string(),
            tone: profile.tone.to_string(),
        }
    }
}
