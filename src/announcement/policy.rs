use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Controls how long a dismissed announcement stays hidden.
///
/// The policy is supplied per call; the manager never remembers which one
/// was used to dismiss.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DismissPolicy {
    /// Reappears once the process (session) ends.
    SessionOnly,
    /// Hidden until a different announcement becomes active.
    #[default]
    UntilNewAnnouncement,
    /// This announcement never shows again.
    Forever,
    /// Reappears once `hours` have elapsed since the dismissal.
    Timed { hours: u32 },
}

impl DismissPolicy {
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    /// Whether dismissals under this policy are keyed by announcement id.
    pub fn is_keyed(&self) -> bool {
        !matches!(self, Self::SessionOnly)
    }

    pub fn validate(&self) -> Result<(), ParsePolicyError> {
        match self {
            Self::Timed { hours: 0 } => Err(ParsePolicyError::ZeroHours),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for DismissPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SessionOnly => f.write_str("session-only"),
            Self::UntilNewAnnouncement => f.write_str("until-new-announcement"),
            Self::Forever => f.write_str("forever"),
            Self::Timed { hours } => write!(f, "timed:{hours}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePolicyError {
    #[error(
        "unknown dismiss policy '{0}' (expected session-only, until-new-announcement, forever or timed:<hours>)"
    )]
    Unknown(String),

    #[error("invalid hours '{0}' for timed policy")]
    InvalidHours(String),

    #[error("timed policy needs a positive number of hours")]
    ZeroHours,
}

impl FromStr for DismissPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");

        if let Some(hours) = normalized.strip_prefix("timed:") {
            let hours: u32 = hours
                .trim()
                .parse()
                .map_err(|_| ParsePolicyError::InvalidHours(hours.to_string()))?;
            let policy = Self::Timed { hours };
            policy.validate()?;
            return Ok(policy);
        }

        match normalized.as_str() {
            "session-only" | "session" => Ok(Self::SessionOnly),
            "until-new-announcement" | "until-new" => Ok(Self::UntilNewAnnouncement),
            "forever" => Ok(Self::Forever),
            _ => Err(ParsePolicyError::Unknown(s.to_string())),
        }
    }
}
