//! Login concurrency policy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How many live sessions a single account may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginType {
    /// Unrestricted concurrent sessions.
    #[default]
    Many,
    /// Exactly one live session; a newer login supersedes every older token.
    Single,
}

impl fmt::Display for LoginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Many => write!(f, "many"),
            Self::Single => write!(f, "single"),
        }
    }
}

impl FromStr for LoginType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "many" => Ok(Self::Many),
            "single" => Ok(Self::Single),
            other => Err(format!("unknown login type '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_many() {
        assert_eq!(LoginType::default(), LoginType::Many);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("single".parse::<LoginType>(), Ok(LoginType::Single));
        assert_eq!(" Many ".parse::<LoginType>(), Ok(LoginType::Many));
        assert!("both".parse::<LoginType>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&LoginType::Single).unwrap();
        assert_eq!(json, "\"single\"");
        let parsed: LoginType = serde_json::from_str("\"many\"").unwrap();
        assert_eq!(parsed, LoginType::Many);
    }
}
