use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents where the dashboard reads its feed documents from by default.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Local development server of the website.
    Local,
    /// The published dashboard site.
    #[default]
    Production,
    /// A user supplied base URL.
    Custom { base_url: String },
}

impl Environment {
    /// Returns the base URL the feed paths are appended to.
    pub fn base_url(&self) -> String {
        match self {
            Environment::Local => "http://localhost:3000".to_string(),
            Environment::Production => "https://airdrop-intel.vercel.app".to_string(),
            Environment::Custom { base_url } => base_url.clone(),
        }
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" | "prod" => Ok(Environment::Production),
            other if other.starts_with("http://") || other.starts_with("https://") => {
                Ok(Environment::Custom {
                    base_url: s.to_string(),
                })
            }
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Production => write!(f, "Production"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_environment() {
        assert_eq!("local".parse::<Environment>(), Ok(Environment::Local));
        assert_eq!("PROD".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!(
            "https://intel.example.com".parse::<Environment>(),
            Ok(Environment::Custom {
                base_url: "https://intel.example.com".to_string()
            })
        );
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_default_is_production() {
        assert_eq!(Environment::default(), Environment::Production);
        assert_eq!(
            Environment::Local.base_url(),
            "http://localhost:3000".to_string()
        );
    }
}
