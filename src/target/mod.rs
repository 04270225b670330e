//! Target validation.
//!
//! A target is the IPv4 address or domain name a user submits for lookup.
//! Input is classified with two anchored patterns; anything matching neither
//! is rejected before a request is issued. IPv6, punycode and internationalized
//! domains are not accepted.

use std::fmt;
use std::net::Ipv4Addr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error_handling::ValidationError;

static IPV4_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$",
    )
    .expect("IPv4 pattern is a valid regex")
});

static DOMAIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9-]{1,61}[a-zA-Z0-9](?:\.[a-zA-Z]{2,})+$")
        .expect("domain pattern is a valid regex")
});

/// Returns true for a dotted-quad IPv4 literal with every octet in 0–255.
///
/// Octets may carry up to one leading zero (`01`, `001`) since the pattern
/// allows it.
pub fn is_valid_ip(input: &str) -> bool {
    IPV4_PATTERN.is_match(input)
}

/// Returns true for a domain name with at least one alphabetic TLD of two or
/// more letters.
pub fn is_valid_domain(input: &str) -> bool {
    DOMAIN_PATTERN.is_match(input)
}

/// A validated lookup target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Target {
    Ip(Ipv4Addr),
    Domain(String),
}

impl Target {
    /// Validates free-text input.
    ///
    /// Surrounding whitespace is ignored. Blank input yields
    /// `ValidationError::Empty`; anything that is neither an IPv4 literal nor
    /// a domain yields `ValidationError::Invalid`.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty);
        }

        if is_valid_ip(trimmed) {
            // The pattern tolerates leading zeros, which `Ipv4Addr` rejects,
            // so rebuild from the parsed octets.
            let mut octets = [0u8; 4];
            for (slot, part) in octets.iter_mut().zip(trimmed.split('.')) {
                *slot = part
                    .parse()
                    .map_err(|_| ValidationError::Invalid(trimmed.to_string()))?;
            }
            return Ok(Target::Ip(Ipv4Addr::from(octets)));
        }

        if is_valid_domain(trimmed) {
            return Ok(Target::Domain(trimmed.to_string()));
        }

        Err(ValidationError::Invalid(trimmed.to_string()))
    }

    pub fn is_domain(&self) -> bool {
        matches!(self, Target::Domain(_))
    }

    /// The IP literal, when the target is one.
    pub fn ip(&self) -> Option<Ipv4Addr> {
        match self {
            Target::Ip(ip) => Some(*ip),
            Target::Domain(_) => None,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Ip(ip) => write!(f, "{ip}"),
            Target::Domain(domain) => f.write_str(domain),
        }
    }
}

impl From<Target> for String {
    fn from(target: Target) -> Self {
        target.to_string()
    }
}

impl TryFrom<String> for Target {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Target::parse(&value)
    }
}

impl std::str::FromStr for Target {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Target::parse(s)
    }
}
