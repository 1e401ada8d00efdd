//! Platform versions and version ranges.
//!
//! Versions follow the `major.minor.patch` scheme with an optional qualifier
//! attached by `.` or `-` (`3.3.0-M1`, `3.3.0.RC2`, `2.7.0.BUILD-SNAPSHOT`).
//! Qualifiers order as milestone < release candidate < snapshot < release.
//!
//! Ranges use interval notation: `[3.0.0,3.3.0)` includes the lower bound
//! and excludes the upper one. A bare version is an open-ended minimum.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

// ── Version ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    qualifier: Option<Qualifier>,
}

#[derive(Debug, Clone)]
struct Qualifier {
    separator: char,
    id: String,
    number: Option<u64>,
}

impl Qualifier {
    fn rank(&self) -> u8 {
        match self.id.to_ascii_uppercase().as_str() {
            "M" | "MILESTONE" => 1,
            "RC" | "CR" => 2,
            "SNAPSHOT" | "BUILD-SNAPSHOT" => 3,
            "RELEASE" | "FINAL" | "GA" => 4,
            _ => 0,
        }
    }
}

impl Version {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            qualifier: None,
        }
    }

    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let text = input.trim();
        if text.is_empty() {
            return Err(DomainError::invalid_version(input, "version cannot be empty"));
        }

        let split = text
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(text.len());
        let (mut head, mut rest) = text.split_at(split);

        let mut qualifier = None;
        if !rest.is_empty() {
            let separator = if let Some(stripped) = head.strip_suffix('.') {
                head = stripped;
                '.'
            } else if let Some(stripped) = rest.strip_prefix('-') {
                rest = stripped;
                '-'
            } else {
                return Err(DomainError::invalid_version(
                    input,
                    "qualifier must follow '.' or '-'",
                ));
            };
            qualifier = Some(parse_qualifier(input, separator, rest)?);
        }

        let parts: Vec<&str> = head.split('.').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(DomainError::invalid_version(
                input,
                "expected major.minor[.patch]",
            ));
        }
        let number = |part: &str| {
            part.parse::<u64>()
                .map_err(|_| DomainError::invalid_version(input, format!("'{part}' is not a number")))
        };

        Ok(Self {
            major: number(parts[0])?,
            minor: number(parts[1])?,
            patch: match parts.get(2) {
                Some(part) => number(part)?,
                None => 0,
            },
            qualifier,
        })
    }

    pub const fn major(&self) -> u64 {
        self.major
    }
    pub const fn minor(&self) -> u64 {
        self.minor
    }
    pub const fn patch(&self) -> u64 {
        self.patch
    }

    /// Qualifier identifier (`M`, `RC`, `SNAPSHOT`...), if any.
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_ref().map(|q| q.id.as_str())
    }

    /// True for versions without a qualifier or with an explicit release one.
    pub fn is_release(&self) -> bool {
        self.qualifier.as_ref().is_none_or(|q| q.rank() == 4)
    }

    /// Release qualifiers (`RELEASE`, `FINAL`, `GA`) key like a bare version.
    fn sort_key(&self) -> (u64, u64, u64, u8, String, u64) {
        match &self.qualifier {
            None => (self.major, self.minor, self.patch, 4, String::new(), 0),
            Some(q) if q.rank() == 4 => (self.major, self.minor, self.patch, 4, String::new(), 0),
            Some(q) => (
                self.major,
                self.minor,
                self.patch,
                q.rank(),
                q.id.to_ascii_uppercase(),
                q.number.unwrap_or(0),
            ),
        }
    }
}

fn parse_qualifier(input: &str, separator: char, text: &str) -> Result<Qualifier, DomainError> {
    let digits_start = text
        .rfind(|c: char| !c.is_ascii_digit())
        .map_or(0, |i| i + 1);
    let (id, digits) = text.split_at(digits_start);
    if id.is_empty() {
        return Err(DomainError::invalid_version(input, "qualifier cannot be numeric only"));
    }
    let number = if digits.is_empty() {
        None
    } else {
        Some(
            digits
                .parse::<u64>()
                .map_err(|_| DomainError::invalid_version(input, "qualifier number overflow"))?,
        )
    };
    Ok(Qualifier {
        separator,
        id: id.to_string(),
        number,
    })
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sort_key().hash(state);
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(q) = &self.qualifier {
            write!(f, "{}{}", q.separator, q.id)?;
            if let Some(n) = q.number {
                write!(f, "{n}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Version> for String {
    fn from(value: Version) -> Self {
        value.to_string()
    }
}

// ── VersionRange ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Bound {
    version: Version,
    inclusive: bool,
}

/// An interval of versions, either bounded on both sides or open-ended.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionRange {
    lower: Bound,
    upper: Option<Bound>,
}

impl VersionRange {
    /// Every version greater than or equal to `minimum`.
    pub fn at_least(minimum: Version) -> Self {
        Self {
            lower: Bound {
                version: minimum,
                inclusive: true,
            },
            upper: None,
        }
    }

    /// `[lower, upper)`
    pub fn between(lower: Version, upper: Version) -> Self {
        Self {
            lower: Bound {
                version: lower,
                inclusive: true,
            },
            upper: Some(Bound {
                version: upper,
                inclusive: false,
            }),
        }
    }

    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let text = input.trim();
        let Some(first) = text.chars().next() else {
            return Err(DomainError::invalid_version(input, "range cannot be empty"));
        };

        if first != '[' && first != '(' {
            return Ok(Self::at_least(Version::parse(text)?));
        }

        let last = text.chars().last().unwrap_or(first);
        if text.len() < 2 || (last != ']' && last != ')') {
            return Err(DomainError::invalid_version(
                input,
                "range must end with ']' or ')'",
            ));
        }

        let body = &text[1..text.len() - 1];
        let Some((low, high)) = body.split_once(',') else {
            return Err(DomainError::invalid_version(input, "range needs two bounds"));
        };

        let lower = Bound {
            version: Version::parse(low)?,
            inclusive: first == '[',
        };
        let upper = Bound {
            version: Version::parse(high)?,
            inclusive: last == ']',
        };
        if upper.version < lower.version {
            return Err(DomainError::invalid_version(
                input,
                "upper bound is lower than lower bound",
            ));
        }

        Ok(Self {
            lower,
            upper: Some(upper),
        })
    }

    pub fn matches(&self, version: &Version) -> bool {
        let above = if self.lower.inclusive {
            version >= &self.lower.version
        } else {
            version > &self.lower.version
        };
        let below = match &self.upper {
            None => true,
            Some(b) if b.inclusive => version <= &b.version,
            Some(b) => version < &b.version,
        };
        above && below
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.upper {
            None if self.lower.inclusive => write!(f, "{}", self.lower.version),
            None => write!(f, "({},)", self.lower.version),
            Some(upper) => write!(
                f,
                "{}{},{}{}",
                if self.lower.inclusive { '[' } else { '(' },
                self.lower.version,
                upper.version,
                if upper.inclusive { ']' } else { ')' },
            ),
        }
    }
}

impl FromStr for VersionRange {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for VersionRange {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VersionRange> for String {
    fn from(value: VersionRange) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn parses_plain_versions() {
        let version = v("3.2.1");
        assert_eq!((version.major(), version.minor(), version.patch()), (3, 2, 1));
        assert!(version.is_release());
        assert_eq!(v("3.2"), v("3.2.0"));
    }

    #[test]
    fn parses_qualifiers_with_either_separator() {
        assert_eq!(v("3.3.0-M1").qualifier(), Some("M"));
        assert_eq!(v("3.3.0.RC2").qualifier(), Some("RC"));
        assert_eq!(v("2.7.0.BUILD-SNAPSHOT").qualifier(), Some("BUILD-SNAPSHOT"));
        assert_eq!(v("3.3.0-M1"), v("3.3.0.M1"));
        assert!(!v("3.2.1-SNAPSHOT").is_release());
    }

    #[test]
    fn display_keeps_original_form() {
        assert_eq!(v("3.3.0.RC2").to_string(), "3.3.0.RC2");
        assert_eq!(v("3.2.1-SNAPSHOT").to_string(), "3.2.1-SNAPSHOT");
    }

    #[test]
    fn qualifiers_order_before_release() {
        assert!(v("3.3.0-M1") < v("3.3.0-M2"));
        assert!(v("3.3.0-M2") < v("3.3.0-RC1"));
        assert!(v("3.3.0-RC1") < v("3.3.0-SNAPSHOT"));
        assert!(v("3.3.0-SNAPSHOT") < v("3.3.0"));
        assert!(v("3.2.9") < v("3.3.0-M1"));
    }

    #[test]
    fn release_qualifiers_equal_the_bare_version() {
        assert_eq!(v("3.2.0.RELEASE"), v("3.2.0"));
        assert_eq!(v("3.2.0.FINAL"), v("3.2.0-GA"));
        assert!(v("3.2.0.BUILD-SNAPSHOT") < v("3.2.0.RELEASE"));
        assert_eq!(v("3.2.0.RELEASE").to_string(), "3.2.0.RELEASE");

        let range = VersionRange::parse("[2.7.0.RELEASE,3.2.0.RELEASE)").unwrap();
        assert!(range.matches(&v("2.7.0")));
        assert!(!range.matches(&v("3.2.0")));
        assert!(range.matches(&v("3.2.0-RC1")));
    }

    #[test]
    fn rejects_malformed_versions() {
        for bad in ["", "3", "a.b.c", "3.2.0x", "1.2.3.4", "3.2.0-12"] {
            assert!(Version::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn half_open_range() {
        let range = VersionRange::parse("[3.0.0,3.3.0)").unwrap();
        assert!(range.matches(&v("3.0.0")));
        assert!(range.matches(&v("3.2.5")));
        assert!(range.matches(&v("3.3.0-M1")));
        assert!(!range.matches(&v("3.3.0")));
        assert!(!range.matches(&v("2.7.18")));
    }

    #[test]
    fn bare_version_is_minimum() {
        let range = VersionRange::parse("3.1.0").unwrap();
        assert!(range.matches(&v("3.1.0")));
        assert!(range.matches(&v("4.0.0")));
        assert!(!range.matches(&v("3.0.9")));
        assert_eq!(range.to_string(), "3.1.0");
    }

    #[test]
    fn exclusive_lower_inclusive_upper() {
        let range = VersionRange::parse("(3.0.0,3.1.0]").unwrap();
        assert!(!range.matches(&v("3.0.0")));
        assert!(range.matches(&v("3.1.0")));
        assert_eq!(range.to_string(), "(3.0.0,3.1.0]");
    }

    #[test]
    fn rejects_malformed_ranges() {
        for bad in ["", "[3.0.0", "[3.0.0]", "[3.1.0,3.0.0)", "[x,3.0.0)"] {
            assert!(VersionRange::parse(bad).is_err(), "{bad} should be rejected");
        }
    }
}
