//! The public address value type.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use thiserror::Error;

/// The address by which the host is reachable from the internet.
///
/// Always holds a syntactically valid IPv4 or IPv6 address, so two
/// spellings of the same address (e.g. compressed and expanded IPv6)
/// compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicAddress(IpAddr);

impl PublicAddress {
    /// Returns the underlying IP address.
    #[must_use]
    pub const fn ip(&self) -> IpAddr {
        self.0
    }
}

impl fmt::Display for PublicAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The text did not contain a valid IP address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a valid IP address")]
pub struct AddressParseError(pub String);

impl FromStr for PublicAddress {
    type Err = AddressParseError;

    /// Parses an address, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<IpAddr>()
            .map(Self)
            .map_err(|_| AddressParseError(trimmed.to_string()))
    }
}
