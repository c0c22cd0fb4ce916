//! Problem identifiers

use std::fmt;
use std::str::FromStr;

/// Canonical identifier for an Erdos problem.
///
/// Problems are referred to by number on the corpus website but live in
/// `P`-prefixed, zero-padded directories (`problems/P0379`). Parsing accepts
/// `379`, `p379`, or `P0379`; the canonical form pads the number to at least
/// four digits and keeps any wider explicit padding (`P012345` stays six
/// digits wide).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProblemId {
    number: u64,
    width: u8,
}

impl ProblemId {
    /// Minimum pad width of the numeric part.
    pub const MIN_WIDTH: u8 = 4;

    /// Parse a problem id from user input.
    ///
    /// # Examples
    ///
    /// ```
    /// use erdoslab_domain::ProblemId;
    ///
    /// let id: ProblemId = "379".parse().unwrap();
    /// assert_eq!(id.to_string(), "P0379");
    /// assert_eq!(id.number(), 379);
    /// ```
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        let digits = trimmed
            .strip_prefix('P')
            .or_else(|| trimmed.strip_prefix('p'))
            .unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("invalid problem id: {:?}", raw));
        }
        let number: u64 = digits
            .parse()
            .map_err(|_| format!("invalid problem id: {:?}", raw))?;
        let width = digits.len().max(Self::MIN_WIDTH as usize);
        if width > u8::MAX as usize {
            return Err(format!("invalid problem id: {:?}", raw));
        }
        Ok(Self {
            number,
            width: width as u8,
        })
    }

    /// The problem number as shown on the corpus website.
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Directory name under `problems/` for this problem.
    pub fn dir_name(&self) -> String {
        self.to_string()
    }

    /// Default problem page URL on the corpus website.
    pub fn problem_url(&self) -> String {
        format!("https://www.erdosproblems.com/{}", self.number)
    }

    /// Default forum thread URL on the corpus website.
    pub fn forum_url(&self) -> String {
        format!("https://www.erdosproblems.com/forum/thread/{}", self.number)
    }
}

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{:0width$}", self.number, width = self.width as usize)
    }
}

impl FromStr for ProblemId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: parsing the canonical display form round-trips.
        #[test]
        fn test_display_roundtrip(number in 0u64..10_000_000) {
            let id = ProblemId::parse(&number.to_string()).unwrap();
            let parsed = ProblemId::parse(&id.to_string()).unwrap();
            prop_assert_eq!(id, parsed);
        }

        /// Property: all accepted spellings agree on the number.
        #[test]
        fn test_spellings_agree(number in 0u64..10_000_000) {
            let bare = ProblemId::parse(&number.to_string()).unwrap();
            let upper = ProblemId::parse(&format!("P{}", number)).unwrap();
            let lower = ProblemId::parse(&format!("p{}", number)).unwrap();
            prop_assert_eq!(bare.number(), upper.number());
            prop_assert_eq!(bare.number(), lower.number());
        }
    }
}
