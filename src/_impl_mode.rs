use crate::{BooleanNetError, Mode};
use std::convert::TryFrom;
use std::fmt::{Display, Error, Formatter};
use std::str::FromStr;

impl Mode {
    /// All modes, in the order of their textual tags.
    pub const ALL: [Mode; 5] = [Mode::Plde, Mode::Sync, Mode::Async, Mode::Rank, Mode::Time];

    /// True if expressions read the state as it was at the start of the round.
    pub fn is_sync(self) -> bool {
        self == Mode::Sync
    }

    /// True if all update lines are treated as rank 1, regardless of their rank marker.
    pub fn collapses_ranks(self) -> bool {
        matches!(self, Mode::Plde | Mode::Sync | Mode::Async)
    }

    /// True if node values are `(concentration, decay, threshold)` triples.
    pub fn is_continuous(self) -> bool {
        self == Mode::Plde
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Plde => "plde",
            Mode::Sync => "sync",
            Mode::Async => "async",
            Mode::Rank => "rank",
            Mode::Time => "time",
        }
    }
}

impl FromStr for Mode {
    type Err = BooleanNetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str() == value)
            .ok_or_else(|| BooleanNetError::InvalidMode(value.to_string()))
    }
}

impl TryFrom<&str> for Mode {
    type Error = BooleanNetError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use crate::{BooleanNetError, Mode};
    use std::convert::TryFrom;

    #[test]
    fn parse_mode_tags() {
        for mode in Mode::ALL {
            assert_eq!(mode, Mode::try_from(mode.to_string().as_str()).unwrap());
        }
        assert_eq!(
            Err(BooleanNetError::InvalidMode("Sync".to_string())),
            "Sync".parse::<Mode>()
        );
        assert!(Mode::try_from("").is_err());
    }

    #[test]
    fn mode_properties() {
        assert!(Mode::Sync.is_sync());
        assert!(!Mode::Async.is_sync());
        assert!(Mode::Plde.collapses_ranks());
        assert!(Mode::Async.collapses_ranks());
        assert!(!Mode::Rank.collapses_ranks());
        assert!(!Mode::Time.collapses_ranks());
        assert!(Mode::Plde.is_continuous());
        assert!(!Mode::Rank.is_continuous());
    }
}
