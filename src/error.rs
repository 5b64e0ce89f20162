//! # Library Error Type
//!
//! Typed errors at the library boundary, matching the error-enum idiom used
//! elsewhere in the example pack (`thiserror`-derived, one variant per
//! distinct failure mode) rather than routing everything through `anyhow`,
//! which the CLI layer reserves for its own boundary.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SieveError {
    /// `stop` exceeds the algorithm's validity window: sieving further would
    /// require a pseudosquare beyond the tabulated L_373.
    #[error("stop ({stop}) exceeds the validity bound ({bound}) for this algorithm")]
    StopTooLarge { stop: u128, bound: u128 },

    /// `stop / s` reached or exceeded the largest tabulated pseudosquare
    /// before a witness-cap prime could be selected.
    #[error("stop/s ratio ({ratio}) is not smaller than the largest tabulated pseudosquare ({max_lp})")]
    RatioExceedsPseudosquareTable { ratio: u128, max_lp: u128 },
}

pub type Result<T> = std::result::Result<T, SieveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_informative() {
        let e = SieveError::StopTooLarge { stop: 10, bound: 5 };
        assert_eq!(e.to_string(), "stop (10) exceeds the validity bound (5) for this algorithm");

        let e = SieveError::RatioExceedsPseudosquareTable { ratio: 100, max_lp: 50 };
        assert!(e.to_string().contains("100"));
        assert!(e.to_string().contains("50"));
    }
}
