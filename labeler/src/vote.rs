/// Internal three-valued seed label.
///
/// The arithmetic value is what enters the propagation vote: positive leans
/// towards precipitation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Vote {
    Precip,
    Undecided,
    Valid,
}

impl Vote {
    #[inline]
    pub fn value(self) -> f64 {
        match self {
            Vote::Precip => 1.0,
            Vote::Undecided => 0.0,
            Vote::Valid => -1.0,
        }
    }

    /// Seed label of a normalized discriminant. Both thresholds are strict.
    #[inline]
    pub fn seed(normalized: f64, th_ns: f64, th_s: f64) -> Self {
        if normalized < th_ns {
            Vote::Valid
        } else if normalized > th_s {
            Vote::Precip
        } else {
            Vote::Undecided
        }
    }

    /// Outcome of a propagation vote; a zero score resolves to `Valid`.
    #[inline]
    pub fn from_score(score: f64) -> Self {
        if score > 0.0 {
            Vote::Precip
        } else {
            Vote::Valid
        }
    }
}

/// Output label, written as the last column of the point table.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Label {
    Precipitation = 0,
    Valid = 1,
}

impl Label {
    #[inline]
    pub fn as_f64(self) -> f64 {
        self as u8 as f64
    }
}

impl From<Vote> for Label {
    /// Only a negative vote is valid; `Undecided` never survives
    /// propagation, and would count as precipitation if it did.
    fn from(vote: Vote) -> Self {
        if vote.value() < 0.0 {
            Label::Valid
        } else {
            Label::Precipitation
        }
    }
}

pub fn seed_labels(normalized: &[f64], th_ns: f64, th_s: f64) -> Vec<Vote> {
    { normalized.iter() }
        .map(|&x| Vote::seed(x, th_ns, th_s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_to_label() {
        assert_eq!(Label::from(Vote::Valid), Label::Valid);
        assert_eq!(Label::from(Vote::Precip), Label::Precipitation);
        assert_eq!(Label::from(Vote::Undecided), Label::Precipitation);

        assert_eq!(Label::Precipitation.as_f64(), 0.0);
        assert_eq!(Label::Valid.as_f64(), 1.0);
    }

    #[test]
    fn test_seed_thresholds() {
        let seeds = seed_labels(&[-1.0, -0.75, -0.7, 0.0, 0.75, 0.76, 1.0], -0.75, 0.75);
        assert_eq!(
            seeds,
            vec![
                Vote::Valid,
                Vote::Undecided,
                Vote::Undecided,
                Vote::Undecided,
                Vote::Undecided,
                Vote::Precip,
                Vote::Precip,
            ]
        );
    }

    #[test]
    fn test_from_score() {
        assert_eq!(Vote::from_score(0.3), Vote::Precip);
        assert_eq!(Vote::from_score(0.0), Vote::Valid);
        assert_eq!(Vote::from_score(-2.0), Vote::Valid);
        assert_eq!(
            [Vote::Precip, Vote::Undecided, Vote::Valid].map(Vote::value),
            [1.0, 0.0, -1.0]
        );
    }
}
