use crate::file::{MicrosecondsPerQuarter, DEFAULT_MICROSECONDS_PER_QUARTER, MAX_24BIT_UINT_VALUE};
use std::fmt::{Display, Formatter};

/// Tempo as microseconds per quarter note. The value is always in `1..=0xFFFFFF` since that is
/// what a set tempo meta event can carry.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct Tempo {
    microseconds_per_quarter: u32,
}

impl Default for Tempo {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Tempo {
    /// 500,000 microseconds per quarter note, i.e. 120 beats per minute.
    pub const DEFAULT: Tempo = Tempo {
        microseconds_per_quarter: DEFAULT_MICROSECONDS_PER_QUARTER,
    };

    pub fn from_microseconds_per_quarter(microseconds: u32) -> crate::Result<Self> {
        if microseconds == 0 || microseconds > MAX_24BIT_UINT_VALUE {
            invalid_argument!(
                "a tempo of {} microseconds per quarter note is outside of 1..={}",
                microseconds,
                MAX_24BIT_UINT_VALUE
            );
        }
        Ok(Self {
            microseconds_per_quarter: microseconds,
        })
    }

    pub fn from_milliseconds_per_quarter(milliseconds: u32) -> crate::Result<Self> {
        match milliseconds.checked_mul(1000) {
            Some(microseconds) => Self::from_microseconds_per_quarter(microseconds),
            None => invalid_argument!(
                "a tempo of {} milliseconds per quarter note is too slow",
                milliseconds
            ),
        }
    }

    /// The result is rounded to the nearest microsecond.
    pub fn from_beats_per_minute(beats_per_minute: f64) -> crate::Result<Self> {
        if !beats_per_minute.is_finite() || beats_per_minute <= 0.0 {
            invalid_argument!("{} is not a usable beats per minute value", beats_per_minute);
        }
        let microseconds = (60_000_000f64 / beats_per_minute).round();
        if microseconds < 1.0 || microseconds > f64::from(MAX_24BIT_UINT_VALUE) {
            invalid_argument!(
                "{} beats per minute cannot be expressed in microseconds per quarter",
                beats_per_minute
            );
        }
        Self::from_microseconds_per_quarter(microseconds as u32)
    }

    pub fn microseconds_per_quarter(&self) -> u32 {
        self.microseconds_per_quarter
    }

    pub fn beats_per_minute(&self) -> f64 {
        60_000_000f64 / f64::from(self.microseconds_per_quarter)
    }
}

impl Display for Tempo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} µs/quarter", self.microseconds_per_quarter)
    }
}

impl From<MicrosecondsPerQuarter> for Tempo {
    fn from(value: MicrosecondsPerQuarter) -> Self {
        // MicrosecondsPerQuarter is clamped to the same range
        Self {
            microseconds_per_quarter: value.get(),
        }
    }
}

impl From<Tempo> for MicrosecondsPerQuarter {
    fn from(value: Tempo) -> Self {
        MicrosecondsPerQuarter::new(value.microseconds_per_quarter)
    }
}

#[test]
fn tempo_construction() {
    assert!(Tempo::from_microseconds_per_quarter(0).is_err());
    assert!(Tempo::from_microseconds_per_quarter(MAX_24BIT_UINT_VALUE + 1).is_err());
    assert_eq!(
        Tempo::DEFAULT,
        Tempo::from_milliseconds_per_quarter(500).unwrap()
    );
    assert_eq!(Tempo::DEFAULT, Tempo::from_beats_per_minute(120.0).unwrap());
    assert_eq!(
        666_667,
        Tempo::from_beats_per_minute(90.0)
            .unwrap()
            .microseconds_per_quarter()
    );
    assert!(Tempo::from_beats_per_minute(0.0).is_err());
    assert!(Tempo::from_beats_per_minute(f64::NAN).is_err());
    assert!((Tempo::DEFAULT.beats_per_minute() - 120.0).abs() < f64::EPSILON);
}
