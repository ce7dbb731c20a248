use crate::core::DurationName;
use crate::file::TimeSignatureValue;
use std::fmt::{Display, Formatter};

/// A time signature as it matters for the tempo map: a numerator and a power-of-two denominator.
/// The metronome fields of the meta event are not part of it.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct TimeSignature {
    numerator: u8,
    denominator: DurationName,
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TimeSignature {
    /// Common time, 4/4.
    pub const DEFAULT: TimeSignature = TimeSignature {
        numerator: 4,
        denominator: DurationName::Quarter,
    };

    /// `denominator` is the notated value, e.g. `8` for 6/8. It must be a power of two no
    /// greater than 1024.
    pub fn new(numerator: u8, denominator: u16) -> crate::Result<Self> {
        if numerator == 0 {
            invalid_argument!("the time signature numerator must be greater than zero");
        }
        match DurationName::from_denominator(denominator) {
            Some(denominator) => Ok(Self {
                numerator,
                denominator,
            }),
            None => invalid_argument!(
                "time signature denominator {} is not a power of two in 1..=1024",
                denominator
            ),
        }
    }

    pub fn numerator(&self) -> u8 {
        self.numerator
    }

    pub fn denominator(&self) -> u16 {
        self.denominator.denominator()
    }

    pub fn denominator_name(&self) -> DurationName {
        self.denominator
    }
}

impl Display for TimeSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator())
    }
}

impl From<TimeSignatureValue> for TimeSignature {
    fn from(value: TimeSignatureValue) -> Self {
        Self {
            numerator: value.numerator(),
            denominator: value.denominator(),
        }
    }
}

/// Uses the default metronome settings.
impl From<TimeSignature> for TimeSignatureValue {
    fn from(value: TimeSignature) -> Self {
        TimeSignatureValue {
            numerator: value.numerator,
            denominator: value.denominator,
            ..TimeSignatureValue::default()
        }
    }
}

#[test]
fn time_signature_validation() {
    assert!(TimeSignature::new(0, 4).is_err());
    assert!(TimeSignature::new(3, 6).is_err());
    assert!(TimeSignature::new(3, 2048).is_err());
    let ts = TimeSignature::new(6, 8).unwrap();
    assert_eq!("6/8", format!("{}", ts));
    let value = TimeSignatureValue::from(ts);
    assert_eq!(DurationName::Eighth, value.denominator());
    assert_eq!(24, value.clocks_per_click());
    assert_eq!(ts, TimeSignature::from(value.with_metronome(12, 8)));
}
