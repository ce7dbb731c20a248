/// `DurationName` is used when specifying the denominator of a [`crate::TimeSignatureValue`].
/// When defining time signatures, the MIDI file spec says:
/// ```text
/// The denominator is a negative power of two: 2 represents a quarter-note, 3 represents an
/// eighth-note, etc.
/// ```
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash, Default)]
pub enum DurationName {
    /// Whole Note / Semibreve
    Whole = 0,

    /// Half Note / Minim
    Half = 1,

    /// Quarter Note / Crotchet
    #[default]
    Quarter = 2,

    /// Eighth Note / Quaver
    Eighth = 3,

    /// Sixteenth note / Semiquaver
    Sixteenth = 4,

    /// Thirty-Second Note / Demisemiquaver
    D32 = 5,

    /// Sixty-Fourth Note / Hemidemisemiquaver
    D64 = 6,

    /// One-Twenty-Eighth Note / Semihemidemisemiquaver
    D128 = 7,

    /// Two-Fifty-Sixth Note / Demisemihemidemisemiquaver
    D256 = 8,

    /// Five-Twelfth Note
    D512 = 9,

    /// One Thousand Twenty-Fourth Note
    D1024 = 10,
}

const ALL: [DurationName; 11] = [
    DurationName::Whole,
    DurationName::Half,
    DurationName::Quarter,
    DurationName::Eighth,
    DurationName::Sixteenth,
    DurationName::D32,
    DurationName::D64,
    DurationName::D128,
    DurationName::D256,
    DurationName::D512,
    DurationName::D1024,
];

impl DurationName {
    /// The power-of-two exponent as it is stored in a time signature meta event.
    pub fn exponent(self) -> u8 {
        self as u8
    }

    /// The notated denominator, e.g. `8` for [`DurationName::Eighth`].
    pub fn denominator(self) -> u16 {
        1u16 << (self as u8)
    }

    /// Finds the `DurationName` for a notated denominator. Returns `None` unless `denominator` is
    /// a power of two between 1 and 1024.
    pub fn from_denominator(denominator: u16) -> Option<Self> {
        ALL.iter().copied().find(|d| d.denominator() == denominator)
    }

    /// Finds the `DurationName` for a power-of-two exponent.
    pub fn from_exponent(exponent: u8) -> Option<Self> {
        ALL.get(usize::from(exponent)).copied()
    }
}

#[test]
fn denominators() {
    assert_eq!(8, DurationName::Eighth.denominator());
    assert_eq!(Some(DurationName::Quarter), DurationName::from_denominator(4));
    assert_eq!(None, DurationName::from_denominator(6));
    assert_eq!(None, DurationName::from_denominator(2048));
    assert_eq!(Some(DurationName::D1024), DurationName::from_exponent(10));
    assert_eq!(None, DurationName::from_exponent(11));
}
