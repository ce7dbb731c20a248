use crate::core::{Channel, DurationName};
use crate::Text;

/// Meta events carry non-MIDI information: text, tempo, time signature, key signature and the end
/// of a track. Only the payloads are modeled here; byte encoding is not part of this crate.
///
/// In general, meta events in a track which occur at the same time may occur in any order.
/// Sequence Number and Sequence/Track Name events, if present, must appear at time 0. An
/// end-of-track event must occur as the last event in the track.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum MetaEvent {
    /// `FF 00 02 ssss`: the number of a sequence.
    SequenceNumber(u16),

    /// `FF 01 len text`: any amount of text describing anything.
    Text(Text),

    /// `FF 02 len text`: a copyright notice.
    Copyright(Text),

    /// `FF 03 len text`: the name of the sequence (first track) or of the track.
    TrackName(Text),

    /// `FF 04 len text`: a description of the instrumentation to be used in the track.
    InstrumentName(Text),

    /// `FF 05 len text`: a lyric to be sung, usually one syllable per event.
    Lyric(Text),

    /// `FF 06 len text`: the name of a point in the sequence, such as a rehearsal letter.
    Marker(Text),

    /// `FF 07 len text`: a description of something happening on a screen or stage.
    CuePoint(Text),

    /// `FF 20 01 cc`: associates a channel with the events that follow.
    MidiChannelPrefix(Channel),

    /// `FF 2F 00`: the exact end of the track.
    EndOfTrack,

    /// `FF 51 03 tttttt`: Set Tempo, in microseconds per MIDI quarter-note.
    SetTempo(MicrosecondsPerQuarter),

    /// `FF 58 04 nn dd cc bb`: the time signature.
    TimeSignature(TimeSignatureValue),

    /// `FF 59 02 sf mi`: the key signature.
    KeySignature(KeySignatureValue),

    /// `FF 7F len data`: sequencer-specific data.
    SequencerSpecific(Vec<u8>),
}

impl Default for MetaEvent {
    fn default() -> Self {
        MetaEvent::EndOfTrack
    }
}

pub(crate) const DEFAULT_MICROSECONDS_PER_QUARTER: u32 = 500_000;
pub(crate) const MAX_24BIT_UINT_VALUE: u32 = 16_777_215;

clamp!(
    /// In MIDI tempos are given as microseconds per quarter note, stored in 24 bits, hence the
    /// upper bound of 16,777,215. The minimum value is `1` since `0` microseconds per beat would
    /// be an infinitely fast tempo. The default, `500_000`, is 120 beats per minute.
    MicrosecondsPerQuarter,
    u32,
    1,
    MAX_24BIT_UINT_VALUE,
    DEFAULT_MICROSECONDS_PER_QUARTER,
    pub
);

/// MIDI clocks per metronome click when none is given: one click per quarter note.
pub(crate) const DEFAULT_CLOCKS_PER_CLICK: u8 = 24;

/// Notated 32nd notes per MIDI quarter note when none is given.
pub(crate) const DEFAULT_THIRTY_SECONDS_PER_QUARTER: u8 = 8;

/// The payload of a [`MetaEvent::TimeSignature`].
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct TimeSignatureValue {
    /// The upper part of a time signature. For example, in 6/8, the `numerator` is 6.
    pub(crate) numerator: u8,

    /// The lower part of a time signature. For example, in 6/8, the `denominator` is
    /// [`DurationName::Eighth`].
    pub(crate) denominator: DurationName,

    /// MIDI clocks in a metronome click. Unrelated to tempo.
    pub(crate) clocks_per_click: u8,

    /// The number of notated 32nd notes per MIDI quarter note. This should normally be 8.
    pub(crate) thirty_seconds_per_quarter: u8,
}

impl Default for TimeSignatureValue {
    fn default() -> Self {
        Self {
            numerator: 4,
            denominator: DurationName::Quarter,
            clocks_per_click: DEFAULT_CLOCKS_PER_CLICK,
            thirty_seconds_per_quarter: DEFAULT_THIRTY_SECONDS_PER_QUARTER,
        }
    }
}

impl TimeSignatureValue {
    /// Fails if `numerator` is zero.
    pub fn new(numerator: u8, denominator: DurationName) -> crate::Result<Self> {
        if numerator == 0 {
            invalid_argument!("the time signature numerator must be greater than zero");
        }
        Ok(Self {
            numerator,
            denominator,
            ..Self::default()
        })
    }

    /// Sets the metronome fields. These do not take part in tempo map comparisons.
    pub fn with_metronome(mut self, clocks_per_click: u8, thirty_seconds_per_quarter: u8) -> Self {
        self.clocks_per_click = clocks_per_click;
        self.thirty_seconds_per_quarter = thirty_seconds_per_quarter;
        self
    }

    pub fn numerator(&self) -> u8 {
        self.numerator
    }

    pub fn denominator(&self) -> DurationName {
        self.denominator
    }

    pub fn clocks_per_click(&self) -> u8 {
        self.clocks_per_click
    }

    pub fn thirty_seconds_per_quarter(&self) -> u8 {
        self.thirty_seconds_per_quarter
    }
}

clamp!(
    /// The number of flats (negative) or sharps (positive) in a key signature. For example `-2`
    /// means "2 flats". The valid range is from -7 to 7.
    KeyAccidentals,
    i8,
    -7,
    7,
    0,
    pub
);

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash, Default)]
pub enum KeyMode {
    #[default]
    Major,
    Minor,
}

/// The payload of a [`MetaEvent::KeySignature`].
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct KeySignatureValue {
    accidentals: KeyAccidentals,
    mode: KeyMode,
}

impl KeySignatureValue {
    pub fn new(accidentals: KeyAccidentals, mode: KeyMode) -> Self {
        Self { accidentals, mode }
    }

    pub fn accidentals(&self) -> KeyAccidentals {
        self.accidentals
    }

    pub fn mode(&self) -> KeyMode {
        self.mode
    }
}

#[test]
fn time_signature_value_rejects_zero_numerator() {
    assert!(TimeSignatureValue::new(0, DurationName::Quarter).is_err());
    let value = TimeSignatureValue::new(6, DurationName::Eighth).unwrap();
    assert_eq!(6, value.numerator());
    assert_eq!(8, value.denominator().denominator());
    assert_eq!(DEFAULT_CLOCKS_PER_CLICK, value.clocks_per_click());
}
