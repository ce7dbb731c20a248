//! The `file` module is for types and concepts strictly related to MIDI *files*.
//! These are separated from types and concepts that are also used in realtime MIDI (`core`).

mod division;
mod event;
mod header;
mod meta_event;
mod sysex;
mod track;
mod tracks;

pub use division::{Division, FrameRate, QuarterNoteDivision, SmpteRate};
pub use event::{Event, TrackEvent};
pub use header::{Format, Header};
pub use meta_event::{
    KeyAccidentals, KeyMode, KeySignatureValue, MetaEvent, MicrosecondsPerQuarter,
    TimeSignatureValue,
};
pub use sysex::{SysexEvent, SysexEventType};
pub use track::Track;
pub use tracks::Tracks;

pub(crate) use track::encode_events;
pub(crate) use meta_event::{DEFAULT_MICROSECONDS_PER_QUARTER, MAX_24BIT_UINT_VALUE};
