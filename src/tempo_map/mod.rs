/*!
The `tempo_map` module describes how ticks relate to real and musical time. A [`TempoMap`] is an
immutable snapshot, a [`TempoMapManager`] edits one and writes it back into tracks, and
[`replace_tempo_map`] rewrites the tempo and time signature events of a set of tracks so that they
describe a given map.
!*/

mod convert;
mod manager;
mod map;
mod tempo;
mod time_signature;
mod utilities;

pub use convert::BarBeatTicks;
pub use manager::TempoMapManager;
pub use map::TempoMap;
pub use tempo::Tempo;
pub use time_signature::TimeSignature;
pub use utilities::{get_tempo_map, manage_tempo_map, replace_tempo_map, replace_tempo_map_in_file};
