/*!
Timed objects and tempo maps over an in-memory model of MIDI tracks.

- [`interaction`] detects notes and other timed objects in tracks, and writes edited objects back
  with consistent delta times.
- [`tempo_map`] collects tempo and time signature changes into a [`TempoMap`], converts between
  ticks and real or musical time, and rewrites tracks to match an edited map.

The event model ([`Track`], [`Event`], [`MidiFile`] and friends) is a value model only. Reading and
writing Standard MIDI Files is left to other crates.
!*/

#[macro_use]
mod error;
#[macro_use]
mod macros;

pub mod core;
pub mod file;
pub mod interaction;
pub mod tempo_map;
mod text;
pub mod value_line;

pub use error::{Error, Result};
pub use file::{
    Division, Event, Format, FrameRate, Header, KeyAccidentals, KeyMode, KeySignatureValue,
    MetaEvent, MicrosecondsPerQuarter, QuarterNoteDivision, SmpteRate, SysexEvent,
    SysexEventType, TimeSignatureValue, Track, TrackEvent, Tracks,
};
pub use interaction::{
    get_notes, get_objects, get_timed_events, manage_notes, manage_timed_events, process_notes,
    process_timed_events, remove_notes, remove_timed_events,
};
pub use tempo_map::{
    get_tempo_map, manage_tempo_map, replace_tempo_map, replace_tempo_map_in_file, TempoMap,
    TempoMapManager,
};
pub use text::Text;

use crate::error::LibResult;
use snafu::ResultExt;
use std::convert::TryFrom;

/// A header and its tracks.
#[derive(Clone, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct MidiFile {
    header: Header,
    tracks: Vec<Track>,
}

impl MidiFile {
    /// An empty file with the default header.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(header: Header) -> Self {
        Self {
            header,
            tracks: Vec::new(),
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn division(&self) -> Division {
        *self.header.division()
    }

    pub fn tracks_len(&self) -> usize {
        self.tracks.len()
    }

    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    pub fn track(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn track_mut(&mut self, index: usize) -> Option<&mut Track> {
        self.tracks.get_mut(index)
    }

    /// Add a track. Fails if the file would hold more tracks than a header can count.
    pub fn push_track(&mut self, track: Track) -> Result<()> {
        Ok(self.push_track_inner(track)?)
    }

    fn push_track_inner(&mut self, track: Track) -> LibResult<()> {
        u16::try_from(self.tracks.len() + 1)
            .context(error::TooManyTracksSnafu { site: site!() })?;
        self.tracks.push(track);
        Ok(())
    }

    /// The format that fits the current number of tracks: [`Format::Single`] for exactly one
    /// track and [`Format::Multi`] otherwise.
    pub fn format_for_tracks(&self) -> Format {
        if self.tracks.len() == 1 {
            Format::Single
        } else {
            Format::Multi
        }
    }

    /// The tempo map described by the file's events and division.
    pub fn tempo_map(&self) -> TempoMap {
        get_tempo_map(self, self.division())
    }

    /// Rewrites the file to describe `tempo_map`, division included.
    pub fn replace_tempo_map(&mut self, tempo_map: &TempoMap) -> Result<()> {
        replace_tempo_map_in_file(self, tempo_map)
    }

    /// A manager over the file's tempo map.
    pub fn manage_tempo_map(&mut self) -> TempoMapManager<'_> {
        TempoMapManager::for_file(self)
    }

    pub(crate) fn set_division(&mut self, division: Division) {
        self.header.set_division(division)
    }
}
