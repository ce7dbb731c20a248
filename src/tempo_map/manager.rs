use crate::error::LibResult;
use crate::file::{Division, Track, Tracks};
use crate::tempo_map::utilities::{get_tempo_map, rewrite_file, rewrite_tempo_events};
use crate::tempo_map::{Tempo, TempoMap, TimeSignature};
use crate::MidiFile;
use log::{debug, error};

/// Where a [`TempoMapManager`] writes its changes when they are saved.
enum Target<'a> {
    Standalone,
    Tracks(&'a mut [Track]),
    File(&'a mut MidiFile),
}

/// Edits a tempo map. A manager bound to tracks (or to a file) rewrites their tempo and time
/// signature events to match the edited map when [`TempoMapManager::save_changes`] is called, or
/// when it is dropped with unsaved edits. A bound manager that was never edited leaves its tracks
/// alone.
///
/// Saving is skipped when the manager is dropped during a panic. Errors from a save that happens on
/// drop can only be logged, so call `save_changes` to see them.
pub struct TempoMapManager<'a> {
    tempo_map: TempoMap,
    target: Target<'a>,
    saved: bool,
}

impl<'a> TempoMapManager<'a> {
    /// A manager that builds a new map and is not bound to any tracks.
    pub fn new(division: Division) -> Self {
        Self::with_tempo_map(TempoMap::new(division))
    }

    /// A standalone manager that starts from a copy of `tempo_map`.
    pub fn with_tempo_map(tempo_map: TempoMap) -> Self {
        Self {
            tempo_map,
            target: Target::Standalone,
            saved: false,
        }
    }

    /// A manager bound to `source`, starting from the tempo map its events describe. Fails if
    /// `source` has no tracks, since there would be nowhere to write.
    pub fn with_tracks<S: Tracks + ?Sized>(
        source: &'a mut S,
        division: Division,
    ) -> crate::Result<Self> {
        Ok(Self::with_tracks_inner(source.as_tracks_mut(), division)?)
    }

    fn with_tracks_inner(tracks: &'a mut [Track], division: Division) -> LibResult<Self> {
        if tracks.is_empty() {
            return crate::error::EmptyCollectionSnafu {
                site: site!(),
                description: "a tempo map manager needs a track to write changes to",
            }
            .fail();
        }
        let tempo_map = get_tempo_map(&*tracks, division);
        debug!(
            "managing a tempo map over {} tracks with {} tempo and {} time signature changes",
            tracks.len(),
            tempo_map.tempo_changes().count(),
            tempo_map.time_signature_changes().count()
        );
        // the tracks already hold this map; nothing is written until an edit
        Ok(Self {
            tempo_map,
            target: Target::Tracks(tracks),
            saved: true,
        })
    }

    /// A manager bound to a whole file. Unlike [`TempoMapManager::with_tracks`] this works for a
    /// file without tracks: one is added on save if the map has changes. Saving also sets the
    /// file's division.
    pub fn for_file(file: &'a mut MidiFile) -> Self {
        let tempo_map = file.tempo_map();
        Self {
            tempo_map,
            target: Target::File(file),
            saved: true,
        }
    }

    /// The map as edited so far.
    pub fn tempo_map(&self) -> &TempoMap {
        &self.tempo_map
    }

    /// Sets the tempo from `time` on. A tempo already set at exactly `time` is overwritten.
    pub fn set_tempo(&mut self, time: u64, tempo: Tempo) {
        let changed = self.tempo_map.tempo_line_mut().set_value(time, tempo);
        self.touch(changed);
    }

    /// Sets the time signature from `time` on. A time signature already set at exactly `time` is
    /// overwritten.
    pub fn set_time_signature(&mut self, time: u64, time_signature: TimeSignature) {
        let changed = self
            .tempo_map
            .time_signature_line_mut()
            .set_value(time, time_signature);
        self.touch(changed);
    }

    /// Removes tempo changes at or after `start`.
    pub fn clear_tempo(&mut self, start: u64) {
        let changed = self.tempo_map.tempo_line_mut().delete_values_from(start);
        self.touch(changed);
    }

    /// Removes tempo changes in `start..end`.
    pub fn clear_tempo_range(&mut self, start: u64, end: u64) {
        let changed = self.tempo_map.tempo_line_mut().delete_values(start, end);
        self.touch(changed);
    }

    /// Removes time signature changes at or after `start`.
    pub fn clear_time_signature(&mut self, start: u64) {
        let changed = self
            .tempo_map
            .time_signature_line_mut()
            .delete_values_from(start);
        self.touch(changed);
    }

    /// Removes time signature changes in `start..end`.
    pub fn clear_time_signature_range(&mut self, start: u64, end: u64) {
        let changed = self
            .tempo_map
            .time_signature_line_mut()
            .delete_values(start, end);
        self.touch(changed);
    }

    /// Removes every change. The division is kept.
    pub fn clear_tempo_map(&mut self) {
        let tempo = self.tempo_map.tempo_line_mut().clear();
        let time_signature = self.tempo_map.time_signature_line_mut().clear();
        self.touch(tempo || time_signature);
    }

    /// Replaces the whole map, division included.
    pub fn replace_tempo_map(&mut self, tempo_map: &TempoMap) {
        let changed = &self.tempo_map != tempo_map;
        self.tempo_map.set_division(tempo_map.division());
        self.tempo_map
            .tempo_line_mut()
            .replace_values(tempo_map.tempo_line());
        self.tempo_map
            .time_signature_line_mut()
            .replace_values(tempo_map.time_signature_line());
        self.touch(changed);
    }

    /// Writes the map into the bound tracks. Calling it again without further edits does
    /// nothing. For a standalone manager it only marks the map as saved.
    pub fn save_changes(&mut self) -> crate::Result<()> {
        if self.saved {
            return Ok(());
        }
        match &mut self.target {
            Target::Standalone => {}
            Target::Tracks(tracks) => {
                debug!("saving tempo map changes to {} tracks", tracks.len());
                rewrite_tempo_events(tracks, &self.tempo_map)?;
            }
            Target::File(file) => {
                debug!("saving tempo map changes to a file");
                rewrite_file(file, &self.tempo_map)?;
            }
        }
        self.saved = true;
        Ok(())
    }

    /// Consumes the manager, saving if needed, and returns the final map.
    pub fn finish(mut self) -> crate::Result<TempoMap> {
        self.save_changes()?;
        Ok(self.tempo_map.clone())
    }

    fn touch(&mut self, changed: bool) {
        if changed {
            self.saved = false;
        }
    }
}

impl Drop for TempoMapManager<'_> {
    fn drop(&mut self) {
        if self.saved || std::thread::panicking() {
            return;
        }
        if let Err(e) = self.save_changes() {
            error!("unable to save tempo map changes: {}", e);
        }
    }
}
