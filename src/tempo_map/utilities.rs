use crate::error::LibResult;
use crate::file::{encode_events, Division, Event, MetaEvent, Track, Tracks};
use crate::tempo_map::{Tempo, TempoMap, TempoMapManager, TimeSignature};
use crate::value_line::ValueChange;
use crate::MidiFile;
use log::{debug, trace, warn};

/// Collects the tempo map described by the set tempo and time signature events of `source`.
/// Events from all tracks are merged by absolute time, ties going to the lower track index. When
/// two events of one kind share a time, the later one wins.
pub fn get_tempo_map<S: Tracks + ?Sized>(source: &S, division: Division) -> TempoMap {
    let mut merged: Vec<(u64, &Event)> = Vec::new();
    for track in source.as_tracks() {
        merged.extend(
            track
                .timed_events()
                .filter(|(_, e)| e.event().is_set_tempo() || e.event().is_time_signature())
                .map(|(time, e)| (time, e.event())),
        );
    }
    // stable, so equal times stay in track order
    merged.sort_by_key(|(time, _)| *time);
    let mut tempo_map = TempoMap::new(division);
    for (time, event) in merged {
        match event {
            Event::Meta(MetaEvent::SetTempo(value)) => {
                tempo_map
                    .tempo_line_mut()
                    .set_value(time, Tempo::from(*value));
            }
            Event::Meta(MetaEvent::TimeSignature(value)) => {
                tempo_map
                    .time_signature_line_mut()
                    .set_value(time, TimeSignature::from(*value));
            }
            _ => {}
        }
    }
    tempo_map
}

/// Rewrites the tempo and time signature events of `source` so that [`get_tempo_map`] on the
/// result, with `tempo_map`'s division, equals `tempo_map`. Other events keep their absolute
/// times. The division itself is not stored in tracks; see [`replace_tempo_map_in_file`].
pub fn replace_tempo_map<S: Tracks + ?Sized>(
    source: &mut S,
    tempo_map: &TempoMap,
) -> crate::Result<()> {
    Ok(rewrite_tempo_events(source.as_tracks_mut(), tempo_map)?)
}

/// Like [`replace_tempo_map`], and also sets the file's division. A file without tracks gets an
/// empty one first when the map has changes to write.
pub fn replace_tempo_map_in_file(file: &mut MidiFile, tempo_map: &TempoMap) -> crate::Result<()> {
    rewrite_file(file, tempo_map)
}

/// A [`TempoMapManager`] bound to `source`. Fails if `source` has no tracks.
pub fn manage_tempo_map<S: Tracks + ?Sized>(
    source: &mut S,
    division: Division,
) -> crate::Result<TempoMapManager<'_>> {
    TempoMapManager::with_tracks(source, division)
}

pub(crate) fn rewrite_file(file: &mut MidiFile, tempo_map: &TempoMap) -> crate::Result<()> {
    if file.tracks_len() == 0 && !tempo_map.is_empty() {
        debug!("adding a track to hold the tempo map");
        file.push_track(Track::new())?;
    }
    rewrite_tempo_events(file.as_tracks_mut(), tempo_map)?;
    file.set_division(tempo_map.division());
    Ok(())
}

/// The changes of one kind that still need an event, and the track new events go into.
struct Pending<V> {
    changes: Vec<ValueChange<V>>,
    claimed: Vec<bool>,
    host: usize,
}

impl<V: Copy + PartialEq> Pending<V> {
    fn new<'a, I>(changes: I, host: Option<usize>) -> Self
    where
        I: Iterator<Item = &'a ValueChange<V>>,
        V: 'a,
    {
        let changes: Vec<ValueChange<V>> = changes.copied().collect();
        let claimed = vec![false; changes.len()];
        Self {
            changes,
            claimed,
            host: host.unwrap_or(0),
        }
    }

    /// Claims the change matching an existing event. Returns `false` if the event has to go.
    fn claim(&mut self, time: u64, value: V) -> bool {
        let found = self
            .changes
            .iter()
            .zip(self.claimed.iter())
            .position(|(c, claimed)| !claimed && c.time() == time && c.value() == value);
        match found {
            Some(ix) => {
                self.claimed[ix] = true;
                true
            }
            None => false,
        }
    }

    fn unclaimed(&self) -> impl Iterator<Item = &ValueChange<V>> {
        self.changes
            .iter()
            .zip(self.claimed.iter())
            .filter(|(_, claimed)| !**claimed)
            .map(|(c, _)| c)
    }
}

/// Keeps each existing event that already matches a change of `tempo_map` (the first one in track
/// order), removes every other tempo and time signature event, and inserts the remaining changes
/// into the first track that held an event of that kind, else the first track. Inserted events go
/// after the events already at their time. The new event lists are swapped in only after every
/// track has been encoded.
pub(crate) fn rewrite_tempo_events(tracks: &mut [Track], tempo_map: &TempoMap) -> LibResult<()> {
    if tracks.is_empty() {
        if !tempo_map.is_empty() {
            warn!("there are no tracks to write the tempo map to");
        }
        return Ok(());
    }
    let tempo_host = tracks
        .iter()
        .position(|t| t.events().any(|e| e.event().is_set_tempo()));
    let time_signature_host = tracks
        .iter()
        .position(|t| t.events().any(|e| e.event().is_time_signature()));
    let mut tempos = Pending::new(tempo_map.tempo_changes(), tempo_host);
    let mut time_signatures = Pending::new(tempo_map.time_signature_changes(), time_signature_host);

    let mut rebuilt: Vec<Option<Vec<(u64, Event)>>> = Vec::with_capacity(tracks.len());
    for (track_ix, track) in tracks.iter().enumerate() {
        let mut changed = false;
        let mut timed = Vec::with_capacity(track.events_len());
        for (time, track_event) in track.timed_events() {
            let keep = match track_event.event() {
                Event::Meta(MetaEvent::SetTempo(value)) => tempos.claim(time, Tempo::from(*value)),
                Event::Meta(MetaEvent::TimeSignature(value)) => {
                    time_signatures.claim(time, TimeSignature::from(*value))
                }
                _ => true,
            };
            if keep {
                timed.push((time, track_event.event().clone()));
            } else {
                trace!("removing {:?} at {} from track {}", track_event.event(), time, track_ix);
                changed = true;
            }
        }
        rebuilt.push(if changed { Some(timed) } else { None });
    }

    insert_unclaimed(
        tracks,
        &mut rebuilt,
        tempos.host,
        tempos
            .unclaimed()
            .map(|c| (c.time(), Event::Meta(MetaEvent::SetTempo(c.value().into())))),
    );
    insert_unclaimed(
        tracks,
        &mut rebuilt,
        time_signatures.host,
        time_signatures
            .unclaimed()
            .map(|c| (c.time(), Event::Meta(MetaEvent::TimeSignature(c.value().into())))),
    );

    let mut encoded = Vec::with_capacity(tracks.len());
    for (track_ix, timed) in rebuilt.into_iter().enumerate() {
        match timed {
            Some(timed) => encoded.push((track_ix, encode_events(timed)?)),
            None => continue,
        }
    }
    for (track_ix, events) in encoded {
        debug!("rewrote the tempo map events of track {}", track_ix);
        tracks[track_ix].replace_events(events);
    }
    Ok(())
}

fn insert_unclaimed<I>(
    tracks: &[Track],
    rebuilt: &mut [Option<Vec<(u64, Event)>>],
    host: usize,
    additions: I,
) where
    I: Iterator<Item = (u64, Event)>,
{
    let additions: Vec<(u64, Event)> = additions.collect();
    if additions.is_empty() {
        return;
    }
    let host = if host < tracks.len() { host } else { 0 };
    debug!("inserting {} events into track {}", additions.len(), host);
    let timed = rebuilt[host].get_or_insert_with(|| {
        tracks[host]
            .timed_events()
            .map(|(time, e)| (time, e.event().clone()))
            .collect()
    });
    timed.extend(additions);
    // stable, so new events land after the existing events at the same time
    timed.sort_by_key(|(time, _)| *time);
}
