use crate::error::LibResult;
use crate::file::{encode_events, Event, Track, Tracks};
use crate::interaction::detect::detect_objects;
use crate::interaction::{
    EventOrigin, ManagedObject, NoteDetectionSettings, ObjectDetectionSettings, ObjectType,
    TimedEventDetectionSettings, TimedObject,
};
use log::{debug, error, trace};
use std::cmp::Ordering;

/// Orders objects whose events fall on the same time. Returning [`Ordering::Equal`] keeps the
/// original order of the events.
pub type ObjectsComparer = Box<dyn Fn(&TimedObject, &TimedObject) -> Ordering>;

/// Edits the objects of a set of tracks and writes them back.
///
/// Construction detects the objects once. Objects of type `T` can be read and changed through
/// [`TimedObjectsManager::objects_mut`], including adding and removing them. Everything else
/// that was detected is kept aside and written back unchanged.
///
/// [`TimedObjectsManager::save_changes`] re-encodes all objects into the tracks. If the objects
/// were touched since the last save, dropping the manager does it, unless the drop happens during
/// a panic. Errors on drop can only be logged.
pub struct TimedObjectsManager<'a, T: ManagedObject> {
    tracks: &'a mut [Track],
    objects: Vec<T>,
    background: Vec<TimedObject>,
    comparer: Option<ObjectsComparer>,
    committed: bool,
}

impl<'a, T: ManagedObject> TimedObjectsManager<'a, T> {
    pub fn new<S: Tracks + ?Sized>(
        source: &'a mut S,
        settings: &ObjectDetectionSettings,
        comparer: Option<ObjectsComparer>,
    ) -> Self {
        Self::with_settings(
            source.as_tracks_mut(),
            &settings.timed_event_detection_settings,
            &settings.note_detection_settings,
            comparer,
        )
    }

    pub(crate) fn with_settings(
        tracks: &'a mut [Track],
        event_settings: &TimedEventDetectionSettings,
        note_settings: &NoteDetectionSettings,
        comparer: Option<ObjectsComparer>,
    ) -> Self {
        let note_settings = if T::OBJECT_TYPE.contains(ObjectType::NOTE) {
            Some(note_settings)
        } else {
            None
        };
        let mut objects = Vec::new();
        let mut background = Vec::new();
        for object in detect_objects(tracks, event_settings, note_settings) {
            match T::from_timed_object(object) {
                Ok(managed) => objects.push(managed),
                Err(other) => background.push(other),
            }
        }
        debug!(
            "managing {} objects with {} in the background over {} tracks",
            objects.len(),
            background.len(),
            tracks.len()
        );
        Self {
            tracks,
            objects,
            background,
            comparer,
            committed: false,
        }
    }

    pub fn objects(&self) -> &Vec<T> {
        &self.objects
    }

    /// The managed objects. Taking them marks the manager as having unsaved changes, so a later
    /// drop writes them back even after an earlier [`TimedObjectsManager::save_changes`].
    pub fn objects_mut(&mut self) -> &mut Vec<T> {
        self.committed = false;
        &mut self.objects
    }

    /// Writes the objects back into the tracks. Every call writes the current objects, and
    /// writing the same objects twice gives the same tracks.
    pub fn save_changes(&mut self) -> crate::Result<()> {
        let owners: Vec<TimedObject> = self
            .background
            .iter()
            .cloned()
            .chain(self.objects.iter().cloned().map(T::into_timed_object))
            .collect();
        commit_objects(&mut *self.tracks, &owners, self.comparer.as_ref())?;
        self.committed = true;
        Ok(())
    }
}

impl<T: ManagedObject> Drop for TimedObjectsManager<'_, T> {
    fn drop(&mut self) {
        if self.committed || std::thread::panicking() {
            return;
        }
        if let Err(e) = self.save_changes() {
            error!("unable to save the managed objects: {}", e);
        }
    }
}

/// One event waiting to be placed.
struct Placed {
    time: u64,
    owner: usize,
    position: Option<usize>,
    seq: usize,
    event: Event,
}

/// The track index an event goes back to. Out of range origins fall back to the first track.
fn track_of(
    origin: Option<EventOrigin>,
    fallback: Option<EventOrigin>,
    track_count: usize,
) -> usize {
    let track = origin.or(fallback).map_or(0, |o| o.track());
    if track < track_count {
        track
    } else {
        0
    }
}

/// Re-encodes `owners` into `tracks`.
///
/// Each track's events are ordered by time, then by `comparer` on their owning objects, then by
/// their original position (new events after all original ones), then by the order they were
/// produced in. Without a comparer an unchanged set of objects gives back the original tracks.
/// All tracks are encoded before any is replaced.
pub(crate) fn commit_objects(
    tracks: &mut [Track],
    owners: &[TimedObject],
    comparer: Option<&ObjectsComparer>,
) -> LibResult<()> {
    if tracks.is_empty() {
        return Ok(());
    }
    let track_count = tracks.len();
    let mut placed: Vec<Vec<Placed>> = (0..track_count).map(|_| Vec::new()).collect();
    let mut seq = 0usize;
    for (owner, object) in owners.iter().enumerate() {
        match object {
            TimedObject::Event(timed_event) => {
                let origin = timed_event.origin();
                placed[track_of(origin, None, track_count)].push(Placed {
                    time: timed_event.time(),
                    owner,
                    position: origin.map(|o| o.index()),
                    seq,
                    event: timed_event.event().clone(),
                });
                seq += 1;
            }
            TimedObject::Note(note) => {
                let on_origin = note.on_origin();
                let off_origin = note.off_origin();
                placed[track_of(on_origin, off_origin, track_count)].push(Placed {
                    time: note.time(),
                    owner,
                    position: on_origin.map(|o| o.index()),
                    seq,
                    event: note.note_on_event(),
                });
                placed[track_of(off_origin, on_origin, track_count)].push(Placed {
                    time: note.end_time(),
                    owner,
                    position: off_origin.map(|o| o.index()),
                    seq: seq + 1,
                    event: note.note_off_event(),
                });
                seq += 2;
            }
            TimedObject::Rest(_) => {}
        }
    }

    let mut encoded = Vec::with_capacity(track_count);
    for (track_ix, mut events) in placed.into_iter().enumerate() {
        events.sort_by(|a, b| {
            a.time
                .cmp(&b.time)
                .then_with(|| match comparer {
                    Some(compare) if a.owner != b.owner => {
                        compare(&owners[a.owner], &owners[b.owner])
                    }
                    _ => Ordering::Equal,
                })
                .then_with(|| {
                    a.position
                        .unwrap_or(usize::MAX)
                        .cmp(&b.position.unwrap_or(usize::MAX))
                })
                .then_with(|| a.seq.cmp(&b.seq))
        });
        trace!("encoding {} events for track {}", events.len(), track_ix);
        encoded.push(encode_events(events.into_iter().map(|p| (p.time, p.event)))?);
    }
    for (track, events) in tracks.iter_mut().zip(encoded) {
        track.replace_events(events);
    }
    Ok(())
}
