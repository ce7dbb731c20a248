use crate::error::LibResult;
use crate::file::{Event, Track, Tracks};
use crate::interaction::detect::detect_objects;
use crate::interaction::manager::commit_objects;
use crate::interaction::{
    EventOrigin, ManagedObject, Note, NoteDetectionSettings, ObjectType, ObjectsComparer,
    ProcessingHint, TimedEvent, TimedEventDetectionSettings, TimedObject, TimedObjectsManager,
};
use log::debug;
use snafu::ResultExt;
use std::collections::HashSet;
use std::convert::TryFrom;

/// Runs `action` on every note for which `predicate` returns `true` and writes the result back.
/// Returns the number of notes the predicate matched.
///
/// With [`ProcessingHint::TimeOrLengthCanBeChanged`], notes may be moved or resized and the
/// events are re-sorted by time if any was. With [`ProcessingHint::None`] events are updated where
/// they are and changes to time or length are ignored.
pub fn process_notes<S, A, P>(
    source: &mut S,
    action: A,
    predicate: P,
    settings: &NoteDetectionSettings,
    hint: ProcessingHint,
) -> crate::Result<usize>
where
    S: Tracks + ?Sized,
    A: FnMut(&mut Note),
    P: Fn(&Note) -> bool,
{
    Ok(process_objects(
        source.as_tracks_mut(),
        &TimedEventDetectionSettings::default(),
        settings,
        action,
        predicate,
        hint,
    )?)
}

/// Like [`process_notes`] for timed events. Note events are processed like any other event.
pub fn process_timed_events<S, A, P>(
    source: &mut S,
    action: A,
    predicate: P,
    settings: &TimedEventDetectionSettings,
    hint: ProcessingHint,
) -> crate::Result<usize>
where
    S: Tracks + ?Sized,
    A: FnMut(&mut TimedEvent),
    P: Fn(&TimedEvent) -> bool,
{
    Ok(process_objects(
        source.as_tracks_mut(),
        settings,
        &NoteDetectionSettings::default(),
        action,
        predicate,
        hint,
    )?)
}

/// Removes every note for which `predicate` returns `true`. The remaining events keep their
/// absolute times. Returns the number of notes removed.
pub fn remove_notes<S, P>(
    source: &mut S,
    predicate: P,
    settings: &NoteDetectionSettings,
) -> crate::Result<usize>
where
    S: Tracks + ?Sized,
    P: Fn(&Note) -> bool,
{
    Ok(remove_objects(
        source.as_tracks_mut(),
        &TimedEventDetectionSettings::default(),
        settings,
        predicate,
    )?)
}

/// Removes every timed event for which `predicate` returns `true`. The remaining events keep their
/// absolute times. Returns the number of events removed.
pub fn remove_timed_events<S, P>(
    source: &mut S,
    predicate: P,
    settings: &TimedEventDetectionSettings,
) -> crate::Result<usize>
where
    S: Tracks + ?Sized,
    P: Fn(&TimedEvent) -> bool,
{
    Ok(remove_objects(
        source.as_tracks_mut(),
        settings,
        &NoteDetectionSettings::default(),
        predicate,
    )?)
}

/// A manager over the notes of `source`.
pub fn manage_notes<'a, S: Tracks + ?Sized>(
    source: &'a mut S,
    settings: &NoteDetectionSettings,
    comparer: Option<ObjectsComparer>,
) -> TimedObjectsManager<'a, Note> {
    TimedObjectsManager::with_settings(
        source.as_tracks_mut(),
        &TimedEventDetectionSettings::default(),
        settings,
        comparer,
    )
}

/// A manager over the timed events of `source`.
pub fn manage_timed_events<'a, S: Tracks + ?Sized>(
    source: &'a mut S,
    settings: &TimedEventDetectionSettings,
    comparer: Option<ObjectsComparer>,
) -> TimedObjectsManager<'a, TimedEvent> {
    TimedObjectsManager::with_settings(
        source.as_tracks_mut(),
        settings,
        &NoteDetectionSettings::default(),
        comparer,
    )
}

fn note_settings_for<T: ManagedObject>(
    settings: &NoteDetectionSettings,
) -> Option<&NoteDetectionSettings> {
    if T::OBJECT_TYPE.contains(ObjectType::NOTE) {
        Some(settings)
    } else {
        None
    }
}

fn process_objects<T, A, P>(
    tracks: &mut [Track],
    event_settings: &TimedEventDetectionSettings,
    note_settings: &NoteDetectionSettings,
    mut action: A,
    predicate: P,
    hint: ProcessingHint,
) -> LibResult<usize>
where
    T: ManagedObject,
    A: FnMut(&mut T),
    P: Fn(&T) -> bool,
{
    let detected = detect_objects(tracks, event_settings, note_settings_for::<T>(note_settings));
    let mut matched = 0usize;
    let mut timing_changed = false;
    let mut owners = Vec::with_capacity(detected.len());
    let mut changed = Vec::new();
    for object in detected {
        match T::from_timed_object(object) {
            Ok(mut managed) if predicate(&managed) => {
                let before = managed.timing();
                action(&mut managed);
                timing_changed |= managed.timing() != before;
                matched += 1;
                changed.push(owners.len());
                owners.push(managed.into_timed_object());
            }
            Ok(managed) => owners.push(managed.into_timed_object()),
            Err(other) => owners.push(other),
        }
    }
    if matched == 0 {
        return Ok(0);
    }
    if timing_changed && hint == ProcessingHint::TimeOrLengthCanBeChanged {
        debug!("{} objects processed, re-sorting events by time", matched);
        commit_objects(tracks, &owners, None)?;
    } else {
        debug!("{} objects processed, updating events in place", matched);
        for ix in changed {
            for (origin, event) in events_with_origins(&owners[ix]) {
                write_in_place(tracks, origin, event);
            }
        }
    }
    Ok(matched)
}

/// The events of an object paired with where they came from. Events without an origin are
/// skipped.
fn events_with_origins(object: &TimedObject) -> Vec<(EventOrigin, Event)> {
    match object {
        TimedObject::Event(timed_event) => timed_event
            .origin()
            .map(|origin| (origin, timed_event.event().clone()))
            .into_iter()
            .collect(),
        TimedObject::Note(note) => {
            let mut events = Vec::with_capacity(2);
            if let Some(origin) = note.on_origin() {
                events.push((origin, note.note_on_event()));
            }
            if let Some(origin) = note.off_origin() {
                events.push((origin, note.note_off_event()));
            }
            events
        }
        TimedObject::Rest(_) => Vec::new(),
    }
}

fn write_in_place(tracks: &mut [Track], origin: EventOrigin, event: Event) {
    if let Some(track_event) = tracks
        .get_mut(origin.track())
        .and_then(|track| track.event_mut(origin.index()))
    {
        *track_event.event_mut() = event;
    }
}

fn remove_objects<T, P>(
    tracks: &mut [Track],
    event_settings: &TimedEventDetectionSettings,
    note_settings: &NoteDetectionSettings,
    predicate: P,
) -> LibResult<usize>
where
    T: ManagedObject,
    P: Fn(&T) -> bool,
{
    let mut removed = 0usize;
    let mut doomed: HashSet<EventOrigin> = HashSet::new();
    for object in detect_objects(tracks, event_settings, note_settings_for::<T>(note_settings)) {
        if let Ok(managed) = T::from_timed_object(object) {
            if predicate(&managed) {
                removed += 1;
                for (origin, _) in events_with_origins(&managed.into_timed_object()) {
                    doomed.insert(origin);
                }
            }
        }
    }
    if removed == 0 {
        return Ok(0);
    }
    let mut rebuilt = Vec::with_capacity(tracks.len());
    for (track_ix, track) in tracks.iter().enumerate() {
        let mut carry = 0u64;
        let mut events = Vec::with_capacity(track.events_len());
        for (index, track_event) in track.events().enumerate() {
            if doomed.contains(&EventOrigin::new(track_ix, index)) {
                carry += u64::from(track_event.delta_time());
                continue;
            }
            let mut kept = track_event.clone();
            let delta = u32::try_from(carry + u64::from(kept.delta_time()))
                .context(crate::error::DeltaTimeOverflowSnafu { site: site!() })?;
            kept.set_delta_time(delta);
            carry = 0;
            events.push(kept);
        }
        rebuilt.push(events);
    }
    for (track, events) in tracks.iter_mut().zip(rebuilt) {
        track.replace_events(events);
    }
    debug!("removed {} objects", removed);
    Ok(removed)
}
