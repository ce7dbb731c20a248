use crate::core::{Channel, NoteNumber};
use crate::file::Tracks;
use crate::interaction::detect::{collect_timed_events, detect_objects};
use crate::interaction::{
    Note, NoteDetectionSettings, ObjectDetectionSettings, ObjectType, Rest, RestSeparationPolicy,
    Timed, TimedEvent, TimedEventDetectionSettings, TimedObject,
};
use std::collections::HashMap;

/// Every event of `source` with its absolute time, ordered by time. Events of different tracks
/// at the same time are ordered by track.
pub fn get_timed_events<S: Tracks + ?Sized>(
    source: &S,
    settings: &TimedEventDetectionSettings,
) -> Vec<TimedEvent> {
    collect_timed_events(source.as_tracks(), settings)
}

/// The notes of `source`, ordered by the position of their note-on events.
pub fn get_notes<S: Tracks + ?Sized>(source: &S, settings: &NoteDetectionSettings) -> Vec<Note> {
    detect_objects(
        source.as_tracks(),
        &TimedEventDetectionSettings::default(),
        Some(settings),
    )
    .into_iter()
    .filter_map(|object| match object {
        TimedObject::Note(note) => Some(note),
        _ => None,
    })
    .collect()
}

/// The objects of the kinds in `object_type`, ordered by time.
///
/// Without [`ObjectType::NOTE`], note events come out as plain timed events if
/// [`ObjectType::TIMED_EVENT`] is asked for. With [`ObjectType::REST`], a rest is placed wherever a
/// note starts after every earlier note (of the same channel and/or note number, depending on the
/// separation policy) has ended.
pub fn get_objects<S: Tracks + ?Sized>(
    source: &S,
    object_type: ObjectType,
    settings: &ObjectDetectionSettings,
) -> Vec<TimedObject> {
    let tracks = source.as_tracks();
    let wants_notes = object_type.contains(ObjectType::NOTE);
    let wants_events = object_type.contains(ObjectType::TIMED_EVENT);
    let wants_rests = object_type.contains(ObjectType::REST);

    let detected = if wants_notes || wants_rests {
        detect_objects(
            tracks,
            &settings.timed_event_detection_settings,
            Some(&settings.note_detection_settings),
        )
    } else {
        Vec::new()
    };

    let mut result: Vec<TimedObject> = if wants_notes {
        detected
            .iter()
            .filter(|o| match o {
                TimedObject::Note(_) => true,
                TimedObject::Event(_) => wants_events,
                TimedObject::Rest(_) => false,
            })
            .cloned()
            .collect()
    } else if wants_events {
        collect_timed_events(tracks, &settings.timed_event_detection_settings)
            .into_iter()
            .map(TimedObject::Event)
            .collect()
    } else {
        Vec::new()
    };

    if wants_rests {
        let notes = detected.iter().filter_map(|o| match o {
            TimedObject::Note(note) => Some(note),
            _ => None,
        });
        for rest in find_rests(notes, settings.rest_detection_settings.rest_separation_policy) {
            insert_by_time(&mut result, TimedObject::Rest(rest));
        }
    }
    result
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
enum NoteDescriptor {
    All,
    Channel(Channel),
    NoteNumber(NoteNumber),
    Both(Channel, NoteNumber),
}

fn descriptor(note: &Note, policy: RestSeparationPolicy) -> NoteDescriptor {
    match policy {
        RestSeparationPolicy::NoSeparation => NoteDescriptor::All,
        RestSeparationPolicy::SeparateByChannel => NoteDescriptor::Channel(note.channel()),
        RestSeparationPolicy::SeparateByNoteNumber => {
            NoteDescriptor::NoteNumber(note.note_number())
        }
        RestSeparationPolicy::SeparateByChannelAndNoteNumber => {
            NoteDescriptor::Both(note.channel(), note.note_number())
        }
    }
}

/// Notes must come in start order. Each descriptor's first rest starts at zero.
fn find_rests<'a, I>(notes: I, policy: RestSeparationPolicy) -> Vec<Rest>
where
    I: Iterator<Item = &'a Note>,
{
    let mut last_end_times: HashMap<NoteDescriptor, u64> = HashMap::new();
    let mut rests = Vec::new();
    for note in notes {
        let last_end = last_end_times.entry(descriptor(note, policy)).or_insert(0);
        if note.time() > *last_end {
            rests.push(Rest::new(
                *last_end,
                note.time() - *last_end,
                if policy.sets_channel() {
                    Some(note.channel())
                } else {
                    None
                },
                if policy.sets_note_number() {
                    Some(note.note_number())
                } else {
                    None
                },
            ));
        }
        *last_end = (*last_end).max(note.end_time());
    }
    rests
}

/// Inserts after every object whose time is not greater.
fn insert_by_time(objects: &mut Vec<TimedObject>, object: TimedObject) {
    let time = object.time();
    let ix = objects
        .iter()
        .rposition(|o| o.time() <= time)
        .map_or(0, |ix| ix + 1);
    objects.insert(ix, object);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(channel: u8, number: u8, time: u64, length: u64) -> Note {
        let mut note = Note::new(NoteNumber::new(number), length, time);
        note.set_channel(Channel::new(channel));
        note
    }

    #[test]
    fn rests_without_separation() {
        let notes = vec![note(0, 60, 0, 10), note(1, 61, 5, 10), note(0, 60, 30, 5)];
        let rests = find_rests(notes.iter(), RestSeparationPolicy::NoSeparation);
        assert_eq!(vec![Rest::new(15, 15, None, None)], rests);
    }

    #[test]
    fn rests_by_channel() {
        let notes = vec![note(0, 60, 0, 10), note(1, 61, 5, 10), note(0, 60, 30, 5)];
        let rests = find_rests(notes.iter(), RestSeparationPolicy::SeparateByChannel);
        assert_eq!(
            vec![
                Rest::new(0, 5, Some(Channel::new(1)), None),
                Rest::new(10, 20, Some(Channel::new(0)), None),
            ],
            rests
        );
    }
}
