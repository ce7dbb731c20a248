//! Rebuilds timed objects from delta-time encoded tracks.

use crate::core::{Channel, NoteNumber};
use crate::file::{Event, Track};
use crate::interaction::{
    EventOrigin, Note, NoteData, NoteDetectionSettings, NoteSearchContext,
    NoteStartDetectionPolicy, TimedEvent, TimedEventData, TimedEventDetectionSettings,
    TimedObject,
};
use log::{trace, warn};
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// How an event takes part in pairing.
pub(crate) enum Role<K> {
    Start(K),
    End(K),
    Neither,
}

/// The output of [`pair_events`], in the order of each item's defining event.
pub(crate) enum Paired<P> {
    Single(TimedEvent),
    Pair(P),
}

enum Slot<P> {
    /// A start waiting for its end. Emitted as a single if none comes.
    Pending(TimedEvent),
    Single(TimedEvent),
    Pair(P),
}

/// Pairs start and end events that share a key. An end closes the oldest open start with its key
/// under [`NoteStartDetectionPolicy::FirstNoteOn`] and the newest under
/// [`NoteStartDetectionPolicy::LastNoteOn`]. `build` decides what a pair becomes; when it returns
/// `None` both events come out as singles. Every event is used at most once and none is lost.
pub(crate) fn pair_events<K, C, B, P>(
    events: Vec<TimedEvent>,
    policy: NoteStartDetectionPolicy,
    classify: C,
    mut build: B,
) -> Vec<Paired<P>>
where
    K: Eq + Hash,
    C: Fn(&TimedEvent) -> Role<K>,
    B: FnMut(&TimedEvent, &TimedEvent) -> Option<P>,
{
    let mut slots: Vec<Slot<P>> = Vec::with_capacity(events.len());
    let mut open: HashMap<K, VecDeque<usize>> = HashMap::new();
    for event in events {
        match classify(&event) {
            Role::Start(key) => {
                open.entry(key).or_default().push_back(slots.len());
                slots.push(Slot::Pending(event));
            }
            Role::End(key) => {
                let start_ix = open.get_mut(&key).and_then(|starts| match policy {
                    NoteStartDetectionPolicy::FirstNoteOn => starts.pop_front(),
                    NoteStartDetectionPolicy::LastNoteOn => starts.pop_back(),
                });
                let start_ix = match start_ix {
                    Some(ix) => ix,
                    None => {
                        warn!("no open start for the end event at {}", event.time());
                        slots.push(Slot::Single(event));
                        continue;
                    }
                };
                let built = match &slots[start_ix] {
                    Slot::Pending(start) => build(start, &event),
                    _ => None,
                };
                match built {
                    Some(pair) => {
                        trace!(
                            "paired the start at index {} with the end at {}",
                            start_ix,
                            event.time()
                        );
                        slots[start_ix] = Slot::Pair(pair);
                    }
                    None => {
                        // the start stays pending and comes out as a single
                        slots.push(Slot::Single(event));
                    }
                }
            }
            Role::Neither => slots.push(Slot::Single(event)),
        }
    }
    slots
        .into_iter()
        .map(|slot| match slot {
            Slot::Pending(event) | Slot::Single(event) => Paired::Single(event),
            Slot::Pair(pair) => Paired::Pair(pair),
        })
        .collect()
}

/// All events of all tracks as timed events, merged by time. Ties go to the lower track, then to
/// the earlier position.
pub(crate) fn collect_timed_events(
    tracks: &[Track],
    settings: &TimedEventDetectionSettings,
) -> Vec<TimedEvent> {
    let mut timed = Vec::with_capacity(tracks.iter().map(Track::events_len).sum());
    for (track_ix, track) in tracks.iter().enumerate() {
        for (index, (time, track_event)) in track.timed_events().enumerate() {
            let origin = EventOrigin::new(track_ix, index);
            let data = TimedEventData::new(track_event.event(), time, origin);
            let mut timed_event = match &settings.constructor {
                Some(constructor) => {
                    constructor(&data).unwrap_or_else(|| data.default_timed_event())
                }
                None => data.default_timed_event(),
            };
            timed_event.set_origin(Some(origin));
            timed.push(timed_event);
        }
    }
    // stable, so equal times stay in track order
    timed.sort_by_key(TimedEvent::time);
    timed
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
struct NoteKey {
    track: Option<usize>,
    channel: Channel,
    note_number: NoteNumber,
}

fn classify_note(event: &TimedEvent, context: NoteSearchContext) -> Role<NoteKey> {
    let message = match event.event() {
        Event::Midi(message) => message,
        _ => return Role::Neither,
    };
    let note = match event.event().note_message() {
        Some(note) => note,
        None => return Role::Neither,
    };
    let key = NoteKey {
        track: match context {
            NoteSearchContext::SingleEventsCollection => event.origin().map(|o| o.track()),
            NoteSearchContext::AllEventsCollections => None,
        },
        channel: note.channel(),
        note_number: note.note_number(),
    };
    if message.is_note_start() {
        Role::Start(key)
    } else if message.is_note_end() {
        Role::End(key)
    } else {
        Role::Neither
    }
}

fn build_note(on: &TimedEvent, off: &TimedEvent, settings: &NoteDetectionSettings) -> Option<Note> {
    let data = NoteData::new(on, off)?;
    let mut note = match &settings.constructor {
        Some(constructor) => constructor(&data)?,
        None => data.default_note(),
    };
    note.zero_velocity_off = matches!(
        off.event(),
        Event::Midi(crate::core::Message::NoteOn(_))
    );
    note.set_origins(on.origin(), off.origin());
    Some(note)
}

/// Detects timed events and, when note settings are given, notes. Objects come out in the order
/// of their defining events, which for a note is its note-on.
pub(crate) fn detect_objects(
    tracks: &[Track],
    event_settings: &TimedEventDetectionSettings,
    note_settings: Option<&NoteDetectionSettings>,
) -> Vec<TimedObject> {
    let timed = collect_timed_events(tracks, event_settings);
    let note_settings = match note_settings {
        Some(settings) => settings,
        None => return timed.into_iter().map(TimedObject::Event).collect(),
    };
    let context = note_settings.note_search_context;
    pair_events(
        timed,
        note_settings.note_start_detection_policy,
        |event| classify_note(event, context),
        |on, off| build_note(on, off, note_settings),
    )
    .into_iter()
    .map(|paired| match paired {
        Paired::Single(event) => TimedObject::Event(event),
        Paired::Pair(note) => TimedObject::Note(note),
    })
    .collect()
}
