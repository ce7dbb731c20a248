mod utils;

use midi_interaction::core::{Channel, NoteNumber, Velocity};
use midi_interaction::interaction::{
    EventOrigin, Note, NoteData, NoteDetectionSettings, NoteSearchContext,
    NoteStartDetectionPolicy, ObjectDetectionSettings, ObjectType, Rest, RestDetectionSettings,
    RestSeparationPolicy, TimedEvent, TimedEventData, TimedEventDetectionSettings, TimedObject,
};
use midi_interaction::{get_notes, get_objects, get_timed_events, Track};
use utils::{enable_logging, note_off, note_off_ch, note_on, note_on_ch, text, track};

fn note(number: u8, time: u64, length: u64, velocity: u8, off_velocity: u8) -> Note {
    let mut note = Note::new(NoteNumber::new(number), length, time);
    note.set_velocity(Velocity::new(velocity));
    note.set_off_velocity(Velocity::new(off_velocity));
    note
}

fn overlapping_notes() -> Track {
    track(vec![
        (100, note_on(70, 100)),
        (10, note_on(70, 110)),
        (70, note_off(70, 80)),
        (50, note_off(70, 120)),
    ])
}

#[test]
fn first_note_on_closes_the_oldest_note() {
    enable_logging();
    let notes = get_notes(&overlapping_notes(), &NoteDetectionSettings::default());
    assert_eq!(
        vec![note(70, 100, 80, 100, 80), note(70, 110, 120, 110, 120)],
        notes
    );
}

#[test]
fn last_note_on_closes_the_newest_note() {
    enable_logging();
    let settings = NoteDetectionSettings {
        note_start_detection_policy: NoteStartDetectionPolicy::LastNoteOn,
        ..NoteDetectionSettings::default()
    };
    let notes = get_notes(&overlapping_notes(), &settings);
    assert_eq!(
        vec![note(70, 100, 130, 100, 120), note(70, 110, 70, 110, 80)],
        notes
    );
}

#[test]
fn unmatched_events_stay_timed_events() {
    enable_logging();
    let settings = ObjectDetectionSettings::default();
    let only_on = track(vec![(0, note_on(70, 100))]);
    let only_off = track(vec![(5, note_off(70, 0))]);
    let two_ons = track(vec![(0, note_on(70, 100)), (10, note_on(70, 100))]);

    assert!(get_notes(&only_on, &settings.note_detection_settings).is_empty());
    assert!(get_notes(&only_off, &settings.note_detection_settings).is_empty());
    assert!(get_notes(&two_ons, &settings.note_detection_settings).is_empty());

    let objects = get_objects(
        &two_ons,
        ObjectType::TIMED_EVENT | ObjectType::NOTE,
        &settings,
    );
    assert_eq!(
        vec![
            TimedObject::Event(TimedEvent::new(note_on(70, 100), 0)),
            TimedObject::Event(TimedEvent::new(note_on(70, 100), 10)),
        ],
        objects
    );
    let objects = get_objects(&only_off, ObjectType::TIMED_EVENT | ObjectType::NOTE, &settings);
    assert_eq!(
        vec![TimedObject::Event(TimedEvent::new(note_off(70, 0), 5))],
        objects
    );
}

#[test]
fn zero_velocity_note_on_ends_a_note() {
    enable_logging();
    let t = track(vec![(0, note_on(0, 127)), (100, note_on(0, 0))]);
    let notes = get_notes(&t, &NoteDetectionSettings::default());
    assert_eq!(vec![note(0, 0, 100, 127, 0)], notes);
    // the original event kind is kept when the note is written back
    assert_eq!(note_on(0, 0), notes[0].note_off_event());
}

#[test]
fn notes_of_different_channels_do_not_pair() {
    enable_logging();
    let t = track(vec![(0, note_on_ch(1, 60, 90)), (10, note_off(60, 0))]);
    assert!(get_notes(&t, &NoteDetectionSettings::default()).is_empty());
}

#[test]
fn rejected_notes_keep_their_events() {
    enable_logging();
    let t = track(vec![
        (0, note_on(70, 100)),
        (0, note_on(60, 100)),
        (10, note_off(70, 0)),
        (0, note_off(60, 0)),
    ]);
    let settings = ObjectDetectionSettings {
        note_detection_settings: NoteDetectionSettings {
            constructor: Some(Box::new(|data: &NoteData<'_>| {
                let note = data.default_note();
                if note.note_number().get() == 70 {
                    None
                } else {
                    Some(note)
                }
            })),
            ..NoteDetectionSettings::default()
        },
        ..ObjectDetectionSettings::default()
    };
    let objects = get_objects(&t, ObjectType::TIMED_EVENT | ObjectType::NOTE, &settings);
    assert_eq!(
        vec![
            TimedObject::Event(TimedEvent::new(note_on(70, 100), 0)),
            TimedObject::Note(note(60, 0, 10, 100, 0)),
            TimedObject::Event(TimedEvent::new(note_off(70, 0), 10)),
        ],
        objects
    );
}

#[test]
fn tracks_are_merged_by_time() {
    enable_logging();
    let tracks = vec![
        track(vec![(0, text("A")), (20, text("C"))]),
        track(vec![(10, text("B")), (10, text("D"))]),
    ];
    let events = get_timed_events(&tracks, &TimedEventDetectionSettings::default());
    assert_eq!(
        vec![
            TimedEvent::new(text("A"), 0),
            TimedEvent::new(text("B"), 10),
            TimedEvent::new(text("C"), 20),
            TimedEvent::new(text("D"), 20),
        ],
        events
    );
    let origins: Vec<Option<EventOrigin>> = events.iter().map(TimedEvent::origin).collect();
    assert_eq!(
        vec![
            Some(EventOrigin::new(0, 0)),
            Some(EventOrigin::new(1, 0)),
            Some(EventOrigin::new(0, 1)),
            Some(EventOrigin::new(1, 1)),
        ],
        origins
    );
}

#[test]
fn notes_can_span_tracks() {
    enable_logging();
    let tracks = vec![
        track(vec![(0, note_on(70, 100))]),
        track(vec![(50, note_off(70, 0))]),
    ];
    assert!(get_notes(&tracks, &NoteDetectionSettings::default()).is_empty());

    let settings = NoteDetectionSettings {
        note_search_context: NoteSearchContext::AllEventsCollections,
        ..NoteDetectionSettings::default()
    };
    let notes = get_notes(&tracks, &settings);
    assert_eq!(vec![note(70, 0, 50, 100, 0)], notes);
    assert_eq!(Some(EventOrigin::new(0, 0)), notes[0].on_origin());
    assert_eq!(Some(EventOrigin::new(1, 0)), notes[0].off_origin());
}

#[test]
fn timed_event_constructor_replaces_events() {
    enable_logging();
    let t = track(vec![(0, text("A")), (5, text("B"))]);
    let settings = TimedEventDetectionSettings {
        constructor: Some(Box::new(|data: &TimedEventData<'_>| {
            if data.time() == 5 {
                Some(TimedEvent::new(text("b"), data.time()))
            } else {
                None
            }
        })),
    };
    let events = get_timed_events(&t, &settings);
    assert_eq!(
        vec![TimedEvent::new(text("A"), 0), TimedEvent::new(text("b"), 5)],
        events
    );
    assert_eq!(Some(EventOrigin::new(0, 1)), events[1].origin());
}

#[test]
fn rests_between_notes() {
    enable_logging();
    let t = track(vec![
        (5, note_on(60, 100)),
        (3, note_on_ch(1, 62, 100)),
        (2, note_off(60, 0)),
        (10, note_off_ch(1, 62, 0)),
        (10, note_on(60, 100)),
        (10, note_off(60, 0)),
    ]);
    let objects = get_objects(
        &t,
        ObjectType::NOTE | ObjectType::REST,
        &ObjectDetectionSettings::default(),
    );
    let rests: Vec<Rest> = objects
        .iter()
        .filter_map(|o| match o {
            TimedObject::Rest(rest) => Some(*rest),
            _ => None,
        })
        .collect();
    assert_eq!(
        vec![Rest::new(0, 5, None, None), Rest::new(20, 10, None, None)],
        rests
    );
    assert_eq!(5, objects.len());
    assert!(matches!(objects.last(), Some(TimedObject::Note(_))));
    assert!(matches!(objects[0], TimedObject::Rest(_)));

    let settings = ObjectDetectionSettings {
        rest_detection_settings: RestDetectionSettings {
            rest_separation_policy: RestSeparationPolicy::SeparateByChannel,
        },
        ..ObjectDetectionSettings::default()
    };
    let rests: Vec<Rest> = get_objects(&t, ObjectType::REST, &settings)
        .into_iter()
        .filter_map(|o| match o {
            TimedObject::Rest(rest) => Some(rest),
            _ => None,
        })
        .collect();
    assert_eq!(
        vec![
            Rest::new(0, 5, Some(Channel::new(0)), None),
            Rest::new(0, 8, Some(Channel::new(1)), None),
            Rest::new(10, 20, Some(Channel::new(0)), None),
        ],
        rests
    );
}
