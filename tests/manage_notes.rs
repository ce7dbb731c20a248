mod utils;

use midi_interaction::core::{NoteNumber, Velocity};
use midi_interaction::file::{Event, MetaEvent};
use midi_interaction::interaction::{
    Note, NoteDetectionSettings, ObjectDetectionSettings, ObjectsComparer, ProcessingHint,
    TimedEventDetectionSettings, TimedObject, TimedObjectsManager,
};
use midi_interaction::{
    manage_notes, manage_timed_events, process_notes, process_timed_events, remove_notes,
    remove_timed_events, MidiFile, Text, Track,
};
use std::cmp::Ordering;
use utils::{enable_logging, events, note_off, note_on, text, track, track_name};

/// Two notes that touch at tick 100, between text events.
fn two_notes() -> Vec<(u32, Event)> {
    vec![
        (0, text("A")),
        (0, note_on(70, 127)),
        (100, track_name("B")),
        (0, note_off(70, 0)),
        (0, note_on(7, 127)),
        (50, note_off(7, 0)),
        (0, text("C")),
    ]
}

fn shift_notes(note: &mut Note) {
    note.set_note_number(NoteNumber::new(note.note_number().get() + 5));
    note.set_velocity(Velocity::new(note.velocity().get() - 5));
}

#[test]
fn unchanged_notes_give_back_the_same_track() {
    enable_logging();
    let mut t = track(two_notes());
    {
        let manager = manage_notes(&mut t, &NoteDetectionSettings::default(), None);
        let times: Vec<(u64, u64)> = manager
            .objects()
            .iter()
            .map(|n| (n.time(), n.length()))
            .collect();
        assert_eq!(vec![(0, 100), (100, 50)], times);
    }
    assert_eq!(two_notes(), events(&t));
}

#[test]
fn unchanged_notes_give_back_the_same_tracks() {
    enable_logging();
    let first = vec![
        (0, note_on(60, 90)),
        (0, note_on(64, 80)),
        (0, text("A")),
        (5, note_on(64, 81)),
        (3, note_off(64, 0)),
        (2, note_off(60, 0)),
        (0, note_on(60, 91)),
        (0, note_off(64, 1)),
        (10, note_off(60, 0)),
    ];
    let second = vec![
        (0, text("B")),
        (0, note_off(60, 0)),
        (0, note_on(60, 100)),
        (10, note_on(62, 100)),
        (0, note_off(60, 0)),
        (10, note_off(62, 0)),
    ];
    let mut tracks = vec![track(first.clone()), track(second.clone())];
    {
        let manager = manage_notes(&mut tracks, &NoteDetectionSettings::default(), None);
        assert_eq!(6, manager.objects().len());
    }
    assert_eq!(first, events(&tracks[0]));
    assert_eq!(second, events(&tracks[1]));
}

#[test]
fn edits_after_a_save_are_saved_again() {
    enable_logging();
    let mut t = track(vec![(0, note_on(70, 127)), (100, note_off(70, 0))]);
    {
        let mut manager = manage_notes(&mut t, &NoteDetectionSettings::default(), None);
        manager.save_changes().unwrap();
        manager.objects_mut().clear();
        manager.save_changes().unwrap();
    }
    assert!(t.is_empty());

    let mut t = track(two_notes());
    {
        let mut manager = manage_notes(&mut t, &NoteDetectionSettings::default(), None);
        manager.save_changes().unwrap();
        manager.objects_mut().retain(|n| n.note_number().get() == 7);
    }
    assert_eq!(
        vec![
            (0, text("A")),
            (100, track_name("B")),
            (0, note_on(7, 127)),
            (50, note_off(7, 0)),
            (0, text("C")),
        ],
        events(&t)
    );
}

#[test]
fn empty_track_stays_empty() {
    enable_logging();
    let mut t = Track::new();
    let mut manager = manage_notes(&mut t, &NoteDetectionSettings::default(), None);
    assert!(manager.objects().is_empty());
    manager.save_changes().unwrap();
    drop(manager);
    assert!(t.is_empty());
}

#[test]
fn edited_notes_are_written_in_place() {
    enable_logging();
    let mut t = track(two_notes());
    {
        let mut manager = manage_notes(&mut t, &NoteDetectionSettings::default(), None);
        manager.objects_mut().iter_mut().for_each(shift_notes);
        manager.save_changes().unwrap();
    }
    assert_eq!(
        vec![
            (0, text("A")),
            (0, note_on(75, 122)),
            (100, track_name("B")),
            (0, note_off(75, 0)),
            (0, note_on(12, 122)),
            (50, note_off(12, 0)),
            (0, text("C")),
        ],
        events(&t)
    );
}

#[test]
fn cleared_notes_are_removed() {
    enable_logging();
    let mut t = track(two_notes());
    manage_notes(&mut t, &NoteDetectionSettings::default(), None)
        .objects_mut()
        .clear();
    assert_eq!(
        vec![(0, text("A")), (100, track_name("B")), (50, text("C"))],
        events(&t)
    );
}

#[test]
fn added_notes_follow_existing_events() {
    enable_logging();
    let mut t = track(vec![(0, text("A")), (100, text("B"))]);
    {
        let mut manager = manage_notes(&mut t, &NoteDetectionSettings::default(), None);
        manager
            .objects_mut()
            .push(Note::new(NoteNumber::new(60), 100, 0));
    }
    assert_eq!(
        vec![
            (0, text("A")),
            (0, note_on(60, 100)),
            (100, text("B")),
            (0, note_off(60, 0)),
        ],
        events(&t)
    );
}

#[test]
fn comparer_orders_objects_at_the_same_time() {
    enable_logging();
    let notes_last: ObjectsComparer = Box::new(|a, b| match (a, b) {
        (TimedObject::Note(_), TimedObject::Note(_)) => Ordering::Equal,
        (TimedObject::Note(_), _) => Ordering::Greater,
        (_, TimedObject::Note(_)) => Ordering::Less,
        _ => Ordering::Equal,
    });
    let mut t = track(two_notes());
    drop(manage_notes(
        &mut t,
        &NoteDetectionSettings::default(),
        Some(notes_last),
    ));
    assert_eq!(
        vec![
            (0, text("A")),
            (0, note_on(70, 127)),
            (100, track_name("B")),
            (0, note_off(70, 0)),
            (0, note_on(7, 127)),
            (0, text("C")),
            (50, note_off(7, 0)),
        ],
        events(&t)
    );
}

#[test]
fn notes_go_back_to_their_tracks() {
    enable_logging();
    let mut tracks = vec![
        track(vec![(0, note_on(60, 90)), (10, note_off(60, 0))]),
        track(vec![
            (5, text("X")),
            (0, note_on(62, 90)),
            (10, note_off(62, 0)),
        ]),
    ];
    {
        let mut manager = manage_notes(&mut tracks, &NoteDetectionSettings::default(), None);
        for note in manager.objects_mut() {
            note.set_time(note.time() + 1);
        }
    }
    assert_eq!(
        vec![(1, note_on(60, 90)), (10, note_off(60, 0))],
        events(&tracks[0])
    );
    assert_eq!(
        vec![(5, text("X")), (1, note_on(62, 90)), (10, note_off(62, 0))],
        events(&tracks[1])
    );
}

#[test]
fn files_can_be_managed() {
    enable_logging();
    let mut file = MidiFile::new();
    file.push_track(track(two_notes())).unwrap();
    manage_notes(&mut file, &NoteDetectionSettings::default(), None)
        .objects_mut()
        .retain(|n| n.note_number().get() == 7);
    assert_eq!(
        vec![
            (0, text("A")),
            (100, track_name("B")),
            (0, note_on(7, 127)),
            (50, note_off(7, 0)),
            (0, text("C")),
        ],
        events(file.track(0).unwrap())
    );
}

#[test]
fn process_notes_counts_matches() {
    enable_logging();
    let mut t = track(two_notes());
    let count = process_notes(
        &mut t,
        shift_notes,
        |n| n.note_number().get() == 70,
        &NoteDetectionSettings::default(),
        ProcessingHint::default(),
    )
    .unwrap();
    assert_eq!(1, count);
    assert_eq!(note_on(75, 122), *t.event(1).unwrap().event());
    assert_eq!(note_off(75, 0), *t.event(3).unwrap().event());
    assert_eq!(note_on(7, 127), *t.event(4).unwrap().event());
}

#[test]
fn process_notes_without_changes() {
    enable_logging();
    let mut t = track(two_notes());
    let count = process_notes(
        &mut t,
        |_| {},
        |_| true,
        &NoteDetectionSettings::default(),
        ProcessingHint::default(),
    )
    .unwrap();
    assert_eq!(2, count);
    assert_eq!(two_notes(), events(&t));
}

#[test]
fn moved_notes_are_sorted_by_time() {
    enable_logging();
    let mut t = track(vec![
        (0, note_on(70, 100)),
        (10, note_off(70, 0)),
        (10, text("A")),
    ]);
    let count = process_notes(
        &mut t,
        |n| n.set_time(30),
        |_| true,
        &NoteDetectionSettings::default(),
        ProcessingHint::TimeOrLengthCanBeChanged,
    )
    .unwrap();
    assert_eq!(1, count);
    assert_eq!(
        vec![(20, text("A")), (10, note_on(70, 100)), (10, note_off(70, 0))],
        events(&t)
    );
}

#[test]
fn hint_none_ignores_moves() {
    enable_logging();
    let mut t = track(vec![(0, note_on(70, 100)), (10, note_off(70, 0))]);
    process_notes(
        &mut t,
        |n| {
            n.set_time(30);
            n.set_velocity(Velocity::new(50));
        },
        |_| true,
        &NoteDetectionSettings::default(),
        ProcessingHint::None,
    )
    .unwrap();
    assert_eq!(
        vec![(0, note_on(70, 50)), (10, note_off(70, 0))],
        events(&t)
    );
}

#[test]
fn remove_notes_keeps_other_times() {
    enable_logging();
    let mut t = track(two_notes());
    let removed = remove_notes(&mut t, |_| false, &NoteDetectionSettings::default()).unwrap();
    assert_eq!(0, removed);
    assert_eq!(two_notes(), events(&t));

    let removed = remove_notes(
        &mut t,
        |n| n.note_number().get() == 70,
        &NoteDetectionSettings::default(),
    )
    .unwrap();
    assert_eq!(1, removed);
    assert_eq!(
        vec![
            (0, text("A")),
            (100, track_name("B")),
            (0, note_on(7, 127)),
            (50, note_off(7, 0)),
            (0, text("C")),
        ],
        events(&t)
    );
}

#[test]
fn timed_events_can_be_managed() {
    enable_logging();
    let mut t = track(two_notes());
    {
        let mut manager =
            manage_timed_events(&mut t, &TimedEventDetectionSettings::default(), None);
        assert_eq!(7, manager.objects().len());
        for timed_event in manager.objects_mut() {
            if matches!(timed_event.event(), Event::Meta(MetaEvent::Text(_))) {
                timed_event.set_event(Event::Meta(MetaEvent::Marker(Text::new("M"))));
            }
        }
    }
    let marker = Event::Meta(MetaEvent::Marker(Text::new("M")));
    assert_eq!(&marker, t.event(0).unwrap().event());
    assert_eq!(&marker, t.event(6).unwrap().event());
}

#[test]
fn timed_events_can_be_processed_and_removed() {
    enable_logging();
    let is_text = |e: &midi_interaction::interaction::TimedEvent| {
        matches!(e.event(), Event::Meta(MetaEvent::Text(_)))
    };
    let mut t = track(two_notes());
    let count = process_timed_events(
        &mut t,
        |e| e.set_time(e.time() + 10),
        is_text,
        &TimedEventDetectionSettings::default(),
        ProcessingHint::default(),
    )
    .unwrap();
    assert_eq!(2, count);
    assert_eq!(
        vec![
            (0, note_on(70, 127)),
            (10, text("A")),
            (90, track_name("B")),
            (0, note_off(70, 0)),
            (0, note_on(7, 127)),
            (50, note_off(7, 0)),
            (10, text("C")),
        ],
        events(&t)
    );

    let removed =
        remove_timed_events(&mut t, is_text, &TimedEventDetectionSettings::default()).unwrap();
    assert_eq!(2, removed);
    assert_eq!(
        vec![
            (0, note_on(70, 127)),
            (100, track_name("B")),
            (0, note_off(70, 0)),
            (0, note_on(7, 127)),
            (50, note_off(7, 0)),
        ],
        events(&t)
    );
}

#[test]
fn mixed_objects_can_be_managed() {
    enable_logging();
    let mut t = track(two_notes());
    {
        let mut manager: TimedObjectsManager<'_, TimedObject> =
            TimedObjectsManager::new(&mut t, &ObjectDetectionSettings::default(), None);
        assert_eq!(5, manager.objects().len());
        manager
            .objects_mut()
            .retain(|o| matches!(o, TimedObject::Note(_)));
    }
    assert_eq!(
        vec![
            (0, note_on(70, 127)),
            (100, note_off(70, 0)),
            (0, note_on(7, 127)),
            (50, note_off(7, 0)),
        ],
        events(&t)
    );
}
