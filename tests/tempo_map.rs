mod utils;

use midi_interaction::file::{Division, Event, Format, MetaEvent, SmpteRate, Track};
use midi_interaction::tempo_map::{BarBeatTicks, Tempo, TempoMap, TempoMapManager, TimeSignature};
use midi_interaction::{get_tempo_map, manage_tempo_map, replace_tempo_map, MidiFile};
use utils::{enable_logging, events, note_off, note_on, text, track};

fn tempo(microseconds: u32) -> Tempo {
    Tempo::from_microseconds_per_quarter(microseconds).unwrap()
}

fn time_signature(numerator: u8, denominator: u16) -> TimeSignature {
    TimeSignature::new(numerator, denominator).unwrap()
}

fn set_tempo(microseconds: u32) -> Event {
    Event::Meta(MetaEvent::SetTempo(tempo(microseconds).into()))
}

fn set_time_signature(numerator: u8, denominator: u16) -> Event {
    Event::Meta(MetaEvent::TimeSignature(
        time_signature(numerator, denominator).into(),
    ))
}

fn tempo_changes(map: &TempoMap) -> Vec<(u64, u32)> {
    map.tempo_changes()
        .map(|c| (c.time(), c.value().microseconds_per_quarter()))
        .collect()
}

fn time_signature_changes(map: &TempoMap) -> Vec<(u64, TimeSignature)> {
    map.time_signature_changes()
        .map(|c| (c.time(), c.value()))
        .collect()
}

#[test]
fn default_map() {
    enable_logging();
    let map = TempoMap::default();
    assert!(map.is_empty());
    assert_eq!(Some(96), map.division().ticks_per_quarter_note());
    assert_eq!(Tempo::DEFAULT, map.tempo_at(100_000));
    assert_eq!(120.0, map.tempo_at(0).beats_per_minute());
    assert_eq!(TimeSignature::DEFAULT, map.time_signature_at(100_000));
    assert_eq!("4/4", map.time_signature_at(0).to_string());
}

#[test]
fn manager_edits() {
    enable_logging();
    let mut manager = TempoMapManager::new(Division::default());
    manager.set_tempo(2, tempo(10));
    manager.set_tempo(4, tempo(20));
    manager.set_tempo(6, tempo(10));
    assert_eq!(
        vec![(2, 10), (4, 20), (6, 10)],
        tempo_changes(manager.tempo_map())
    );
    assert_eq!(tempo(20), manager.tempo_map().tempo_at(5));
    assert_eq!(Tempo::DEFAULT, manager.tempo_map().tempo_at(1));

    // setting the tempo that is already in effect merges the changes
    manager.set_tempo(4, tempo(10));
    assert_eq!(vec![(2, 10)], tempo_changes(manager.tempo_map()));

    manager.set_time_signature(0, time_signature(3, 4));
    manager.set_time_signature(300, time_signature(6, 8));
    manager.clear_time_signature_range(100, 400);
    assert_eq!(
        vec![(0, time_signature(3, 4))],
        time_signature_changes(manager.tempo_map())
    );
    manager.clear_tempo_map();
    let map = manager.finish().unwrap();
    assert!(map.is_empty());
}

#[test]
fn bound_manager_needs_a_track() {
    enable_logging();
    let mut tracks: Vec<Track> = Vec::new();
    let error = manage_tempo_map(&mut tracks, Division::default())
        .err()
        .unwrap();
    assert!(error.to_string().contains("At least one track is required"));
}

#[test]
fn tempo_map_is_read_across_tracks() {
    enable_logging();
    let tracks = vec![
        track(vec![(0, set_tempo(400_000)), (96, set_tempo(600_000))]),
        track(vec![(48, set_time_signature(3, 4)), (48, set_tempo(300_000))]),
    ];
    let map = get_tempo_map(&tracks, Division::default());
    assert_eq!(
        vec![(0, 400_000), (96, 300_000)],
        tempo_changes(&map),
        "the later track wins at the same time"
    );
    assert_eq!(
        vec![(48, time_signature(3, 4))],
        time_signature_changes(&map)
    );
}

#[test]
fn tempo_events_of_one_track() {
    enable_logging();
    let t = track(vec![
        (2, set_tempo(10)),
        (2, set_tempo(20)),
        (2, set_tempo(10)),
    ]);
    let map = get_tempo_map(&t, Division::default());
    assert_eq!(vec![(2, 10), (4, 20), (6, 10)], tempo_changes(&map));
    assert_eq!(tempo(20), map.tempo_at(5));

    let mut file = MidiFile::new();
    file.push_track(t).unwrap();
    assert_eq!(map, file.tempo_map());
}

#[test]
fn untouched_manager_leaves_tracks_alone() {
    enable_logging();
    let original = vec![(0, set_tempo(500_000)), (0, text("A"))];
    let mut tracks = vec![track(original.clone())];
    {
        let manager = manage_tempo_map(&mut tracks, Division::default()).unwrap();
        // a tempo equal to the default is not a change
        assert!(manager.tempo_map().is_empty());
    }
    assert_eq!(original, events(&tracks[0]));

    let mut file = MidiFile::new();
    file.push_track(track(original.clone())).unwrap();
    drop(file.manage_tempo_map());
    assert_eq!(original, events(file.track(0).unwrap()));

    {
        let mut manager = manage_tempo_map(&mut tracks, Division::default()).unwrap();
        manager.set_tempo(96, tempo(300_000));
    }
    assert_eq!(
        vec![(0, text("A")), (96, set_tempo(300_000))],
        events(&tracks[0])
    );
}

#[test]
fn manager_rewrites_tracks() {
    enable_logging();
    let mut tracks = vec![
        track(vec![
            (0, text("A")),
            (0, set_tempo(400_000)),
            (0, note_on(60, 100)),
            (96, note_off(60, 0)),
        ]),
        track(vec![(96, set_time_signature(3, 4)), (0, text("B"))]),
    ];
    {
        let mut manager = manage_tempo_map(&mut tracks, Division::default()).unwrap();
        manager.set_tempo(48, tempo(200_000));
        manager.clear_time_signature(0);
        manager.set_time_signature(192, time_signature(5, 8));
    }
    assert_eq!(
        vec![
            (0, text("A")),
            (0, set_tempo(400_000)),
            (0, note_on(60, 100)),
            (48, set_tempo(200_000)),
            (48, note_off(60, 0)),
        ],
        events(&tracks[0])
    );
    // time signatures stay in the track that held them
    assert_eq!(
        vec![(96, text("B")), (96, set_time_signature(5, 8))],
        events(&tracks[1])
    );
    let map = get_tempo_map(&tracks, Division::default());
    assert_eq!(vec![(0, 400_000), (48, 200_000)], tempo_changes(&map));
    assert_eq!(
        vec![(192, time_signature(5, 8))],
        time_signature_changes(&map)
    );
}

#[test]
fn replacing_a_map_twice_changes_nothing() {
    enable_logging();
    let mut map = TempoMap::with_tempo_and_time_signature(tempo(250_000), time_signature(7, 8));
    let mut manager = TempoMapManager::with_tempo_map(map.clone());
    manager.set_tempo(960, tempo(750_000));
    map = manager.finish().unwrap();

    let mut t = track(vec![(0, text("A")), (2000, text("Z"))]);
    replace_tempo_map(&mut t, &map).unwrap();
    // new tempo events come before new time signature events at the same time
    assert_eq!(
        vec![
            (0, text("A")),
            (0, set_tempo(250_000)),
            (0, set_time_signature(7, 8)),
            (960, set_tempo(750_000)),
            (1040, text("Z")),
        ],
        events(&t)
    );
    let once = t.clone();
    replace_tempo_map(&mut t, &map).unwrap();
    assert_eq!(once, t);
    assert_eq!(map, get_tempo_map(&t, map.division()));
}

#[test]
fn file_gets_a_track_and_the_division() {
    enable_logging();
    let division = Division::ticks_per_quarter(480).unwrap();
    let map = TempoMap::with_division_and_tempo(division, tempo(1_000_000));
    let mut file = MidiFile::new();
    file.replace_tempo_map(&map).unwrap();
    assert_eq!(1, file.tracks_len());
    assert_eq!(Format::Single, file.format_for_tracks());
    assert_eq!(division, file.division());
    assert_eq!(map, file.tempo_map());

    // an empty map does not need a track
    let mut empty = MidiFile::new();
    empty.replace_tempo_map(&TempoMap::new(division)).unwrap();
    assert_eq!(0, empty.tracks_len());
    assert_eq!(division, empty.division());
}

#[test]
fn file_manager_saves_on_drop() {
    enable_logging();
    let mut file = MidiFile::new();
    file.push_track(track(vec![(0, set_tempo(400_000))])).unwrap();
    {
        let mut manager = file.manage_tempo_map();
        assert_eq!(vec![(0, 400_000)], tempo_changes(manager.tempo_map()));
        manager.clear_tempo(0);
        manager.set_tempo(96, tempo(300_000));
    }
    assert_eq!(
        vec![(96, set_tempo(300_000))],
        events(file.track(0).unwrap())
    );
}

#[test]
fn time_conversions() {
    enable_logging();
    let mut manager = TempoMapManager::new(Division::default());
    manager.set_tempo(96, tempo(250_000));
    manager.set_time_signature(384, time_signature(3, 4));
    let map = manager.finish().unwrap();

    assert_eq!(500_000, map.to_microseconds(96).unwrap());
    assert_eq!(750_000, map.to_microseconds(192).unwrap());
    assert_eq!(192, map.from_microseconds(750_000).unwrap());
    assert_eq!(48, map.from_microseconds(250_000).unwrap());

    assert_eq!(BarBeatTicks::new(0, 3, 95), map.to_bar_beat_ticks(383).unwrap());
    assert_eq!(BarBeatTicks::new(1, 0, 0), map.to_bar_beat_ticks(384).unwrap());
    assert_eq!(BarBeatTicks::new(2, 0, 10), map.to_bar_beat_ticks(682).unwrap());
    assert_eq!(
        682,
        map.from_bar_beat_ticks(BarBeatTicks::new(2, 0, 10)).unwrap()
    );

    let smpte = TempoMap::new(Division::Smpte(SmpteRate::default()));
    assert!(smpte.to_microseconds(10).is_err());
    assert!(smpte.to_bar_beat_ticks(10).is_err());

    let zero = TempoMap::new(Division::ticks_per_quarter(0).unwrap());
    assert!(zero.to_microseconds(10).is_err());
    assert!(zero.from_bar_beat_ticks(BarBeatTicks::new(1, 0, 0)).is_err());
}
