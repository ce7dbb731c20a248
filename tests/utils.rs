// each integration test binary uses a different subset of these
#![allow(dead_code)]

use log::LevelFilter;
use midi_interaction::core::{Channel, Message, NoteMessage, NoteNumber, Velocity};
use midi_interaction::file::{Event, MetaEvent, Track, TrackEvent};
use midi_interaction::Text;
use std::io::Write;
use std::sync::Once;

static LOGGER: Once = Once::new();

pub fn enable_logging() {
    LOGGER.call_once(logger_init)
}

fn logger_init() {
    env_logger::Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{}:{} {} [{}] - {}",
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .filter(None, LevelFilter::Trace)
        .is_test(true)
        .init();
}

pub fn note_on(note_number: u8, velocity: u8) -> Event {
    note_on_ch(0, note_number, velocity)
}

pub fn note_on_ch(channel: u8, note_number: u8, velocity: u8) -> Event {
    Event::Midi(Message::NoteOn(NoteMessage::new(
        Channel::new(channel),
        NoteNumber::new(note_number),
        Velocity::new(velocity),
    )))
}

pub fn note_off(note_number: u8, velocity: u8) -> Event {
    note_off_ch(0, note_number, velocity)
}

pub fn note_off_ch(channel: u8, note_number: u8, velocity: u8) -> Event {
    Event::Midi(Message::NoteOff(NoteMessage::new(
        Channel::new(channel),
        NoteNumber::new(note_number),
        Velocity::new(velocity),
    )))
}

pub fn text(s: &str) -> Event {
    Event::Meta(MetaEvent::Text(Text::new(s)))
}

pub fn track_name(s: &str) -> Event {
    Event::Meta(MetaEvent::TrackName(Text::new(s)))
}

pub fn end_of_track() -> Event {
    Event::Meta(MetaEvent::EndOfTrack)
}

/// Builds a track from `(delta time, event)` pairs.
pub fn track(events: Vec<(u32, Event)>) -> Track {
    let mut track = Track::new();
    for (delta_time, event) in events {
        track.push_event(delta_time, event).unwrap();
    }
    track
}

/// The `(delta time, event)` pairs of a track, for comparing against [`track`] input.
pub fn events(track: &Track) -> Vec<(u32, Event)> {
    track
        .events()
        .map(|e: &TrackEvent| (e.delta_time(), e.event().clone()))
        .collect()
}
