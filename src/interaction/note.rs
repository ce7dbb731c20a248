use crate::core::{Channel, Message, NoteMessage, NoteNumber, Velocity};
use crate::file::Event;
use crate::interaction::{EventOrigin, TimedEvent};

/// The identity that note-on and note-off events are paired by.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct NoteId {
    channel: Channel,
    note_number: NoteNumber,
}

impl NoteId {
    pub fn new(channel: Channel, note_number: NoteNumber) -> Self {
        Self {
            channel,
            note_number,
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn note_number(&self) -> NoteNumber {
        self.note_number
    }
}

pub(crate) const DEFAULT_VELOCITY: Velocity = Velocity::new(100);
pub(crate) const DEFAULT_OFF_VELOCITY: Velocity = Velocity::new(0);

/// A note built from a note-on event and the note-off event that ends it.
///
/// Notes compare equal when time, length, channel, note number and both velocities are equal.
/// Where the note came from is not compared.
#[derive(Clone, Debug)]
pub struct Note {
    time: u64,
    length: u64,
    channel: Channel,
    note_number: NoteNumber,
    velocity: Velocity,
    off_velocity: Velocity,
    /// The note was ended by a note-on with velocity zero. It is written back the same way as long
    /// as the off velocity stays zero.
    pub(crate) zero_velocity_off: bool,
    on_origin: Option<EventOrigin>,
    off_origin: Option<EventOrigin>,
}

impl PartialEq for Note {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time
            && self.length == other.length
            && self.channel == other.channel
            && self.note_number == other.note_number
            && self.velocity == other.velocity
            && self.off_velocity == other.off_velocity
    }
}

impl Eq for Note {}

impl Note {
    /// A note on channel 0 with a velocity of 100 and an off velocity of 0.
    pub fn new(note_number: NoteNumber, length: u64, time: u64) -> Self {
        Self {
            time,
            length,
            channel: Channel::default(),
            note_number,
            velocity: DEFAULT_VELOCITY,
            off_velocity: DEFAULT_OFF_VELOCITY,
            zero_velocity_off: false,
            on_origin: None,
            off_origin: None,
        }
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    /// Moves the note. The length is kept.
    pub fn set_time(&mut self, time: u64) {
        self.time = time
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn set_length(&mut self, length: u64) {
        self.length = length
    }

    pub fn end_time(&self) -> u64 {
        self.time.saturating_add(self.length)
    }

    /// Changes the length so that the note ends at `end_time`.
    pub fn set_end_time(&mut self, end_time: u64) -> crate::Result<()> {
        match end_time.checked_sub(self.time) {
            Some(length) => {
                self.length = length;
                Ok(())
            }
            None => invalid_argument!(
                "end time {} is before the note start at {}",
                end_time,
                self.time
            ),
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn set_channel(&mut self, channel: Channel) {
        self.channel = channel
    }

    pub fn note_number(&self) -> NoteNumber {
        self.note_number
    }

    pub fn set_note_number(&mut self, note_number: NoteNumber) {
        self.note_number = note_number
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Velocity) {
        self.velocity = velocity
    }

    pub fn off_velocity(&self) -> Velocity {
        self.off_velocity
    }

    pub fn set_off_velocity(&mut self, off_velocity: Velocity) {
        self.off_velocity = off_velocity
    }

    pub fn id(&self) -> NoteId {
        NoteId::new(self.channel, self.note_number)
    }

    /// Where the note-on came from, if the note was detected.
    pub fn on_origin(&self) -> Option<EventOrigin> {
        self.on_origin
    }

    /// Where the note-off came from, if the note was detected.
    pub fn off_origin(&self) -> Option<EventOrigin> {
        self.off_origin
    }

    /// The note-on event for the current state of the note.
    pub fn note_on_event(&self) -> Event {
        Event::Midi(Message::NoteOn(NoteMessage::new(
            self.channel,
            self.note_number,
            self.velocity,
        )))
    }

    /// The note-off event for the current state of the note.
    pub fn note_off_event(&self) -> Event {
        let message = NoteMessage::new(self.channel, self.note_number, self.off_velocity);
        if self.zero_velocity_off && self.off_velocity.get() == 0 {
            Event::Midi(Message::NoteOn(message))
        } else {
            Event::Midi(Message::NoteOff(message))
        }
    }

    pub(crate) fn set_origins(&mut self, on: Option<EventOrigin>, off: Option<EventOrigin>) {
        self.on_origin = on;
        self.off_origin = off;
    }
}

/// The matched pair a note constructor builds a [`Note`] from.
#[derive(Clone, Copy, Debug)]
pub struct NoteData<'a> {
    on: &'a TimedEvent,
    off: &'a TimedEvent,
    on_message: NoteMessage,
    off_message: NoteMessage,
}

impl<'a> NoteData<'a> {
    /// `None` unless both events carry note messages.
    pub(crate) fn new(on: &'a TimedEvent, off: &'a TimedEvent) -> Option<Self> {
        let on_message = *on.event().note_message()?;
        let off_message = *off.event().note_message()?;
        Some(Self {
            on,
            off,
            on_message,
            off_message,
        })
    }

    pub fn note_on(&self) -> &'a TimedEvent {
        self.on
    }

    pub fn note_off(&self) -> &'a TimedEvent {
        self.off
    }

    /// The note that is built when there is no constructor.
    pub fn default_note(&self) -> Note {
        let mut note = Note::new(
            self.on_message.note_number(),
            self.off.time().saturating_sub(self.on.time()),
            self.on.time(),
        );
        note.channel = self.on_message.channel();
        note.velocity = self.on_message.velocity();
        note.off_velocity = self.off_message.velocity();
        note
    }
}
