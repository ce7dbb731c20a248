use crate::core::{Message, NoteMessage};
use crate::file::{MetaEvent, SysexEvent};

/// <event> = <MIDI event> | <sysex event> | <meta-event>
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum Event {
    /// <MIDI event> is any MIDI channel message.
    Midi(Message),
    /// <sysex event> is used to specify a MIDI system exclusive message.
    Sysex(SysexEvent),
    /// <meta-event> specifies non-MIDI information useful to this format or to sequencers.
    Meta(MetaEvent),
}

impl Default for Event {
    fn default() -> Self {
        Event::Midi(Message::default())
    }
}

impl Event {
    /// Returns the note message if this is a note-on or a note-off.
    pub fn note_message(&self) -> Option<&NoteMessage> {
        match self {
            Event::Midi(Message::NoteOn(m)) | Event::Midi(Message::NoteOff(m)) => Some(m),
            _ => None,
        }
    }

    pub fn is_note_start(&self) -> bool {
        matches!(self, Event::Midi(m) if m.is_note_start())
    }

    pub fn is_note_end(&self) -> bool {
        matches!(self, Event::Midi(m) if m.is_note_end())
    }

    pub fn is_set_tempo(&self) -> bool {
        matches!(self, Event::Meta(MetaEvent::SetTempo(_)))
    }

    pub fn is_time_signature(&self) -> bool {
        matches!(self, Event::Meta(MetaEvent::TimeSignature(_)))
    }

    pub fn is_end_of_track(&self) -> bool {
        matches!(self, Event::Meta(MetaEvent::EndOfTrack))
    }
}

impl From<Message> for Event {
    fn from(message: Message) -> Self {
        Event::Midi(message)
    }
}

impl From<MetaEvent> for Event {
    fn from(meta: MetaEvent) -> Self {
        Event::Meta(meta)
    }
}

/// <MTrk event> = <delta-time> <event>
#[derive(Clone, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct TrackEvent {
    /// The amount of time, in ticks, since the previous event in the same track. If the first
    /// event in a track occurs at the very beginning of a track, or if two events occur
    /// simultaneously, a delta-time of zero is used.
    delta_time: u32,
    event: Event,
}

impl TrackEvent {
    pub fn new(delta_time: u32, event: Event) -> Self {
        Self { delta_time, event }
    }

    pub fn delta_time(&self) -> u32 {
        self.delta_time
    }

    pub fn set_delta_time(&mut self, delta_time: u32) {
        self.delta_time = delta_time
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn event_mut(&mut self) -> &mut Event {
        &mut self.event
    }

    pub fn into_event(self) -> Event {
        self.event
    }

    /// Returns true if the track event is a [`MetaEvent::EndOfTrack`].
    pub(crate) fn is_end(&self) -> bool {
        self.event.is_end_of_track()
    }
}
