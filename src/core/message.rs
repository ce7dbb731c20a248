use crate::core::{Channel, ControlValue, NoteNumber, PitchBendValue, Program, Velocity};

/// Represents the data that is common, and required for both [`Message::NoteOn`] and
/// [`Message::NoteOff`] messages.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NoteMessage {
    pub(crate) channel: Channel,
    pub(crate) note_number: NoteNumber,
    pub(crate) velocity: Velocity,
}

impl NoteMessage {
    /// Create a new `NoteMessage`.
    pub fn new(channel: Channel, note_number: NoteNumber, velocity: Velocity) -> Self {
        Self {
            channel,
            note_number,
            velocity,
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn note_number(&self) -> NoteNumber {
        self.note_number
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }
}

/// Provides the ability to change an instrument (sound, patch, etc.) by specifying the affected
/// channel number and the new program value.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ProgramChangeValue {
    pub(crate) channel: Channel,
    pub(crate) program: Program,
}

impl ProgramChangeValue {
    pub fn new(channel: Channel, program: Program) -> Self {
        Self { channel, program }
    }

    /// Get the channel value.
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Get the program value.
    pub fn program(&self) -> Program {
        self.program
    }
}

/// A control change. Both the controller number and its value are `u7`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ControlChangeValue {
    pub(crate) channel: Channel,
    pub(crate) control: ControlValue,
    pub(crate) value: ControlValue,
}

impl ControlChangeValue {
    pub fn new(channel: Channel, control: ControlValue, value: ControlValue) -> Self {
        Self {
            channel,
            control,
            value,
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn control(&self) -> ControlValue {
        self.control
    }

    pub fn value(&self) -> ControlValue {
        self.value
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ChannelPressureValue {
    pub(crate) channel: Channel,
    pub(crate) pressure: ControlValue,
}

impl ChannelPressureValue {
    pub fn new(channel: Channel, pressure: ControlValue) -> Self {
        Self { channel, pressure }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn pressure(&self) -> ControlValue {
        self.pressure
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PitchBendMessage {
    pub(crate) channel: Channel,
    pub(crate) pitch_bend: PitchBendValue,
}

impl PitchBendMessage {
    pub fn new(channel: Channel, pitch_bend: PitchBendValue) -> Self {
        Self {
            channel,
            pitch_bend,
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn pitch_bend(&self) -> PitchBendValue {
        self.pitch_bend
    }
}

/// A MIDI channel message. Only the voice messages that can appear in a track are modeled.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Message {
    NoteOff(NoteMessage),
    NoteOn(NoteMessage),
    PolyPressure(NoteMessage),
    Control(ControlChangeValue),
    ProgramChange(ProgramChangeValue),
    ChannelPressure(ChannelPressureValue),
    PitchBend(PitchBendMessage),
}

impl Default for Message {
    fn default() -> Self {
        Message::NoteOff(NoteMessage::default())
    }
}

impl Message {
    /// The channel that every channel message carries.
    pub fn channel(&self) -> Channel {
        match self {
            Message::NoteOff(m) | Message::NoteOn(m) | Message::PolyPressure(m) => m.channel,
            Message::Control(m) => m.channel,
            Message::ProgramChange(m) => m.channel,
            Message::ChannelPressure(m) => m.channel,
            Message::PitchBend(m) => m.channel,
        }
    }

    /// A note-on with a non-zero velocity.
    pub fn is_note_start(&self) -> bool {
        matches!(self, Message::NoteOn(m) if m.velocity.get() > 0)
    }

    /// A note-off, or a note-on with a velocity of zero.
    pub fn is_note_end(&self) -> bool {
        match self {
            Message::NoteOff(_) => true,
            Message::NoteOn(m) => m.velocity.get() == 0,
            _ => false,
        }
    }
}

#[test]
fn note_on_with_zero_velocity_is_an_end() {
    let message = Message::NoteOn(NoteMessage::new(
        Channel::new(3),
        NoteNumber::new(64),
        Velocity::new(0),
    ));
    assert!(message.is_note_end());
    assert!(!message.is_note_start());
    assert_eq!(3, message.channel().get());
}
