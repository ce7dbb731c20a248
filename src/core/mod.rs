/*!
The `core` module is for types and concepts that are *not* strictly related to MIDI *files*.
These types and concepts could be used for realtime MIDI as well.
!*/

mod duration_name;
mod message;
mod numbers;

pub use duration_name::DurationName;
pub use message::{
    ChannelPressureValue, ControlChangeValue, Message, NoteMessage, PitchBendMessage,
    ProgramChangeValue,
};
pub use numbers::{Channel, ControlValue, NoteNumber, PitchBendValue, Program, Velocity};
