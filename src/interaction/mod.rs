/*!
The `interaction` module turns the flat event lists of tracks into timed objects (timed events,
notes and rests) and writes edited objects back.

Detection pairs each note-off with an open note-on of the same channel and note number, following
the [`NoteStartDetectionPolicy`]. Events that end up unpaired come out as timed events, so nothing
is lost when objects are written back.
!*/

mod detect;
mod manager;
mod note;
mod objects;
mod process;
mod rest;
mod settings;
mod timed_event;
mod timed_object;

pub use manager::{ObjectsComparer, TimedObjectsManager};
pub use note::{Note, NoteData, NoteId};
pub use objects::{get_notes, get_objects, get_timed_events};
pub use process::{
    manage_notes, manage_timed_events, process_notes, process_timed_events, remove_notes,
    remove_timed_events,
};
pub use rest::{Rest, RestSeparationPolicy};
pub use settings::{
    NoteConstructor, NoteDetectionSettings, NoteSearchContext, NoteStartDetectionPolicy,
    ObjectDetectionSettings, ProcessingHint, RestDetectionSettings, TimedEventConstructor,
    TimedEventDetectionSettings,
};
pub use timed_event::{EventOrigin, TimedEvent, TimedEventData};
pub use timed_object::{ManagedObject, ObjectType, Timed, TimedObject};
