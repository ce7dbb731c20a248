use crate::interaction::{Note, NoteData, RestSeparationPolicy, TimedEvent, TimedEventData};
use std::fmt::{Debug, Formatter};

/// Which open note-on a note-off closes when several are open for the same note.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum NoteStartDetectionPolicy {
    /// The oldest open note-on.
    #[default]
    FirstNoteOn,
    /// The most recently opened note-on.
    LastNoteOn,
}

/// Whether notes can span tracks.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum NoteSearchContext {
    /// A note-off only closes a note-on from the same track.
    #[default]
    SingleEventsCollection,
    /// All tracks are treated as one stream.
    AllEventsCollections,
}

/// Builds a note from a matched pair, or `None` to leave both events as timed events.
pub type NoteConstructor = Box<dyn Fn(&NoteData<'_>) -> Option<Note>>;

/// Builds a timed event, or `None` to build the default one.
pub type TimedEventConstructor = Box<dyn Fn(&TimedEventData<'_>) -> Option<TimedEvent>>;

#[derive(Default)]
pub struct NoteDetectionSettings {
    pub note_start_detection_policy: NoteStartDetectionPolicy,
    pub note_search_context: NoteSearchContext,
    pub constructor: Option<NoteConstructor>,
}

impl Debug for NoteDetectionSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteDetectionSettings")
            .field(
                "note_start_detection_policy",
                &self.note_start_detection_policy,
            )
            .field("note_search_context", &self.note_search_context)
            .field("constructor", &self.constructor.is_some())
            .finish()
    }
}

#[derive(Default)]
pub struct TimedEventDetectionSettings {
    pub constructor: Option<TimedEventConstructor>,
}

impl Debug for TimedEventDetectionSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedEventDetectionSettings")
            .field("constructor", &self.constructor.is_some())
            .finish()
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct RestDetectionSettings {
    pub rest_separation_policy: RestSeparationPolicy,
}

#[derive(Debug, Default)]
pub struct ObjectDetectionSettings {
    pub timed_event_detection_settings: TimedEventDetectionSettings,
    pub note_detection_settings: NoteDetectionSettings,
    pub rest_detection_settings: RestDetectionSettings,
}

/// What the processing functions may assume about the edits an action makes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum ProcessingHint {
    /// Only the content of objects changes. Events are updated where they are and changes to
    /// time or length are ignored.
    None,
    /// Objects may move or change length. If any does, events are re-sorted by time.
    #[default]
    TimeOrLengthCanBeChanged,
}
