use crate::file::Event;

/// Where a detected event sits: the index of its track and its index within that track.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct EventOrigin {
    track: usize,
    index: usize,
}

impl EventOrigin {
    pub fn new(track: usize, index: usize) -> Self {
        Self { track, index }
    }

    pub fn track(&self) -> usize {
        self.track
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

/// An event together with its absolute time. Detected timed events remember their
/// [`EventOrigin`] so edits can be written back to the same place. The origin takes no part in
/// equality.
#[derive(Clone, Debug)]
pub struct TimedEvent {
    event: Event,
    time: u64,
    origin: Option<EventOrigin>,
}

impl PartialEq for TimedEvent {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.event == other.event
    }
}

impl Eq for TimedEvent {}

impl TimedEvent {
    pub fn new(event: Event, time: u64) -> Self {
        Self {
            event,
            time,
            origin: None,
        }
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn event_mut(&mut self) -> &mut Event {
        &mut self.event
    }

    pub fn set_event(&mut self, event: Event) {
        self.event = event
    }

    pub fn into_event(self) -> Event {
        self.event
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn set_time(&mut self, time: u64) {
        self.time = time
    }

    /// `None` for events that were not detected from tracks.
    pub fn origin(&self) -> Option<EventOrigin> {
        self.origin
    }

    pub(crate) fn set_origin(&mut self, origin: Option<EventOrigin>) {
        self.origin = origin
    }
}

/// What a timed event constructor gets to look at.
#[derive(Clone, Copy, Debug)]
pub struct TimedEventData<'a> {
    event: &'a Event,
    time: u64,
    origin: EventOrigin,
}

impl<'a> TimedEventData<'a> {
    pub(crate) fn new(event: &'a Event, time: u64, origin: EventOrigin) -> Self {
        Self {
            event,
            time,
            origin,
        }
    }

    pub fn event(&self) -> &'a Event {
        self.event
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn origin(&self) -> EventOrigin {
        self.origin
    }

    /// The timed event that is built when there is no constructor.
    pub fn default_timed_event(&self) -> TimedEvent {
        TimedEvent {
            event: self.event.clone(),
            time: self.time,
            origin: Some(self.origin),
        }
    }
}
