use crate::interaction::{Note, Rest, TimedEvent};
use std::ops::BitOr;

/// Anything with an absolute time in ticks.
pub trait Timed {
    fn time(&self) -> u64;
    fn set_time(&mut self, time: u64);
}

impl Timed for TimedEvent {
    fn time(&self) -> u64 {
        TimedEvent::time(self)
    }

    fn set_time(&mut self, time: u64) {
        TimedEvent::set_time(self, time)
    }
}

impl Timed for Note {
    fn time(&self) -> u64 {
        Note::time(self)
    }

    fn set_time(&mut self, time: u64) {
        Note::set_time(self, time)
    }
}

impl Timed for Rest {
    fn time(&self) -> u64 {
        Rest::time(self)
    }

    fn set_time(&mut self, time: u64) {
        Rest::set_time(self, time)
    }
}

/// Every kind of object the detection engine produces.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TimedObject {
    Event(TimedEvent),
    Note(Note),
    Rest(Rest),
}

impl TimedObject {
    pub fn object_type(&self) -> ObjectType {
        match self {
            TimedObject::Event(_) => ObjectType::TIMED_EVENT,
            TimedObject::Note(_) => ObjectType::NOTE,
            TimedObject::Rest(_) => ObjectType::REST,
        }
    }

    /// The span the object covers. Events have a length of zero.
    pub fn length(&self) -> u64 {
        match self {
            TimedObject::Event(_) => 0,
            TimedObject::Note(n) => n.length(),
            TimedObject::Rest(r) => r.length(),
        }
    }
}

impl Timed for TimedObject {
    fn time(&self) -> u64 {
        match self {
            TimedObject::Event(e) => e.time(),
            TimedObject::Note(n) => n.time(),
            TimedObject::Rest(r) => r.time(),
        }
    }

    fn set_time(&mut self, time: u64) {
        match self {
            TimedObject::Event(e) => e.set_time(time),
            TimedObject::Note(n) => n.set_time(time),
            TimedObject::Rest(r) => r.set_time(time),
        }
    }
}

impl From<TimedEvent> for TimedObject {
    fn from(value: TimedEvent) -> Self {
        TimedObject::Event(value)
    }
}

impl From<Note> for TimedObject {
    fn from(value: Note) -> Self {
        TimedObject::Note(value)
    }
}

impl From<Rest> for TimedObject {
    fn from(value: Rest) -> Self {
        TimedObject::Rest(value)
    }
}

/// A set of object kinds, combined with `|`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ObjectType(u8);

impl ObjectType {
    pub const TIMED_EVENT: ObjectType = ObjectType(0b001);
    pub const NOTE: ObjectType = ObjectType(0b010);
    pub const REST: ObjectType = ObjectType(0b100);

    pub const fn union(self, other: ObjectType) -> ObjectType {
        ObjectType(self.0 | other.0)
    }

    /// `true` if every kind in `other` is also in `self`.
    pub const fn contains(self, other: ObjectType) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ObjectType {
    type Output = ObjectType;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

/// The object types a [`crate::interaction::TimedObjectsManager`] can manage. Detection splits its
/// output into objects of the managed type and everything else.
pub trait ManagedObject: Timed + Clone {
    /// The kinds detection has to produce for this type.
    const OBJECT_TYPE: ObjectType;

    /// Gives the object back unchanged when it is not of this type.
    fn from_timed_object(object: TimedObject) -> Result<Self, TimedObject>;

    fn into_timed_object(self) -> TimedObject;

    /// Time and length, used to tell whether an edit moved the object.
    fn timing(&self) -> (u64, u64);
}

impl ManagedObject for Note {
    const OBJECT_TYPE: ObjectType = ObjectType::NOTE;

    fn from_timed_object(object: TimedObject) -> Result<Self, TimedObject> {
        match object {
            TimedObject::Note(note) => Ok(note),
            other => Err(other),
        }
    }

    fn into_timed_object(self) -> TimedObject {
        TimedObject::Note(self)
    }

    fn timing(&self) -> (u64, u64) {
        (self.time(), self.length())
    }
}

impl ManagedObject for TimedEvent {
    const OBJECT_TYPE: ObjectType = ObjectType::TIMED_EVENT;

    fn from_timed_object(object: TimedObject) -> Result<Self, TimedObject> {
        match object {
            TimedObject::Event(event) => Ok(event),
            other => Err(other),
        }
    }

    fn into_timed_object(self) -> TimedObject {
        TimedObject::Event(self)
    }

    fn timing(&self) -> (u64, u64) {
        (self.time(), 0)
    }
}

impl ManagedObject for TimedObject {
    const OBJECT_TYPE: ObjectType = ObjectType::TIMED_EVENT.union(ObjectType::NOTE);

    fn from_timed_object(object: TimedObject) -> Result<Self, TimedObject> {
        Ok(object)
    }

    fn into_timed_object(self) -> TimedObject {
        self
    }

    fn timing(&self) -> (u64, u64) {
        (self.time(), self.length())
    }
}

#[test]
fn object_type_flags() {
    let both = ObjectType::NOTE | ObjectType::REST;
    assert!(both.contains(ObjectType::NOTE));
    assert!(both.contains(ObjectType::REST));
    assert!(!both.contains(ObjectType::TIMED_EVENT));
    assert!(!ObjectType::NOTE.contains(both));
}
