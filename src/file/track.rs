use crate::core::{
    Channel, Message, NoteMessage, NoteNumber, PitchBendMessage, PitchBendValue, Velocity,
};
use crate::error::LibResult;
use crate::file::{Event, MetaEvent, TrackEvent};
use crate::tempo_map::{Tempo, TimeSignature};
use crate::Text;
use log::{debug, warn};
use snafu::{OptionExt, ResultExt};
use std::convert::TryFrom;

/// 2.3 - Track Chunks
/// The track chunks (type MTrk) are where actual song data is stored. Each track chunk is simply a
/// stream of MIDI events (and non-MIDI events), preceded by delta-time values.
///
/// `<Track Chunk> = <chunk type><length><MTrk event>+`
///
/// Only the event list is modeled. The absolute time of the event at index `i` is the sum of the
/// delta times at `0..=i`.
#[derive(Clone, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct Track {
    events: Vec<TrackEvent>,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the track has no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The number of events in the track.
    pub fn events_len(&self) -> usize {
        self.events.len()
    }

    /// Iterator over the events in the track.
    pub fn events(&self) -> impl Iterator<Item = &TrackEvent> {
        self.events.iter()
    }

    /// Mutable iterator over the events in the track. Changing a delta time shifts every event
    /// after it.
    pub fn events_mut(&mut self) -> impl Iterator<Item = &mut TrackEvent> {
        self.events.iter_mut()
    }

    pub fn event(&self, index: usize) -> Option<&TrackEvent> {
        self.events.get(index)
    }

    pub fn event_mut(&mut self, index: usize) -> Option<&mut TrackEvent> {
        self.events.get_mut(index)
    }

    /// Iterator over `(absolute time, event)`.
    pub fn timed_events(&self) -> impl Iterator<Item = (u64, &TrackEvent)> {
        self.events.iter().scan(0u64, |time, event| {
            *time += u64::from(event.delta_time());
            Some((*time, event))
        })
    }

    /// The absolute time of the last event, `0` for an empty track.
    pub fn duration(&self) -> u64 {
        self.events
            .iter()
            .map(|e| u64::from(e.delta_time()))
            .sum()
    }

    /// Add an event to the end.
    pub fn push_event(&mut self, delta_time: u32, event: Event) -> crate::Result<()> {
        self.events.push(TrackEvent::new(delta_time, event));
        Ok(())
    }

    /// Add event at `index` and shift everything after it.
    pub fn insert_event(
        &mut self,
        index: usize,
        delta_time: u32,
        event: Event,
    ) -> crate::Result<()> {
        if index > self.events.len() {
            invalid_argument!(
                "insert index {} is out of range for a track with {} events",
                index,
                self.events.len()
            );
        }
        self.events.insert(index, TrackEvent::new(delta_time, event));
        Ok(())
    }

    /// Replace the event at `index`.
    pub fn replace_event(
        &mut self,
        index: usize,
        delta_time: u32,
        event: Event,
    ) -> crate::Result<()> {
        let len = self.events.len();
        let existing = self.events.get_mut(index).context(invalid_argument_s!(
            "replace index {} is out of range for a track with {} events",
            index,
            len
        ))?;
        *existing = TrackEvent::new(delta_time, event);
        Ok(())
    }

    /// Remove the event at `index`. Its delta time is added to the event that follows it, so the
    /// remaining events keep their absolute times.
    pub fn remove_event(&mut self, index: usize) -> crate::Result<TrackEvent> {
        Ok(self.remove_event_inner(index)?)
    }

    fn remove_event_inner(&mut self, index: usize) -> LibResult<TrackEvent> {
        if index >= self.events.len() {
            invalid_argument!(
                "remove index {} is out of range for a track with {} events",
                index,
                self.events.len()
            );
        }
        let removed = self.events.remove(index);
        if let Some(next) = self.events.get_mut(index) {
            let delta = u64::from(next.delta_time()) + u64::from(removed.delta_time());
            let delta = u32::try_from(delta)
                .context(crate::error::DeltaTimeOverflowSnafu { site: site!() })?;
            next.set_delta_time(delta);
        }
        Ok(removed)
    }

    /// Remove every event for which `predicate` returns `true`, keeping the absolute times of the
    /// rest. Returns the number of events removed.
    pub fn remove_events<F>(&mut self, mut predicate: F) -> crate::Result<usize>
    where
        F: FnMut(&TrackEvent) -> bool,
    {
        let mut carry = 0u64;
        let mut removed = 0usize;
        let mut kept = Vec::with_capacity(self.events.len());
        for event in &self.events {
            if predicate(event) {
                carry += u64::from(event.delta_time());
                removed += 1;
                continue;
            }
            let mut event = event.clone();
            if carry > 0 {
                let delta = u32::try_from(carry + u64::from(event.delta_time()))
                    .context(crate::error::DeltaTimeOverflowSnafu { site: site!() })?;
                event.set_delta_time(delta);
                carry = 0;
            }
            kept.push(event);
        }
        // the track is untouched unless every delta fit
        self.events = kept;
        Ok(removed)
    }

    /// Swaps in a whole new event list and returns the old one.
    pub fn replace_events(&mut self, events: Vec<TrackEvent>) -> Vec<TrackEvent> {
        std::mem::replace(&mut self.events, events)
    }

    /// Add, or replace, the track name at the beginning of a track.
    pub fn set_name<S: Into<String>>(&mut self, name: S) -> crate::Result<()> {
        let name = Text::new(name);
        self.set_leading_meta(MetaEvent::TrackName(name), |m| {
            matches!(m, MetaEvent::TrackName(_))
        })
    }

    /// Add, or replace, the instrument name at the beginning of a track.
    pub fn set_instrument_name<S: Into<String>>(&mut self, name: S) -> crate::Result<()> {
        let name = Text::new(name);
        self.set_leading_meta(MetaEvent::InstrumentName(name), |m| {
            matches!(m, MetaEvent::InstrumentName(_))
        })
    }

    fn set_leading_meta<F>(&mut self, meta: MetaEvent, is_same_kind: F) -> crate::Result<()>
    where
        F: Fn(&MetaEvent) -> bool,
    {
        let mut found = None;
        for (ix, event) in self.events.iter().enumerate() {
            if event.delta_time() != 0 {
                break;
            }
            if let Event::Meta(existing) = event.event() {
                if is_same_kind(existing) {
                    found = Some(ix);
                    break;
                }
            }
        }
        match found {
            Some(ix) => {
                debug!("replacing {:?} at index {}", meta, ix);
                self.replace_event(ix, 0, Event::Meta(meta))
            }
            None => self.insert_event(0, 0, Event::Meta(meta)),
        }
    }

    /// Add a time signature.
    pub fn push_time_signature(
        &mut self,
        delta_time: u32,
        time_signature: TimeSignature,
    ) -> crate::Result<()> {
        let event = Event::Meta(MetaEvent::TimeSignature(time_signature.into()));
        self.push_event(delta_time, event)
    }

    /// Add a tempo message.
    pub fn push_tempo(&mut self, delta_time: u32, tempo: Tempo) -> crate::Result<()> {
        let event = Event::Meta(MetaEvent::SetTempo(tempo.into()));
        self.push_event(delta_time, event)
    }

    /// Add a note on message.
    pub fn push_note_on(
        &mut self,
        delta_time: u32,
        channel: Channel,
        note_number: NoteNumber,
        velocity: Velocity,
    ) -> crate::Result<()> {
        let note_on = Event::Midi(Message::NoteOn(NoteMessage {
            channel,
            note_number,
            velocity,
        }));
        self.push_event(delta_time, note_on)
    }

    /// Add a note off message.
    pub fn push_note_off(
        &mut self,
        delta_time: u32,
        channel: Channel,
        note_number: NoteNumber,
        velocity: Velocity,
    ) -> crate::Result<()> {
        let note_off = Event::Midi(Message::NoteOff(NoteMessage {
            channel,
            note_number,
            velocity,
        }));
        self.push_event(delta_time, note_off)
    }

    /// Add a lyric.
    pub fn push_lyric<S: Into<String>>(&mut self, delta_time: u32, lyric: S) -> crate::Result<()> {
        let lyric = Event::Meta(MetaEvent::Lyric(Text::new(lyric)));
        self.push_event(delta_time, lyric)
    }

    /// Add a pitch bend value.
    pub fn push_pitch_bend(
        &mut self,
        delta_time: u32,
        channel: Channel,
        pitch_bend: PitchBendValue,
    ) -> crate::Result<()> {
        let pitch_bend = Event::Midi(Message::PitchBend(PitchBendMessage {
            channel,
            pitch_bend,
        }));
        self.push_event(delta_time, pitch_bend)
    }

    /// Add an end-of-track event if the last event is not already one.
    pub fn ensure_end_of_track(&mut self) -> crate::Result<()> {
        if !self.events.last().map(TrackEvent::is_end).unwrap_or(false) {
            self.push_event(0, Event::Meta(MetaEvent::EndOfTrack))?;
        }
        Ok(())
    }
}

/// Turns time-sorted `(absolute time, event)` pairs back into a delta-time encoded event list.
///
/// An end-of-track event is moved behind everything else and takes the largest time seen, since
/// edits may have moved other events past it. Extra end-of-track events are dropped.
pub(crate) fn encode_events<I>(timed: I) -> LibResult<Vec<TrackEvent>>
where
    I: IntoIterator<Item = (u64, Event)>,
{
    let mut end: Option<u64> = None;
    let mut body = Vec::new();
    for (time, event) in timed {
        if event.is_end_of_track() {
            if end.is_some() {
                warn!("dropping an extra end-of-track event at {}", time);
            }
            end = Some(end.map_or(time, |e| e.max(time)));
        } else {
            body.push((time, event));
        }
    }
    if let Some(end_time) = end {
        let last = body.last().map_or(0, |(t, _)| *t);
        body.push((end_time.max(last), Event::Meta(MetaEvent::EndOfTrack)));
    }
    let mut previous = 0u64;
    let mut events = Vec::with_capacity(body.len());
    for (time, event) in body {
        let delta = time.checked_sub(previous).context(invalid_argument_s!(
            "event time {} is before the previous event time {}",
            time,
            previous
        ))?;
        let delta = u32::try_from(delta)
            .context(crate::error::DeltaTimeOverflowSnafu { site: site!() })?;
        events.push(TrackEvent::new(delta, event));
        previous = time;
    }
    Ok(events)
}
