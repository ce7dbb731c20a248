use crate::file::Division;
use crate::tempo_map::{Tempo, TimeSignature};
use crate::value_line::{ValueChange, ValueLine};

/// A snapshot of how ticks relate to real and musical time: the time division plus sparse lists of
/// tempo and time signature changes. At any tick the value in effect is the latest change at or
/// before that tick, or the default when there is none.
///
/// Two maps are equal when their division and both change lists are equal.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TempoMap {
    division: Division,
    tempo_line: ValueLine<Tempo>,
    time_signature_line: ValueLine<TimeSignature>,
}

impl Default for TempoMap {
    fn default() -> Self {
        Self::new(Division::default())
    }
}

impl TempoMap {
    /// A map with no changes.
    pub fn new(division: Division) -> Self {
        Self {
            division,
            tempo_line: ValueLine::new(Tempo::DEFAULT),
            time_signature_line: ValueLine::new(TimeSignature::DEFAULT),
        }
    }

    pub fn with_tempo(tempo: Tempo) -> Self {
        Self::with_division_and_tempo(Division::default(), tempo)
    }

    pub fn with_time_signature(time_signature: TimeSignature) -> Self {
        Self::with_division_and_time_signature(Division::default(), time_signature)
    }

    pub fn with_tempo_and_time_signature(tempo: Tempo, time_signature: TimeSignature) -> Self {
        Self::with_division_tempo_and_time_signature(Division::default(), tempo, time_signature)
    }

    pub fn with_division_and_tempo(division: Division, tempo: Tempo) -> Self {
        let mut map = Self::new(division);
        map.tempo_line.set_value(0, tempo);
        map
    }

    pub fn with_division_and_time_signature(
        division: Division,
        time_signature: TimeSignature,
    ) -> Self {
        let mut map = Self::new(division);
        map.time_signature_line.set_value(0, time_signature);
        map
    }

    pub fn with_division_tempo_and_time_signature(
        division: Division,
        tempo: Tempo,
        time_signature: TimeSignature,
    ) -> Self {
        let mut map = Self::new(division);
        map.tempo_line.set_value(0, tempo);
        map.time_signature_line.set_value(0, time_signature);
        map
    }

    pub fn division(&self) -> Division {
        self.division
    }

    pub fn tempo_at(&self, time: u64) -> Tempo {
        self.tempo_line.value_at(time)
    }

    pub fn time_signature_at(&self, time: u64) -> TimeSignature {
        self.time_signature_line.value_at(time)
    }

    pub fn tempo_changes(&self) -> impl Iterator<Item = &ValueChange<Tempo>> {
        self.tempo_line.changes()
    }

    pub fn time_signature_changes(&self) -> impl Iterator<Item = &ValueChange<TimeSignature>> {
        self.time_signature_line.changes()
    }

    /// `true` if the map has neither tempo nor time signature changes.
    pub fn is_empty(&self) -> bool {
        self.tempo_line.is_empty() && self.time_signature_line.is_empty()
    }

    pub(crate) fn tempo_line(&self) -> &ValueLine<Tempo> {
        &self.tempo_line
    }

    pub(crate) fn tempo_line_mut(&mut self) -> &mut ValueLine<Tempo> {
        &mut self.tempo_line
    }

    pub(crate) fn time_signature_line(&self) -> &ValueLine<TimeSignature> {
        &self.time_signature_line
    }

    pub(crate) fn time_signature_line_mut(&mut self) -> &mut ValueLine<TimeSignature> {
        &mut self.time_signature_line
    }

    pub(crate) fn set_division(&mut self, division: Division) {
        self.division = division
    }
}
