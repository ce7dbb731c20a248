//! Conversions between ticks and real or musical time. Only ticks-per-quarter divisions can be
//! converted; an SMPTE division gives an `Unsupported` error.

use crate::error::LibResult;
use crate::tempo_map::{TempoMap, TimeSignature};
use std::convert::TryFrom;

/// A musical position. All three components are zero-based, so the very first tick is
/// `0:0:0`.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct BarBeatTicks {
    bars: u64,
    beats: u64,
    ticks: u64,
}

impl BarBeatTicks {
    pub fn new(bars: u64, beats: u64, ticks: u64) -> Self {
        Self { bars, beats, ticks }
    }

    pub fn bars(&self) -> u64 {
        self.bars
    }

    pub fn beats(&self) -> u64 {
        self.beats
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl TempoMap {
    /// The real time of `time`, in microseconds, rounded to the nearest microsecond.
    pub fn to_microseconds(&self, time: u64) -> crate::Result<u64> {
        let tpq = u128::from(self.ticks_per_quarter()?);
        let mut scaled = 0u128;
        let mut start = 0u64;
        let mut tempo = u128::from(self.tempo_line().default_value().microseconds_per_quarter());
        for change in self.tempo_changes() {
            if change.time() >= time {
                break;
            }
            scaled += u128::from(change.time() - start) * tempo;
            start = change.time();
            tempo = u128::from(change.value().microseconds_per_quarter());
        }
        scaled += u128::from(time - start) * tempo;
        Ok(saturate((scaled + tpq / 2) / tpq))
    }

    /// The tick at `microseconds` of real time, rounded to the nearest tick.
    pub fn from_microseconds(&self, microseconds: u64) -> crate::Result<u64> {
        let tpq = u128::from(self.ticks_per_quarter()?);
        let target = u128::from(microseconds) * tpq;
        let mut scaled = 0u128;
        let mut start = 0u64;
        let mut tempo = u128::from(self.tempo_line().default_value().microseconds_per_quarter());
        for change in self.tempo_changes() {
            let span = u128::from(change.time() - start) * tempo;
            if scaled + span > target {
                break;
            }
            scaled += span;
            start = change.time();
            tempo = u128::from(change.value().microseconds_per_quarter());
        }
        let ticks = (target - scaled + tempo / 2) / tempo;
        Ok(saturate(u128::from(start) + ticks))
    }

    /// The bar, beat and tick of `time`. Every time signature change starts a new bar. A bar that
    /// is cut short by a time signature change still counts as a bar.
    pub fn to_bar_beat_ticks(&self, time: u64) -> crate::Result<BarBeatTicks> {
        Ok(self.to_bar_beat_ticks_inner(time)?)
    }

    fn to_bar_beat_ticks_inner(&self, time: u64) -> LibResult<BarBeatTicks> {
        let tpq = self.ticks_per_quarter()?;
        let mut bars = 0u64;
        let mut start = 0u64;
        let mut time_signature = self.time_signature_line().default_value();
        for change in self.time_signature_changes() {
            if change.time() > time {
                break;
            }
            if change.time() > start {
                let bar = bar_length(tpq, time_signature)?;
                bars += div_ceil(change.time() - start, bar);
            }
            start = change.time();
            time_signature = change.value();
        }
        let bar = bar_length(tpq, time_signature)?;
        let beat = beat_length(tpq, time_signature)?;
        let offset = time - start;
        let within = offset % bar;
        Ok(BarBeatTicks {
            bars: bars + offset / bar,
            beats: within / beat,
            ticks: within % beat,
        })
    }

    /// The tick of a bar, beat and tick position. The inverse of [`TempoMap::to_bar_beat_ticks`].
    pub fn from_bar_beat_ticks(&self, position: BarBeatTicks) -> crate::Result<u64> {
        Ok(self.from_bar_beat_ticks_inner(position)?)
    }

    fn from_bar_beat_ticks_inner(&self, position: BarBeatTicks) -> LibResult<u64> {
        let tpq = self.ticks_per_quarter()?;
        let mut bars = 0u64;
        let mut start = 0u64;
        let mut time_signature = self.time_signature_line().default_value();
        for change in self.time_signature_changes() {
            if change.time() > start {
                let bar = bar_length(tpq, time_signature)?;
                let segment_bars = div_ceil(change.time() - start, bar);
                if position.bars < bars + segment_bars {
                    break;
                }
                bars += segment_bars;
            }
            start = change.time();
            time_signature = change.value();
        }
        let bar = u128::from(bar_length(tpq, time_signature)?);
        let beat = u128::from(beat_length(tpq, time_signature)?);
        let time = u128::from(start)
            + u128::from(position.bars - bars) * bar
            + u128::from(position.beats) * beat
            + u128::from(position.ticks);
        match u64::try_from(time) {
            Ok(time) => Ok(time),
            Err(_) => invalid_argument!("{:?} is too far away to be expressed in ticks", position),
        }
    }

    fn ticks_per_quarter(&self) -> LibResult<u64> {
        match self.division().ticks_per_quarter_note() {
            Some(tpq) if tpq > 0 => Ok(u64::from(tpq)),
            _ => crate::error::UnsupportedSnafu {
                site: site!(),
                description: format!("time conversion with division {:?}", self.division()),
            }
            .fail(),
        }
    }
}

fn bar_length(tpq: u64, time_signature: TimeSignature) -> LibResult<u64> {
    let length = tpq * 4 * u64::from(time_signature.numerator())
        / u64::from(time_signature.denominator());
    if length == 0 {
        invalid_argument!(
            "a bar of {} is shorter than one tick at {} ticks per quarter",
            time_signature,
            tpq
        );
    }
    Ok(length)
}

fn beat_length(tpq: u64, time_signature: TimeSignature) -> LibResult<u64> {
    let length = tpq * 4 / u64::from(time_signature.denominator());
    if length == 0 {
        invalid_argument!(
            "a beat of {} is shorter than one tick at {} ticks per quarter",
            time_signature,
            tpq
        );
    }
    Ok(length)
}

fn div_ceil(value: u64, divisor: u64) -> u64 {
    value / divisor + u64::from(value % divisor != 0)
}

fn saturate(value: u128) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}
