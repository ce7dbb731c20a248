use crate::core::{Channel, NoteNumber};

/// A span with no notes sounding. Depending on the [`RestSeparationPolicy`] a rest is a gap across
/// all notes or only across the notes of one channel and/or note number.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Rest {
    time: u64,
    length: u64,
    channel: Option<Channel>,
    note_number: Option<NoteNumber>,
}

impl Rest {
    pub fn new(
        time: u64,
        length: u64,
        channel: Option<Channel>,
        note_number: Option<NoteNumber>,
    ) -> Self {
        Self {
            time,
            length,
            channel,
            note_number,
        }
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn set_time(&mut self, time: u64) {
        self.time = time
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn end_time(&self) -> u64 {
        self.time.saturating_add(self.length)
    }

    pub fn channel(&self) -> Option<Channel> {
        self.channel
    }

    pub fn note_number(&self) -> Option<NoteNumber> {
        self.note_number
    }
}

/// Which notes a rest has to be free of.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum RestSeparationPolicy {
    /// A rest is a span where no note sounds at all.
    #[default]
    NoSeparation,
    /// Rests are found per channel.
    SeparateByChannel,
    /// Rests are found per note number, across channels.
    SeparateByNoteNumber,
    /// Rests are found per channel and note number.
    SeparateByChannelAndNoteNumber,
}

impl RestSeparationPolicy {
    pub(crate) fn sets_channel(self) -> bool {
        matches!(
            self,
            RestSeparationPolicy::SeparateByChannel
                | RestSeparationPolicy::SeparateByChannelAndNoteNumber
        )
    }

    pub(crate) fn sets_note_number(self) -> bool {
        matches!(
            self,
            RestSeparationPolicy::SeparateByNoteNumber
                | RestSeparationPolicy::SeparateByChannelAndNoteNumber
        )
    }
}
