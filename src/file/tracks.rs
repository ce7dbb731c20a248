use crate::file::Track;
use crate::MidiFile;

/// Anything that holds an ordered list of tracks. The interaction and tempo map functions take a
/// `Tracks` source so they work the same on a single [`Track`], a slice or `Vec` of tracks, or a
/// whole [`MidiFile`].
pub trait Tracks {
    fn as_tracks(&self) -> &[Track];
    fn as_tracks_mut(&mut self) -> &mut [Track];
}

impl Tracks for Track {
    fn as_tracks(&self) -> &[Track] {
        std::slice::from_ref(self)
    }

    fn as_tracks_mut(&mut self) -> &mut [Track] {
        std::slice::from_mut(self)
    }
}

impl Tracks for [Track] {
    fn as_tracks(&self) -> &[Track] {
        self
    }

    fn as_tracks_mut(&mut self) -> &mut [Track] {
        self
    }
}

impl Tracks for Vec<Track> {
    fn as_tracks(&self) -> &[Track] {
        self.as_slice()
    }

    fn as_tracks_mut(&mut self) -> &mut [Track] {
        self.as_mut_slice()
    }
}

impl Tracks for MidiFile {
    fn as_tracks(&self) -> &[Track] {
        self.tracks.as_slice()
    }

    fn as_tracks_mut(&mut self) -> &mut [Track] {
        self.tracks.as_mut_slice()
    }
}
