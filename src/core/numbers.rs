clamp!(
    /// The MIDI channel, `0` through `15`. Values outside of that range are clamped.
    Channel,
    u8,
    0,
    15,
    0,
    pub
);

clamp!(
    /// The MIDI note number, a `u7`. Middle C (`C4`) is `60`, which is also the default.
    NoteNumber,
    u8,
    0,
    127,
    60,
    pub
);

clamp!(
    /// Note-on or note-off velocity, a `u7`. A note-on with velocity `0` is treated as a note-off
    /// by the note detection engine.
    Velocity,
    u8,
    0,
    127,
    72,
    pub
);

clamp!(
    /// The MIDI program number, a `u7`.
    Program,
    u8,
    0,
    127,
    0,
    pub
);

clamp!(
    /// A controller number or a controller value, both are `u7`.
    ControlValue,
    u8,
    0,
    127,
    0,
    pub
);

clamp!(
    /// The MIDI pitch bend value, a `u14`. `8192` is the center (no bend).
    PitchBendValue,
    u16,
    0,
    16383,
    8192,
    pub
);
