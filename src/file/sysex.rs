/// A system exclusive event. The data is opaque and passes through untouched.
#[derive(Clone, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct SysexEvent {
    t: SysexEventType,
    data: Vec<u8>,
}

impl SysexEvent {
    pub fn new(t: SysexEventType, data: Vec<u8>) -> Self {
        Self { t, data }
    }

    pub fn event_type(&self) -> SysexEventType {
        self.t
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash, Default)]
pub enum SysexEventType {
    /// `F0 <length> <bytes to be transmitted after F0>`
    #[default]
    F0 = 0xf0,
    /// `F7 <length> <all bytes to be transmitted>`
    F7 = 0xf7,
}
