use log::warn;
use std::borrow::Cow;
use std::fmt::{Display, Formatter};

/// The payload of the text-like meta events. MIDI does not say which encoding text uses, so
/// anything that is not valid UTF-8 is kept as raw bytes. Two `Text` values compare equal only if
/// they hold the same bytes in the same variant.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum Text {
    Utf8(String),
    Other(Vec<u8>),
}

impl Default for Text {
    fn default() -> Self {
        Text::Utf8(String::new())
    }
}

impl Display for Text {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.as_str(), f)
    }
}

impl From<Vec<u8>> for Text {
    fn from(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(s) => Text::Utf8(s),
            Err(e) => {
                warn!("non UTF-8 text encountered, keeping the raw bytes");
                Text::Other(e.into_bytes())
            }
        }
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Text::Utf8(s)
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Text::Utf8(s.into())
    }
}

impl Text {
    pub fn new<S: Into<String>>(s: S) -> Self {
        Text::Utf8(s.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Text::Utf8(s) => s.as_bytes(),
            Text::Other(b) => b.as_slice(),
        }
    }

    /// Lossy for [`Text::Other`].
    pub fn as_str(&self) -> Cow<'_, str> {
        match self {
            Text::Utf8(s) => Cow::Borrowed(s.as_str()),
            Text::Other(b) => String::from_utf8_lossy(b),
        }
    }
}

#[test]
fn non_utf8_bytes_are_kept() {
    let text = Text::from(vec![0x66, 0xff, 0x6f]);
    assert!(matches!(text, Text::Other(_)));
    assert_eq!(&[0x66, 0xff, 0x6f], text.as_bytes());
    assert_eq!(Text::new("abc"), Text::from(b"abc".to_vec()));
}
