use snafu::Snafu;
use std::num::TryFromIntError;

/// The public Error type for this library.
#[derive(Debug, Snafu)]
pub struct Error(LibError);

/// The public Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// The internal Result type for this library.
pub(crate) type LibResult<T> = std::result::Result<T, LibError>;

/// The internal Error type for this library.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub(crate) enum LibError {
    #[snafu(display(
        "{} The time between two events is too large for a u32 delta time: {}",
        site,
        source
    ))]
    DeltaTimeOverflow {
        site: String,
        source: TryFromIntError,
    },

    #[snafu(display("{} At least one track is required: {}", site, description))]
    EmptyCollection { site: String, description: String },

    #[snafu(display("{} Invalid argument: {}", site, description))]
    InvalidArgument { site: String, description: String },

    #[snafu(display("{} There are too many tracks for a 16-bit uint: {}", site, source))]
    TooManyTracks {
        site: String,
        source: TryFromIntError,
    },

    #[snafu(display("{} Unsupported: {}", site, description))]
    Unsupported { site: String, description: String },
}

macro_rules! site {
    () => {
        format!("{}:{}", file!(), line!())
    };
}

macro_rules! invalid_argument_s {
    () => {
        crate::error::InvalidArgumentSnafu {
            site: site!(),
            description: "[no description]",
        }
    };
    ($msg:expr) => {
        crate::error::InvalidArgumentSnafu {
            site: site!(),
            description: $msg,
        }
    };
    ($fmt:expr, $($arg:expr),+) => {
        crate::error::InvalidArgumentSnafu {
            site: site!(),
            description: format!($fmt, $($arg),+),
        }
    };
}

macro_rules! invalid_argument_e {
    () => {
        invalid_argument_s!().build()
    };
    ($msg:expr) => {
        invalid_argument_s!($msg).build()
    };
    ($fmt:expr, $($arg:expr),+) => {
        invalid_argument_s!($fmt, $($arg),+).build()
    };
}

macro_rules! invalid_argument_r {
    () => {
        Err(invalid_argument_e!())
    };
    ($msg:expr) => {
        Err(invalid_argument_e!($msg))
    };
    ($fmt:expr, $($arg:expr),+) => {
        Err(invalid_argument_e!($fmt, $($arg),+))
    };
}

macro_rules! invalid_argument {
    () => {
        return invalid_argument_r!().map_err(Into::into)
    };
    ($msg:expr) => {
        return invalid_argument_r!($msg).map_err(Into::into)
    };
    ($fmt:expr, $($arg:expr),+) => {
        return invalid_argument_r!($fmt, $($arg),+).map_err(Into::into)
    };
}

#[test]
fn site_test() {
    let line = line!() + 1;
    let site = site!();
    assert!(site.contains("error.rs"));
    assert!(site.contains(format!("{}", line).as_str()));
}

#[test]
fn invalid_argument_macros_test_no_message() {
    fn foo() -> LibResult<u64> {
        invalid_argument!();
    }
    let result = foo();
    assert!(result.is_err());
    let message = format!("{}", result.err().unwrap());
    assert!(message.as_str().contains("Invalid argument"));
    assert!(message.as_str().contains("[no description]"));
}

#[test]
fn invalid_argument_macros_test_message() {
    fn foo() -> LibResult<u64> {
        let flerbin = String::from("flerbin");
        invalid_argument!(flerbin);
    }
    let result = foo();
    assert!(result.is_err());
    let message = format!("{}", result.err().unwrap());
    assert!(message.as_str().contains("flerbin"));
}

#[test]
fn invalid_argument_macros_test_public_error() {
    fn foo() -> crate::Result<u64> {
        invalid_argument!("tempo {} is {}", 0, String::from("too small"));
    }
    let result = foo();
    assert!(result.is_err());
    let message = format!("{}", result.err().unwrap());
    assert!(message.as_str().contains("tempo 0 is too small"));
}
