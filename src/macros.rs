//! The `macros` module provides macros for internal use.

/// Generates a bounded newtype around an integer.
///
/// Example: `clamp!(Channel, u8, 0, 15, 0, pub);`
/// - `Channel` is the name of the struct that will be created.
/// - `u8` is the underlying data type.
/// - `0` is the minimum allowed value.
/// - `15` is the maximum allowed value.
/// - `0` is the default value.
/// - `pub` is the visibility of the struct.
///
/// `new` and `set` clamp silently. `try_new` refuses out-of-range input with an `InvalidArgument`
/// error, which is what the tempo and time division constructors use.
macro_rules! clamp {
    (
        $(#[$meta:meta])*
        $symbol:ident, $inner_type:ty, $min:expr, $max:expr, $default:expr, $visibility:vis
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
        $visibility struct $symbol($inner_type);

        impl Default for $symbol {
            fn default() -> Self {
                Self::new($default)
            }
        }

        impl $symbol {
            /// The smallest value this type can hold.
            #[allow(dead_code)]
            $visibility const MIN: $symbol = $symbol($min);

            /// The largest value this type can hold.
            #[allow(dead_code)]
            $visibility const MAX: $symbol = $symbol($max);

            /// Silently clamps the value if it is out of range. See [`Self::try_new`] for a
            /// checked alternative.
            #[allow(dead_code)]
            $visibility const fn new(value: $inner_type) -> Self {
                let (clamped, _) = Self::clamp(value);
                Self(clamped)
            }

            /// Returns an `InvalidArgument` error if `value` is out of range.
            #[allow(dead_code)]
            $visibility fn try_new(value: $inner_type) -> crate::Result<Self> {
                let (clamped, in_range) = Self::clamp(value);
                if !in_range {
                    invalid_argument!(
                        "{} {} is outside of the range {}..={}",
                        stringify!($symbol),
                        value,
                        $min,
                        $max
                    );
                }
                Ok(Self(clamped))
            }

            /// Returns the inner value.
            #[allow(dead_code)]
            $visibility const fn get(&self) -> $inner_type {
                self.0
            }

            /// Clamps and sets. Returns `true` if `value` was in range and `false` if it had to
            /// be clamped.
            #[allow(dead_code)]
            $visibility fn set(&mut self, value: $inner_type) -> bool {
                let (clamped, result) = Self::clamp(value);
                self.0 = clamped;
                result
            }

            #[allow(unused_comparisons)]
            const fn clamp(value: $inner_type) -> ($inner_type, bool) {
                if value < $min {
                    ($min, false)
                } else if value > $max {
                    ($max, false)
                } else {
                    (value, true)
                }
            }
        }

        impl From<$inner_type> for $symbol {
            fn from(value: $inner_type) -> Self {
                Self::new(value)
            }
        }

        impl From<$symbol> for $inner_type {
            fn from(value: $symbol) -> $inner_type {
                value.0
            }
        }

        impl std::fmt::Display for $symbol {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

#[test]
#[allow(clippy::disallowed_names)]
fn clamp_test() {
    clamp!(Foo, u8, 1, 16, 1, pub);
    let foo: Foo = 0u8.into();
    let foo_val: u8 = foo.into();
    assert_eq!(1, foo_val);
    let fmted = format!("{}", Foo::new(6));
    assert_eq!("6", fmted.as_str());
    assert_eq!(16, Foo::MAX.get());
}

#[test]
#[allow(clippy::disallowed_names)]
fn clamp_try_new_test() {
    clamp!(Foo, u16, 1, 300, 1, pub);
    assert_eq!(300, Foo::try_new(300).unwrap().get());
    let message = format!("{}", Foo::try_new(0).err().unwrap());
    assert!(message.contains("Foo 0 is outside of the range 1..=300"));
    let mut foo = Foo::default();
    assert!(!foo.set(301));
    assert_eq!(300, foo.get());
}
