//! Closed label sets shared by the catalog and the menu engine.
//!
//! Every set has a canonical English label used for display and
//! serialization, and accepts the catalog's native (Chinese) label on input.

use err_derive::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(display = "unknown {} label: {:?}", kind, value)]
pub struct LabelError {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! closed_set {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($kind:expr) {
            $($variant:ident => ($label:expr, $native:expr)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            pub fn native_label(self) -> &'static str {
                match self {
                    $($name::$variant => $native),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
                fmt.write_str(self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::labels::LabelError;
            fn from_str(src: &str) -> Result<Self, Self::Err> {
                let src = src.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label() == src || v.native_label() == src)
                    .ok_or_else(|| $crate::labels::LabelError {
                        kind: $kind,
                        value: src.to_string(),
                    })
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}
