//! Domain logic shared by the store layer and the app shell.
//!
//! Nothing in this crate performs I/O. Everything here is a pure function
//! over small in-memory values so it can be unit tested directly.

/// Define a closed, string-backed enumeration.
///
/// Each variant maps to the lowercase text stored in the hosted database.
/// The generated type implements `Display`, `FromStr` (rejecting unknown
/// text with a [`CoreError::Validation`](crate::error::CoreError)) and serde
/// using the same text form.
macro_rules! define_text_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $val)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The text stored in the database for this variant.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $val ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::error::CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $val => Ok($name::$variant), )+
                    other => Err(crate::error::CoreError::Validation(format!(
                        "Invalid {} '{other}'. Must be one of: {}",
                        $label,
                        [$($val),+].join(", ")
                    ))),
                }
            }
        }
    };
}

pub mod analytics;
pub mod availability;
pub mod budget;
pub mod content;
pub mod directory;
pub mod error;
pub mod roles;
pub mod routes;
pub mod status;
pub mod types;
pub mod validation;
