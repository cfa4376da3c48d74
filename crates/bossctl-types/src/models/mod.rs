//! Typed result records returned by the controller API.
//!
//! Each record deserializes from the protobuf JSON mapping (lowerCamelCase keys)
//! and exposes its fields to the renderer under their exported names.

/// Declares a protobuf-style enum: it decodes from either its symbolic name or
/// its wire number (unknown numbers fall back to the first variant), and it
/// converts into `Value::Enum` carrying both.
macro_rules! proto_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $first:ident = $first_num:literal => $first_text:tt,
            $($variant:ident = $num:literal => $text:tt,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize,
        )]
        pub enum $name {
            #[default]
            #[serde(rename = $first_text)]
            $first,
            $(
                #[serde(rename = $text)]
                $variant,
            )*
        }

        impl $name {
            pub fn name(self) -> &'static str {
                match self {
                    $name::$first => $first_text,
                    $($name::$variant => $text,)*
                }
            }

            pub fn number(self) -> i32 {
                match self {
                    $name::$first => $first_num,
                    $($name::$variant => $num,)*
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $first_text => Some($name::$first),
                    $($text => Some($name::$variant),)*
                    _ => None,
                }
            }

            pub fn from_number(number: i64) -> Option<Self> {
                match number {
                    $first_num => Some($name::$first),
                    $($num => Some($name::$variant),)*
                    _ => None,
                }
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                struct EnumVisitor;

                impl serde::de::Visitor<'_> for EnumVisitor {
                    type Value = $name;

                    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                        write!(f, "a {} name or number", stringify!($name))
                    }

                    fn visit_str<E: serde::de::Error>(self, v: &str) -> std::result::Result<$name, E> {
                        const NAMES: &[&str] = &[$first_text, $($text,)*];
                        $name::from_name(v).ok_or_else(|| E::unknown_variant(v, NAMES))
                    }

                    fn visit_i64<E: serde::de::Error>(self, v: i64) -> std::result::Result<$name, E> {
                        Ok($name::from_number(v).unwrap_or_default())
                    }

                    fn visit_u64<E: serde::de::Error>(self, v: u64) -> std::result::Result<$name, E> {
                        Ok(i64::try_from(v)
                            .ok()
                            .and_then($name::from_number)
                            .unwrap_or_default())
                    }

                    fn visit_unit<E: serde::de::Error>(self) -> std::result::Result<$name, E> {
                        Ok($name::default())
                    }
                }

                deserializer.deserialize_any(EnumVisitor)
            }
        }

        impl From<$name> for $crate::Value {
            fn from(e: $name) -> Self {
                $crate::Value::Enum($crate::EnumValue {
                    name: e.name(),
                    number: e.number(),
                })
            }
        }
    };
}

mod adapter;
mod component;
mod device;
mod pm;
mod port;

pub use adapter::AdapterInstance;
pub use component::ComponentInstance;
pub use device::{AdminState, ConnectStatus, Device, OperStatus};
pub use pm::{PmConfig, PmConfigs, PmGroupConfig, PmType};
pub use port::{PeerPort, Port, PortType};
