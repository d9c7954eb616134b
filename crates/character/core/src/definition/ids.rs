//! String identifiers for definitions and stats.
//!
//! Identifiers come from configuration and are compared byte-wise. Their
//! `Ord` implementation is plain lexicographic order, which is the order used
//! for every deterministic tie-break and every exported list.

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl core::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

define_id!(
    /// Identifier of a character class (e.g. `warrior`).
    ClassId
);

define_id!(
    /// Identifier of a skill tree.
    TreeId
);

define_id!(
    /// Identifier of a skill node. Unique across all trees of a catalog.
    SkillId
);

define_id!(
    /// Name of a stat targeted by modifiers.
    ///
    /// The six attribute names (`STR`, `DEX`, ...) are stat ids as well; any
    /// other name denotes a derived stat such as `HP`.
    StatId
);

impl From<super::Attribute> for StatId {
    fn from(attribute: super::Attribute) -> Self {
        Self(attribute.as_ref().to_owned())
    }
}
