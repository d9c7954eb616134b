//! The six core attributes and a fixed-size table keyed by them.

use core::str::FromStr;

/// The six core attributes that define a character.
///
/// Canonical order is `STR, DEX, INT, WIS, CON, CHA`; every per-attribute
/// table and every export uses it.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    serde::Serialize,
    serde::Deserialize,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum Attribute {
    /// Strength
    Str,
    /// Dexterity
    Dex,
    /// Intelligence
    Int,
    /// Wisdom
    Wis,
    /// Constitution
    Con,
    /// Charisma
    Cha,
}

impl Attribute {
    pub const COUNT: usize = 6;

    pub const ALL: [Attribute; Self::COUNT] = [
        Attribute::Str,
        Attribute::Dex,
        Attribute::Int,
        Attribute::Wis,
        Attribute::Con,
        Attribute::Cha,
    ];

    /// Parses an attribute name, accepting any ASCII case.
    pub fn parse(name: &str) -> Option<Self> {
        Self::from_str(name).ok()
    }

    #[inline]
    pub const fn as_index(self) -> usize {
        self as usize
    }
}

/// One value per attribute, serialized as `{ "STR": .., "DEX": .., ... }` in
/// canonical order.
///
/// Missing keys deserialize to `T::default()`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AttributeSet<T> {
    #[serde(rename = "STR")]
    pub str: T,
    #[serde(rename = "DEX")]
    pub dex: T,
    #[serde(rename = "INT")]
    pub int: T,
    #[serde(rename = "WIS")]
    pub wis: T,
    #[serde(rename = "CON")]
    pub con: T,
    #[serde(rename = "CHA")]
    pub cha: T,
}

impl<T> AttributeSet<T> {
    pub const fn new(str: T, dex: T, int: T, wis: T, con: T, cha: T) -> Self {
        Self {
            str,
            dex,
            int,
            wis,
            con,
            cha,
        }
    }

    pub fn get(&self, attribute: Attribute) -> &T {
        match attribute {
            Attribute::Str => &self.str,
            Attribute::Dex => &self.dex,
            Attribute::Int => &self.int,
            Attribute::Wis => &self.wis,
            Attribute::Con => &self.con,
            Attribute::Cha => &self.cha,
        }
    }

    pub fn get_mut(&mut self, attribute: Attribute) -> &mut T {
        match attribute {
            Attribute::Str => &mut self.str,
            Attribute::Dex => &mut self.dex,
            Attribute::Int => &mut self.int,
            Attribute::Wis => &mut self.wis,
            Attribute::Con => &mut self.con,
            Attribute::Cha => &mut self.cha,
        }
    }

    /// Iterates `(attribute, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &T)> {
        Attribute::ALL.into_iter().map(move |a| (a, self.get(a)))
    }

    /// Builds a new set by applying `f` to every attribute.
    pub fn map<U>(&self, mut f: impl FnMut(Attribute, &T) -> U) -> AttributeSet<U> {
        AttributeSet {
            str: f(Attribute::Str, &self.str),
            dex: f(Attribute::Dex, &self.dex),
            int: f(Attribute::Int, &self.int),
            wis: f(Attribute::Wis, &self.wis),
            con: f(Attribute::Con, &self.con),
            cha: f(Attribute::Cha, &self.cha),
        }
    }
}

impl<T: Copy> AttributeSet<T> {
    /// A set with the same value for every attribute.
    pub const fn splat(value: T) -> Self {
        Self::new(value, value, value, value, value, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(Attribute::parse("str"), Some(Attribute::Str));
        assert_eq!(Attribute::parse("Cha"), Some(Attribute::Cha));
        assert_eq!(Attribute::parse("LUCK"), None);
        assert_eq!(Attribute::Wis.to_string(), "WIS");
    }

    #[test]
    fn serializes_in_canonical_order() {
        let set = AttributeSet::new(1, 2, 3, 4, 5, 6);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"STR":1,"DEX":2,"INT":3,"WIS":4,"CON":5,"CHA":6}"#);
    }

    #[test]
    fn missing_keys_default() {
        let set: AttributeSet<i32> = serde_json::from_str(r#"{"CON":14}"#).unwrap();
        assert_eq!(set.con, 14);
        assert_eq!(set.str, 0);
    }
}
