//! Five-element (오행) classification and tally.
//!
//! Every stem and branch belongs to exactly one element. A chart's tally
//! counts the eight symbols of its four pillars.

use std::fmt::{Display, Formatter};

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ganji::{Branch, Pillar, Stem};

/// The five elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

/// All elements in tie-break priority order (Wood first).
pub const ALL_ELEMENTS: [Element; 5] = [
    Element::Wood,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Water,
];

impl Element {
    /// Korean name (목, 화, 토, 금, 수).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wood => "목",
            Self::Fire => "화",
            Self::Earth => "토",
            Self::Metal => "금",
            Self::Water => "수",
        }
    }

    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Wood => "Wood",
            Self::Fire => "Fire",
            Self::Earth => "Earth",
            Self::Metal => "Metal",
            Self::Water => "Water",
        }
    }

    /// 0-based index, also the tie-break rank (lower wins).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Look up by Korean or English name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        ALL_ELEMENTS
            .into_iter()
            .find(|e| e.name() == name || e.english_name().eq_ignore_ascii_case(name))
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let name = String::deserialize(d)?;
        Self::from_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown element {name:?}")))
    }
}

impl Stem {
    /// Stems pair off by element: 갑을 Wood, 병정 Fire, 무기 Earth,
    /// 경신 Metal, 임계 Water.
    pub const fn element(self) -> Element {
        ALL_ELEMENTS[(self.index() / 2) as usize]
    }
}

impl Branch {
    pub const fn element(self) -> Element {
        match self {
            Self::In | Self::Myo => Element::Wood,
            Self::Sa | Self::O => Element::Fire,
            Self::Chuk | Self::Jin | Self::Mi | Self::Sul => Element::Earth,
            Self::Sin | Self::Yu => Element::Metal,
            Self::Hae | Self::Ja => Element::Water,
        }
    }
}

/// Per-element symbol counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ElementCount {
    counts: [u8; 5],
}

impl ElementCount {
    pub const fn get(&self, element: Element) -> u8 {
        self.counts[element.index() as usize]
    }

    /// Saturates at `u8::MAX`.
    pub fn add(&mut self, element: Element) {
        let slot = &mut self.counts[element.index() as usize];
        *slot = slot.saturating_add(1);
    }

    /// Count both symbols of a pillar.
    pub fn add_pillar(&mut self, pillar: Pillar) {
        self.add(pillar.stem.element());
        self.add(pillar.branch.element());
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&c| u32::from(c)).sum()
    }

    /// The element with the highest count. Ties go to the element that
    /// comes first in Wood > Fire > Earth > Metal > Water order.
    pub fn dominant(&self) -> Element {
        let mut best = Element::Wood;
        for e in ALL_ELEMENTS {
            if self.get(e) > self.get(best) {
                best = e;
            }
        }
        best
    }

    /// `(element, count)` pairs in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (Element, u8)> + '_ {
        ALL_ELEMENTS.into_iter().map(|e| (e, self.get(e)))
    }
}

impl Serialize for ElementCount {
    /// Serialises as `{"counts": {"목": n, ...}, "dominant": "목"}`.
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        struct Counts<'a>(&'a ElementCount);

        impl Serialize for Counts<'_> {
            fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                let mut map = s.serialize_map(Some(ALL_ELEMENTS.len()))?;
                for (e, n) in self.0.iter() {
                    map.serialize_entry(e.name(), &n)?;
                }
                map.end()
            }
        }

        let mut map = s.serialize_map(Some(2))?;
        map.serialize_entry("counts", &Counts(self))?;
        map.serialize_entry("dominant", &self.dominant())?;
        map.end()
    }
}

/// Tally the eight symbols of four pillars.
pub fn tally(pillars: &[Pillar; 4]) -> ElementCount {
    let mut count = ElementCount::default();
    for p in pillars {
        count.add_pillar(*p);
    }
    count
}
