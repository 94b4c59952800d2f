//! Heavenly stems, earthly branches, and the 60-pair sexagenary cycle.
//!
//! The 10 stems and 12 branches advance in lock-step, so only the 60 pairs
//! whose stem and branch indices share parity occur. A single incrementing
//! index in `[0, 60)` is the source of truth for both.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Length of the sexagenary cycle.
pub const SEXAGENARY_CYCLE: u8 = 60;

/// Yin/yang polarity of a stem or branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Polarity {
    Yang,
    Yin,
}

/// The 10 heavenly stems (천간).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stem {
    Gap,
    Eul,
    Byeong,
    Jeong,
    Mu,
    Gi,
    Gyeong,
    Sin,
    Im,
    Gye,
}

/// All 10 stems in order (index 0 = 갑).
pub const ALL_STEMS: [Stem; 10] = [
    Stem::Gap,
    Stem::Eul,
    Stem::Byeong,
    Stem::Jeong,
    Stem::Mu,
    Stem::Gi,
    Stem::Gyeong,
    Stem::Sin,
    Stem::Im,
    Stem::Gye,
];

impl Stem {
    /// Hangul name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gap => "갑",
            Self::Eul => "을",
            Self::Byeong => "병",
            Self::Jeong => "정",
            Self::Mu => "무",
            Self::Gi => "기",
            Self::Gyeong => "경",
            Self::Sin => "신",
            Self::Im => "임",
            Self::Gye => "계",
        }
    }

    /// Hanja character.
    pub const fn hanja(self) -> &'static str {
        match self {
            Self::Gap => "甲",
            Self::Eul => "乙",
            Self::Byeong => "丙",
            Self::Jeong => "丁",
            Self::Mu => "戊",
            Self::Gi => "己",
            Self::Gyeong => "庚",
            Self::Sin => "辛",
            Self::Im => "壬",
            Self::Gye => "癸",
        }
    }

    /// 0-based index (갑=0 .. 계=9).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Even-indexed stems are yang.
    pub const fn polarity(self) -> Polarity {
        if self.index() % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }

    /// Look up a stem by Hangul name or hanja.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        ALL_STEMS
            .into_iter()
            .find(|s| s.name() == name || s.hanja() == name)
    }
}

impl Display for Stem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Stem {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Stem {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let name = String::deserialize(d)?;
        Self::from_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown stem {name:?}")))
    }
}

/// The 12 earthly branches (지지).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Branch {
    Ja,
    Chuk,
    In,
    Myo,
    Jin,
    Sa,
    O,
    Mi,
    Sin,
    Yu,
    Sul,
    Hae,
}

/// All 12 branches in order (index 0 = 자).
pub const ALL_BRANCHES: [Branch; 12] = [
    Branch::Ja,
    Branch::Chuk,
    Branch::In,
    Branch::Myo,
    Branch::Jin,
    Branch::Sa,
    Branch::O,
    Branch::Mi,
    Branch::Sin,
    Branch::Yu,
    Branch::Sul,
    Branch::Hae,
];

impl Branch {
    /// Hangul name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ja => "자",
            Self::Chuk => "축",
            Self::In => "인",
            Self::Myo => "묘",
            Self::Jin => "진",
            Self::Sa => "사",
            Self::O => "오",
            Self::Mi => "미",
            Self::Sin => "신",
            Self::Yu => "유",
            Self::Sul => "술",
            Self::Hae => "해",
        }
    }

    /// Hanja character.
    pub const fn hanja(self) -> &'static str {
        match self {
            Self::Ja => "子",
            Self::Chuk => "丑",
            Self::In => "寅",
            Self::Myo => "卯",
            Self::Jin => "辰",
            Self::Sa => "巳",
            Self::O => "午",
            Self::Mi => "未",
            Self::Sin => "申",
            Self::Yu => "酉",
            Self::Sul => "戌",
            Self::Hae => "亥",
        }
    }

    /// 0-based index (자=0 .. 해=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Even-indexed branches are yang.
    pub const fn polarity(self) -> Polarity {
        if self.index() % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }

    /// Look up a branch by Hangul name or hanja.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        ALL_BRANCHES
            .into_iter()
            .find(|b| b.name() == name || b.hanja() == name)
    }
}

impl Display for Branch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Branch {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Branch {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let name = String::deserialize(d)?;
        Self::from_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown branch {name:?}")))
    }
}

/// Stem for any integer, `i mod 10`.
pub const fn stem_at(i: i64) -> Stem {
    ALL_STEMS[i.rem_euclid(10) as usize]
}

/// Branch for any integer, `i mod 12`.
pub const fn branch_at(i: i64) -> Branch {
    ALL_BRANCHES[i.rem_euclid(12) as usize]
}

/// Position in the 60-pair cycle, always in `[0, 60)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Sexagenary(u8);

impl Sexagenary {
    /// Normalise any integer into the cycle.
    pub const fn new(i: i64) -> Self {
        Self(i.rem_euclid(SEXAGENARY_CYCLE as i64) as u8)
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Move `steps` positions around the cycle (negative steps go backward).
    pub const fn offset(self, steps: i64) -> Self {
        Self::new(self.0 as i64 + steps)
    }

    pub const fn stem(self) -> Stem {
        stem_at(self.0 as i64)
    }

    pub const fn branch(self) -> Branch {
        branch_at(self.0 as i64)
    }

    pub const fn pillar(self) -> Pillar {
        Pillar {
            stem: self.stem(),
            branch: self.branch(),
        }
    }
}

/// The pillar at cycle position `i mod 60`.
pub const fn sexagenary_at(i: i64) -> Pillar {
    Sexagenary::new(i).pillar()
}

/// A stem/branch pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Pillar {
    pub stem: Stem,
    pub branch: Branch,
}

impl Pillar {
    /// Pair an arbitrary stem and branch. The result need not lie on the
    /// sexagenary cycle; see [`Pillar::sexagenary`].
    pub const fn new(stem: Stem, branch: Branch) -> Self {
        Self { stem, branch }
    }

    pub const fn from_sexagenary(s: Sexagenary) -> Self {
        s.pillar()
    }

    /// Cycle position of this pair, or `None` when the stem and branch
    /// differ in parity and so never occur together in the cycle.
    pub const fn sexagenary(self) -> Option<Sexagenary> {
        let s = self.stem.index() as i64;
        let b = self.branch.index() as i64;
        if (s - b) % 2 != 0 {
            return None;
        }
        // i ≡ s (mod 10) and i ≡ b (mod 12) solve to i = 6s − 5b (mod 60).
        Some(Sexagenary::new(6 * s - 5 * b))
    }

    /// The two characters in order: stem then branch.
    pub const fn symbols(self) -> (Stem, Branch) {
        (self.stem, self.branch)
    }
}

impl Display for Pillar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}
