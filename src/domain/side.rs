use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use strum_macros::{Display, EnumIter};

/// One of the two competing parties in a rivalry
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Exactly one value per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerSide<T> {
    pub a: T,
    pub b: T,
}

impl<T> PerSide<T> {
    pub fn new(a: T, b: T) -> Self {
        Self { a, b }
    }

    pub fn map<U>(self, mut f: impl FnMut(Side, T) -> U) -> PerSide<U> {
        PerSide {
            a: f(Side::A, self.a),
            b: f(Side::B, self.b),
        }
    }
}

impl<T> Index<Side> for PerSide<T> {
    type Output = T;

    fn index(&self, side: Side) -> &T {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }
}

impl<T> IndexMut<Side> for PerSide<T> {
    fn index_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::A => &mut self.a,
            Side::B => &mut self.b,
        }
    }
}

/// A player taking part in the rivalry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competitor {
    pub id: String,
    pub display_name: String,
}

impl Competitor {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

/// Binds the stored competitor ids to sides A and B.
///
/// Stored match records may carry the two competitors in either column, so
/// every attribution in the aggregator goes through `side_of`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RivalrySides {
    competitors: PerSide<Competitor>,
}

impl RivalrySides {
    pub fn new(a: Competitor, b: Competitor) -> Self {
        Self {
            competitors: PerSide::new(a, b),
        }
    }

    pub fn competitor(&self, side: Side) -> &Competitor {
        &self.competitors[side]
    }

    pub fn id(&self, side: Side) -> &str {
        &self.competitors[side].id
    }

    pub fn side_of(&self, competitor_id: &str) -> Option<Side> {
        if self.competitors.a.id == competitor_id {
            Some(Side::A)
        } else if self.competitors.b.id == competitor_id {
            Some(Side::B)
        } else {
            None
        }
    }

    pub fn display_name(&self, side: Option<Side>) -> &str {
        match side {
            Some(side) => &self.competitors[side].display_name,
            None => "—",
        }
    }
}
