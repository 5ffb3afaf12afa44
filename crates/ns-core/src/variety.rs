//! Item varieties: a kind plus a color.  Preferences and knowledge are keyed
//! by these attributes.

/// What an item is.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ItemKind {
    Berry,
    Mushroom,
    Nut,
    Gourd,
    Vessel,
}

impl ItemKind {
    #[inline]
    pub fn is_edible(self) -> bool {
        matches!(self, ItemKind::Berry | ItemKind::Mushroom | ItemKind::Nut)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Berry    => "berry",
            ItemKind::Mushroom => "mushroom",
            ItemKind::Nut      => "nut",
            ItemKind::Gourd    => "gourd",
            ItemKind::Vessel   => "vessel",
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Color {
    Red,
    Blue,
    Brown,
    White,
}

impl Color {
    pub fn as_str(self) -> &'static str {
        match self {
            Color::Red   => "red",
            Color::Blue  => "blue",
            Color::Brown => "brown",
            Color::White => "white",
        }
    }
}

/// A kind/color pair.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variety {
    pub kind:  ItemKind,
    pub color: Color,
}

impl Variety {
    #[inline]
    pub const fn new(kind: ItemKind, color: Color) -> Self {
        Self { kind, color }
    }
}

impl std::fmt::Display for Variety {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color.as_str(), self.kind.as_str())
    }
}
