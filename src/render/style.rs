//! Kind-to-color table.
//!
//! Colors are the CSS named colors used for each kind badge.

use crate::document::NodeKind;

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const BLACK: Rgb = Rgb::new(0, 0, 0);
pub const WHITE: Rgb = Rgb::new(255, 255, 255);
pub const BLUE: Rgb = Rgb::new(0, 0, 255);
pub const PINK: Rgb = Rgb::new(255, 192, 203);
pub const STEEL_BLUE: Rgb = Rgb::new(70, 130, 180);
pub const LIGHT_CORAL: Rgb = Rgb::new(240, 128, 128);
pub const RED: Rgb = Rgb::new(255, 0, 0);
pub const ORANGE: Rgb = Rgb::new(255, 165, 0);

/// Background and foreground for one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindStyle {
    pub background: Rgb,
    pub foreground: Rgb,
}

/// Lookup from node kind to badge colors.
pub struct StyleTable;

impl StyleTable {
    /// Colors for a recognized kind.
    pub const fn for_kind(kind: NodeKind) -> KindStyle {
        let (background, foreground) = match kind {
            NodeKind::Array => (BLUE, WHITE),
            NodeKind::Bool => (PINK, BLACK),
            NodeKind::Null => (STEEL_BLUE, BLACK),
            NodeKind::Number => (LIGHT_CORAL, BLACK),
            NodeKind::Object => (RED, WHITE),
            NodeKind::String => (ORANGE, BLACK),
        };
        KindStyle {
            background,
            foreground,
        }
    }

    /// Colors for an arbitrary tag. Tags outside the recognized set get none.
    pub fn for_tag(tag: &str) -> Option<KindStyle> {
        NodeKind::from_tag(tag).map(Self::for_kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containers_use_white_text() {
        assert_eq!(StyleTable::for_kind(NodeKind::Array).foreground, WHITE);
        assert_eq!(StyleTable::for_kind(NodeKind::Object).foreground, WHITE);
    }

    #[test]
    fn test_scalars_use_black_text() {
        for kind in [
            NodeKind::Bool,
            NodeKind::Null,
            NodeKind::Number,
            NodeKind::String,
        ] {
            assert_eq!(StyleTable::for_kind(kind).foreground, BLACK, "{kind}");
        }
    }

    #[test]
    fn test_backgrounds() {
        assert_eq!(StyleTable::for_kind(NodeKind::Array).background, BLUE);
        assert_eq!(StyleTable::for_kind(NodeKind::Bool).background, PINK);
        assert_eq!(StyleTable::for_kind(NodeKind::Null).background, STEEL_BLUE);
        assert_eq!(
            StyleTable::for_kind(NodeKind::Number).background,
            LIGHT_CORAL
        );
        assert_eq!(StyleTable::for_kind(NodeKind::Object).background, RED);
        assert_eq!(StyleTable::for_kind(NodeKind::String).background, ORANGE);
    }

    #[test]
    fn test_unknown_tag_has_no_style() {
        assert_eq!(StyleTable::for_tag("Date"), None);
        assert_eq!(StyleTable::for_tag(""), None);
        assert_eq!(
            StyleTable::for_tag("Bool"),
            Some(StyleTable::for_kind(NodeKind::Bool))
        );
    }
}
