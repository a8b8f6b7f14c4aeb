use serde::Serialize;

/// Coarse item bucket derived from the market name.
///
/// Matching is ordered substring search: `Capsule` wins over `Case` for
/// names containing both, and anything without a known marker falls back
/// to `Weapons`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Category {
    Capsules,
    Cases,
    Charms,
    Stickers,
    Weapons,
}

impl Category {
    pub fn classify(market_name: &str) -> Self {
        if market_name.contains("Capsule") {
            Self::Capsules
        } else if market_name.contains("Case") {
            Self::Cases
        } else if market_name.contains("Charm") {
            Self::Charms
        } else if market_name.contains("Sticker") {
            Self::Stickers
        } else {
            Self::Weapons
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_markers_classify() {
        assert_eq!(
            Category::classify("Antwerp 2022 Legends Sticker Capsule"),
            Category::Capsules
        );
        assert_eq!(Category::classify("Kilowatt Case"), Category::Cases);
        assert_eq!(Category::classify("Charm | Die-cast AK"), Category::Charms);
        assert_eq!(
            Category::classify("Sticker | Crown (Foil)"),
            Category::Stickers
        );
    }

    #[test]
    fn unmarked_names_fall_back_to_weapons() {
        assert_eq!(Category::classify("AK-47 | Redline"), Category::Weapons);
        assert_eq!(Category::classify("Music Kit | Daniel Sadowski"), Category::Weapons);
    }

    #[test]
    fn capsule_wins_over_case() {
        assert_eq!(
            Category::classify("Commemorative Capsule Case"),
            Category::Capsules
        );
    }
}
