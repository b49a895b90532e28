//! Zone and species registry for the Goa coastal fish-finder.
//!
//! Defines the closed set of fishing zones used as classification labels,
//! their approximate coordinates (used to pick a point for the weather
//! fetch), and the species list used for the decorative species pick.
//! This is the single source of truth for zone names: all other modules
//! should reference zones from here rather than hardcoding strings.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Zones
// ---------------------------------------------------------------------------

/// A named coastal fishing area. The variant order is the label index the
/// decision tree trains against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Zone {
    /// Warm post-monsoon migration zone (Oct–Dec, warm water, onshore current).
    Calangute,
    /// Fallback zone when neither seasonal nor cool-current conditions hold.
    Baga,
    /// Cool-current zone.
    Colva,
}

impl Zone {
    pub const ALL: [Zone; 3] = [Zone::Calangute, Zone::Baga, Zone::Colva];

    pub fn index(self) -> usize {
        match self {
            Zone::Calangute => 0,
            Zone::Baga => 1,
            Zone::Colva => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Zone> {
        Zone::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Zone::Calangute => "Calangute",
            Zone::Baga => "Baga",
            Zone::Colva => "Colva",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Metadata for a single zone.
pub struct ZoneInfo {
    pub zone: Zone,
    /// Human-readable description of when this zone is recommended.
    pub description: &'static str,
    /// WGS84 latitude (approximate beach location).
    pub latitude: f64,
    /// WGS84 longitude.
    pub longitude: f64,
}

/// All zones, in label-index order.
pub static ZONE_REGISTRY: &[ZoneInfo] = &[
    ZoneInfo {
        zone: Zone::Calangute,
        description: "High-temperature season migration zone. Recommended when \
                      water is above 29 °C in October through December with a \
                      positive current.",
        latitude: 15.5436,
        longitude: 73.7571,
    },
    ZoneInfo {
        zone: Zone::Baga,
        description: "Default zone when neither the seasonal migration nor the \
                      cool-current pattern applies.",
        latitude: 15.5500,
        longitude: 73.7500,
    },
    ZoneInfo {
        zone: Zone::Colva,
        description: "Cool-current zone. Recommended when water is below 28 °C \
                      and the current is negative.",
        latitude: 15.2777,
        longitude: 73.9214,
    },
];

/// Looks up the registry entry for a zone.
pub fn zone_info(zone: Zone) -> &'static ZoneInfo {
    &ZONE_REGISTRY[zone.index()]
}

// ---------------------------------------------------------------------------
// Species
// ---------------------------------------------------------------------------

/// Target species. Picked independently of the zone prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Species {
    Sardine,
    Mackerel,
    Tuna,
}

pub const ALL_SPECIES: [Species; 3] = [Species::Sardine, Species::Mackerel, Species::Tuna];

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Species::Sardine => write!(f, "Sardine"),
            Species::Mackerel => write!(f, "Mackerel"),
            Species::Tuna => write!(f, "Tuna"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_in_label_index_order() {
        // The decision tree stores labels as indices; a registry out of
        // order would attach the wrong coordinates to a prediction.
        for (i, info) in ZONE_REGISTRY.iter().enumerate() {
            assert_eq!(info.zone.index(), i, "zone '{}' out of order", info.zone);
            assert_eq!(Zone::from_index(i), Some(info.zone));
        }
        assert_eq!(ZONE_REGISTRY.len(), Zone::ALL.len());
    }

    #[test]
    fn test_from_index_out_of_range_is_none() {
        assert!(Zone::from_index(3).is_none());
    }

    #[test]
    fn test_coordinates_are_on_the_goa_coast() {
        for info in ZONE_REGISTRY {
            assert!(
                (15.0..16.0).contains(&info.latitude),
                "latitude for '{}' outside Goa: {}",
                info.zone,
                info.latitude
            );
            assert!(
                (73.5..74.2).contains(&info.longitude),
                "longitude for '{}' outside Goa: {}",
                info.zone,
                info.longitude
            );
        }
    }

    #[test]
    fn test_zone_info_returns_matching_entry() {
        assert_eq!(zone_info(Zone::Baga).zone, Zone::Baga);
    }

    #[test]
    fn test_species_display_names_are_distinct() {
        let names: std::collections::HashSet<_> =
            ALL_SPECIES.iter().map(|s| s.to_string()).collect();
        assert_eq!(names.len(), ALL_SPECIES.len());
    }
}
