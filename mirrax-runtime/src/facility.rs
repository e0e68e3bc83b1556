use serde_derive::{Deserialize, Serialize};

/// Facility rack layout configuration.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct FacilityLayout {
    /// Aisle labels, one rack row per aisle.
    #[serde(default = "FacilityLayout::default_aisles")]
    pub aisles: Vec<String>,
    /// Number of racks per aisle.
    #[serde(default = "FacilityLayout::default_racks_per_aisle")]
    pub racks_per_aisle: usize,
    /// Number of server units per rack.
    #[serde(default = "FacilityLayout::default_units_per_rack")]
    pub units_per_rack: usize,
}

impl FacilityLayout {
    fn default_aisles() -> Vec<String> {
        vec!["A".to_string(), "B".to_string()]
    }

    fn default_racks_per_aisle() -> usize {
        4
    }

    fn default_units_per_rack() -> usize {
        10
    }
}

impl Default for FacilityLayout {
    fn default() -> Self {
        Self {
            aisles: Self::default_aisles(),
            racks_per_aisle: Self::default_racks_per_aisle(),
            units_per_rack: Self::default_units_per_rack(),
        }
    }
}

/// Single server unit slot inside a rack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ServerUnit {
    /// Unit identifier, derived from rack and slot.
    pub id: String,
    /// Owning rack identifier.
    pub rack: String,
    /// Slot number inside the rack, starting at 1.
    pub slot: usize,
}

/// Server rack holding a column of units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Rack {
    /// Rack identifier, aisle label plus row number.
    pub id: String,
    /// Units in slot order.
    pub units: Vec<ServerUnit>,
}

/// Physical layout of the server room.
///
/// Unit identifiers follow the `{rack}-unit-{slot}` convention, so rack
/// "A1" holds "A1-unit-1" through "A1-unit-10" with the default layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Facility {
    racks: Vec<Rack>,
}

impl Facility {
    /// Build the facility from a layout configuration.
    pub fn new(layout: &FacilityLayout) -> Self {
        let mut racks = Vec::with_capacity(layout.aisles.len() * layout.racks_per_aisle);

        for aisle in &layout.aisles {
            for row in 1..=layout.racks_per_aisle {
                let rack_id = format!("{}{}", aisle, row);

                let units = (1..=layout.units_per_rack)
                    .map(|slot| ServerUnit {
                        id: format!("{}-unit-{}", rack_id, slot),
                        rack: rack_id.clone(),
                        slot,
                    })
                    .collect();

                racks.push(Rack {
                    id: rack_id,
                    units,
                });
            }
        }

        Self { racks }
    }

    /// All racks in aisle order.
    #[inline]
    pub fn racks(&self) -> &[Rack] {
        &self.racks
    }

    /// Look up a server unit by identifier.
    pub fn unit(&self, id: &str) -> Option<&ServerUnit> {
        self.racks
            .iter()
            .flat_map(|rack| rack.units.iter())
            .find(|unit| unit.id == id)
    }

    /// Whether the identifier names a unit in this facility.
    pub fn contains_unit(&self, id: &str) -> bool {
        self.unit(id).is_some()
    }

    /// Total number of server units.
    pub fn unit_count(&self) -> usize {
        self.racks.iter().map(|rack| rack.units.len()).sum()
    }
}

impl Default for Facility {
    fn default() -> Self {
        Self::new(&FacilityLayout::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let facility = Facility::default();

        assert_eq!(facility.racks().len(), 8);
        assert_eq!(facility.unit_count(), 80);
        assert_eq!(facility.racks()[0].id, "A1");
        assert_eq!(facility.racks()[7].id, "B4");
    }

    #[test]
    fn test_unit_identifiers() {
        let facility = Facility::default();

        let unit = facility.unit("A1-unit-3").unwrap();
        assert_eq!(unit.rack, "A1");
        assert_eq!(unit.slot, 3);

        assert!(facility.contains_unit("B4-unit-10"));
        assert!(!facility.contains_unit("B4-unit-11"));
        assert!(!facility.contains_unit("C1-unit-1"));
    }

    #[test]
    fn test_custom_layout() {
        let layout = FacilityLayout {
            aisles: vec!["Z".to_string()],
            racks_per_aisle: 2,
            units_per_rack: 3,
        };

        let facility = Facility::new(&layout);

        assert_eq!(facility.racks().len(), 2);
        assert_eq!(facility.unit_count(), 6);
        assert!(facility.contains_unit("Z2-unit-3"));
    }

    #[test]
    fn test_layout_from_toml() {
        let layout: FacilityLayout = toml::from_str(
            r#"
            aisles = ["A", "B", "C"]
            racks_per_aisle = 2
            "#,
        )
        .unwrap();

        assert_eq!(layout.aisles.len(), 3);
        assert_eq!(layout.racks_per_aisle, 2);
        assert_eq!(layout.units_per_rack, 10);

        let layout: FacilityLayout = toml::from_str("").unwrap();
        assert_eq!(layout, FacilityLayout::default());
    }
}
