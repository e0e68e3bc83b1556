use std::collections::HashMap;

use crate::core::{
    ComponentType, HardwareComponent, LOAD_MAX, LOAD_MIN, TEMPERATURE_MAX, TEMPERATURE_MIN,
};

/// Validated hardware dataset for one server node.
///
/// The registry is immutable after construction. It keeps the components
/// in seed order, the same order every telemetry snapshot preserves, so a
/// registry index stays valid across snapshots.
#[derive(Debug)]
pub struct HardwareRegistry {
    components: Vec<HardwareComponent>,
    index: HashMap<String, usize>,
}

impl HardwareRegistry {
    /// Construct a registry from a seed dataset.
    ///
    /// Construction fails on a duplicate identifier or a malformed entry,
    /// there is no partial registry.
    pub fn new(seed: Vec<HardwareComponent>) -> crate::runtime::Result<Self> {
        let mut index = HashMap::with_capacity(seed.len());

        for (position, component) in seed.iter().enumerate() {
            if component.id.is_empty() {
                return Err(crate::runtime::Error::InvalidComponent(
                    "empty identifier".to_string(),
                ));
            }
            if component.health > 100 {
                return Err(crate::runtime::Error::InvalidComponent(component.id.clone()));
            }
            if !(TEMPERATURE_MIN..=TEMPERATURE_MAX).contains(&component.temperature) {
                return Err(crate::runtime::Error::InvalidComponent(component.id.clone()));
            }
            if !(LOAD_MIN..=LOAD_MAX).contains(&component.load) {
                return Err(crate::runtime::Error::InvalidComponent(component.id.clone()));
            }
            if index.insert(component.id.clone(), position).is_some() {
                return Err(crate::runtime::Error::DuplicateComponent(
                    component.id.clone(),
                ));
            }
        }

        Ok(Self {
            components: seed,
            index,
        })
    }

    /// All components in seed order.
    #[inline]
    pub fn all(&self) -> &[HardwareComponent] {
        &self.components
    }

    /// Look up a component by identifier.
    pub fn by_id(&self, id: &str) -> Option<&HardwareComponent> {
        self.index.get(id).map(|&position| &self.components[position])
    }

    /// All components of the given class, in seed order.
    pub fn by_type(&self, ty: ComponentType) -> impl Iterator<Item = &HardwareComponent> {
        self.components.iter().filter(move |c| c.ty == ty)
    }

    /// Position of a component in the seed order, valid for any snapshot.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Number of registered components.
    #[inline]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the registry holds no components.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Factory default dataset for a single server node.
pub fn default_seed() -> Vec<HardwareComponent> {
    vec![
        HardwareComponent {
            id: "cpu-0".to_string(),
            name: "AMD Ryzen High Performance CPU".to_string(),
            ty: ComponentType::Cpu,
            specs: "16 cores / 32 threads".to_string(),
            health: 98,
            temperature: 42.0,
            load: 15.0,
        },
        HardwareComponent {
            id: "gpu-0".to_string(),
            name: "NVIDIA iGame Flagship GPU".to_string(),
            ty: ComponentType::Gpu,
            specs: "24GB GDDR6X".to_string(),
            health: 95,
            temperature: 55.0,
            load: 32.0,
        },
        HardwareComponent {
            id: "ram-0".to_string(),
            name: "DDR4 High Speed Memory".to_string(),
            ty: ComponentType::Ram,
            specs: "64GB (4x16GB) 3600MHz".to_string(),
            health: 100,
            temperature: 38.0,
            load: 45.0,
        },
        HardwareComponent {
            id: "psu-0".to_string(),
            name: "Great Wall 1200W Platinum PSU".to_string(),
            ty: ComponentType::Psu,
            specs: "1200W 80+ Platinum modular".to_string(),
            health: 99,
            temperature: 35.0,
            load: 25.0,
        },
        HardwareComponent {
            id: "disk-0".to_string(),
            name: "Huawei NVMe Solid State Drive".to_string(),
            ty: ComponentType::Disk,
            specs: "4TB Gen4 NVMe".to_string(),
            health: 92,
            temperature: 40.0,
            load: 8.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seed_is_valid() {
        let registry = HardwareRegistry::new(default_seed()).unwrap();

        assert_eq!(registry.len(), 5);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_lookup_by_id() {
        let registry = HardwareRegistry::new(default_seed()).unwrap();

        let cpu = registry.by_id("cpu-0").unwrap();
        assert_eq!(cpu.ty, ComponentType::Cpu);
        assert_eq!(cpu.health, 98);

        assert!(registry.by_id("cpu-9").is_none());
    }

    #[test]
    fn test_lookup_by_type() {
        let registry = HardwareRegistry::new(default_seed()).unwrap();

        let disks: Vec<_> = registry.by_type(ComponentType::Disk).collect();
        assert_eq!(disks.len(), 1);
        assert_eq!(disks[0].id, "disk-0");

        assert_eq!(registry.by_type(ComponentType::Fan).count(), 0);
    }

    #[test]
    fn test_index_matches_seed_order() {
        let registry = HardwareRegistry::new(default_seed()).unwrap();

        assert_eq!(registry.index_of("cpu-0"), Some(0));
        assert_eq!(registry.index_of("disk-0"), Some(4));
        assert_eq!(registry.index_of("fan-0"), None);

        for (position, component) in registry.all().iter().enumerate() {
            assert_eq!(registry.index_of(&component.id), Some(position));
        }
    }

    #[test]
    fn test_duplicate_id_is_fatal() {
        let mut seed = default_seed();
        seed.push(HardwareComponent {
            id: "cpu-0".to_string(),
            name: "Second CPU".to_string(),
            ty: ComponentType::Cpu,
            specs: String::new(),
            health: 100,
            temperature: 40.0,
            load: 10.0,
        });

        let error = HardwareRegistry::new(seed).unwrap_err();
        assert!(matches!(
            error,
            crate::runtime::Error::DuplicateComponent(id) if id == "cpu-0"
        ));
    }

    #[test]
    fn test_malformed_entries_are_fatal() {
        let mut seed = default_seed();
        seed[0].id = String::new();
        assert!(HardwareRegistry::new(seed).is_err());

        let mut seed = default_seed();
        seed[0].health = 101;
        assert!(HardwareRegistry::new(seed).is_err());

        let mut seed = default_seed();
        seed[1].temperature = 90.0;
        assert!(HardwareRegistry::new(seed).is_err());

        let mut seed = default_seed();
        seed[1].load = -1.0;
        assert!(HardwareRegistry::new(seed).is_err());
    }

    #[test]
    fn test_empty_registry_is_allowed() {
        let registry = HardwareRegistry::new(Vec::new()).unwrap();

        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }
}
