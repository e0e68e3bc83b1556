use serde_derive::{Deserialize, Serialize};

/// Facility instance identity.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Instance {
    /// Instance unique identifier.
    id: uuid::Uuid,
    /// Facility display name.
    name: String,
}

impl Instance {
    /// Construct new instance.
    pub fn new(id: uuid::Uuid, name: impl ToString) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }

    /// Retrieve the instance unique identifier.
    #[inline]
    pub fn id(&self) -> &uuid::Uuid {
        &self.id
    }

    /// Retrieve the facility display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance ID: {}; Name: {}", self.id, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance() {
        let id = uuid::Uuid::parse_str("d55bcd75-8d30-49af-ac18-ee7cbce7822f").unwrap();
        let instance = Instance::new(id, "Rotterdam DC-1");

        assert_eq!(instance.id(), &id);
        assert_eq!(instance.name(), "Rotterdam DC-1");
        assert!(!instance.id().is_nil());
    }

    #[test]
    fn test_instance_from_toml() {
        let instance: Instance = toml::from_str(
            r#"
            id = "d55bcd75-8d30-49af-ac18-ee7cbce7822f"
            name = "Rotterdam DC-1"
            "#,
        )
        .unwrap();

        assert_eq!(instance.name(), "Rotterdam DC-1");
    }
}
