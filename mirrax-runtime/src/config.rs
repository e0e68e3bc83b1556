use std::path::Path;

/// Configuration trait.
pub trait Configurable: Clone {}

/// Read a configuration from a TOML file.
pub fn from_file<T>(path: impl AsRef<Path>) -> crate::runtime::Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let contents = std::fs::read_to_string(path).map_err(crate::runtime::Error::Io)?;

    toml::from_str::<T>(&contents).map_err(crate::runtime::Error::Config)
}
