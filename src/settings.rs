use std::net::SocketAddr;

use serde::Deserialize;

///
/// Where batches are kept
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Sqlite,
    /// Lost when the process exits
    Memory,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServerSettings {
    pub host: [u8; 4],
    pub port: u16,
    pub max_db_connections: u32,
    #[serde(default)]
    pub store: StoreKind,
    /// Fixes the die's RNG so a run's rolls can be reproduced
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl ServerSettings {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings: ServerSettings = serde_json::from_str(
            r#"{ "host": [127, 0, 0, 1], "port": 8080, "max_db_connections": 4 }"#
        ).unwrap();

        assert_eq!(settings.store, StoreKind::Sqlite);
        assert_eq!(settings.rng_seed, None);
        assert_eq!(settings.addr().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_memory_store_with_seed() {
        let settings: ServerSettings = serde_json::from_str(
            r#"{ "host": [0, 0, 0, 0], "port": 3005, "max_db_connections": 1, "store": "memory", "rng_seed": 12 }"#
        ).unwrap();

        assert_eq!(settings.store, StoreKind::Memory);
        assert_eq!(settings.rng_seed, Some(12));
    }

    #[test]
    fn test_unknown_store() {
        let res = serde_json::from_str::<ServerSettings>(
            r#"{ "host": [0, 0, 0, 0], "port": 3005, "max_db_connections": 1, "store": "redis" }"#
        );
        assert!(res.is_err());
    }
}
