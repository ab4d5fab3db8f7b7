use std::path::PathBuf;

const DEFAULT_PORT: &str = "3000";
const DEFAULT_DATA_PATH: &str = "data/songs.json";
const DEFAULT_COLLECTION: &str = "taylorsongs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub addr: String,
    pub data_path: PathBuf,
    pub collection: String,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `SWIFT_API_ADDR` wins over `PORT`, which binds every interface.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let addr = lookup("SWIFT_API_ADDR").unwrap_or_else(|| {
            let port = lookup("PORT").unwrap_or_else(|| DEFAULT_PORT.into());
            format!("0.0.0.0:{port}")
        });
        Self {
            addr,
            data_path: lookup("SWIFT_DATA_PATH")
                .unwrap_or_else(|| DEFAULT_DATA_PATH.into())
                .into(),
            collection: lookup("SWIFT_COLLECTION").unwrap_or_else(|| DEFAULT_COLLECTION.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ApiConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]);
        assert_eq!(config.addr, "0.0.0.0:3000");
        assert_eq!(config.data_path, PathBuf::from("data/songs.json"));
        assert_eq!(config.collection, "taylorsongs");
    }

    #[test]
    fn port_only() {
        assert_eq!(config(&[("PORT", "8080")]).addr, "0.0.0.0:8080");
    }

    #[test]
    fn explicit_addr_beats_port() {
        let config = config(&[("SWIFT_API_ADDR", "127.0.0.1:9000"), ("PORT", "8080")]);
        assert_eq!(config.addr, "127.0.0.1:9000");
    }

    #[test]
    fn data_path_and_collection() {
        let config = config(&[
            ("SWIFT_DATA_PATH", "/srv/songs.json"),
            ("SWIFT_COLLECTION", "songs"),
        ]);
        assert_eq!(config.data_path, PathBuf::from("/srv/songs.json"));
        assert_eq!(config.collection, "songs");
    }
}
