use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MongoDb,
    /// Process-local maps; nothing survives a restart
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreBackend::MongoDb),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("Unknown STORE_BACKEND '{}' (expected mongodb or memory)", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store_backend: StoreBackend,
    /// Required for the MongoDB backend; the URI path names the database
    pub database_url: Option<String>,
    /// Empty means any origin
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| format!("Invalid PORT '{}': {}", raw, e))?,
            None => 8080,
        };

        let store_backend = match lookup("STORE_BACKEND") {
            Some(raw) => raw.parse()?,
            None => StoreBackend::MongoDb,
        };

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        if store_backend == StoreBackend::MongoDb && database_url.is_none() {
            return Err("DATABASE_URL must be set when STORE_BACKEND is mongodb".to_string());
        }

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            store_backend,
            database_url,
            cors_allowed_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_with_database_url() {
        let config = load(&[("DATABASE_URL", "mongodb://localhost:27017/paysync")]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.store_backend, StoreBackend::MongoDb);
        assert!(config.cors_allowed_origins.is_empty());
    }

    #[test]
    fn test_mongodb_requires_database_url() {
        assert!(load(&[]).is_err());
        assert!(load(&[("DATABASE_URL", "  ")]).is_err());
    }

    #[test]
    fn test_memory_backend_and_overrides() {
        let config = load(&[
            ("STORE_BACKEND", "Memory"),
            ("PORT", "3002"),
            ("CORS_ALLOWED_ORIGINS", "http://localhost:3000, ,http://127.0.0.1:8081"),
        ])
        .unwrap();
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.port, 3002);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://localhost:3000", "http://127.0.0.1:8081"]
        );
    }

    #[test]
    fn test_invalid_values() {
        assert!(load(&[("STORE_BACKEND", "firestore")]).is_err());
        assert!(load(&[("STORE_BACKEND", "memory"), ("PORT", "http")]).is_err());
    }
}
