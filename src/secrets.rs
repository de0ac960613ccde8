// secrets
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::env;
use tracing::info;
pub static SECRET_MANAGER: Lazy<SecretManager> = Lazy::new(|| SecretManager::new());

pub struct SecretManager {
    secrets: HashMap<String, String>,
}
impl SecretManager {
    fn new() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Empty values fall back to the default, same as unset ones.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut secrets: HashMap<String, String> = HashMap::new();
        let with_default = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        secrets.insert("PORT".to_string(), with_default("PORT", "8080"));
        secrets.insert(
            "MONGODB_URI".to_string(),
            with_default("MONGODB_URI", "mongodb://localhost:27017/wetracker"),
        );
        secrets.insert("PUBLIC_DIR".to_string(), with_default("PUBLIC_DIR", "public"));
        // "mongo" or "memory"
        secrets.insert("STORE".to_string(), with_default("STORE", "mongo"));

        // Log which secrets are configured (NOT their values!)
        let configured: Vec<&str> = secrets
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, _)| k.as_str())
            .collect();
        info!("Secrets configured: {:?}", configured);

        SecretManager { secrets }
    }

    pub fn get(&self, key: &str) -> String {
        self.secrets.get(key).cloned().unwrap_or_default()
    }
}
