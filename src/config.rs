use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Path to the JSON movie catalog
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of recommendations when the request gives none or a malformed one
    #[serde(default = "default_recommendations")]
    pub default_recommendations: usize,

    /// Upper bound for the requested number of recommendations
    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,
}

fn default_catalog_path() -> String {
    "data/movies.json".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_recommendations() -> usize {
    5
}

fn default_max_recommendations() -> usize {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            host: default_host(),
            port: default_port(),
            default_recommendations: default_recommendations(),
            max_recommendations: default_max_recommendations(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from key/value pairs named like environment variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        if config.max_recommendations == 0 {
            anyhow::bail!("MAX_RECOMMENDATIONS must be at least 1");
        }

        Ok(config)
    }

    /// Address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
