use serde::Deserialize;

/// Server settings, read from the process environment.
///
/// `DATABASE_URL` selects the SQL store; without it tasks live in memory.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_source(config::Environment::default())
    }

    pub fn from_source<T>(source: T) -> anyhow::Result<Self>
    where
        T: config::Source + Send + Sync + 'static,
    {
        let settings = config::Config::builder().add_source(source).build()?;
        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}
