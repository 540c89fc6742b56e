use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub services: ServicesConfig,
    pub weather: WeatherConfig,
    pub probes: ProbesConfig,
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared bearer token. `None` leaves every route open.
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    /// Service manager unit names, reported in this order.
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub city: String,
    /// When both coordinates are set the city is only a display label; otherwise it is geocoded once at startup.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            city: crate::weather::DEFAULT_CITY.into(),
            latitude: None,
            longitude: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerBackend {
    /// Shell out to the runtime CLI (`docker ps`).
    Cli,
    /// Talk to the Docker Engine API over its unix socket.
    Api,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbesConfig {
    /// How long each CPU-load sample blocks.
    pub cpu_sample_ms: u64,
    /// Timeout for each service-manager / container-runtime invocation.
    pub command_timeout_ms: u64,
    pub top_processes: usize,
    pub service_manager: String,
    pub container_runtime: String,
    pub container_backend: ContainerBackend,
}

impl Default for ProbesConfig {
    fn default() -> Self {
        Self {
            cpu_sample_ms: 500,
            command_timeout_ms: 2000,
            top_processes: 5,
            service_manager: "systemctl".into(),
            container_runtime: "docker".into(),
            container_backend: ContainerBackend::Cli,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogsConfig {
    /// Candidate log files; the first existing one is tailed.
    pub paths: Vec<PathBuf>,
    pub lines: usize,
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            paths: vec!["/var/log/syslog".into(), "/var/log/messages".into()],
            lines: 20,
        }
    }
}

impl AppConfig {
    /// Reads `CONFIG_FILE` (default `config.toml`), then applies environment overrides.
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let mut config: AppConfig = match std::fs::read_to_string(&path) {
            Ok(s) => toml::from_str(&s)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path, "no config file; using defaults");
                AppConfig::default()
            }
            Err(e) => return Err(anyhow::anyhow!("reading {}: {}", path, e)),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides; used when the config file cannot be parsed.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = AppConfig::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate config from a string (e.g. for tests). No environment overrides.
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// `PORT`, `DASHBOARD_HOST` and `DASHBOARD_TOKEN` override the file. An empty token disables auth.
    pub fn apply_env<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("PORT must be a port number, got {:?}: {}", port, e))?;
        }
        if let Some(host) = lookup("DASHBOARD_HOST")
            && !host.trim().is_empty()
        {
            self.server.host = host.trim().to_string();
        }
        if let Some(token) = lookup("DASHBOARD_TOKEN") {
            self.auth.token = Some(token);
        }
        if self.auth.token.as_deref().is_some_and(str::is_empty) {
            self.auth.token = None;
        }
        Ok(())
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            self.probes.cpu_sample_ms >= 100,
            "probes.cpu_sample_ms must be >= 100, got {}",
            self.probes.cpu_sample_ms
        );
        anyhow::ensure!(
            self.probes.command_timeout_ms > 0,
            "probes.command_timeout_ms must be > 0, got {}",
            self.probes.command_timeout_ms
        );
        anyhow::ensure!(
            self.probes.top_processes > 0,
            "probes.top_processes must be > 0, got {}",
            self.probes.top_processes
        );
        anyhow::ensure!(
            self.logs.lines > 0,
            "logs.lines must be > 0, got {}",
            self.logs.lines
        );
        anyhow::ensure!(!self.logs.paths.is_empty(), "logs.paths must be non-empty");
        if let Some(lat) = self.weather.latitude {
            anyhow::ensure!(
                (-90.0..=90.0).contains(&lat),
                "weather.latitude must be within -90..=90, got {}",
                lat
            );
        }
        if let Some(lon) = self.weather.longitude {
            anyhow::ensure!(
                (-180.0..=180.0).contains(&lon),
                "weather.longitude must be within -180..=180, got {}",
                lon
            );
        }
        Ok(())
    }
}
