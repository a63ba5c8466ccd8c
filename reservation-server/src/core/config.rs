use chrono_tz::Tz;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DATABASE_URL | sqlite:reservations.db | SQLite database |
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | ENVIRONMENT | development | development / staging / production |
/// | TIMEZONE | UTC | IANA zone that defines local wall-clock time |
/// | LOG_LEVEL | info | default log level |
/// | LOG_DIR | (unset) | daily rolling log directory |
/// | REQUEST_TIMEOUT_MS | 30000 | per-request timeout |
///
/// # Example
///
/// ```ignore
/// TIMEZONE=Asia/Ho_Chi_Minh HTTP_PORT=8080 cargo run -p reservation-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// sqlx connection string
    pub database_url: String,
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    /// Business timezone; submitted wall-clock values are taken to be in it
    pub timezone: Tz,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub request_timeout_ms: u64,
    /// TIMEZONE value that failed to parse (UTC is used instead)
    pub rejected_timezone: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    ///
    /// Runs before logging is set up; call [`Config::startup_warnings`] once
    /// the logger is live to report rejected values.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (environment, test fixtures)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let (timezone, rejected_timezone) = match lookup("TIMEZONE") {
            Some(raw) => match parse_timezone(&raw) {
                Some(tz) => (tz, None),
                None => (chrono_tz::UTC, Some(raw)),
            },
            None => (chrono_tz::UTC, None),
        };

        Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite:reservations.db".into()),
            http_port: lookup("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            timezone,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: lookup("LOG_DIR").filter(|s| !s.is_empty()),
            request_timeout_ms: lookup("REQUEST_TIMEOUT_MS")
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            rejected_timezone,
        }
    }

    /// Override the values tests care about
    pub fn with_overrides(database_url: impl Into<String>, timezone: Tz) -> Self {
        let mut config = Self::from_env();
        config.database_url = database_url.into();
        config.timezone = timezone;
        config.rejected_timezone = None;
        config
    }

    /// Problems found while loading, to be logged once logging is up
    pub fn startup_warnings(&self) -> Vec<String> {
        self.rejected_timezone
            .iter()
            .map(|raw| format!("Invalid TIMEZONE '{raw}', falling back to UTC"))
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_timezone(name: &str) -> Option<Tz> {
    name.trim().parse().ok()
}
