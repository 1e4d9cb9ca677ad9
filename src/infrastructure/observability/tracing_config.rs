/// How the global subscriber is set up.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Reported once at startup.
    pub environment: String,
    pub json_format: bool,
    /// Filter directives used when `RUST_LOG` is unset.
    pub filter: Option<String>,
}

impl TracingConfig {
    pub fn new(environment: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            json_format: json_requested(),
            filter: None,
        }
    }

    pub fn with_json(mut self, enabled: bool) -> Self {
        self.json_format |= enabled;
        self
    }

    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter.filter(|f| !f.trim().is_empty());
        self
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::new(std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }
}

/// `LOG_FORMAT=json` forces JSON output regardless of settings.
fn json_requested() -> bool {
    std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
