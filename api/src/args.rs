use std::time::Duration;

use clap::Parser;
use hill_calories_core::domain::common::{
    DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, HillCaloriesConfig, LLMConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "hill-calories", version, about = "Photograph your plate. Get your macros.")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix for every route, e.g. `/hill`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3333"
    )]
    pub allowed_origins: Vec<String>,

    #[arg(long = "session-ttl-secs", env = "SESSION_TTL_SECS", default_value_t = 3600)]
    pub session_ttl_secs: u64,

    #[arg(long = "max-upload-bytes", env = "MAX_UPLOAD_BYTES", default_value_t = 20 * 1024 * 1024)]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LlmArgs {
    #[arg(long = "gemini-api-key", env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    #[arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    pub gemini_model: String,

    #[arg(long = "gemini-base-url", env = "GEMINI_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    pub gemini_base_url: String,

    #[arg(long = "gemini-timeout-secs", env = "GEMINI_TIMEOUT_SECS", default_value_t = 60)]
    pub gemini_timeout_secs: u64,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON")]
    pub json: bool,
}

impl ServerArgs {
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// Path of the page itself, always ending with `/`.
    pub fn page_path(&self) -> String {
        format!("{}/", self.root_path.trim_end_matches('/'))
    }

    pub fn route(&self, path: &str) -> String {
        format!("{}{}", self.root_path.trim_end_matches('/'), path)
    }
}

impl From<Args> for HillCaloriesConfig {
    fn from(args: Args) -> Self {
        Self {
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
                gemini_base_url: args.llm.gemini_base_url,
                timeout: Duration::from_secs(args.llm.gemini_timeout_secs),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_flags_into_core_config() {
        let args = Args::parse_from([
            "hill-calories",
            "--gemini-api-key",
            "secret",
            "--gemini-model",
            "gemini-test",
            "--gemini-timeout-secs",
            "5",
        ]);

        let config = HillCaloriesConfig::from(args);
        assert_eq!(config.llm.gemini_api_key.as_deref(), Some("secret"));
        assert_eq!(config.llm.gemini_model, "gemini-test");
        assert_eq!(config.llm.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_routes_honor_root_path() {
        let args = Args::parse_from(["hill-calories", "--server-root-path", "/hill"]);
        assert_eq!(args.server.page_path(), "/hill/");
        assert_eq!(args.server.route("/capture"), "/hill/capture");

        let args = Args::parse_from(["hill-calories", "--server-root-path", ""]);
        assert_eq!(args.server.page_path(), "/");
        assert_eq!(args.server.route("/api/view"), "/api/view");
    }

    #[test]
    fn test_allowed_origins_are_comma_separated() {
        let args = Args::parse_from([
            "hill-calories",
            "--allowed-origins",
            "http://a.test,http://b.test",
        ]);
        assert_eq!(
            args.server.allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }
}
