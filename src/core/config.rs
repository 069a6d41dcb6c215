use std::env;
use std::time::Duration;

use crate::features::incidents::profile::{ProfileKind, SubmissionProfile};

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub backend: BackendConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

/// Where and how incident reports are submitted
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Active submission profile, endpoint and redirect overrides already applied
    pub profile: SubmissionProfile,
    /// Endpoint receiving search filters
    pub search_url: String,
    /// Endpoint receiving incident deletions
    pub delete_url: String,
    /// Upper bound for a single backend request
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            backend: BackendConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl BackendConfig {
    const DEFAULT_SEARCH_URL: &'static str = "http://localhost:888/incidencias";
    const DEFAULT_DELETE_URL: &'static str = "http://localhost:888/incidencias";
    const DEFAULT_TIMEOUT_SECS: u64 = 30;

    pub fn from_env() -> Result<Self, String> {
        let kind = env::var("INCIDENCIAS_PROFILE")
            .unwrap_or_else(|_| "registro".to_string())
            .parse::<ProfileKind>()?;

        let endpoint = env::var("BACKEND_URL").ok().filter(|s| !s.is_empty());
        // Relative targets resolve against the form page, so deployments that
        // do not serve pagina_incidencia.html next to it should set an
        // absolute URL. An explicitly empty value disables the redirect.
        let redirect = env::var("SUCCESS_REDIRECT").ok();

        let search_url = env::var("BACKEND_SEARCH_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_SEARCH_URL.to_string());

        let delete_url = env::var("BACKEND_DELETE_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_DELETE_URL.to_string());

        let timeout_secs = env::var("BACKEND_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "BACKEND_TIMEOUT_SECS must be a valid number".to_string())?;

        Self::build(kind, endpoint, redirect, search_url, delete_url, timeout_secs)
    }

    fn build(
        kind: ProfileKind,
        endpoint: Option<String>,
        redirect: Option<String>,
        search_url: String,
        delete_url: String,
        timeout_secs: u64,
    ) -> Result<Self, String> {
        if timeout_secs == 0 {
            return Err("BACKEND_TIMEOUT_SECS must be greater than zero".to_string());
        }

        let mut profile = SubmissionProfile::for_kind(kind);
        if let Some(endpoint) = endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(format!("BACKEND_URL must be an http(s) URL: {}", endpoint));
            }
            profile.endpoint = endpoint;
        }
        if let Some(redirect) = redirect {
            profile.success_redirect = Some(redirect).filter(|r| !r.is_empty());
        }

        Ok(Self {
            profile,
            search_url,
            delete_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        let title =
            env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Reaktor Incidencias API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Form gateway for classroom incident reports".to_string());

        Ok(Self {
            title,
            version,
            description,
        })
    }
}
