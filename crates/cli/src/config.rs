//! Connection settings from flags with an environment fallback.

use inspectarr_arr::ClientConfig;
use thiserror::Error;
use url::Url;

use crate::cli::ServiceArgs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Radarr,
    Sonarr,
}

impl Service {
    pub fn name(self) -> &'static str {
        match self {
            Self::Radarr => "Radarr",
            Self::Sonarr => "Sonarr",
        }
    }

    pub fn url_var(self) -> &'static str {
        match self {
            Self::Radarr => "RADARR_URL",
            Self::Sonarr => "SONARR_URL",
        }
    }

    pub fn api_key_var(self) -> &'static str {
        match self {
            Self::Radarr => "RADARR_API_KEY",
            Self::Sonarr => "SONARR_API_KEY",
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "A {} URL is required. Provide via '--url' option or '{}' environment variable.",
        .0.name(),
        .0.url_var()
    )]
    MissingUrl(Service),
    #[error(
        "A {} API key is required. Provide via '--api-key' option or '{}' environment variable.",
        .0.name(),
        .0.api_key_var()
    )]
    MissingApiKey(Service),
    #[error("invalid URL '{value}' in '{var}'")]
    InvalidUrl {
        var: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
}

/// Build the client settings for `service`. Flags win; empty environment
/// values count as unset.
pub fn resolve(
    service: Service,
    args: &ServiceArgs,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ClientConfig, ConfigError> {
    let lookup = |var: &str| env(var).filter(|v| !v.trim().is_empty());

    let url = match &args.url {
        Some(url) => url.clone(),
        None => {
            let var = service.url_var();
            let value = lookup(var).ok_or(ConfigError::MissingUrl(service))?;
            Url::parse(&value).map_err(|source| ConfigError::InvalidUrl { var, value, source })?
        }
    };

    let api_key = match &args.api_key {
        Some(key) => key.clone(),
        None => lookup(service.api_key_var()).ok_or(ConfigError::MissingApiKey(service))?,
    };

    Ok(ClientConfig::new(url.as_str(), api_key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn flags_take_precedence_over_env() {
        let args = ServiceArgs {
            url: Some(Url::parse("http://flag:7878").unwrap()),
            api_key: Some("flag-key".into()),
        };
        let config = resolve(
            Service::Radarr,
            &args,
            env(&[("RADARR_URL", "http://env:7878"), ("RADARR_API_KEY", "env-key")]),
        )
        .unwrap();
        assert_eq!(config.base_url, "http://flag:7878/");
        assert_eq!(config.api_key, "flag-key");
    }

    #[test]
    fn falls_back_to_service_env_vars() {
        let config = resolve(
            Service::Sonarr,
            &ServiceArgs::default(),
            env(&[("SONARR_URL", "http://nas/sonarr"), ("SONARR_API_KEY", "k")]),
        )
        .unwrap();
        assert_eq!(config.base_url, "http://nas/sonarr");
        assert_eq!(config.api_key, "k");
        assert_eq!(config.retries, 2);
    }

    #[test]
    fn missing_values_name_the_flag_and_variable() {
        let err = resolve(Service::Radarr, &ServiceArgs::default(), env(&[])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "A Radarr URL is required. Provide via '--url' option or 'RADARR_URL' environment variable."
        );

        let err = resolve(
            Service::Sonarr,
            &ServiceArgs::default(),
            env(&[("SONARR_URL", "http://localhost:8989"), ("SONARR_API_KEY", "")]),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "A Sonarr API key is required. Provide via '--api-key' option or 'SONARR_API_KEY' environment variable."
        );
    }

    #[test]
    fn invalid_env_url() {
        let err = resolve(
            Service::Radarr,
            &ServiceArgs::default(),
            env(&[("RADARR_URL", "localhost"), ("RADARR_API_KEY", "k")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { var: "RADARR_URL", .. }));
    }
}
