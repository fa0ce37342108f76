use caws_config::CawsConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &CawsConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &CawsConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.endpoint.is_configured()
        && env_keys
            .iter()
            .any(|key| key.starts_with("CAWS_ENDPOINT_") && !key.contains("__"))
    {
        warnings.push(
            "endpoint config appears default while CAWS_ENDPOINT_* env vars exist. Use double underscores (example: CAWS_ENDPOINT__API_URL)."
                .to_string(),
        );
    }

    if env_keys
        .iter()
        .any(|key| key.starts_with("CAWS_CONNECT_") && !key.contains("__"))
    {
        warnings.push(
            "CAWS_CONNECT_* env vars are ignored. Use double underscores (example: CAWS_CONNECT__USE_SSH_AGENT)."
                .to_string(),
        );
    }

    warnings
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn env(keys: &[&str]) -> Vec<(String, String)> {
        keys.iter()
            .map(|key| ((*key).to_string(), "x".to_string()))
            .collect()
    }

    #[test]
    fn single_underscore_endpoint_is_flagged() {
        let warnings =
            collect_unconfigured_warnings(&CawsConfig::default(), env(&["CAWS_ENDPOINT_API_URL"]));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("CAWS_ENDPOINT__API_URL"));
    }

    #[test]
    fn session_endpoint_variable_is_not_flagged() {
        let warnings = collect_unconfigured_warnings(
            &CawsConfig::default(),
            env(&["CAWS_ENDPOINT", "CAWS_ENDPOINT__REGION"]),
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn single_underscore_connect_is_flagged() {
        let warnings = collect_unconfigured_warnings(
            &CawsConfig::default(),
            env(&["CAWS_CONNECT_USE_SSH_AGENT"]),
        );
        assert_eq!(warnings.len(), 1);
    }
}
