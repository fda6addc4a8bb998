#[cfg(test)]
mod config_tests {
    use crate::config::{default_max_request_size, default_service_version, Config, ConfigError, StoreConfig};
    use std::collections::HashMap;
    use std::time::Duration;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_map(HashMap::new()).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.request_timeout_seconds, 30);
        assert_eq!(config.server.max_request_size, default_max_request_size());
        assert_eq!(config.server.max_quantity, 1000);
        assert!(config.store.seed_catalog);
        assert!(config.store.demo_usernames().is_empty());
        assert_eq!(config.observability.service_name, "ecommerce-cart");
        assert_eq!(config.observability.service_version, default_service_version());
        assert_eq!(config.observability.otlp_endpoint, None);
        assert_eq!(config.observability.log_level, "info");
        assert!(!config.observability.enable_json_logging);
    }

    #[test]
    fn test_overrides_from_prefixed_variables() {
        let config = Config::from_map(vars(&[
            ("ECOMMERCE_HOST", "127.0.0.1"),
            ("ECOMMERCE_PORT", "9000"),
            ("ECOMMERCE_SEED_CATALOG", "false"),
            ("ECOMMERCE_DEMO_USERS", "john, jane"),
            ("ECOMMERCE_SERVICE_NAME", "cart-test"),
            ("ECOMMERCE_OTLP_ENDPOINT", "http://collector:4317"),
            ("ECOMMERCE_LOG_LEVEL", "debug"),
            ("ECOMMERCE_ENABLE_JSON_LOGGING", "true"),
        ]))
        .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert!(!config.store.seed_catalog);
        assert_eq!(config.store.demo_usernames(), vec!["john", "jane"]);
        assert_eq!(config.observability.service_name, "cart-test");
        assert_eq!(
            config.observability.otlp_endpoint.as_deref(),
            Some("http://collector:4317")
        );
        assert_eq!(config.observability.log_level, "debug");
        assert!(config.observability.enable_json_logging);
    }

    #[test]
    fn test_unprefixed_variables_are_ignored() {
        let config = Config::from_map(vars(&[("PORT", "1234")])).unwrap();

        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_zero_port_rejected() {
        let result = Config::from_map(vars(&[("ECOMMERCE_PORT", "0")]));

        match result {
            Err(ConfigError::ValidationError { message }) => assert!(message.contains("port")),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = Config::from_map(vars(&[("ECOMMERCE_REQUEST_TIMEOUT_SECONDS", "0")]));

        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn test_max_quantity_override_and_zero_rejected() {
        let config = Config::from_map(vars(&[("ECOMMERCE_MAX_QUANTITY", "25")])).unwrap();
        assert_eq!(config.server.max_quantity, 25);

        let result = Config::from_map(vars(&[("ECOMMERCE_MAX_QUANTITY", "0")]));
        match result {
            Err(ConfigError::ValidationError { message }) => assert!(message.contains("quantity")),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_port_is_a_load_error() {
        let result = Config::from_map(vars(&[("ECOMMERCE_PORT", "not-a-port")]));

        assert!(matches!(result, Err(ConfigError::LoadError { .. })));
    }

    #[test]
    fn test_request_timeout_duration() {
        let config = Config::from_map(vars(&[("ECOMMERCE_REQUEST_TIMEOUT_SECONDS", "45")])).unwrap();

        assert_eq!(config.server.request_timeout(), Duration::from_secs(45));
    }

    #[test]
    fn test_demo_usernames_skip_blank_entries() {
        let store = StoreConfig {
            seed_catalog: true,
            demo_users: " john,, ,jane ".to_string(),
        };

        assert_eq!(store.demo_usernames(), vec!["john", "jane"]);
    }
}
