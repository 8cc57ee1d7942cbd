//! Tests for TOML configuration parsing.

use super::ConfigError;
use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
            [source]
            path = "/run/portwatch/listening.json"
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(
            config.source.path.as_deref(),
            Some("/run/portwatch/listening.json")
        );
        assert!(config.filter.protocol.is_none());
        assert!(config.monitor.poll_interval.is_none());
        assert!(config.output.format.is_none());
    }

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.source.path.is_none());
        assert!(config.filter.include.is_empty());
        assert!(config.filter.exclude.is_empty());
        assert!(config.filter.exclude_ports.is_empty());
    }

    #[test]
    fn parse_filter_section() {
        let toml = r#"
            [filter]
            protocol = "tcp"
            include = ["^nginx", "^sshd$"]
            exclude = ["^chrome"]
            exclude_ports = ["53", "32768-60999"]
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        let filter = &config.filter;

        assert_eq!(filter.protocol.as_deref(), Some("tcp"));
        assert_eq!(filter.include, vec!["^nginx", "^sshd$"]);
        assert_eq!(filter.exclude, vec!["^chrome"]);
        assert_eq!(filter.exclude_ports, vec!["53", "32768-60999"]);
    }

    #[test]
    fn parse_monitor_and_output_sections() {
        let toml = r#"
            [monitor]
            poll_interval = 15

            [output]
            format = "json"
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(config.monitor.poll_interval, Some(15));
        assert_eq!(config.output.format.as_deref(), Some("json"));
    }
}

mod errors {
    use super::*;

    #[test]
    fn unknown_section_is_rejected() {
        let result = TomlConfig::parse("[database]\nurl = \"x\"\n");

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result = TomlConfig::parse("[monitor]\ndebounce = 2\n");

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn wrong_type_is_rejected() {
        let result = TomlConfig::parse("[monitor]\npoll_interval = \"fast\"\n");

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn load_missing_file_returns_file_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let result = TomlConfig::load(&path);

        assert!(matches!(result, Err(ConfigError::FileRead { path: p, .. }) if p == path));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portwatch.toml");
        std::fs::write(&path, "[monitor]\npoll_interval = 9\n").unwrap();

        let config = TomlConfig::load(&path).unwrap();

        assert_eq!(config.monitor.poll_interval, Some(9));
    }
}

mod template {
    use super::*;

    #[test]
    fn default_template_parses() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();

        assert_eq!(config.monitor.poll_interval, Some(5));
        assert!(config.source.path.is_none());
    }

    #[test]
    fn default_template_documents_every_section() {
        let template = default_config_template();

        for section in ["[source]", "[filter]", "[monitor]", "[output]"] {
            assert!(template.contains(section), "missing {section}");
        }
    }
}
