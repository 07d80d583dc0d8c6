//! Value parsers for command-line arguments.

use std::net::IpAddr;
use std::path::PathBuf;

/// Upper bound for `migrate --rollback`
const MAX_ROLLBACK_STEPS: u32 = 10;

pub fn validate_port(value: &str) -> Result<u16, String> {
    match value.parse::<u16>() {
        Ok(0) => Err("Port must be between 1 and 65535".to_string()),
        Ok(port) => Ok(port),
        Err(_) => Err(format!("Port must be a number between 1 and 65535, got: '{}'", value)),
    }
}

/// Accepts IP addresses and DNS hostnames.
pub fn validate_host_address(value: &str) -> Result<String, String> {
    let host = value.trim();
    if host.is_empty() {
        return Err("Host address cannot be empty".to_string());
    }
    if host.parse::<IpAddr>().is_ok() {
        return Ok(host.to_string());
    }
    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(format!("Invalid IPv4 address: '{}'", value));
    }
    if host.len() > 253 {
        return Err("Host name is too long (maximum 253 characters)".to_string());
    }

    let valid_label = |label: &str| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    };
    if host.split('.').all(valid_label) {
        Ok(host.to_string())
    } else {
        Err(format!("Invalid host name: '{}'", value))
    }
}

/// The file must exist; its contents are checked when configuration loads.
pub fn validate_config_file_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", value));
    }
    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", value));
    }
    Ok(path)
}

pub fn validate_rollback_steps(value: &str) -> Result<u32, String> {
    let steps: u32 = value
        .parse()
        .map_err(|_| format!("Rollback steps must be a positive number, got: '{}'", value))?;
    if steps == 0 || steps > MAX_ROLLBACK_STEPS {
        return Err(format!(
            "Rollback steps must be between 1 and {}",
            MAX_ROLLBACK_STEPS
        ));
    }
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn port_bounds() {
        assert_eq!(validate_port("8080"), Ok(8080));
        for invalid in ["0", "65536", "-1", "abc", ""] {
            assert!(validate_port(invalid).is_err(), "{} should be rejected", invalid);
        }
    }

    #[test]
    fn hosts() {
        for valid in ["localhost", "0.0.0.0", "10.1.2.3", "::1", "api.shop-01.internal"] {
            assert!(validate_host_address(valid).is_ok(), "{} should be accepted", valid);
        }
        for invalid in ["", "  ", "has space", "999.1.1.1", "-bad.example", "a..b"] {
            assert!(validate_host_address(invalid).is_err(), "{} should be rejected", invalid);
        }
    }

    #[test]
    fn rollback_steps() {
        assert_eq!(validate_rollback_steps("1"), Ok(1));
        assert_eq!(validate_rollback_steps("10"), Ok(10));
        for invalid in ["0", "11", "abc"] {
            assert!(validate_rollback_steps(invalid).is_err());
        }
    }

    #[test]
    fn config_file_must_be_a_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_config_file_path(dir.path().to_str().unwrap()).is_err());

        let file = dir.path().join("storefront.toml");
        std::fs::write(&file, "").unwrap();
        assert_eq!(
            validate_config_file_path(file.to_str().unwrap()),
            Ok(file.clone())
        );
        assert!(validate_config_file_path("/definitely/missing.toml").is_err());
    }

    proptest! {
        #[test]
        fn every_nonzero_port_is_accepted(port in 1u16..=65535) {
            prop_assert_eq!(validate_port(&port.to_string()), Ok(port));
        }
    }
}
