//! Value parsers for CLI arguments clap cannot check on its own.

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

const MAX_ROLLBACK_STEPS: u32 = 100;

const MAX_HOSTNAME_LEN: usize = 253;

pub fn validate_port(port_str: &str) -> Result<u16, String> {
    match port_str.parse::<u16>() {
        Ok(0) => Err("Port must be between 1 and 65535. Port 0 is not allowed.".to_string()),
        Ok(port) => Ok(port),
        Err(_) => Err(format!(
            "Port must be a number between 1 and 65535, got: '{port_str}'"
        )),
    }
}

/// The file must exist and be readable.
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);
    if !path.is_file() {
        return Err(format!(
            "Configuration file does not exist or is not a file: '{path_str}'"
        ));
    }
    std::fs::File::open(&path)
        .map(|_| path)
        .map_err(|e| format!("Cannot read configuration file '{path_str}': {e}"))
}

pub fn validate_rollback_steps(steps_str: &str) -> Result<u32, String> {
    let steps: u32 = steps_str
        .parse()
        .map_err(|_| format!("Rollback steps must be a positive number, got: '{steps_str}'"))?;
    match steps {
        0 => Err("Rollback steps must be greater than 0".to_string()),
        n if n > MAX_ROLLBACK_STEPS => Err(format!(
            "Rollback steps cannot exceed {MAX_ROLLBACK_STEPS}"
        )),
        n => Ok(n),
    }
}

/// Accepts IP addresses and plausible hostnames. Dotted quads that are not
/// valid IPv4 (e.g. `999.1.1.1`) are rejected rather than treated as names.
pub fn validate_host_address(host_str: &str) -> Result<String, String> {
    let host = host_str.trim();
    if host.is_empty() {
        return Err("Host address cannot be empty".to_string());
    }
    if host.parse::<IpAddr>().is_ok() {
        return Ok(host.to_string());
    }
    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return host
            .parse::<Ipv4Addr>()
            .map(|addr| addr.to_string())
            .map_err(|_| format!("Invalid IPv4 address: '{host}'"));
    }
    if host.len() > MAX_HOSTNAME_LEN {
        return Err(format!(
            "Host address is too long (maximum {MAX_HOSTNAME_LEN} characters)"
        ));
    }
    if !host
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
    {
        return Err(format!("Invalid host name: '{host}'"));
    }
    Ok(host.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ports() {
        for ok in ["1", "80", "3000", "65535"] {
            assert!(validate_port(ok).is_ok(), "{ok}");
        }
        for bad in ["0", "65536", "-1", "abc", ""] {
            assert!(validate_port(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_hosts() {
        for ok in ["localhost", "127.0.0.1", "0.0.0.0", "::1", "db-1.internal"] {
            assert!(validate_host_address(ok).is_ok(), "{ok}");
        }
        let long = "x".repeat(300);
        for bad in ["", "   ", "host with spaces", "999.999.999.999", long.as_str()] {
            assert!(validate_host_address(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_rollback_steps() {
        assert_eq!(validate_rollback_steps("1"), Ok(1));
        assert_eq!(validate_rollback_steps("100"), Ok(100));
        for bad in ["0", "101", "-1", "abc"] {
            assert!(validate_rollback_steps(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_config_file_must_exist() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        assert_eq!(validate_config_file_path(path), Ok(PathBuf::from(path)));

        let dir = tempfile::tempdir().unwrap();
        assert!(validate_config_file_path(dir.path().to_str().unwrap()).is_err());
        assert!(validate_config_file_path("/definitely/not/here.toml").is_err());
    }

    proptest! {
        #[test]
        fn prop_every_nonzero_port_parses(port in 1u16..=u16::MAX) {
            prop_assert_eq!(validate_port(&port.to_string()), Ok(port));
        }
    }
}
