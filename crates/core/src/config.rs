//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handlers never read environment variables; binaries read
//! them once and hand the raw values to [`CoreConfig::from_env_values`].

use crate::constants::{
    DEFAULT_DATA_DIR, DEFAULT_LISTEN_ADDR, DEFAULT_LOG_DIR, DEFAULT_MAX_UPLOAD_BYTES,
    LOG_FILE_NAME,
};
use crate::{DropError, DropResult};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    listen_addr: SocketAddr,
    data_dir: PathBuf,
    log_dir: PathBuf,
    max_upload_bytes: usize,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(
        listen_addr: SocketAddr,
        data_dir: PathBuf,
        log_dir: PathBuf,
        max_upload_bytes: usize,
    ) -> DropResult<Self> {
        if data_dir.as_os_str().is_empty() {
            return Err(DropError::InvalidConfig("data_dir cannot be empty".into()));
        }

        if log_dir.as_os_str().is_empty() {
            return Err(DropError::InvalidConfig("log_dir cannot be empty".into()));
        }

        if max_upload_bytes == 0 {
            return Err(DropError::InvalidConfig(
                "max_upload_bytes must be greater than zero".into(),
            ));
        }

        Ok(Self {
            listen_addr,
            data_dir,
            log_dir,
            max_upload_bytes,
        })
    }

    /// Build a `CoreConfig` from optional raw values, typically environment variables.
    ///
    /// `None`, empty and whitespace-only values fall back to the defaults in
    /// [`crate::constants`].
    ///
    /// # Errors
    ///
    /// Returns [`DropError::InvalidConfig`] if the listen address or the upload limit cannot be
    /// parsed, or if [`CoreConfig::new`] rejects the result.
    pub fn from_env_values(
        listen_addr: Option<String>,
        data_dir: Option<String>,
        log_dir: Option<String>,
        max_upload_bytes: Option<String>,
    ) -> DropResult<Self> {
        fn non_blank(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        let listen_addr = non_blank(listen_addr).unwrap_or_else(|| DEFAULT_LISTEN_ADDR.into());
        let listen_addr: SocketAddr = listen_addr.parse().map_err(|e| {
            DropError::InvalidConfig(format!("invalid listen address '{}': {}", listen_addr, e))
        })?;

        let max_upload_bytes = non_blank(max_upload_bytes)
            .map(|v| {
                v.parse::<usize>().map_err(|e| {
                    DropError::InvalidConfig(format!("invalid upload limit '{}': {}", v, e))
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        Self::new(
            listen_addr,
            PathBuf::from(non_blank(data_dir).unwrap_or_else(|| DEFAULT_DATA_DIR.into())),
            PathBuf::from(non_blank(log_dir).unwrap_or_else(|| DEFAULT_LOG_DIR.into())),
            max_upload_bytes,
        )
    }

    pub fn listen_addr(&self) -> SocketAddr {
        self.listen_addr
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_NAME)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let cfg = CoreConfig::from_env_values(None, None, None, None).unwrap();

        assert_eq!(cfg.listen_addr(), "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.data_dir(), Path::new("data"));
        assert_eq!(cfg.log_dir(), Path::new("log"));
        assert_eq!(cfg.log_file(), PathBuf::from("log/server.log"));
        assert_eq!(cfg.max_upload_bytes(), DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let cfg = CoreConfig::from_env_values(
            Some("  ".into()),
            Some("".into()),
            Some(" ".into()),
            Some("".into()),
        )
        .unwrap();

        assert_eq!(cfg.listen_addr(), "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.data_dir(), Path::new("data"));
    }

    #[test]
    fn test_overrides() {
        let cfg = CoreConfig::from_env_values(
            Some("127.0.0.1:9000".into()),
            Some("/srv/filedrop".into()),
            Some("/var/log/filedrop".into()),
            Some("1024".into()),
        )
        .unwrap();

        assert_eq!(cfg.listen_addr(), "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.data_dir(), Path::new("/srv/filedrop"));
        assert_eq!(cfg.log_file(), PathBuf::from("/var/log/filedrop/server.log"));
        assert_eq!(cfg.max_upload_bytes(), 1024);
    }

    #[test]
    fn test_invalid_listen_address() {
        let result = CoreConfig::from_env_values(Some("not-an-addr".into()), None, None, None);

        match result {
            Err(DropError::InvalidConfig(msg)) => assert!(msg.contains("listen address")),
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_upload_limit() {
        assert!(matches!(
            CoreConfig::from_env_values(None, None, None, Some("lots".into())),
            Err(DropError::InvalidConfig(_))
        ));
        assert!(matches!(
            CoreConfig::from_env_values(None, None, None, Some("0".into())),
            Err(DropError::InvalidConfig(_))
        ));
    }
}
