//! Runtime configuration for the server binary.

use crate::error::{Error, Result};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Command line and environment settings.
#[derive(Parser, Debug, Clone)]
#[command(name = "media-catalog")]
#[command(about = "Media metadata catalog served over HTTP")]
pub struct Config {
    /// Snapshot file holding the catalog
    #[arg(long, env = "MEDIA_CATALOG_DATA_FILE", default_value = "media.json")]
    pub data_file: PathBuf,

    /// Address to listen on
    #[arg(long, env = "MEDIA_CATALOG_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "MEDIA_CATALOG_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Write the snapshot as a single line instead of indented JSON
    #[arg(long, env = "MEDIA_CATALOG_COMPACT", default_value_t = false)]
    pub compact: bool,
}

impl Config {
    /// Socket address built from `host` and `port`.
    #[must_use]
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Reject settings that parse but can't work.
    pub fn validate(&self) -> Result<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(Error::Config("data file path is empty".into()));
        }
        if self.data_file.is_dir() {
            return Err(Error::Config(format!(
                "data file {} is a directory",
                self.data_file.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = Config::try_parse_from(["media-catalog"]).unwrap();
        assert_eq!(cfg.data_file, PathBuf::from("media.json"));
        assert_eq!(cfg.listen_addr().to_string(), "127.0.0.1:5000");
        assert!(!cfg.compact);
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = Config::try_parse_from([
            "media-catalog",
            "--data-file",
            "/tmp/catalog.json",
            "--host",
            "0.0.0.0",
            "-p",
            "8080",
            "--compact",
        ])
        .unwrap();
        assert_eq!(cfg.listen_addr().to_string(), "0.0.0.0:8080");
        assert!(cfg.compact);
    }

    #[test]
    fn directory_as_data_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::try_parse_from([
            "media-catalog",
            "--data-file",
            dir.path().to_str().unwrap(),
        ])
        .unwrap();
        assert!(matches!(cfg.validate(), Err(Error::Config(_))));
    }
}
