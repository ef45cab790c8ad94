use super::{Config, ConfigError};

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let paths = [
            ("scan file", &self.scan_file),
            ("snapshot file", &self.snapshot_file),
            ("allowlist file", &self.allowlist_file),
        ];

        for (name, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfig(format!(
                    "The {name} path must not be empty"
                )));
            }
        }

        // Refresh and analyze truncate the snapshot, so it must not alias an input
        if self.snapshot_file == self.scan_file {
            return Err(ConfigError::InvalidConfig(format!(
                "Snapshot file and scan file are the same path: {}",
                self.scan_file.display()
            )));
        }
        if self.snapshot_file == self.allowlist_file {
            return Err(ConfigError::InvalidConfig(format!(
                "Snapshot file and allowlist file are the same path: {}",
                self.allowlist_file.display()
            )));
        }
        if self.allowlist_file == self.scan_file {
            return Err(ConfigError::InvalidConfig(format!(
                "Allowlist file and scan file are the same path: {}",
                self.scan_file.display()
            )));
        }

        Ok(())
    }
}
