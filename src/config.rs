use std::path::{Path, PathBuf};

/// the selected output device, read from a single line of plain text
///
/// there is deliberately no schema here: the file is meant to be created
/// by hand, pasting one name from `countdown_timer devices`
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    pub device_name: Option<String>,
}

impl Config {
    /// fixed path, relative to the process working directory
    #[must_use]
    pub fn config_path() -> PathBuf {
        PathBuf::from("config.txt")
    }

    /// a missing, unreadable, or blank file means no device selected
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let device_name = std::fs::read_to_string(path)
            .ok()
            .map(|contents| contents.trim().to_string())
            .filter(|name| !name.is_empty());
        Self { device_name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("countdown_timer_{name}_{}", std::process::id()))
    }

    #[test]
    fn missing_file_means_no_selection() {
        let path = temp_path("missing");
        assert_eq!(Config::load(&path), Config { device_name: None });
    }

    #[test]
    fn reads_and_trims_the_device_name() {
        let path = temp_path("named");
        std::fs::write(&path, "Headphones\n").unwrap();
        assert_eq!(
            Config::load(&path).device_name,
            Some("Headphones".to_string())
        );
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn blank_file_means_no_selection() {
        let path = temp_path("blank");
        std::fs::write(&path, "  \n").unwrap();
        assert_eq!(Config::load(&path).device_name, None);
        std::fs::remove_file(path).ok();
    }
}
