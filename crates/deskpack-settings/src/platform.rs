//! Host platform detection
//!
//! Detection produces a plain value that callers pass into state
//! initialization; nothing here is cached or global, so tests can
//! construct any platform they need.

use std::fmt;

/// Operating-system family the tool is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Windows,
    MacOs,
    Linux,
}

impl OsFamily {
    /// Family of the compile target.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Linux
        }
    }

    /// Name of the settings profile this family maps to.
    pub fn profile_name(self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::MacOs => "mac",
            Self::Linux => "linux",
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile_name())
    }
}

/// Detected host platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformInfo {
    pub os: OsFamily,
    /// `ID=` field of `/etc/os-release`, lowercased. `None` off Linux
    /// or when the file is missing or unreadable.
    pub linux_distribution: Option<String>,
}

impl PlatformInfo {
    /// Detect the current host.
    pub fn detect() -> Self {
        let os = OsFamily::current();
        let linux_distribution = if os == OsFamily::Linux {
            std::fs::read_to_string("/etc/os-release")
                .ok()
                .and_then(|text| distribution_from_os_release(&text))
        } else {
            None
        };
        Self {
            os,
            linux_distribution,
        }
    }

    /// The profiles every project starts with on this platform:
    /// `base`, `secret`, the OS profile, and on Linux a distribution
    /// family profile when the distribution maps to one.
    pub fn core_profiles(&self) -> Vec<String> {
        let mut profiles = vec![
            "base".to_string(),
            "secret".to_string(),
            self.os.profile_name().to_string(),
        ];
        if let Some(profile) = self.distribution_profile() {
            profiles.push(profile.to_string());
        }
        profiles
    }

    fn distribution_profile(&self) -> Option<&'static str> {
        match self.linux_distribution.as_deref()? {
            // The Ubuntu profile covers the derivatives that package
            // like Ubuntu does.
            "ubuntu" | "linuxmint" | "pop" => Some("ubuntu"),
            "arch" => Some("arch"),
            "fedora" => Some("fedora"),
            _ => None,
        }
    }
}

/// Extract the distribution `ID=` field from os-release text.
pub fn distribution_from_os_release(text: &str) -> Option<String> {
    for line in text.lines() {
        let line = line.trim();
        if let Some(value) = line.strip_prefix("ID=") {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if value.is_empty() {
                return None;
            }
            return Some(value.to_ascii_lowercase());
        }
    }
    None
}
