use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::env;

pub const SERVICE_NAME: &str = "text-processor";

/// Architecture the binary was built for.
pub fn default_runtime_tag() -> &'static str {
    env::consts::ARCH
}

/// Host-supplied tag wins; a blank override falls back to the build architecture.
pub fn resolve_runtime_tag(override_tag: Option<&str>) -> String {
    match override_tag.map(str::trim) {
        Some(tag) if !tag.is_empty() => tag.to_string(),
        _ => default_runtime_tag().to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceInfo {
    pub service: String,
    pub architecture: String,
    pub platform: String,
    pub timestamp: String,
}

impl ServiceInfo {
    pub fn collect(runtime_tag: &str) -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
            architecture: runtime_tag.to_string(),
            platform: env::consts::OS.to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn override_is_passed_through() {
        assert_eq!(resolve_runtime_tag(Some("arm64")), "arm64");
        assert_eq!(resolve_runtime_tag(Some("linux/amd64 v3")), "linux/amd64 v3");
    }

    #[test]
    fn blank_override_uses_build_architecture() {
        assert_eq!(resolve_runtime_tag(None), env::consts::ARCH);
        assert_eq!(resolve_runtime_tag(Some("  ")), env::consts::ARCH);
    }

    #[test]
    fn service_info_fields() {
        let info = ServiceInfo::collect("x86_64");
        assert_eq!(info.service, "text-processor");
        assert_eq!(info.architecture, "x86_64");
        assert_eq!(info.platform, env::consts::OS);
        assert!(DateTime::parse_from_rfc3339(&info.timestamp).is_ok());
        assert!(info.timestamp.ends_with('Z'));
    }
}
