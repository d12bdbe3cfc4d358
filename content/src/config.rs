//! Configuration for the content tooling.
//!
//! Resolution order: defaults, then an optional TOML file, then environment
//! variables. CLI flags are applied last by the binary.
//!
//! ```toml
//! [cms]
//! project_id = "abc123"
//! dataset = "staging"
//!
//! [mail]
//! from = "Northlight <hello@northlight.studio>"
//!
//! [overlay]
//! editor_scheme = "cursor"
//! ```

use std::fs;
use std::path::Path;

use agency_devtools::OverlayConfig;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_DATASET: &str = "production";
pub const DEFAULT_API_VERSION: &str = "2024-01-01";
pub const DEFAULT_MAIL_API_URL: &str = "https://api.resend.com/emails";
pub const DEFAULT_MAIL_FROM: &str = "Northlight Studio <hello@northlight.studio>";
pub const DEFAULT_MAIL_TO: &str = "hello@northlight.studio";
pub const DEFAULT_CAREERS_TO: &str = "careers@northlight.studio";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgencyConfig {
    pub cms: CmsConfig,
    pub mail: MailConfig,
    pub overlay: OverlayConfig,
}

/// Where seed documents go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    pub project_id: Option<String>,
    pub dataset: String,
    pub api_version: String,
    /// Overrides `https://<project_id>.api.sanity.io` (proxies, tests).
    pub api_host: Option<String>,
    /// Write token. Normally only supplied through `CMS_API_TOKEN`.
    pub token: Option<String>,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            dataset: DEFAULT_DATASET.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            api_host: None,
            token: None,
        }
    }
}

impl CmsConfig {
    pub fn base_url(&self) -> Result<String, ConfigError> {
        if let Some(host) = &self.api_host {
            return Ok(host.trim_end_matches('/').to_string());
        }
        let project = self
            .project_id
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or(ConfigError::MissingProjectId)?;
        Ok(format!("https://{project}.api.sanity.io"))
    }

    pub fn require_token(&self) -> Result<&str, ConfigError> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)
    }
}

/// Transactional email addresses and provider endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub from: String,
    /// Inbox for contact-form submissions.
    pub to: String,
    /// Inbox for job applications.
    pub careers_to: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_MAIL_API_URL.to_string(),
            api_key: None,
            from: DEFAULT_MAIL_FROM.to_string(),
            to: DEFAULT_MAIL_TO.to_string(),
            careers_to: DEFAULT_CAREERS_TO.to_string(),
        }
    }
}

impl AgencyConfig {
    /// Load `path` (if given and present) and apply process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut cfg = match path {
            Some(p) => Self::from_file(p)?.unwrap_or_default(),
            None => Self::default(),
        };
        cfg.apply_env_from(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    /// `Ok(None)` when the file does not exist.
    pub fn from_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = toml::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(cfg))
    }

    /// Overlay environment values. Empty variables are ignored.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("CMS_PROJECT_ID") {
            self.cms.project_id = Some(v);
        }
        if let Some(v) = get("CMS_DATASET") {
            self.cms.dataset = v;
        }
        if let Some(v) = get("CMS_API_VERSION") {
            self.cms.api_version = v;
        }
        if let Some(v) = get("CMS_API_HOST") {
            self.cms.api_host = Some(v);
        }
        if let Some(v) = get("CMS_API_TOKEN") {
            self.cms.token = Some(v);
        }

        if let Some(v) = get("MAIL_API_URL") {
            self.mail.api_url = v;
        }
        if let Some(v) = get("MAIL_API_KEY") {
            self.mail.api_key = Some(v);
        }
        if let Some(v) = get("MAIL_FROM") {
            self.mail.from = v;
        }
        if let Some(v) = get("MAIL_TO") {
            self.mail.to = v;
        }
        if let Some(v) = get("MAIL_CAREERS_TO") {
            self.mail.careers_to = v;
        }

        if let Some(v) = get("OVERLAY_EDITOR_SCHEME") {
            self.overlay.editor_scheme = v;
        }
        if let Some(v) = get("OVERLAY_PROJECT_ROOT") {
            self.overlay.project_root = v;
        }
    }

    /// Copy safe to print: secrets replaced by `***`.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.cms.token.is_some() {
            copy.cms.token = Some("***".to_string());
        }
        if copy.mail.api_key.is_some() {
            copy.mail.api_key = Some("***".to_string());
        }
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn defaults_fill_in_fallback_addresses() {
        let cfg = AgencyConfig::default();
        assert_eq!(cfg.cms.dataset, DEFAULT_DATASET);
        assert_eq!(cfg.mail.from, DEFAULT_MAIL_FROM);
        assert_eq!(cfg.mail.careers_to, DEFAULT_CAREERS_TO);
        assert_eq!(cfg.overlay.editor_scheme, "vscode");
    }

    #[test]
    fn toml_file_is_partial() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("agency.toml");
        fs::write(
            &path,
            "[cms]\nproject_id = \"p1\"\ndataset = \"staging\"\n\n[overlay]\neditor_scheme = \"zed\"\n",
        )
        .expect("write config");

        let cfg = AgencyConfig::from_file(&path)
            .expect("parse")
            .expect("file exists");
        assert_eq!(cfg.cms.project_id.as_deref(), Some("p1"));
        assert_eq!(cfg.cms.dataset, "staging");
        assert_eq!(cfg.cms.api_version, DEFAULT_API_VERSION);
        assert_eq!(cfg.overlay.editor_scheme, "zed");
        assert_eq!(cfg.mail, MailConfig::default());
    }

    #[test]
    fn missing_file_is_none_and_bad_toml_is_error() {
        let dir = tempdir().expect("tempdir");
        assert!(
            AgencyConfig::from_file(&dir.path().join("nope.toml"))
                .expect("no error")
                .is_none()
        );

        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "[cms\n").expect("write");
        let err = AgencyConfig::from_file(&bad).expect_err("parse error");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn env_overrides_file_and_skips_empty_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("CMS_PROJECT_ID", "env-project"),
            ("CMS_API_TOKEN", "sk-secret"),
            ("MAIL_TO", "  "),
            ("MAIL_FROM", "Ops <ops@northlight.studio>"),
        ]);
        let mut cfg = AgencyConfig::default();
        cfg.cms.project_id = Some("file-project".into());
        cfg.apply_env_from(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(cfg.cms.project_id.as_deref(), Some("env-project"));
        assert_eq!(cfg.cms.require_token().expect("token"), "sk-secret");
        assert_eq!(cfg.mail.to, DEFAULT_MAIL_TO);
        assert_eq!(cfg.mail.from, "Ops <ops@northlight.studio>");
    }

    #[test]
    fn base_url_prefers_explicit_host() {
        let mut cms = CmsConfig::default();
        assert!(matches!(cms.base_url(), Err(ConfigError::MissingProjectId)));
        cms.project_id = Some("abc".into());
        assert_eq!(cms.base_url().expect("url"), "https://abc.api.sanity.io");
        cms.api_host = Some("http://127.0.0.1:9999/".into());
        assert_eq!(cms.base_url().expect("url"), "http://127.0.0.1:9999");
    }

    #[test]
    #[serial_test::serial]
    fn load_reads_process_env() {
        // SAFETY: serialized test; nothing else touches the environment meanwhile
        unsafe { std::env::set_var("CMS_DATASET", "qa") };
        let cfg = AgencyConfig::load(None);
        unsafe { std::env::remove_var("CMS_DATASET") };
        assert_eq!(cfg.expect("load").cms.dataset, "qa");
    }

    #[test]
    fn redacted_hides_secrets() {
        let mut cfg = AgencyConfig::default();
        cfg.cms.token = Some("sk".into());
        cfg.mail.api_key = Some("re_123".into());
        let shown = cfg.redacted();
        assert_eq!(shown.cms.token.as_deref(), Some("***"));
        assert_eq!(shown.mail.api_key.as_deref(), Some("***"));
        assert!(matches!(
            CmsConfig::default().require_token(),
            Err(ConfigError::MissingToken)
        ));
    }
}
