//! Static authentication configuration.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// Host serving policy-scoped (B2C) authorities.
const B2C_LOGIN_HOST: &str = "b2clogin.com";

/// Host serving tenant-scoped authorities.
const TENANT_LOGIN_URL: &str = "https://login.microsoftonline.com";

/// Suffix appended to short tenant names.
const TENANT_DOMAIN_SUFFIX: &str = "onmicrosoft.com";

/// Configuration loaded once per process.
///
/// Field names on the wire are the upper-case keys of the configuration
/// document (`CLIENT_ID`, `TENANT_DOMAIN`, ...).
///
/// # Example
///
/// ```
/// use tessera_domain::AuthenticationConfig;
///
/// let config = AuthenticationConfig::new("client", "contoso", "msauth://callback")
///     .with_policy("B2C_1_signupsignin")
///     .with_scopes(["openid"]);
///
/// assert_eq!(
///     config.authority().map(|url| url.to_string()).ok().as_deref(),
///     Some("https://contoso.b2clogin.com/contoso.onmicrosoft.com/B2C_1_signupsignin"),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationConfig {
    /// Application (client) id registered with the identity provider.
    #[serde(rename = "CLIENT_ID")]
    pub client_id: String,
    /// Tenant name, short (`contoso`) or fully qualified.
    #[serde(rename = "TENANT_DOMAIN")]
    pub tenant_domain: String,
    /// User-flow policy; selects a policy-scoped authority when non-blank.
    #[serde(rename = "POLICY_NAME", default)]
    pub policy_name: Option<String>,
    /// Redirect URI registered for the client.
    #[serde(rename = "REDIRECT_URI")]
    pub redirect_uri: String,
    /// Scopes requested at sign-in and for map provisioning.
    #[serde(rename = "SCOPES", default)]
    pub scopes: Vec<String>,
    /// Explicit authority; wins over the derived one when parseable.
    #[serde(rename = "AUTHORITY_URL", default)]
    pub authority_url: Option<String>,
    /// Client id sent to the map service; provisioning is off without it.
    #[serde(rename = "MAP_CLIENT_ID", default)]
    pub secondary_client_id: Option<String>,
}

impl AuthenticationConfig {
    /// Creates a configuration with the required fields.
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        tenant_domain: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            tenant_domain: tenant_domain.into(),
            policy_name: None,
            redirect_uri: redirect_uri.into(),
            scopes: Vec::new(),
            authority_url: None,
            secondary_client_id: None,
        }
    }

    /// Sets the user-flow policy.
    #[must_use]
    pub fn with_policy(mut self, policy: impl Into<String>) -> Self {
        self.policy_name = Some(policy.into());
        self
    }

    /// Sets the scopes.
    #[must_use]
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Sets an explicit authority URL.
    #[must_use]
    pub fn with_authority_url(mut self, url: impl Into<String>) -> Self {
        self.authority_url = Some(url.into());
        self
    }

    /// Sets the map service client id.
    #[must_use]
    pub fn with_secondary_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.secondary_client_id = Some(client_id.into());
        self
    }

    /// Presence check for the required fields.
    ///
    /// # Errors
    /// Returns `DomainError::MissingConfigValue` naming the first blank field.
    pub fn validate(&self) -> DomainResult<()> {
        let required = [
            ("CLIENT_ID", &self.client_id),
            ("TENANT_DOMAIN", &self.tenant_domain),
            ("REDIRECT_URI", &self.redirect_uri),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(DomainError::MissingConfigValue(name.to_string()));
            }
        }
        Ok(())
    }

    /// Returns the policy name when it is present and non-blank.
    #[must_use]
    pub fn policy(&self) -> Option<&str> {
        non_blank(self.policy_name.as_deref())
    }

    /// Returns the map client id when it is present and non-blank.
    #[must_use]
    pub fn map_client_id(&self) -> Option<&str> {
        non_blank(self.secondary_client_id.as_deref())
    }

    /// Builds the identity-provider authority.
    ///
    /// An explicit, parseable `AUTHORITY_URL` wins. Otherwise a non-blank
    /// policy gives `https://{tenant}.b2clogin.com/{tenant}.onmicrosoft.com/{policy}`
    /// and its absence gives `https://login.microsoftonline.com/{tenant}.onmicrosoft.com`.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidAuthority` if no valid URL can be built.
    pub fn authority(&self) -> DomainResult<Url> {
        if let Some(explicit) = non_blank(self.authority_url.as_deref())
            && let Ok(url) = Url::parse(explicit)
        {
            return Ok(url);
        }

        let tenant = self.tenant_domain.trim();
        if tenant.is_empty() {
            return Err(DomainError::MissingConfigValue("TENANT_DOMAIN".to_string()));
        }

        let raw = match self.policy() {
            Some(policy) => {
                let short = tenant.split('.').next().unwrap_or(tenant);
                format!(
                    "https://{short}.{B2C_LOGIN_HOST}/{}/{policy}",
                    qualified_tenant(tenant)
                )
            }
            None => format!("{TENANT_LOGIN_URL}/{}", qualified_tenant(tenant)),
        };

        Url::parse(&raw).map_err(|e| DomainError::InvalidAuthority(format!("{raw}: {e}")))
    }

    /// Returns true when the authority is policy-scoped.
    #[must_use]
    pub fn is_policy_scoped(&self) -> bool {
        self.policy().is_some()
    }
}

fn qualified_tenant(tenant: &str) -> String {
    if tenant.contains('.') {
        tenant.to_string()
    } else {
        format!("{tenant}.{TENANT_DOMAIN_SUFFIX}")
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn base() -> AuthenticationConfig {
        AuthenticationConfig::new("client-id", "contoso", "msauth.com.example://auth")
    }

    #[test]
    fn test_policy_scoped_authority() {
        let config = base().with_policy("B2C_1_susi");
        assert!(config.is_policy_scoped());
        assert_eq!(
            config.authority().unwrap().as_str(),
            "https://contoso.b2clogin.com/contoso.onmicrosoft.com/B2C_1_susi"
        );
    }

    #[test]
    fn test_tenant_authority_without_policy() {
        assert_eq!(
            base().authority().unwrap().as_str(),
            "https://login.microsoftonline.com/contoso.onmicrosoft.com"
        );
    }

    #[test]
    fn test_blank_policy_means_tenant_authority() {
        let config = base().with_policy("   ");
        assert!(!config.is_policy_scoped());
        assert_eq!(
            config.authority().unwrap().as_str(),
            "https://login.microsoftonline.com/contoso.onmicrosoft.com"
        );
    }

    #[test]
    fn test_qualified_tenant_used_verbatim() {
        let config = AuthenticationConfig::new("c", "contoso.example.org", "app://cb");
        assert_eq!(
            config.authority().unwrap().as_str(),
            "https://login.microsoftonline.com/contoso.example.org"
        );
    }

    #[test]
    fn test_explicit_authority_wins() {
        let config = base()
            .with_policy("B2C_1_susi")
            .with_authority_url("https://contoso.ciamlogin.com/");
        assert_eq!(
            config.authority().unwrap().as_str(),
            "https://contoso.ciamlogin.com/"
        );
    }

    #[test]
    fn test_unparseable_explicit_authority_is_ignored() {
        let config = base().with_authority_url("not a url");
        assert_eq!(
            config.authority().unwrap().as_str(),
            "https://login.microsoftonline.com/contoso.onmicrosoft.com"
        );
    }

    #[test]
    fn test_validate_presence() {
        assert!(base().validate().is_ok());

        let mut config = base();
        config.client_id = " ".to_string();
        assert_eq!(
            config.validate(),
            Err(DomainError::MissingConfigValue("CLIENT_ID".to_string()))
        );

        let mut config = base();
        config.redirect_uri = String::new();
        assert_eq!(
            config.validate(),
            Err(DomainError::MissingConfigValue("REDIRECT_URI".to_string()))
        );
    }

    #[test]
    fn test_map_client_id_presence() {
        assert_eq!(base().map_client_id(), None);
        assert_eq!(base().with_secondary_client_id("").map_client_id(), None);
        assert_eq!(
            base().with_secondary_client_id("maps-1").map_client_id(),
            Some("maps-1")
        );
    }

    #[test]
    fn test_deserialize_upper_case_keys() {
        let json = r#"{
            "CLIENT_ID": "abc",
            "TENANT_DOMAIN": "contoso",
            "POLICY_NAME": "B2C_1_susi",
            "REDIRECT_URI": "msauth.com.example://auth",
            "SCOPES": ["https://contoso.onmicrosoft.com/api/read"],
            "MAP_CLIENT_ID": "maps-1"
        }"#;
        let config: AuthenticationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.client_id, "abc");
        assert_eq!(config.policy(), Some("B2C_1_susi"));
        assert_eq!(config.scopes.len(), 1);
        assert_eq!(config.map_client_id(), Some("maps-1"));
        assert_eq!(config.authority_url, None);
    }
}
