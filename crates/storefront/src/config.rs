//! Runtime configuration.
//!
//! Values come from `FROSTCART_*` environment variables (or any lookup
//! closure in tests). Unset variables take the default; a variable that is set
//! but cannot be parsed is an error naming the variable.

use serde::{Deserialize, Serialize};

use frostcart_cart::MergePolicy;
use frostcart_core::{DomainError, DomainResult, Money, TaxRate, parse_money};
use frostcart_identity::login::DEFAULT_ADMIN_EMAIL;
use frostcart_observability::LogFormat;

pub const TAX_RATE_VAR: &str = "FROSTCART_TAX_RATE";
pub const FREE_DELIVERY_VAR: &str = "FROSTCART_FREE_DELIVERY_ABOVE";
pub const ADMIN_EMAIL_VAR: &str = "FROSTCART_ADMIN_EMAIL";
pub const MERGE_POLICY_VAR: &str = "FROSTCART_MERGE_POLICY";
pub const LOG_FORMAT_VAR: &str = "FROSTCART_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Tax applied on top of the cart subtotal.
    pub tax_rate: TaxRate,
    /// Subtotal (minor units) at or above which delivery is advertised free.
    pub free_delivery_threshold: Money,
    /// Email address the mock sign-in treats as the administrator.
    pub admin_email: String,
    pub merge_policy: MergePolicy,
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            tax_rate: TaxRate::from_bps(1800),
            free_delivery_threshold: Money::from_major(1_000),
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            merge_policy: MergePolicy::MergeMatching,
            log_format: LogFormat::Json,
        }
    }
}

impl StorefrontConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, starting from the defaults.
    pub fn from_lookup<F>(lookup: F) -> DomainResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(TAX_RATE_VAR) {
            config.tax_rate = raw.parse().map_err(|_| invalid(TAX_RATE_VAR, &raw))?;
        }
        if let Some(raw) = lookup(FREE_DELIVERY_VAR) {
            config.free_delivery_threshold = parse_money(FREE_DELIVERY_VAR, &raw)?;
        }
        if let Some(raw) = lookup(ADMIN_EMAIL_VAR) {
            let email = raw.trim();
            if email.is_empty() || !email.contains('@') {
                return Err(invalid(ADMIN_EMAIL_VAR, &raw));
            }
            config.admin_email = email.to_string();
        }
        if let Some(raw) = lookup(MERGE_POLICY_VAR) {
            config.merge_policy = raw.parse().map_err(|_| invalid(MERGE_POLICY_VAR, &raw))?;
        }
        if let Some(raw) = lookup(LOG_FORMAT_VAR) {
            config.log_format = raw.parse().map_err(|_| invalid(LOG_FORMAT_VAR, &raw))?;
        }

        Ok(config)
    }

    /// Parse a JSON document; omitted fields take their defaults.
    pub fn from_json(json: &str) -> DomainResult<Self> {
        serde_json::from_str(json).map_err(|e| DomainError::validation(format!("config: {e}")))
    }
}

fn invalid(var: &str, raw: &str) -> DomainError {
    DomainError::validation(format!("{var}: invalid value '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = StorefrontConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.tax_rate.bps(), 1800);
        assert_eq!(config.free_delivery_threshold, Money::from_major(1_000));
    }

    #[test]
    fn every_variable_overrides_its_field() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            (TAX_RATE_VAR, "0.05"),
            (FREE_DELIVERY_VAR, "2500.50"),
            (ADMIN_EMAIL_VAR, " boss@frost.example "),
            (MERGE_POLICY_VAR, "separate"),
            (LOG_FORMAT_VAR, "pretty"),
        ]))
        .unwrap();

        assert_eq!(config.tax_rate.bps(), 500);
        assert_eq!(config.free_delivery_threshold, Money::from_minor(250_050));
        assert_eq!(config.admin_email, "boss@frost.example");
        assert_eq!(config.merge_policy, MergePolicy::SeparateLines);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn unparsable_value_names_the_variable() {
        let err = StorefrontConfig::from_lookup(lookup(&[(TAX_RATE_VAR, "18%")])).unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains(TAX_RATE_VAR)),
            other => panic!("expected Validation, got {other:?}"),
        }
        assert!(StorefrontConfig::from_lookup(lookup(&[(ADMIN_EMAIL_VAR, "nobody")])).is_err());
        assert!(StorefrontConfig::from_lookup(lookup(&[(FREE_DELIVERY_VAR, "-5")])).is_err());
    }

    #[test]
    fn json_config_fills_missing_fields_with_defaults() {
        let config = StorefrontConfig::from_json(r#"{"tax_rate": "0.12", "merge_policy": "separate_lines"}"#)
            .unwrap();
        assert_eq!(config.tax_rate.bps(), 1200);
        assert_eq!(config.merge_policy, MergePolicy::SeparateLines);
        assert_eq!(config.admin_email, DEFAULT_ADMIN_EMAIL);
    }
}
