use std::env;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::workflows::expense::{
    ApprovalChain, AuthorizationLimit, ChainBuilder, ChainError, Tier, TierApprover,
};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub approval: ApprovalConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let defaults = ApprovalConfig::default();
        let approval = ApprovalConfig {
            supervisor_limit: limit_from_env(
                "APPROVAL_SUPERVISOR_LIMIT",
                defaults.supervisor_limit,
            )?,
            manager_limit: limit_from_env("APPROVAL_MANAGER_LIMIT", defaults.manager_limit)?,
            director_limit: limit_from_env("APPROVAL_DIRECTOR_LIMIT", defaults.director_limit)?,
        };
        approval.validate()?;

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            approval,
        })
    }
}

fn limit_from_env(var: &'static str, default: Decimal) -> Result<Decimal, ConfigError> {
    let Ok(raw) = env::var(var) else {
        return Ok(default);
    };

    let value = Decimal::from_str(raw.trim()).map_err(|_| ConfigError::InvalidLimit {
        var,
        value: raw.clone(),
    })?;
    if value < Decimal::ZERO {
        return Err(ConfigError::InvalidLimit { var, value: raw });
    }
    Ok(value)
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Authorization limits for the bounded tiers. The CEO tier is unlimited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalConfig {
    pub supervisor_limit: Decimal,
    pub manager_limit: Decimal,
    pub director_limit: Decimal,
}

impl Default for ApprovalConfig {
    fn default() -> Self {
        Self {
            supervisor_limit: Decimal::from(100),
            manager_limit: Decimal::from(500),
            director_limit: Decimal::from(5000),
        }
    }
}

impl ApprovalConfig {
    /// Limits must strictly increase with authority.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.supervisor_limit < self.manager_limit && self.manager_limit < self.director_limit {
            Ok(())
        } else {
            Err(ConfigError::NonAscendingLimits)
        }
    }

    pub fn limit_for(&self, tier: Tier) -> AuthorizationLimit {
        match tier {
            Tier::Supervisor => AuthorizationLimit::UpTo(self.supervisor_limit),
            Tier::Manager => AuthorizationLimit::UpTo(self.manager_limit),
            Tier::Director => AuthorizationLimit::UpTo(self.director_limit),
            Tier::ChiefExecutive => AuthorizationLimit::Unlimited,
        }
    }

    /// Build the four-tier chain using the configured limits.
    pub fn standard_chain(&self) -> Result<ApprovalChain, ChainError> {
        Tier::ALL
            .into_iter()
            .try_fold(ChainBuilder::new(), |builder, tier| {
                builder.append(TierApprover::new(tier).with_limit(self.limit_for(tier)))
            })?
            .build()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidLimit { var: &'static str, value: String },
    NonAscendingLimits,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidLimit { var, value } => {
                write!(f, "{var} must be a non-negative decimal (found '{value}')")
            }
            ConfigError::NonAscendingLimits => write!(
                f,
                "approval limits must increase from supervisor to manager to director"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APPROVAL_SUPERVISOR_LIMIT");
        env::remove_var("APPROVAL_MANAGER_LIMIT");
        env::remove_var("APPROVAL_DIRECTOR_LIMIT");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.approval, ApprovalConfig::default());
    }

    #[test]
    fn load_reads_limit_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "prod");
        env::set_var("APPROVAL_SUPERVISOR_LIMIT", "250.00");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.approval.supervisor_limit, dec!(250));
        assert_eq!(config.approval.manager_limit, dec!(500));
        reset_env();
    }

    #[test]
    fn load_rejects_unparsable_limit() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APPROVAL_MANAGER_LIMIT", "five hundred");
        let err = AppConfig::load().expect_err("limit must parse");
        assert!(matches!(
            err,
            ConfigError::InvalidLimit {
                var: "APPROVAL_MANAGER_LIMIT",
                ..
            }
        ));
        reset_env();
    }

    #[test]
    fn load_rejects_limits_out_of_order() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APPROVAL_DIRECTOR_LIMIT", "400");
        let err = AppConfig::load().expect_err("director below manager");
        assert!(matches!(err, ConfigError::NonAscendingLimits));
        reset_env();
    }

    #[test]
    fn standard_chain_applies_configured_limits() {
        let config = ApprovalConfig {
            supervisor_limit: dec!(50),
            manager_limit: dec!(1000),
            director_limit: dec!(10000),
        };
        let chain = config.standard_chain().expect("chain builds");
        assert_eq!(chain.names(), vec!["Supervisor", "Manager", "Director", "CEO"]);
        let limits: Vec<_> = chain.approvers().iter().map(|a| a.limit()).collect();
        assert_eq!(
            limits,
            vec![
                AuthorizationLimit::UpTo(dec!(50)),
                AuthorizationLimit::UpTo(dec!(1000)),
                AuthorizationLimit::UpTo(dec!(10000)),
                AuthorizationLimit::Unlimited,
            ]
        );
    }
}
