//! Orchestrator configuration
//!
//! Settings that shape how the assignment index behaves and how the service
//! identifies itself in logs.

use crate::repository::AssignmentPolicy;

/// Orchestrator configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Name attached to service log events
    pub instance_name: String,

    /// How overwrite-adds and reassignment are handled
    pub policy: AssignmentPolicy,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(instance_name: String) -> Self {
        Self {
            instance_name,
            policy: AssignmentPolicy::default(),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - DISPATCH_INSTANCE_NAME (optional, default: "dispatch")
    /// - DISPATCH_ASSIGNMENT_POLICY (optional, "legacy" or "strict", default: legacy)
    pub fn from_env() -> anyhow::Result<Self> {
        let instance_name =
            std::env::var("DISPATCH_INSTANCE_NAME").unwrap_or_else(|_| "dispatch".to_string());

        let policy = parse_policy(std::env::var("DISPATCH_ASSIGNMENT_POLICY").ok().as_deref())?;

        let config = Self {
            instance_name,
            policy,
        };
        config.validate()?;

        Ok(config)
    }

    pub fn with_policy(mut self, policy: AssignmentPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.instance_name.trim().is_empty() {
            anyhow::bail!("instance_name cannot be empty");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("dispatch".to_string())
    }
}

fn parse_policy(raw: Option<&str>) -> anyhow::Result<AssignmentPolicy> {
    match raw {
        None => Ok(AssignmentPolicy::default()),
        Some(value) => value
            .parse()
            .map_err(|e| anyhow::anyhow!("DISPATCH_ASSIGNMENT_POLICY: {}", e)),
    }
}
