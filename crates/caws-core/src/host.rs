//! Ambient host context.
//!
//! A development workspace host exports its organization and project names
//! as environment variables. The ARN alone never carries them.

use crate::errors::CoreError;

pub const ORGANIZATION_NAME_VAR: &str = "__DEV_ENVIRONMENT_ORGANIZATION_NAME";
pub const PROJECT_NAME_VAR: &str = "__DEV_ENVIRONMENT_PROJECT_NAME";

/// Organization and project names supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostContext {
    pub organization_name: Option<String>,
    pub project_name: Option<String>,
}

impl HostContext {
    /// Read the context from the current process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the context from an arbitrary variable lookup. Empty values count as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        Self {
            organization_name: read(ORGANIZATION_NAME_VAR),
            project_name: read(PROJECT_NAME_VAR),
        }
    }

    /// # Errors
    ///
    /// Returns [`CoreError::MissingContext`] if the host did not export an organization.
    pub fn organization_name(&self) -> Result<&str, CoreError> {
        self.organization_name
            .as_deref()
            .ok_or(CoreError::MissingContext {
                field: "organization name",
            })
    }

    /// # Errors
    ///
    /// Returns [`CoreError::MissingContext`] if the host did not export a project.
    pub fn project_name(&self) -> Result<&str, CoreError> {
        self.project_name
            .as_deref()
            .ok_or(CoreError::MissingContext {
                field: "project name",
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_names_from_env() {
        figment::Jail::expect_with(|jail| {
            jail.set_env(ORGANIZATION_NAME_VAR, "acme");
            jail.set_env(PROJECT_NAME_VAR, "rockets");

            let context = HostContext::from_env();
            assert_eq!(context.organization_name(), Ok("acme"));
            assert_eq!(context.project_name(), Ok("rockets"));
            Ok(())
        });
    }

    #[test]
    fn blank_values_are_missing() {
        let context = HostContext::from_lookup(|name| {
            (name == ORGANIZATION_NAME_VAR).then(|| "   ".to_string())
        });
        assert_eq!(
            context.organization_name(),
            Err(CoreError::MissingContext {
                field: "organization name"
            })
        );
        assert!(context.project_name().is_err());
    }
}
