use crate::{Error, Result};
use std::{
    env,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// Variable read by [`Config::from_env`].
pub const APPLICATION_ENV: &str = "APPLICATION_ENV";

/// Deployment environment of the application.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    #[default]
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Staging => "staging",
            Environment::Prod => "prod",
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Environment::Dev,
            "staging" | "stage" => Environment::Staging,
            "prod" | "production" => Environment::Prod,
            _ => return Err(Error::msg(format!("Unknown application environment `{s}`"))),
        })
    }
}

/// Settings consumed when creating the schema.
///
/// The value is immutable once built, pass it to [`MetaData`](crate::MetaData) explicitly.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    environment: Option<Environment>,
    replication_factor: Option<u8>,
}

impl Config {
    pub fn new(environment: Environment) -> Self {
        Self {
            environment: Some(environment),
            replication_factor: None,
        }
    }

    /// Read the environment from `APPLICATION_ENV`, left unset when the variable is missing.
    pub fn from_env() -> Result<Self> {
        match env::var(APPLICATION_ENV) {
            Ok(value) => Ok(Self::new(value.parse()?)),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(e) => Err(Error::new(e).context(format!("While reading {APPLICATION_ENV}"))),
        }
    }

    /// Override the replication factor of the keyspaces created.
    pub fn with_replication_factor(mut self, replication_factor: u8) -> Self {
        self.replication_factor = Some(replication_factor);
        self
    }

    /// Configured environment, `Dev` (with a warning) when it was never set.
    pub fn environment(&self) -> Environment {
        match self.environment {
            Some(v) => v,
            None => {
                let env = Environment::default();
                log::warn!(
                    "Using the default environment `{env}`, as the application environment has not been set"
                );
                env
            }
        }
    }

    pub fn is_environment_set(&self) -> bool {
        self.environment.is_some()
    }

    /// Replication factor, defaults to 1 in dev, 2 in staging and 3 in prod.
    pub fn replication_factor(&self) -> u8 {
        self.replication_factor
            .unwrap_or_else(|| match self.environment() {
                Environment::Dev => 1,
                Environment::Staging => 2,
                Environment::Prod => 3,
            })
    }
}
