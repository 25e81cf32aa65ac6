use std::{env, fmt, str::FromStr, time::Duration};

use url::Url;

use crate::error::{Error, Result};

/// The public sandbox key published by ShopLogistics for the test environment.
pub const TEST_API_KEY: &str = "577888574a3e4df01867cd5ccc9f18a5";

/// The endpoint used for the test environment.
const TEST_ENDPOINT: &str = "https://test.client-shop-logistics.ru/index.php?route=deliveries/api";

/// The endpoint used for production. Note that this one is plain HTTP.
const PROD_ENDPOINT: &str = "http://client-shop-logistics.ru/index.php?route=deliveries/api";

/// ShopLogistics serves browsers happily, so we pretend to be one.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:46.0) Gecko/20100101 Firefox/46.0";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the API key for [`Credentials::from_env`].
pub const API_KEY_VAR: &str = "SHOPLOGISTICS_API_KEY";

/// Environment variable holding the environment name for [`Credentials::from_env`].
pub const ENVIRONMENT_VAR: &str = "SHOPLOGISTICS_ENV";

/// Which ShopLogistics installation we talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Test,
    #[default]
    Prod,
}

impl Environment {
    /// Resolves an environment by name.
    ///
    /// Only the exact name `"test"` selects the sandbox. Anything else,
    /// `"TEST"` included, falls back to production. An empty name is rejected.
    pub fn from_name(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::invalid("environment must not be empty"));
        }

        Ok(if name == "test" {
            Environment::Test
        } else {
            Environment::Prod
        })
    }

    /// The API endpoint for this environment.
    pub fn base_url(&self) -> Url {
        let endpoint = match self {
            Environment::Test => TEST_ENDPOINT,
            Environment::Prod => PROD_ENDPOINT,
        };

        // Built-in constants, parsed in `environments_resolve_to_fixed_endpoints`.
        Url::parse(endpoint).expect("built-in endpoint should be a valid URL")
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        Self::from_name(name)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Test => f.write_str("test"),
            Environment::Prod => f.write_str("prod"),
        }
    }
}

/// The API key and environment a client is bound to.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    environment: Environment,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, environment: Environment) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Error::invalid("API key must not be empty"));
        }

        Ok(Self {
            api_key,
            environment,
        })
    }

    /// Reads credentials from `SHOPLOGISTICS_API_KEY` and, optionally,
    /// `SHOPLOGISTICS_ENV` (production when unset).
    pub fn from_env() -> Result<Self> {
        let api_key = env::var(API_KEY_VAR)
            .map_err(|_| Error::invalid(format!("{API_KEY_VAR} is not set")))?;
        let environment = match env::var(ENVIRONMENT_VAR) {
            Ok(name) => Environment::from_name(&name)?,
            Err(_) => Environment::default(),
        };

        Self::new(api_key, environment)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }
}

// The key is a secret; keep it out of logs and panics.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("environment", &self.environment)
            .finish()
    }
}

/// Connection options for the HTTP transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub user_agent: String,
    pub timeout: Option<Duration>,
    /// Overrides the environment's endpoint when set.
    pub endpoint: Option<Url>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
            endpoint: None,
        }
    }
}

impl ClientConfig {
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// The URL requests for the given environment should go to.
    pub fn endpoint_for(&self, environment: Environment) -> Url {
        self.endpoint
            .clone()
            .unwrap_or_else(|| environment.base_url())
    }
}
