use envconfig::Envconfig;
use once_cell::sync::Lazy;
use std::ops::Deref;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlexBool(pub bool);

impl FromStr for FlexBool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(FlexBool(true)),
            "false" | "0" | "no" | "off" | "" => Ok(FlexBool(false)),
            _ => Err(format!("Invalid boolean value: {}", s)),
        }
    }
}

impl From<FlexBool> for bool {
    fn from(flex: FlexBool) -> Self {
        flex.0
    }
}

impl Deref for FlexBool {
    type Target = bool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Envconfig, Clone, Debug)]
pub struct Config {
    // Serve treatments from the override table instead of evaluating rules.
    #[envconfig(default = "false")]
    pub localhost_mode: FlexBool,

    // When set, empty matching keys and longer ones evaluate to control.
    pub max_key_length: Option<usize>,
}

impl Config {
    pub fn default_test_config() -> Self {
        Self {
            localhost_mode: FlexBool(false),
            max_key_length: None,
        }
    }

    pub fn localhost_test_config() -> Self {
        Self {
            localhost_mode: FlexBool(true),
            ..Self::default_test_config()
        }
    }
}

pub static DEFAULT_TEST_CONFIG: Lazy<Config> = Lazy::new(Config::default_test_config);
