//! Greeting backed by an embedded YAML document.

use anyhow::{Context, Result};
use serde::Deserialize;

const GREETINGS_YAML: &str = r#"
---
greetings:
    basic: Hello, World!
"#;

#[derive(Debug, Deserialize)]
struct GreetingConfig {
    greetings: Greetings,
}

#[derive(Debug, Deserialize)]
struct Greetings {
    basic: String,
}

/// The `greetings.basic` entry of the embedded config.
pub fn get_greeting() -> Result<String> {
    greeting_from(GREETINGS_YAML)
}

fn greeting_from(yaml: &str) -> Result<String> {
    let config: GreetingConfig = serde_yaml::from_str(yaml).context("parse greetings yaml")?;
    Ok(config.greetings.basic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_greeting_is_hello_world() {
        assert_eq!(get_greeting().expect("greeting"), "Hello, World!");
    }

    #[test]
    fn missing_key_is_an_error() {
        let err = greeting_from("greetings:\n  fancy: Salutations\n").unwrap_err();
        assert!(format!("{err:#}").contains("parse greetings yaml"));
    }
}
