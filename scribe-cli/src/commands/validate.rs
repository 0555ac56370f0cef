//! URL validation command

use anyhow::Result;
use colored::*;
use scribe_core::validation;

use crate::config::Config;

pub fn handle_validate(url: &str, config: &Config) -> Result<()> {
    let result = validation::check(url);

    if config.json {
        let body = match &result {
            Ok(parsed) => serde_json::json!({ "valid": true, "url": parsed.as_str() }),
            Err(e) => serde_json::json!({ "valid": false, "reason": e.to_string() }),
        };
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        match &result {
            Ok(parsed) => println!("{} {}", "✓".green(), parsed.as_str()),
            Err(e) => println!("{} {}", "✗".red(), e),
        }
    }

    result.map(|_| ()).map_err(Into::into)
}
