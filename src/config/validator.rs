use crate::error::{AppError, Result};

use super::{ClientConfig, Endpoints};

/// Validate a client configuration, reporting every problem at once.
pub fn validate_client_config(config: &ClientConfig) -> Result<()> {
    let mut issues = Vec::new();

    validate_endpoints(&config.endpoints, &mut issues);

    if let Some(token) = &config.token {
        if token.trim().is_empty() {
            issues.push("token must not be blank".to_string());
        }
    }

    if config.timeout_secs == 0 {
        issues.push("timeout_secs must be greater than zero".to_string());
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(AppError::message(format!(
            "client config invalid:\n  - {}",
            issues.join("\n  - ")
        )))
    }
}

fn validate_endpoints(endpoints: &Endpoints, issues: &mut Vec<String>) {
    if endpoints.batch.trim().is_empty() {
        issues.push("endpoints.batch must not be empty".to_string());
    }

    require_placeholders("endpoints.market", &endpoints.market, &["series"], issues);
    require_placeholders(
        "endpoints.stream",
        &endpoints.stream,
        &["endpoint", "token", "symbol"],
        issues,
    );
}

fn require_placeholders(label: &str, template: &str, names: &[&str], issues: &mut Vec<String>) {
    if template.trim().is_empty() {
        issues.push(format!("{label} must not be empty"));
        return;
    }

    for name in names {
        if !template.contains(&format!("{{{name}}}")) {
            issues.push(format!("{label} should reference `{{{name}}}`"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_builtin_endpoints() {
        let config = ClientConfig::builtin().with_token("sk_test");
        validate_client_config(&config).expect("builtin config should be valid");
    }

    #[test]
    fn reports_every_missing_stream_placeholder() {
        let mut config = ClientConfig::builtin().with_token("sk_test");
        config.endpoints.stream = "https://sse.example.test/stable".to_string();

        let err = validate_client_config(&config).expect_err("validation should fail");
        let message = err.to_string();
        for placeholder in ["{endpoint}", "{token}", "{symbol}"] {
            assert!(
                message.contains(placeholder),
                "expected {placeholder} in: {message}"
            );
        }
    }

    #[test]
    fn rejects_blank_token_and_zero_timeout() {
        let mut config = ClientConfig::builtin().with_token("   ");
        config.timeout_secs = 0;

        let message = validate_client_config(&config)
            .expect_err("validation should fail")
            .to_string();
        assert!(message.contains("token"), "unexpected error message: {message}");
        assert!(
            message.contains("timeout_secs"),
            "unexpected error message: {message}"
        );
    }
}
