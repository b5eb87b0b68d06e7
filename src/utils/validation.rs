use crate::utils::error::{RecordError, Result};
use regex::Regex;
use std::sync::LazyLock;
use url::Host;

/// Matches the `EmailField` default width.
pub const EMAIL_MAX_LENGTH: usize = 254;

// dot-atom 或 quoted-string
static EMAIL_USER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)^(?:[-!#$%&'*+/=?^_`{}|~0-9a-z]+(?:\.[-!#$%&'*+/=?^_`{}|~0-9a-z]+)*|"(?:[\x01-\x08\x0b\x0c\x0e-\x1f!#-\[\]-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])*")$"#,
    )
    .expect("email user pattern is valid")
});

static EMAIL_DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z0-9-]{2,63}$")
        .expect("email domain pattern is valid")
});

static EMAIL_LITERAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([A-Fa-f0-9:.]+)\]$").expect("email literal pattern is valid")
});

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Length is measured in characters, not bytes.
pub fn validate_max_length(field_name: &str, value: &str, max_length: usize) -> Result<()> {
    let length = value.chars().count();
    if length > max_length {
        return Err(RecordError::validation(
            field_name,
            format!(
                "Ensure this value has at most {} characters (it has {})",
                max_length, length
            ),
        ));
    }
    Ok(())
}

pub fn validate_email(field_name: &str, value: &str) -> Result<()> {
    let invalid = || RecordError::validation(field_name, "Enter a valid email address");

    if value.is_empty() || value.chars().count() > EMAIL_MAX_LENGTH {
        return Err(invalid());
    }

    let (user_part, domain_part) = value.rsplit_once('@').ok_or_else(invalid)?;

    if !EMAIL_USER_RE.is_match(user_part) {
        return Err(invalid());
    }

    if domain_part.eq_ignore_ascii_case("localhost") {
        return Ok(());
    }

    if let Some(caps) = EMAIL_LITERAL_RE.captures(domain_part) {
        return caps[1]
            .parse::<std::net::IpAddr>()
            .map(|_| ())
            .map_err(|_| invalid());
    }

    // 國際化網域先轉成 punycode 再比對
    if !is_valid_domain(domain_part)
        && !idna_domain(domain_part).is_some_and(|ascii| is_valid_domain(&ascii))
    {
        return Err(invalid());
    }

    Ok(())
}

// 頂級域名不可以 '-' 結尾
fn is_valid_domain(domain: &str) -> bool {
    EMAIL_DOMAIN_RE.is_match(domain) && !domain.ends_with('-')
}

fn idna_domain(domain: &str) -> Option<String> {
    match Host::parse(domain) {
        Ok(Host::Domain(ascii)) => Some(ascii),
        _ => None,
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RecordError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    validate_non_empty_string(field_name, path)?;

    if path.contains('\0') {
        return Err(RecordError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}
