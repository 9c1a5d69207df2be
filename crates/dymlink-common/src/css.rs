//! CSS custom-property sanitization for styles pushed to the peer.
//!
//! The peer applies `setStyles` entries verbatim as CSS variables, so every
//! name and value is checked before it leaves the host. Accepted values:
//! - Hex colors: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`
//! - `rgb()` / `rgba()` with comma or space separated numeric channels,
//!   optionally with a `/ alpha` suffix
//! - Bare channel lists such as `63, 81, 59` (used inside `rgba(var(--x), a)`)
//! - Numeric values with an optional unit: `14px`, `1.6`, `1.2em`, `50%`

use std::collections::BTreeMap;

// =============================================================================
// VALIDATION
// =============================================================================

/// Validate a CSS custom property name (`--black-light`).
pub fn validate_css_property_name(name: &str) -> Result<(), String> {
    let body = name
        .strip_prefix("--")
        .ok_or_else(|| format!("CSS property '{name}' must start with '--'"))?;

    if body.is_empty() {
        return Err("Empty CSS property name".to_string());
    }

    if let Some(ch) = body
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && *c != '-' && *c != '_')
    {
        return Err(format!("Invalid character '{ch}' in CSS property '{name}'"));
    }

    Ok(())
}

/// Validate a CSS custom property value.
pub fn validate_css_value(value: &str) -> Result<(), String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err("Empty CSS value".to_string());
    }

    check_injection_patterns(trimmed)?;

    if trimmed.starts_with('#') {
        return validate_hex_color(trimmed);
    }

    if trimmed.starts_with("rgba(") || trimmed.starts_with("rgb(") {
        return validate_rgb_function(trimmed);
    }

    if trimmed.contains(',') {
        return validate_channel_list(trimmed);
    }

    validate_numeric(trimmed)
}

/// Drop every entry whose name or value fails validation.
///
/// Rejected entries are logged and skipped; the remaining entries keep their
/// original (trimmed) values.
pub fn sanitize_styles(styles: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    let mut clean = BTreeMap::new();

    for (name, value) in styles {
        let result = validate_css_property_name(name).and_then(|()| validate_css_value(value));
        match result {
            Ok(()) => {
                clean.insert(name.clone(), value.trim().to_string());
            }
            Err(e) => {
                tracing::warn!(name = %name, value = %value, error = %e, "style rejected by sanitizer");
            }
        }
    }

    clean
}

// =============================================================================
// HELPERS
// =============================================================================

/// Check for common CSS injection patterns.
fn check_injection_patterns(value: &str) -> Result<(), String> {
    let lower = value.to_lowercase();

    let dangerous = [
        "expression(",
        "url(",
        "javascript:",
        "eval(",
        "import",
        "@charset",
        "behavior:",
        "-moz-binding",
    ];

    for pattern in &dangerous {
        if lower.contains(pattern) {
            return Err(format!("CSS injection blocked: contains '{pattern}'"));
        }
    }

    for ch in [';', '{', '}', '<', '>', '\\', '"', '\''] {
        if value.contains(ch) {
            return Err(format!("CSS injection blocked: contains '{ch}'"));
        }
    }

    Ok(())
}

fn validate_hex_color(value: &str) -> Result<(), String> {
    let hex = &value[1..];

    if !matches!(hex.len(), 3 | 4 | 6 | 8) {
        return Err(format!(
            "Invalid hex color length: expected 3/4/6/8 digits, got {} in '{value}'",
            hex.len()
        ));
    }

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("Invalid hex color: non-hex character in '{value}'"));
    }

    Ok(())
}

/// `rgb(63, 81, 59)`, `rgb(63 81 59)`, `rgba(0,0,0,0.5)`, `rgb(63 81 59 / 0.4)`.
fn validate_rgb_function(value: &str) -> Result<(), String> {
    let inner = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| format!("Malformed rgb/rgba: '{value}'"))?;

    let (channels, alpha) = match inner.split_once('/') {
        Some((c, a)) => (c, Some(a.trim())),
        None => (inner, None),
    };

    let parts: Vec<&str> = if channels.contains(',') {
        channels.split(',').map(str::trim).collect()
    } else {
        channels.split_whitespace().collect()
    };

    let count_ok = match alpha {
        Some(_) => parts.len() == 3,
        None => parts.len() == 3 || parts.len() == 4,
    };
    if !count_ok {
        return Err(format!(
            "Expected 3 or 4 channels in '{value}', got {}",
            parts.len()
        ));
    }

    for part in parts.iter().copied().chain(alpha) {
        validate_numeric(part)
            .map_err(|_| format!("Non-numeric channel '{part}' in '{value}'"))?;
    }

    Ok(())
}

fn validate_channel_list(value: &str) -> Result<(), String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();

    if !(3..=4).contains(&parts.len()) {
        return Err(format!(
            "Expected 3 or 4 channels in '{value}', got {}",
            parts.len()
        ));
    }

    for part in &parts {
        if part.parse::<f64>().is_err() {
            return Err(format!("Non-numeric channel '{part}' in '{value}'"));
        }
    }

    Ok(())
}

fn validate_numeric(value: &str) -> Result<(), String> {
    let numeric_part = value
        .trim_end_matches("px")
        .trim_end_matches("rem")
        .trim_end_matches("em")
        .trim_end_matches('%');

    if numeric_part.is_empty() || numeric_part.parse::<f64>().is_err() {
        return Err(format!("Invalid CSS value: '{value}'"));
    }

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
