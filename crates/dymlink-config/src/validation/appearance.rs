//! Validation for the `[appearance]` section.

use dymlink_common::css::{validate_css_property_name, validate_css_value};

use crate::schema::DymlinkConfig;

/// Every style must be a CSS custom property with a sanitizer-approved value.
pub(crate) fn validate_appearance(errors: &mut Vec<String>, config: &DymlinkConfig) {
    for (name, value) in &config.appearance.styles {
        if let Err(e) = validate_css_property_name(name) {
            errors.push(format!("appearance.styles: {e}"));
            continue;
        }
        if let Err(e) = validate_css_value(value) {
            errors.push(format!("appearance.styles.{name}: {e}"));
        }
    }
}
