//! Field validators and per-field validation.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::schema::{FieldKind, FieldSpec};
use crate::value::{is_empty_value, value_text};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email regex")
});

/// Trait for field validators.
pub trait Validator: Send + Sync {
    /// Validates a value and returns an error message if invalid.
    fn validate(&self, value: &str) -> Result<(), String>;

    /// Whether the validator also runs on empty values. Most checks only
    /// apply once something has been entered.
    fn validates_empty(&self) -> bool {
        false
    }
}

/// Validator that requires a non-empty value.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    message: String,
}

impl RequiredValidator {
    /// Creates a new RequiredValidator with default message.
    pub fn new() -> Self {
        Self {
            message: "This field is required.".to_string(),
        }
    }

    /// Creates a new RequiredValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for RequiredValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for RequiredValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }

    fn validates_empty(&self) -> bool {
        true
    }
}

/// Validator that enforces a maximum number of characters.
#[derive(Debug, Clone)]
pub struct MaxLengthValidator {
    max_length: usize,
    message: String,
}

impl MaxLengthValidator {
    /// Creates a new MaxLengthValidator.
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            message: format!("Ensure this value has at most {max_length} characters."),
        }
    }

    /// Creates a new MaxLengthValidator with custom message.
    pub fn with_message(max_length: usize, message: impl Into<String>) -> Self {
        Self {
            max_length,
            message: message.into(),
        }
    }
}

impl Validator for MaxLengthValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.chars().count() > self.max_length {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }
}

/// Validator that enforces a minimum number of characters.
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
    min_length: usize,
    message: String,
}

impl MinLengthValidator {
    /// Creates a new MinLengthValidator.
    pub fn new(min_length: usize) -> Self {
        Self {
            min_length,
            message: format!("Ensure this value has at least {min_length} characters."),
        }
    }

    /// Creates a new MinLengthValidator with custom message.
    pub fn with_message(min_length: usize, message: impl Into<String>) -> Self {
        Self {
            min_length,
            message: message.into(),
        }
    }
}

impl Validator for MinLengthValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.chars().count() < self.min_length {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }
}

/// Validator for email addresses.
#[derive(Debug, Clone)]
pub struct EmailValidator {
    message: String,
}

impl EmailValidator {
    /// Creates a new EmailValidator with default message.
    pub fn new() -> Self {
        Self {
            message: "Enter a valid email address.".to_string(),
        }
    }

    /// Creates a new EmailValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for EmailValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if EMAIL_RE.is_match(value) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }
}

/// Validator for URL values.
#[derive(Debug, Clone)]
pub struct UrlValidator {
    message: String,
}

impl UrlValidator {
    /// Creates a new UrlValidator with default message.
    pub fn new() -> Self {
        Self {
            message: "Enter a valid URL.".to_string(),
        }
    }

    /// Creates a new UrlValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for UrlValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.starts_with("http://") || value.starts_with("https://") {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }
}

/// Validator using a custom regex pattern.
#[derive(Debug, Clone)]
pub struct RegexValidator {
    pattern: Regex,
    message: String,
}

impl RegexValidator {
    /// Creates a new RegexValidator.
    pub fn new(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            message: message.into(),
        })
    }
}

impl Validator for RegexValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if self.pattern.is_match(value) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }
}

/// Validator for numeric range. Without bounds it only checks that the value
/// parses as a number.
#[derive(Debug, Clone)]
pub struct RangeValidator {
    min: Option<f64>,
    max: Option<f64>,
    message: String,
}

impl RangeValidator {
    /// Creates a new RangeValidator with min and max bounds.
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        let message = match (min, max) {
            (Some(min), Some(max)) => format!("Value must be between {min} and {max}."),
            (Some(min), None) => format!("Value must be at least {min}."),
            (None, Some(max)) => format!("Value must be at most {max}."),
            (None, None) => "Enter a valid number.".to_string(),
        };
        Self { min, max, message }
    }

    /// Creates a new RangeValidator with custom message.
    pub fn with_message(min: Option<f64>, max: Option<f64>, message: impl Into<String>) -> Self {
        Self {
            min,
            max,
            message: message.into(),
        }
    }
}

impl Validator for RangeValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        let num = value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| "Enter a valid number.".to_string())?;

        if let Some(min) = self.min {
            if num < min {
                return Err(self.message.clone());
            }
        }

        if let Some(max) = self.max {
            if num > max {
                return Err(self.message.clone());
            }
        }

        Ok(())
    }
}

/// Validator that only accepts one of a fixed set of values.
#[derive(Debug, Clone)]
pub struct ChoiceValidator {
    choices: Vec<String>,
    message: String,
}

impl ChoiceValidator {
    /// Creates a new ChoiceValidator.
    pub fn new(choices: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
            message: "Select a valid choice.".to_string(),
        }
    }
}

impl Validator for ChoiceValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if self.choices.iter().any(|c| c == value) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }
}

/// Validates one field's value and returns every failure message.
///
/// Empty values only go through the required check and validators that opt
/// into empty values. Everything else also passes the length bound, the checks
/// implied by the field kind, option membership for choice kinds, and the
/// field's own validators.
pub fn validate_field(field: &FieldSpec, value: Option<&Value>) -> Vec<String> {
    let text = value.map(value_text).unwrap_or_default();
    let mut messages = Vec::new();
    let mut check = |validator: &dyn Validator| {
        if let Err(message) = validator.validate(&text) {
            messages.push(message);
        }
    };

    if is_empty_value(value) {
        if field.required {
            check(&RequiredValidator::new());
        }
        for validator in field.validators.iter().filter(|v| v.validates_empty()) {
            check(validator.as_ref());
        }
        return messages;
    }

    if let Some(max_length) = field.max_length {
        check(&MaxLengthValidator::new(max_length));
    }

    match field.kind {
        FieldKind::Email => check(&EmailValidator::new()),
        FieldKind::Url => check(&UrlValidator::new()),
        FieldKind::Number | FieldKind::Range => check(&RangeValidator::new(None, None)),
        FieldKind::Dropdown | FieldKind::ButtonGroup => check(&ChoiceValidator::new(
            field
                .visible_options()
                .filter(|o| !o.disabled)
                .map(|o| o.value.as_str()),
        )),
        _ => {}
    }

    for validator in &field.validators {
        check(validator.as_ref());
    }

    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::OptionSpec;
    use serde_json::json;

    #[test]
    fn test_required_validator() {
        let v = RequiredValidator::new();
        assert!(v.validate("hello").is_ok());
        assert!(v.validate("").is_err());
        assert!(v.validate("   ").is_err());
    }

    #[test]
    fn test_max_length_counts_chars() {
        let v = MaxLengthValidator::new(5);
        assert!(v.validate("hello").is_ok());
        assert!(v.validate("héllo").is_ok());
        assert!(v.validate("hello world").is_err());
    }

    #[test]
    fn test_min_length_validator() {
        let v = MinLengthValidator::new(5);
        assert!(v.validate("hello").is_ok());
        assert!(v.validate("hi").is_err());
    }

    #[test]
    fn test_email_validator() {
        let v = EmailValidator::new();
        assert!(v.validate("user@example.com").is_ok());
        assert!(v.validate("user.name@domain.co.uk").is_ok());
        assert!(v.validate("invalid").is_err());
        assert!(v.validate("@example.com").is_err());
    }

    #[test]
    fn test_regex_validator() {
        let v = RegexValidator::new(r"^\d{4}-\d{2}-\d{2}$", "Enter a valid date.").unwrap();
        assert!(v.validate("2024-01-15").is_ok());
        assert!(v.validate("not a date").is_err());
    }

    #[test]
    fn test_range_validator() {
        let v = RangeValidator::new(Some(0.0), Some(100.0));
        assert!(v.validate("50").is_ok());
        assert!(v.validate("100").is_ok());
        assert!(v.validate("-1").is_err());
        assert!(v.validate("101").is_err());
        assert_eq!(
            RangeValidator::new(None, None).validate("abc"),
            Err("Enter a valid number.".to_string())
        );
    }

    #[test]
    fn test_validate_required_field() {
        let field = FieldSpec::new("name", "Name").required();
        assert_eq!(
            validate_field(&field, None),
            vec!["This field is required.".to_string()]
        );
        assert!(validate_field(&field, Some(&json!("Ada"))).is_empty());
    }

    #[test]
    fn test_optional_field_skips_checks_when_empty() {
        let field = FieldSpec::new("email", "Email").kind(FieldKind::Email);
        assert!(validate_field(&field, Some(&json!(""))).is_empty());
        assert_eq!(validate_field(&field, Some(&json!("nope"))).len(), 1);
    }

    #[test]
    fn test_rule_required_runs_on_empty() {
        let field =
            FieldSpec::new("bio", "Bio").validator(RequiredValidator::with_message("Tell us more."));
        assert_eq!(
            validate_field(&field, Some(&json!(""))),
            vec!["Tell us more.".to_string()]
        );
    }

    #[test]
    fn test_number_kind_accepts_numbers() {
        let field = FieldSpec::new("bidCpm", "BID cpm").kind(FieldKind::Number);
        assert!(validate_field(&field, Some(&json!(0))).is_empty());
        assert!(validate_field(&field, Some(&json!("12.5"))).is_empty());
        assert!(!validate_field(&field, Some(&json!("twelve"))).is_empty());
    }

    #[test]
    fn test_number_kind_rejects_non_finite() {
        let field = FieldSpec::new("clicksPerDay", "Total Click per day").kind(FieldKind::Number);
        for text in ["NaN", "inf", "-infinity", "Infinity"] {
            assert_eq!(
                validate_field(&field, Some(&json!(text))),
                vec!["Enter a valid number.".to_string()],
                "{text}"
            );
        }
    }

    #[test]
    fn test_choice_must_be_enabled_visible_option() {
        let field = FieldSpec::new("plan", "Plan")
            .kind(FieldKind::ButtonGroup)
            .option(OptionSpec::new("free", "Free"))
            .option(OptionSpec::new("pro", "Pro").disabled())
            .option(OptionSpec::new("team", "Team").visible(false));

        assert!(validate_field(&field, Some(&json!("free"))).is_empty());
        assert!(!validate_field(&field, Some(&json!("pro"))).is_empty());
        assert!(!validate_field(&field, Some(&json!("team"))).is_empty());
    }

    #[test]
    fn test_max_length_field() {
        let field = FieldSpec::new("notes", "Notes")
            .kind(FieldKind::Textarea)
            .max_length(3);
        assert!(validate_field(&field, Some(&json!("abc"))).is_empty());
        assert_eq!(validate_field(&field, Some(&json!("abcd"))).len(), 1);
    }
}
