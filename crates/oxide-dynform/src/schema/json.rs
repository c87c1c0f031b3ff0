//! JSON representation of a schema.

use std::sync::Arc;

use serde::Deserialize;

use super::{FieldKind, FieldSpec, LayoutWidth, OptionSpec, Visibility};
use crate::error::FormError;
use crate::validation::{
    EmailValidator, MaxLengthValidator, MinLengthValidator, RangeValidator, RegexValidator,
    RequiredValidator, UrlValidator, Validator,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct FieldDef {
    name: String,
    label: String,
    #[serde(default, rename = "type")]
    kind: FieldKind,
    #[serde(default)]
    options: Vec<OptionDef>,
    placeholder: Option<String>,
    max_length: Option<usize>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    rules: Vec<RuleDef>,
    #[serde(default)]
    grid_column: LayoutWidth,
    #[serde(default)]
    visible: Visibility,
}

#[derive(Debug, Deserialize)]
struct OptionDef {
    value: String,
    label: String,
    #[serde(default)]
    disabled: bool,
    #[serde(default)]
    visible: Visibility,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum RuleDef {
    Required {
        message: Option<String>,
    },
    MinLength {
        value: usize,
        message: Option<String>,
    },
    MaxLength {
        value: usize,
        message: Option<String>,
    },
    Pattern {
        pattern: String,
        message: Option<String>,
    },
    Email {
        message: Option<String>,
    },
    Url {
        message: Option<String>,
    },
    Range {
        min: Option<f64>,
        max: Option<f64>,
        message: Option<String>,
    },
}

impl RuleDef {
    fn build(self, field: &str) -> Result<Arc<dyn Validator>, FormError> {
        let validator: Arc<dyn Validator> = match self {
            Self::Required { message } => Arc::new(
                message.map_or_else(RequiredValidator::new, RequiredValidator::with_message),
            ),
            Self::MinLength { value, message } => Arc::new(match message {
                Some(m) => MinLengthValidator::with_message(value, m),
                None => MinLengthValidator::new(value),
            }),
            Self::MaxLength { value, message } => Arc::new(match message {
                Some(m) => MaxLengthValidator::with_message(value, m),
                None => MaxLengthValidator::new(value),
            }),
            Self::Pattern { pattern, message } => {
                let message = message.unwrap_or_else(|| "Enter a valid value.".to_string());
                let validator =
                    RegexValidator::new(&pattern, message).map_err(|e| FormError::InvalidRule {
                        field: field.to_string(),
                        message: e.to_string(),
                    })?;
                Arc::new(validator)
            }
            Self::Email { message } => {
                Arc::new(message.map_or_else(EmailValidator::new, EmailValidator::with_message))
            }
            Self::Url { message } => {
                Arc::new(message.map_or_else(UrlValidator::new, UrlValidator::with_message))
            }
            Self::Range { min, max, message } => Arc::new(match message {
                Some(m) => RangeValidator::with_message(min, max, m),
                None => RangeValidator::new(min, max),
            }),
        };
        Ok(validator)
    }
}

impl OptionDef {
    fn into_option(self) -> OptionSpec {
        OptionSpec {
            value: self.value,
            label: self.label,
            disabled: self.disabled,
            visibility: self.visible,
        }
    }
}

impl FieldDef {
    pub(super) fn into_field(self) -> Result<FieldSpec, FormError> {
        let validators = self
            .rules
            .into_iter()
            .map(|rule| rule.build(&self.name))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FieldSpec {
            name: self.name,
            label: self.label,
            kind: self.kind,
            options: self.options.into_iter().map(OptionDef::into_option).collect(),
            placeholder: self.placeholder,
            max_length: self.max_length,
            required: self.required,
            validators,
            layout_width: self.grid_column,
            visibility: self.visible,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::error::FormError;
    use crate::schema::{FieldKind, LayoutWidth, Schema};

    const PRICING: &str = r#"[
        {
            "name": "pricingModel",
            "label": "Pricing Model",
            "type": "dropdown",
            "placeholder": "Placeholder Text",
            "required": true,
            "options": [
                {"value": "impression", "label": "Cost per 1000 impressions"},
                {"value": "click", "label": "Cost per Click"},
                {"value": "bid", "label": "Lowest cost bid", "disabled": true}
            ]
        },
        {
            "name": "clicksPerDay",
            "label": "Total Click per day",
            "type": "number",
            "gridColumn": 4,
            "rules": [{"type": "range", "min": 0}]
        },
        {"name": "notes", "label": "Notes", "type": "textarea", "maxLength": 140, "visible": false}
    ]"#;

    #[test]
    fn test_parse_schema() {
        let schema = Schema::from_json(PRICING).unwrap();
        assert_eq!(schema.len(), 3);

        let pricing = schema.field("pricingModel").unwrap();
        assert_eq!(pricing.kind, FieldKind::Dropdown);
        assert!(pricing.required);
        assert_eq!(pricing.options.len(), 3);
        assert!(pricing.options[2].disabled);

        let clicks = schema.field("clicksPerDay").unwrap();
        assert_eq!(clicks.kind, FieldKind::Number);
        assert_eq!(clicks.layout_width, LayoutWidth::Four);
        assert_eq!(clicks.validators.len(), 1);

        assert!(schema.visible_field("notes").is_none());
        assert_eq!(schema.field("notes").unwrap().max_length, Some(140));
    }

    #[test]
    fn test_missing_kind_defaults_to_text() {
        let schema = Schema::from_json(r#"[{"name": "title", "label": "Title"}]"#).unwrap();
        assert_eq!(schema.fields()[0].kind, FieldKind::Text);
        assert_eq!(schema.fields()[0].layout_width, LayoutWidth::Two);
    }

    #[test]
    fn test_unrecognized_grid_column_falls_back() {
        for column in ["12", "300", "-1", "4.5", "\"wide\"", "null"] {
            let json = format!(r#"[{{"name": "a", "label": "A", "gridColumn": {column}}}]"#);
            let schema = Schema::from_json(&json).unwrap();
            assert_eq!(schema.fields()[0].layout_width, LayoutWidth::Two, "{column}");
            assert_eq!(schema.fields()[0].layout_width.percent(), 20);
        }
        let schema = Schema::from_json(r#"[{"name": "a", "label": "A", "gridColumn": 8}]"#).unwrap();
        assert_eq!(schema.fields()[0].layout_width, LayoutWidth::Eight);
    }

    #[test]
    fn test_option_visibility_from_json() {
        let json = r#"[{
            "name": "plan",
            "label": "Plan",
            "type": "button-group",
            "options": [
                {"value": "free", "label": "Free"},
                {"value": "legacy", "label": "Legacy", "visible": false}
            ]
        }]"#;
        let schema = Schema::from_json(json).unwrap();
        let plan = schema.field("plan").unwrap();
        assert_eq!(plan.options.len(), 2);
        let shown: Vec<_> = plan.visible_options().map(|o| o.value.as_str()).collect();
        assert_eq!(shown, vec!["free"]);
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let json = r#"[{"name": "zip", "label": "Zip", "rules": [{"type": "pattern", "pattern": "("}]}]"#;
        let err = Schema::from_json(json).unwrap_err();
        assert!(matches!(err, FormError::InvalidRule { field, .. } if field == "zip"));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let json = r#"[{"name": "x", "label": "X", "type": "slider"}]"#;
        assert!(matches!(Schema::from_json(json), Err(FormError::Schema(_))));
    }
}
