//! Bootstrap 5 form widgets.

use super::{class_with, html_escape, Choice, Widget, WidgetAttrs};

/// Bootstrap 5 single-line input. The `type` attribute is passed through.
#[derive(Debug, Clone)]
pub struct BootstrapInput {
    /// The HTML input type (text, email, number, date, ...).
    pub input_type: String,
    /// Placeholder text.
    pub placeholder: Option<String>,
    /// Maximum number of characters.
    pub max_length: Option<usize>,
}

impl Default for BootstrapInput {
    fn default() -> Self {
        Self {
            input_type: "text".to_string(),
            placeholder: None,
            max_length: None,
        }
    }
}

impl BootstrapInput {
    /// Creates an input of the given type.
    pub fn new(input_type: impl Into<String>) -> Self {
        Self {
            input_type: input_type.into(),
            ..Default::default()
        }
    }

    /// Sets the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: Option<impl Into<String>>) -> Self {
        self.placeholder = text.map(Into::into);
        self
    }

    /// Sets the maximum length.
    #[must_use]
    pub fn max_length(mut self, max_length: Option<usize>) -> Self {
        self.max_length = max_length;
        self
    }

    fn base_class(&self) -> &'static str {
        match self.input_type.as_str() {
            "checkbox" | "radio" => "form-check-input",
            "range" => "form-range",
            "color" => "form-control form-control-color",
            _ => "form-control",
        }
    }
}

impl Widget for BootstrapInput {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let value_attr = value
            .map(|v| format!(r#" value="{}""#, html_escape(v)))
            .unwrap_or_default();

        let placeholder_attr = self
            .placeholder
            .as_ref()
            .map(|p| format!(r#" placeholder="{}""#, html_escape(p)))
            .unwrap_or_default();

        let max_length_attr = self
            .max_length
            .map(|n| format!(r#" maxlength="{n}""#))
            .unwrap_or_default();

        let class = class_with(self.base_class(), attrs);
        let extra_attrs = attrs.to_html_except(&["class", "id"]);

        format!(
            r#"<input type="{}" class="{class}" id="{}" name="{}"{value_attr}{placeholder_attr}{max_length_attr}{extra_attrs}>"#,
            html_escape(&self.input_type),
            html_escape(name),
            html_escape(name),
        )
    }

    fn input_type(&self) -> &str {
        &self.input_type
    }
}

/// Bootstrap 5 textarea that grows with its content.
#[derive(Debug, Clone)]
pub struct BootstrapTextarea {
    /// Initial number of rows.
    pub rows: usize,
    /// Placeholder text.
    pub placeholder: Option<String>,
    /// Maximum number of characters.
    pub max_length: Option<usize>,
    /// Whether the control resizes itself to fit its content.
    pub auto_size: bool,
}

impl Default for BootstrapTextarea {
    fn default() -> Self {
        Self {
            rows: 1,
            placeholder: None,
            max_length: None,
            auto_size: true,
        }
    }
}

impl BootstrapTextarea {
    /// Creates an auto-sizing textarea.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: Option<impl Into<String>>) -> Self {
        self.placeholder = text.map(Into::into);
        self
    }

    /// Sets the maximum length.
    #[must_use]
    pub fn max_length(mut self, max_length: Option<usize>) -> Self {
        self.max_length = max_length;
        self
    }
}

impl Widget for BootstrapTextarea {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let content = value.map(html_escape).unwrap_or_default();

        let placeholder_attr = self
            .placeholder
            .as_ref()
            .map(|p| format!(r#" placeholder="{}""#, html_escape(p)))
            .unwrap_or_default();

        let max_length_attr = self
            .max_length
            .map(|n| format!(r#" maxlength="{n}""#))
            .unwrap_or_default();

        let auto_size_attr = if self.auto_size {
            r#" data-autosize="true""#
        } else {
            ""
        };

        let class = class_with("form-control", attrs);
        let extra_attrs = attrs.to_html_except(&["class", "id"]);

        format!(
            r#"<textarea class="{class}" id="{}" name="{}" rows="{}"{placeholder_attr}{max_length_attr}{auto_size_attr}{extra_attrs}>{content}</textarea>"#,
            html_escape(name),
            html_escape(name),
            self.rows,
        )
    }

    fn input_type(&self) -> &str {
        "textarea"
    }
}

/// Bootstrap 5 single-select.
#[derive(Debug, Clone, Default)]
pub struct BootstrapSelect {
    /// Available choices.
    pub choices: Vec<Choice>,
    /// Label of the blank entry shown while nothing is selected.
    pub placeholder: Option<String>,
}

impl BootstrapSelect {
    /// Creates a new select with the given choices.
    pub fn new(choices: Vec<Choice>) -> Self {
        Self {
            choices,
            placeholder: None,
        }
    }

    /// Sets the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: Option<impl Into<String>>) -> Self {
        self.placeholder = text.map(Into::into);
        self
    }
}

impl Widget for BootstrapSelect {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let class = class_with("form-select", attrs);
        let extra_attrs = attrs.to_html_except(&["class", "id"]);
        let current = value.filter(|v| !v.is_empty());

        let mut options = String::new();

        let blank_selected = if current.is_none() { " selected" } else { "" };
        options.push_str(&format!(
            r#"<option value="" disabled hidden{blank_selected}>{}</option>"#,
            html_escape(self.placeholder.as_deref().unwrap_or(""))
        ));

        for choice in &self.choices {
            let selected_attr = if current == Some(choice.value.as_str()) {
                " selected"
            } else {
                ""
            };
            let disabled_attr = if choice.disabled { " disabled" } else { "" };
            options.push_str(&format!(
                r#"<option value="{}"{selected_attr}{disabled_attr}>{}</option>"#,
                html_escape(&choice.value),
                html_escape(&choice.label)
            ));
        }

        format!(
            r#"<select class="{class}" id="{}" name="{}"{extra_attrs}>{options}</select>"#,
            html_escape(name),
            html_escape(name),
        )
    }

    fn input_type(&self) -> &str {
        "select"
    }
}

/// Bootstrap 5 group of exclusive toggle buttons.
#[derive(Debug, Clone, Default)]
pub struct BootstrapButtonGroup {
    /// Available choices, one button each.
    pub choices: Vec<Choice>,
}

impl BootstrapButtonGroup {
    /// Creates a new button group with the given choices.
    pub fn new(choices: Vec<Choice>) -> Self {
        Self { choices }
    }
}

impl Widget for BootstrapButtonGroup {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let class = class_with("btn-group d-flex", attrs);
        let name = html_escape(name);
        let extra_attrs = attrs.to_html_except(&["class", "id"]);
        let mut buttons = String::new();

        for (i, choice) in self.choices.iter().enumerate() {
            let id = format!("{name}_{i}");
            let checked_attr = if value == Some(choice.value.as_str()) {
                " checked"
            } else {
                ""
            };
            let disabled_attr = if choice.disabled { " disabled" } else { "" };

            buttons.push_str(&format!(
                r#"<input type="radio" class="btn-check" id="{id}" name="{name}" value="{}" autocomplete="off"{checked_attr}{disabled_attr}{extra_attrs}><label class="btn btn-outline-primary flex-fill" for="{id}">{}</label>"#,
                html_escape(&choice.value),
                html_escape(&choice.label)
            ));
        }

        format!(r#"<div class="{class}" id="{name}" role="group">{buttons}</div>"#)
    }

    fn input_type(&self) -> &str {
        "radio"
    }
}
