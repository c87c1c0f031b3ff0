//! Form schema: fields, options, kinds and layout widths.

mod json;
mod visibility;

pub use visibility::{filter_visible, is_rendered, Conditional, Visibility};

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::{FormError, Result};
use crate::validation::Validator;

/// The closed set of input kinds a field can have.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    Button,
    Textarea,
    ButtonGroup,
    Checkbox,
    Color,
    Date,
    #[serde(rename = "datetime-local")]
    DateTimeLocal,
    Email,
    File,
    Hidden,
    Image,
    Month,
    Number,
    Password,
    Radio,
    Range,
    Reset,
    Search,
    Submit,
    Tel,
    #[default]
    Text,
    Time,
    Url,
    Dropdown,
    Week,
}

impl FieldKind {
    /// Returns the kind's wire name, which doubles as the `type` attribute
    /// of single-line inputs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Textarea => "textarea",
            Self::ButtonGroup => "button-group",
            Self::Checkbox => "checkbox",
            Self::Color => "color",
            Self::Date => "date",
            Self::DateTimeLocal => "datetime-local",
            Self::Email => "email",
            Self::File => "file",
            Self::Hidden => "hidden",
            Self::Image => "image",
            Self::Month => "month",
            Self::Number => "number",
            Self::Password => "password",
            Self::Radio => "radio",
            Self::Range => "range",
            Self::Reset => "reset",
            Self::Search => "search",
            Self::Submit => "submit",
            Self::Tel => "tel",
            Self::Text => "text",
            Self::Time => "time",
            Self::Url => "url",
            Self::Dropdown => "dropdown",
            Self::Week => "week",
        }
    }

    /// Returns whether the kind picks its value from `options`.
    pub const fn is_choice(self) -> bool {
        matches!(self, Self::Dropdown | Self::ButtonGroup)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative width of a field's wrapper, on a ten-column grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum LayoutWidth {
    #[default]
    Two,
    Four,
    Six,
    Eight,
    Ten,
}

impl LayoutWidth {
    /// Maps a column count to a width. Unrecognized counts fall back to the
    /// smallest width.
    pub const fn from_columns(columns: u8) -> Self {
        match columns {
            4 => Self::Four,
            6 => Self::Six,
            8 => Self::Eight,
            10 => Self::Ten,
            _ => Self::Two,
        }
    }

    /// Returns the width as a percentage of the form.
    pub const fn percent(self) -> u8 {
        match self {
            Self::Two => 20,
            Self::Four => 40,
            Self::Six => 60,
            Self::Eight => 80,
            Self::Ten => 100,
        }
    }

    /// Returns the inline style for the field wrapper.
    pub fn style(self) -> String {
        format!("width: {}%", self.percent())
    }
}

impl From<u8> for LayoutWidth {
    fn from(columns: u8) -> Self {
        Self::from_columns(columns)
    }
}

impl From<serde_json::Value> for LayoutWidth {
    fn from(value: serde_json::Value) -> Self {
        value
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .map_or(Self::Two, Self::from_columns)
    }
}

/// Maps an optional column count to a width percentage.
pub fn width_percent(columns: Option<u8>) -> u8 {
    columns.map_or(LayoutWidth::default(), LayoutWidth::from).percent()
}

/// One selectable choice of a dropdown or button group.
#[derive(Debug, Clone)]
pub struct OptionSpec {
    /// Submitted value.
    pub value: String,
    /// Display label.
    pub label: String,
    /// Whether the option can be picked.
    pub disabled: bool,
    /// Whether the option is rendered.
    pub visibility: Visibility,
}

impl OptionSpec {
    /// Creates an enabled, always visible option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
            visibility: Visibility::Always,
        }
    }

    /// Disables the option.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Sets the visibility condition.
    #[must_use]
    pub fn visible(mut self, visibility: impl Into<Visibility>) -> Self {
        self.visibility = visibility.into();
        self
    }

    /// Shows the option only while `predicate` holds.
    #[must_use]
    pub fn visible_when(self, predicate: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.visible(Visibility::when(predicate))
    }
}

impl Conditional for OptionSpec {
    fn visibility(&self) -> &Visibility {
        &self.visibility
    }
}

/// Definition of one form field.
#[derive(Clone)]
pub struct FieldSpec {
    /// Field name, unique within a schema. Also the control's id.
    pub name: String,
    /// Field label.
    pub label: String,
    /// Input kind.
    pub kind: FieldKind,
    /// Options of choice kinds.
    pub options: Vec<OptionSpec>,
    /// Placeholder text.
    pub placeholder: Option<String>,
    /// Maximum number of characters.
    pub max_length: Option<usize>,
    /// Whether a value must be provided.
    pub required: bool,
    /// Validation rules.
    pub validators: Vec<Arc<dyn Validator>>,
    /// Wrapper width.
    pub layout_width: LayoutWidth,
    /// Whether the field is rendered.
    pub visibility: Visibility,
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("options", &self.options)
            .field("required", &self.required)
            .field("max_length", &self.max_length)
            .field("layout_width", &self.layout_width)
            .field("visibility", &self.visibility)
            .finish_non_exhaustive()
    }
}

impl FieldSpec {
    /// Creates a text field.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind: FieldKind::Text,
            options: Vec::new(),
            placeholder: None,
            max_length: None,
            required: false,
            validators: Vec::new(),
            layout_width: LayoutWidth::default(),
            visibility: Visibility::Always,
        }
    }

    /// Sets the input kind.
    #[must_use]
    pub fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    /// Appends an option.
    #[must_use]
    pub fn option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    /// Appends options from `(value, label)` pairs.
    #[must_use]
    pub fn options<'a>(mut self, choices: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        self.options
            .extend(choices.into_iter().map(|(v, l)| OptionSpec::new(v, l)));
        self
    }

    /// Sets the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Sets the maximum length.
    #[must_use]
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Makes the field required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Adds a validator.
    #[must_use]
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Sets the wrapper width.
    #[must_use]
    pub fn layout_width(mut self, width: LayoutWidth) -> Self {
        self.layout_width = width;
        self
    }

    /// Sets the visibility condition.
    #[must_use]
    pub fn visible(mut self, visibility: impl Into<Visibility>) -> Self {
        self.visibility = visibility.into();
        self
    }

    /// Shows the field only while `predicate` holds.
    #[must_use]
    pub fn visible_when(self, predicate: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.visible(Visibility::when(predicate))
    }

    /// Iterates over the options that should be rendered.
    pub fn visible_options(&self) -> impl Iterator<Item = &OptionSpec> {
        filter_visible(&self.options)
    }
}

impl Conditional for FieldSpec {
    fn visibility(&self) -> &Visibility {
        &self.visibility
    }
}

/// An ordered list of uniquely named fields.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    /// Creates a schema, rejecting duplicate field names.
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self> {
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(FormError::DuplicateField(field.name.clone()));
            }
        }
        Ok(Self { fields })
    }

    /// Parses a schema from a JSON array of field objects.
    pub fn from_json(json: &str) -> Result<Self> {
        let defs: Vec<json::FieldDef> = serde_json::from_str(json)?;
        let fields = defs
            .into_iter()
            .map(json::FieldDef::into_field)
            .collect::<Result<Vec<_>>>()?;
        Self::new(fields)
    }

    /// Returns every field, visible or not.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Iterates over the fields that should be rendered.
    pub fn visible_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        filter_visible(&self.fields)
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Looks up a field by name if it is rendered.
    pub fn visible_field(&self, name: &str) -> Option<&FieldSpec> {
        self.field(name).filter(|f| is_rendered(*f))
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_mapping() {
        assert_eq!(width_percent(Some(2)), 20);
        assert_eq!(width_percent(Some(4)), 40);
        assert_eq!(width_percent(Some(6)), 60);
        assert_eq!(width_percent(Some(8)), 80);
        assert_eq!(width_percent(Some(10)), 100);
        assert_eq!(width_percent(None), 20);
        assert_eq!(width_percent(Some(7)), 20);
        assert_eq!(LayoutWidth::Six.style(), "width: 60%");
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = Schema::new(vec![
            FieldSpec::new("email", "Email"),
            FieldSpec::new("email", "Email again"),
        ])
        .unwrap_err();
        assert!(matches!(err, FormError::DuplicateField(name) if name == "email"));
    }

    #[test]
    fn test_visible_fields_and_options() {
        let schema = Schema::new(vec![
            FieldSpec::new("a", "A"),
            FieldSpec::new("b", "B").visible(false),
            FieldSpec::new("c", "C")
                .kind(FieldKind::Dropdown)
                .option(OptionSpec::new("x", "X"))
                .option(OptionSpec::new("y", "Y").visible_when(|| false)),
        ])
        .unwrap();

        let names: Vec<_> = schema.visible_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
        assert!(schema.visible_field("b").is_none());
        assert!(schema.field("b").is_some());

        let c = schema.visible_field("c").unwrap();
        let values: Vec<_> = c.visible_options().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["x"]);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(FieldKind::default(), FieldKind::Text);
        assert_eq!(FieldKind::DateTimeLocal.as_str(), "datetime-local");
        assert!(FieldKind::ButtonGroup.is_choice());
        assert!(!FieldKind::Textarea.is_choice());
    }
}
