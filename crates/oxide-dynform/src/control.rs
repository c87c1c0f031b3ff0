//! Field-kind dispatch: which control renders a field and how its edits are
//! routed into the change pipeline.

use crate::schema::{FieldKind, FieldSpec};
use crate::widgets::{
    BootstrapButtonGroup, BootstrapInput, BootstrapSelect, BootstrapTextarea, Choice, Widget,
};

/// How a control reports which field changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeScope {
    /// The control passes its field name along with the change.
    Scoped,
    /// The field is resolved from the id of the event target.
    Target,
}

/// The rendering strategy chosen for one field.
#[derive(Debug, Clone)]
pub enum Control {
    /// Single-select populated from the visible options.
    Dropdown(BootstrapSelect),
    /// One exclusive toggle button per visible option.
    ButtonGroup(BootstrapButtonGroup),
    /// Auto-sizing multi-line text.
    Textarea(BootstrapTextarea),
    /// Single-line input whose type is the field kind.
    Input(BootstrapInput),
}

impl Control {
    /// Picks the control for a field.
    pub fn for_field(field: &FieldSpec) -> Self {
        match field.kind {
            FieldKind::Dropdown => Self::Dropdown(
                BootstrapSelect::new(visible_choices(field))
                    .placeholder(field.placeholder.as_deref()),
            ),
            FieldKind::ButtonGroup => Self::ButtonGroup(BootstrapButtonGroup::new(
                visible_choices(field),
            )),
            FieldKind::Textarea => Self::Textarea(
                BootstrapTextarea::new()
                    .placeholder(field.placeholder.as_deref())
                    .max_length(field.max_length),
            ),
            FieldKind::Button
            | FieldKind::Checkbox
            | FieldKind::Color
            | FieldKind::Date
            | FieldKind::DateTimeLocal
            | FieldKind::Email
            | FieldKind::File
            | FieldKind::Hidden
            | FieldKind::Image
            | FieldKind::Month
            | FieldKind::Number
            | FieldKind::Password
            | FieldKind::Radio
            | FieldKind::Range
            | FieldKind::Reset
            | FieldKind::Search
            | FieldKind::Submit
            | FieldKind::Tel
            | FieldKind::Text
            | FieldKind::Time
            | FieldKind::Url
            | FieldKind::Week => Self::Input(
                BootstrapInput::new(field.kind.as_str())
                    .placeholder(field.placeholder.as_deref())
                    .max_length(field.max_length),
            ),
        }
    }

    /// Returns how edits of this control are attributed to a field.
    pub const fn scope(&self) -> ChangeScope {
        match self {
            Self::Dropdown(_) | Self::ButtonGroup(_) => ChangeScope::Scoped,
            Self::Textarea(_) | Self::Input(_) => ChangeScope::Target,
        }
    }

    /// Returns the widget that renders this control.
    pub fn widget(&self) -> &dyn Widget {
        match self {
            Self::Dropdown(w) => w,
            Self::ButtonGroup(w) => w,
            Self::Textarea(w) => w,
            Self::Input(w) => w,
        }
    }
}

fn visible_choices(field: &FieldSpec) -> Vec<Choice> {
    field
        .visible_options()
        .map(|o| Choice {
            value: o.value.clone(),
            label: o.label.clone(),
            disabled: o.disabled,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::OptionSpec;

    #[test]
    fn test_dropdown_filters_options() {
        let field = FieldSpec::new("pricingModel", "Pricing Model")
            .kind(FieldKind::Dropdown)
            .option(OptionSpec::new("click", "Cost per Click"))
            .option(OptionSpec::new("bid", "Lowest cost bid").visible(false));

        let control = Control::for_field(&field);
        assert_eq!(control.scope(), ChangeScope::Scoped);
        match control {
            Control::Dropdown(select) => {
                assert_eq!(select.choices, vec![Choice::new("click", "Cost per Click")]);
            }
            other => panic!("expected dropdown, got {other:?}"),
        }
    }

    #[test]
    fn test_textarea_is_target_scoped() {
        let field = FieldSpec::new("notes", "Notes")
            .kind(FieldKind::Textarea)
            .max_length(10);
        let control = Control::for_field(&field);
        assert_eq!(control.scope(), ChangeScope::Target);
        assert_eq!(control.widget().input_type(), "textarea");
    }

    #[test]
    fn test_other_kinds_become_inputs() {
        for kind in [FieldKind::Number, FieldKind::Email, FieldKind::Week, FieldKind::Text] {
            let control = Control::for_field(&FieldSpec::new("f", "F").kind(kind));
            assert_eq!(control.widget().input_type(), kind.as_str());
            assert_eq!(control.scope(), ChangeScope::Target);
        }
    }

    #[test]
    fn test_choice_kinds_are_scoped() {
        for kind in [FieldKind::Dropdown, FieldKind::ButtonGroup] {
            let control = Control::for_field(&FieldSpec::new("f", "F").kind(kind));
            assert_eq!(control.scope(), ChangeScope::Scoped, "{kind}");
        }
    }

    #[test]
    fn test_empty_choice_field_renders() {
        let field = FieldSpec::new("empty", "Empty").kind(FieldKind::ButtonGroup);
        let html = Control::for_field(&field)
            .widget()
            .render("empty", None, &crate::widgets::WidgetAttrs::new());
        assert!(html.contains(r#"role="group""#));
        assert!(!html.contains("btn-check"));
    }
}
