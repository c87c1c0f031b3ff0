//! Bootstrap 5 markup for fields and whole forms.

use ironhtml::html;
use ironhtml::typed::Element;
use ironhtml_elements::Div;
use serde_json::Value;

use crate::control::Control;
use crate::error::ValidationErrors;
use crate::schema::{FieldSpec, Schema};
use crate::value::{value_text, Values};
use crate::widgets::WidgetAttrs;

/// Label of the submit button when none is configured.
pub const DEFAULT_SUBMIT_TEXT: &str = "Submit";

/// Renders one field: label, control, inline errors, inside a wrapper sized
/// by the field's layout width.
pub fn render_field(field: &FieldSpec, value: Option<&Value>, errors: &[String]) -> String {
    let id = field.name.clone();
    let required_marker = if field.required { " *" } else { "" };
    let label_text = format!("{}{}", field.label, required_marker);

    let mut attrs = WidgetAttrs::new();
    if !errors.is_empty() {
        attrs.set("class", "is-invalid");
        attrs.set("aria-invalid", "true");
    }
    if field.required {
        attrs.set("required", "required");
    }

    let text = value.filter(|v| !v.is_null()).map(value_text);
    let control = Control::for_field(field);
    let widget_html = control.widget().render(&id, text.as_deref(), &attrs);

    let label_el = html! {
        label.for_(#id).class("form-label") { #label_text }
    };
    let style = field.layout_width.style();

    html! { div.class("mb-3") }
        .attr("style", &style)
        .attr("data-kind", field.kind.as_str())
        .raw(label_el.render())
        .raw(&widget_html)
        .children(errors, |error, div: Element<Div>| {
            div.class("invalid-feedback d-block").text(error)
        })
        .render()
}

/// Renders every visible field of a schema followed by the submit button.
pub fn render_form(
    schema: &Schema,
    values: &Values,
    errors: &ValidationErrors,
    submit_text: &str,
) -> String {
    let mut form = html! { form.class("dynform") }.attr("autocomplete", "on");

    for field in schema.visible_fields() {
        let field_errors = errors.get(&field.name).map_or(&[][..], Vec::as_slice);
        let field_html = render_field(field, values.get(&field.name), field_errors);
        form = form.child::<Div, _>(|d| d.raw(&field_html));
    }

    let submit_text = submit_text.to_string();
    form = form.child::<Div, _>(|d| {
        let btn = html! {
            button.type_("submit").class("btn btn-primary") { #submit_text }
        };
        d.class("mb-3").raw(btn.render())
    });

    form.render()
}
