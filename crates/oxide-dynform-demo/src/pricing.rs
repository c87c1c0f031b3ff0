//! Built-in sample form: pricing model with click-only follow-up fields.

use oxide_dynform::{FieldKind, FieldSpec, LayoutWidth, Schema, Values};

/// Values the sample form starts with.
pub fn initial_values() -> Values {
    Values::new()
        .with("pricingModel", "click")
        .with("clicksPerDay", 190)
        .with("bidCpm", 0)
}

/// Derives the sample schema from the current values.
pub fn schema(values: &Values) -> Schema {
    let model = values.get_str("pricingModel").map(str::to_owned);
    let per_click = move || model.as_deref() == Some("click");

    let fields = vec![
        FieldSpec::new("pricingModel", "Pricing Model")
            .kind(FieldKind::Dropdown)
            .placeholder("Placeholder Text")
            .required()
            .layout_width(LayoutWidth::Ten)
            .options([
                ("impression", "Cost per 1000 impressions"),
                ("click", "Cost per Click"),
                ("bid", "Lowest cost bid"),
            ]),
        FieldSpec::new("clicksPerDay", "Total Click per day")
            .kind(FieldKind::Number)
            .layout_width(LayoutWidth::Four)
            .visible_when(per_click.clone()),
        FieldSpec::new("bidCpm", "BID cpm")
            .kind(FieldKind::Number)
            .layout_width(LayoutWidth::Four)
            .visible_when(per_click),
    ];

    // Names are fixed above, so this cannot collide.
    Schema::new(fields).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_fields_follow_model() {
        let click = schema(&initial_values());
        assert_eq!(click.visible_fields().count(), 3);

        let bid = schema(&initial_values().with("pricingModel", "bid"));
        let names: Vec<_> = bid.visible_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["pricingModel"]);
    }

    #[test]
    fn test_dropdown_options() {
        let schema = schema(&Values::new());
        let pricing = schema.field("pricingModel").unwrap();
        let values: Vec<_> = pricing.visible_options().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["impression", "click", "bid"]);
    }
}
