// src/specs/servings.rs

use crate::core::html::Node;
use crate::data::{ServingChoice, ServingOption};

/// Serving-size cell of an item row.
///
/// A `<select>` becomes one option per `<option>` (no options → `None`);
/// otherwise the cell text is a static serving, empty → `None`.
pub fn parse_serving_choices<'a, N: Node<'a>>(cell: Option<N>) -> Option<ServingChoice> {
    let cell = cell?;
    let Some(select) = cell.find_first(|n| n.is_tag("select")) else {
        let value = cell.text_content();
        return (!value.is_empty()).then_some(ServingChoice::Static { value });
    };

    let options: Vec<ServingOption> = select
        .find_all(|n| n.is_tag("option"))
        .into_iter()
        .map(|opt| {
            let raw_value = opt.get_attr("value").map(str::to_string);
            let servings = raw_value
                .as_deref()
                .and_then(|v| v.trim().parse::<f64>().ok())
                .map(|v| v / 100.0);
            ServingOption { label: opt.text_content(), raw_value, servings }
        })
        .collect();

    (!options.is_empty()).then_some(ServingChoice::Selectable { options })
}
