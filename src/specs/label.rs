// src/specs/label.rs
//
// Nutrition label fragment → `NutritionLabel`.
//
// The label is a stack of `div`s styled by class: a header, the serving block,
// the calorie line, one block per nutrient row, and an ingredients table.
// Anything missing simply leaves the matching field empty.

use crate::core::html::{Document, Node};
use crate::core::sanitize::{
    non_empty, normalize_label_key, normalize_space, parse_amount, parse_digits, parse_percent,
};
use crate::data::{Ingredients, NutrientRow, NutritionLabel};

const HEADER: &str = "cbo_nn_LabelHeader";
const SERVING_BLOCK: &str = "cbo_nn_LabelBottomBorderLabel";
const CALORIE_BLOCK: &str = "cbo_nn_LabelSubHeader";
const NUTRIENT_BLOCKS: [&str; 2] = ["cbo_nn_LabelBorderedSubHeader", "cbo_nn_LabelNoBorderSubHeader"];
const INGREDIENTS: &str = "cbo_nn_Label_IngredientsTable";
const LEFT: &str = "inline-div-left";
const RIGHT: &str = "inline-div-right";

static_regex! {
    static INGREDIENTS_PREFIX = r"(?i)^Ingredients:\s*";
}
static_regex! {
    static INGREDIENT_SEP = r",\s*";
}

pub fn parse_label(markup: &str) -> NutritionLabel {
    let doc = Document::fragment(markup);
    parse_label_in(doc.root())
}

pub fn parse_label_in<'a, N: Node<'a>>(root: N) -> NutritionLabel {
    let label_name = root
        .find_first(|n| n.has_class(HEADER))
        .and_then(|h| non_empty(h.text_content()));

    let servings_per_container = first_under(root, SERVING_BLOCK, |n| n.is_tag("span"))
        .map(|n| normalize_space(&n.raw_text()));
    let serving_size = first_under(root, SERVING_BLOCK, |n| n.has_class(RIGHT))
        .map(|n| normalize_space(&n.raw_text()));

    let calories_raw = first_under(root, CALORIE_BLOCK, |n| n.has_class(RIGHT))
        .map(|n| normalize_space(&n.raw_text()));
    let calories = calories_raw.as_deref().and_then(parse_digits);

    NutritionLabel {
        label_name,
        servings_per_container,
        serving_size,
        calories,
        calories_raw,
        nutrients: parse_nutrients(root),
        ingredients: parse_ingredients(root),
    }
}

/// First element matching `pred` that sits below some element with `class`.
fn first_under<'a, N: Node<'a>>(root: N, class: &str, pred: impl Fn(&N) -> bool) -> Option<N> {
    root.find_first(|n| pred(n) && n.is_below(&root, |a| a.has_class(class)))
}

fn parse_nutrients<'a, N: Node<'a>>(root: N) -> Vec<NutrientRow> {
    let blocks = root.find_all(|n| NUTRIENT_BLOCKS.iter().any(|c| n.has_class(c)));
    let mut rows = Vec::with_capacity(blocks.len());
    for block in blocks {
        let Some(left) = block.find_first(|n| n.has_class(LEFT)) else { continue };
        let (label, amount) = label_and_amount(left);
        if label.is_empty() {
            continue;
        }
        let daily_value_raw = block
            .find_first(|n| n.has_class(RIGHT))
            .map(|r| normalize_space(&r.raw_text()));
        let (quantity, unit) = amount.as_deref().map(parse_amount).unwrap_or((None, None));
        rows.push(NutrientRow {
            key: normalize_label_key(&label),
            label,
            amount,
            quantity,
            unit,
            daily_value_percent: daily_value_raw.as_deref().and_then(parse_percent),
            daily_value_raw,
        });
    }
    rows
}

/// `<span>Total Fat</span><span>8g</span>`, or just loose text with no amount.
fn label_and_amount<'a, N: Node<'a>>(left: N) -> (String, Option<String>) {
    let spans = left.find_all(|n| n.is_tag("span"));
    if let [label, amount, ..] = spans.as_slice() {
        return (normalize_space(&label.raw_text()), Some(normalize_space(&amount.raw_text())));
    }
    (normalize_space(&left.text_content()), None)
}

fn parse_ingredients<'a, N: Node<'a>>(root: N) -> Option<Ingredients> {
    let block = root.find_first(|n| n.has_class(INGREDIENTS))?;
    let text = block.text_content();
    let raw = INGREDIENTS_PREFIX.replace(&text, "").trim().to_string();
    if raw.is_empty() {
        return None;
    }
    let list: Vec<String> = INGREDIENT_SEP
        .split(&raw)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    Some(Ingredients { raw, list: (!list.is_empty()).then_some(list) })
}
