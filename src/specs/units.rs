// src/specs/units.rs
//
// Venue list from the homepage: every element carrying `data-unitoid`.

use std::collections::HashSet;

use crate::core::html::{Document, Node};
use crate::core::sanitize::normalize_name;
use crate::data::{Discovery, Unit};

const SHOW_ALL: &str = "show all units";

/// Parse the homepage and split the units into kept and excluded.
/// `excluded` holds display names; they are compared after `normalize_name`.
pub fn discover<S: AsRef<str>>(markup: &str, excluded: &[S]) -> Discovery {
    let doc = Document::parse(markup);
    discover_in(doc.root(), excluded)
}

pub fn discover_in<'a, N: Node<'a>, S: AsRef<str>>(root: N, excluded: &[S]) -> Discovery {
    let tokens: HashSet<String> = excluded.iter().map(|n| normalize_name(n.as_ref())).collect();
    let discovered = extract_units(root);

    let mut units = Vec::new();
    let mut skipped = Vec::new();
    for unit in &discovered {
        if tokens.contains(&normalize_name(&unit.name)) {
            logd!("skipping excluded unit {} ({})", unit.name, unit.id);
            skipped.push(unit.name.clone());
        } else {
            units.push(unit.clone());
        }
    }
    logf!("discovered {} units, keeping {} (skipped {})", discovered.len(), units.len(), skipped.len());
    Discovery { discovered, units, skipped }
}

/// Distinct named units in document order. The first named entry for an id wins.
pub fn extract_units<'a, N: Node<'a>>(root: N) -> Vec<Unit> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for el in root.find_all(|n| n.has_attr("data-unitoid")) {
        let Some(raw) = el.get_attr("data-unitoid") else { continue };
        let raw = raw.trim();
        if raw.is_empty() || raw == "-1" {
            continue;
        }
        let Ok(id) = raw.parse::<i64>() else { continue };
        if seen.contains(&id) {
            continue;
        }
        let name = el.text_joined("");
        if name.is_empty() || name.eq_ignore_ascii_case(SHOW_ALL) {
            continue;
        }
        seen.insert(id);
        out.push(Unit { id, name });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::html::synthetic::{el, text, Tree};

    fn unit_link(id: &'static str, name: &'static str) -> crate::core::html::synthetic::Shape {
        el("a", &[("data-unitoid", id)], vec![text(name)])
    }

    #[test]
    fn sentinel_bad_and_duplicate_ids() {
        let tree = Tree::build(el("ul", &[], vec![
            unit_link("-1", "Show All Units"),
            unit_link("", "Blank"),
            unit_link("abc", "Bad Id"),
            unit_link("5", "   "),
            unit_link("5", "Marketplace"),
            unit_link("9", "Show all units"),
            unit_link("12", "The Loop"),
            unit_link("12", "The Loop (again)"),
        ]));
        let units = extract_units(tree.root());
        assert_eq!(units, vec![
            Unit { id: 5, name: s!("Marketplace") },
            Unit { id: 12, name: s!("The Loop") },
        ]);
    }

    #[test]
    fn name_pieces_join_without_separator() {
        let tree = Tree::build(el("div", &[], vec![
            el("a", &[("data-unitoid", "3")], vec![text(" Sazón "), el("span", &[], vec![text(" Grill ")])]),
        ]));
        assert_eq!(extract_units(tree.root())[0].name, "SazónGrill");
    }

    #[test]
    fn exclusion_is_accent_and_case_insensitive() {
        let tree = Tree::build(el("div", &[], vec![
            unit_link("1", "Trinity Café"),
            unit_link("2", "MARKETPLACE"),
            unit_link("3", "Pitchfork's"),
        ]));
        let d = discover_in(tree.root(), &["Trinity Cafe", "Marketplace"]);
        assert_eq!(d.discovered.len(), 3);
        assert_eq!(d.units, vec![Unit { id: 3, name: s!("Pitchfork's") }]);
        assert_eq!(d.skipped, vec![s!("Trinity Café"), s!("MARKETPLACE")]);
    }
}
