// src/core/html.rs
//
// Read-only queries over a parsed HTML tree.
//
// The extractors in `specs` only ever talk to `Node`, so they work on any tree
// that can answer "tag, attribute, children, parent". Production uses scraper's
// `ElementRef`; the unit tests build small trees by hand.

use scraper::{ElementRef, Html};

/// One child of an element: another element or a run of text.
#[derive(Debug, Clone, Copy)]
pub enum Child<'a, N> {
    Element(N),
    Text(&'a str),
}

pub trait Node<'a>: Copy + 'a {
    /// Lowercase tag name.
    fn tag_name(&self) -> &'a str;
    fn get_attr(&self, name: &str) -> Option<&'a str>;
    fn child_nodes(&self) -> Vec<Child<'a, Self>>;
    fn parent_node(&self) -> Option<Self>;
    fn same_node(&self, other: &Self) -> bool;

    fn is_tag(&self, tag: &str) -> bool {
        self.tag_name().eq_ignore_ascii_case(tag)
    }

    fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_some()
    }

    fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|c| c.split_whitespace().any(|k| k == class))
    }

    /// Every element below `self`, document order, `self` excluded.
    fn descendant_elements(&self) -> Vec<Self> {
        let mut out = Vec::new();
        let mut stack: Vec<Self> = self.child_elements();
        stack.reverse();
        while let Some(node) = stack.pop() {
            out.push(node);
            let mut kids = node.child_elements();
            kids.reverse();
            stack.extend(kids);
        }
        out
    }

    fn child_elements(&self) -> Vec<Self> {
        self.child_nodes()
            .into_iter()
            .filter_map(|c| match c {
                Child::Element(e) => Some(e),
                Child::Text(_) => None,
            })
            .collect()
    }

    fn find_first(&self, pred: impl Fn(&Self) -> bool) -> Option<Self> {
        self.descendant_elements().into_iter().find(|n| pred(n))
    }

    fn find_all(&self, pred: impl Fn(&Self) -> bool) -> Vec<Self> {
        self.descendant_elements().into_iter().filter(|n| pred(n)).collect()
    }

    /// Closest ancestor with the given tag, `self` excluded.
    fn nearest(&self, tag: &str) -> Option<Self> {
        let mut cur = self.parent_node();
        while let Some(node) = cur {
            if node.is_tag(tag) {
                return Some(node);
            }
            cur = node.parent_node();
        }
        None
    }

    /// True when some ancestor up to (not including) `root` satisfies `pred`.
    fn is_below(&self, root: &Self, pred: impl Fn(&Self) -> bool) -> bool {
        let mut cur = self.parent_node();
        while let Some(node) = cur {
            if node.same_node(root) {
                return false;
            }
            if pred(&node) {
                return true;
            }
            cur = node.parent_node();
        }
        false
    }

    /// Raw text runs below `self`, in order. Script and style bodies are skipped.
    fn text_runs(&self) -> Vec<&'a str> {
        let mut out = Vec::new();
        collect_text(*self, &mut out);
        out
    }

    fn raw_text(&self) -> String {
        self.text_runs().concat()
    }

    /// Text runs, each trimmed, empties dropped, joined by `sep`.
    fn text_joined(&self, sep: &str) -> String {
        let pieces: Vec<&str> = self
            .text_runs()
            .into_iter()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();
        pieces.join(sep)
    }

    fn text_content(&self) -> String {
        self.text_joined(" ")
    }
}

fn collect_text<'a, N: Node<'a>>(node: N, out: &mut Vec<&'a str>) {
    if node.is_tag("script") || node.is_tag("style") {
        return;
    }
    for child in node.child_nodes() {
        match child {
            Child::Text(t) => out.push(t),
            Child::Element(e) => collect_text(e, out),
        }
    }
}

impl<'a> Node<'a> for ElementRef<'a> {
    fn tag_name(&self) -> &'a str {
        self.value().name()
    }

    fn get_attr(&self, name: &str) -> Option<&'a str> {
        self.value().attr(name)
    }

    fn child_nodes(&self) -> Vec<Child<'a, Self>> {
        self.children()
            .filter_map(|n| match n.value() {
                scraper::node::Node::Text(t) => Some(Child::Text(&**t)),
                scraper::node::Node::Element(_) => ElementRef::wrap(n).map(Child::Element),
                _ => None,
            })
            .collect()
    }

    fn parent_node(&self) -> Option<Self> {
        self.parent().and_then(ElementRef::wrap)
    }

    fn same_node(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

/// Owned parse result. Borrow nodes from it with [`Document::root`].
pub struct Document(Html);

impl Document {
    pub fn parse(markup: &str) -> Self {
        Self(Html::parse_document(markup))
    }

    /// For panel and label snippets that carry no `<html>` wrapper.
    pub fn fragment(markup: &str) -> Self {
        Self(Html::parse_fragment(markup))
    }

    pub fn root(&self) -> ElementRef<'_> {
        self.0.root_element()
    }
}

#[cfg(test)]
pub(crate) mod synthetic {
    //! Hand-built trees for exercising extractors without an HTML parser.

    use super::{Child, Node};

    pub enum Shape {
        El(&'static str, Vec<(&'static str, &'static str)>, Vec<Shape>),
        Text(&'static str),
    }

    pub fn el(tag: &'static str, attrs: &[(&'static str, &'static str)], kids: Vec<Shape>) -> Shape {
        Shape::El(tag, attrs.to_vec(), kids)
    }

    pub fn text(t: &'static str) -> Shape {
        Shape::Text(t)
    }

    enum Slot {
        El { tag: &'static str, attrs: Vec<(&'static str, &'static str)>, kids: Vec<usize>, parent: Option<usize> },
        Text(&'static str),
    }

    pub struct Tree {
        slots: Vec<Slot>,
    }

    impl Tree {
        pub fn build(root: Shape) -> Self {
            let mut tree = Tree { slots: Vec::new() };
            tree.push(root, None);
            tree
        }

        fn push(&mut self, shape: Shape, parent: Option<usize>) -> usize {
            let ix = self.slots.len();
            match shape {
                Shape::Text(t) => self.slots.push(Slot::Text(t)),
                Shape::El(tag, attrs, kids) => {
                    self.slots.push(Slot::El { tag, attrs, kids: Vec::new(), parent });
                    let ids: Vec<usize> = kids.into_iter().map(|k| self.push(k, Some(ix))).collect();
                    if let Slot::El { kids, .. } = &mut self.slots[ix] {
                        *kids = ids;
                    }
                }
            }
            ix
        }

        pub fn root(&self) -> SynRef<'_> {
            SynRef { tree: self, ix: 0 }
        }
    }

    #[derive(Clone, Copy)]
    pub struct SynRef<'t> {
        tree: &'t Tree,
        ix: usize,
    }

    impl<'t> SynRef<'t> {
        fn slot(&self) -> &'t Slot {
            &self.tree.slots[self.ix]
        }
    }

    impl<'t> Node<'t> for SynRef<'t> {
        fn tag_name(&self) -> &'t str {
            match self.slot() {
                Slot::El { tag, .. } => *tag,
                Slot::Text(_) => "",
            }
        }

        fn get_attr(&self, name: &str) -> Option<&'t str> {
            match self.slot() {
                Slot::El { attrs, .. } => attrs.iter().find(|(k, _)| *k == name).map(|(_, v)| *v),
                Slot::Text(_) => None,
            }
        }

        fn child_nodes(&self) -> Vec<Child<'t, Self>> {
            let Slot::El { kids, .. } = self.slot() else { return Vec::new() };
            kids.iter()
                .map(|&ix| match &self.tree.slots[ix] {
                    Slot::Text(t) => Child::Text(*t),
                    Slot::El { .. } => Child::Element(SynRef { tree: self.tree, ix }),
                })
                .collect()
        }

        fn parent_node(&self) -> Option<Self> {
            match self.slot() {
                Slot::El { parent, .. } => parent.map(|ix| SynRef { tree: self.tree, ix }),
                Slot::Text(_) => None,
            }
        }

        fn same_node(&self, other: &Self) -> bool {
            std::ptr::eq(self.tree, other.tree) && self.ix == other.ix
        }
    }
}
