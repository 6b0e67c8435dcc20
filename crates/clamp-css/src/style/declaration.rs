//! [§ 5.3.8 Parse a list of declarations](https://www.w3.org/TR/css-syntax-3/#parse-list-of-declarations)
//!
//! The `style` attribute is the only style source in this workspace, so
//! declarations are read from and written back to it directly.

use clamp_dom::{DomTree, NodeId};

/// [§ 2 Declarations](https://www.w3.org/TR/css-syntax-3/#declaration)
///
/// "Conceptually, declarations are a particular instance of associating a
/// property or descriptor name with a value."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Property name, ASCII lowercase.
    pub name: String,
    /// Value text with surrounding whitespace and `!important` removed.
    pub value: String,
}

/// Parse the contents of a `style` attribute.
///
/// Declarations without a colon or with an empty name are dropped.
#[must_use]
pub fn parse_declarations(style: &str) -> Vec<Declaration> {
    style
        .split(';')
        .filter_map(|part| {
            let (name, value) = part.split_once(':')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            let value = value.trim();
            let value = value
                .strip_suffix("!important")
                .map_or(value, str::trim_end);
            Some(Declaration {
                name: name.to_ascii_lowercase(),
                value: value.to_string(),
            })
        })
        .collect()
}

/// Serialize declarations back into `style` attribute form.
#[must_use]
pub fn serialize_declarations(declarations: &[Declaration]) -> String {
    declarations
        .iter()
        .map(|d| format!("{}: {};", d.name, d.value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// The last declared value of `name` in the element's `style` attribute.
#[must_use]
pub fn inline_style_property(tree: &DomTree, element: NodeId, name: &str) -> Option<String> {
    let style = tree.attribute(element, "style")?;
    parse_declarations(style)
        .into_iter()
        .rev()
        .find(|d| d.name.eq_ignore_ascii_case(name))
        .map(|d| d.value)
}

/// [CSSOM § 6.6.1 setProperty()](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-setproperty)
///
/// "Otherwise, if property is a case-sensitive match for a property name of
/// a CSS declaration in the declarations, let old value be its value...
/// set the CSS declaration value to component value list. Otherwise, append
/// a new CSS declaration."
///
/// Writes `name: value` into the element's `style` attribute, replacing an
/// existing declaration of the same property in place. Returns false if
/// `element` is not an element.
pub fn set_style_property(tree: &mut DomTree, element: NodeId, name: &str, value: &str) -> bool {
    if tree.as_element(element).is_none() {
        return false;
    }
    let name = name.to_ascii_lowercase();
    let mut declarations = tree
        .attribute(element, "style")
        .map(parse_declarations)
        .unwrap_or_default();

    // Later duplicates would shadow the new value, so they go.
    let mut replaced = false;
    declarations.retain_mut(|d| {
        if d.name != name {
            return true;
        }
        if replaced {
            return false;
        }
        value.clone_into(&mut d.value);
        replaced = true;
        true
    });
    if !replaced {
        declarations.push(Declaration {
            name,
            value: value.to_string(),
        });
    }

    tree.set_attribute(element, "style", &serialize_declarations(&declarations))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_declarations() {
        let decls = parse_declarations("Font-Size: 12px ; line-height:1.5 !important;;bogus; :x");
        assert_eq!(
            decls,
            vec![
                Declaration {
                    name: "font-size".to_string(),
                    value: "12px".to_string()
                },
                Declaration {
                    name: "line-height".to_string(),
                    value: "1.5".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_set_style_property_replaces_and_appends() {
        let mut tree = DomTree::new();
        let div = tree.alloc_element("div");
        tree.append_child(NodeId::ROOT, div);
        assert!(tree.set_attribute(div, "style", "width: 10px; height: 5px; width: 20px"));

        assert!(set_style_property(&mut tree, div, "width", "30px"));
        assert!(set_style_property(&mut tree, div, "overflow", "hidden"));

        assert_eq!(
            tree.attribute(div, "style"),
            Some("width: 30px; height: 5px; overflow: hidden;")
        );
        assert_eq!(
            inline_style_property(&tree, div, "WIDTH").as_deref(),
            Some("30px")
        );
    }

    #[test]
    fn test_set_style_property_on_text_fails() {
        let mut tree = DomTree::new();
        let text = tree.alloc_text("x");
        assert!(!set_style_property(&mut tree, text, "width", "1px"));
    }
}
