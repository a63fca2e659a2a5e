//! Canonical decoded structure shared by the JSON and XML decoders

use serde_json::{Map, Value};

/// Ordered `(name, value)` attribute list of an XML element
pub type Attributes = Vec<(String, String)>;

/// Format-agnostic decoded response
///
/// JSON objects and XML elements with children become [`Node::Map`];
/// JSON arrays and repeated sibling elements become [`Node::List`];
/// scalars and text-only elements become [`Node::Leaf`]. A text-only
/// element that carries attributes is a [`Node::Attributed`].
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf(String),
    Attributed { text: String, attrs: Attributes },
    Map {
        attrs: Attributes,
        entries: Vec<(String, Node)>,
    },
    List(Vec<Node>),
}

impl Default for Node {
    fn default() -> Self {
        Node::empty()
    }
}

impl Node {
    /// Mapping with no entries
    pub fn empty() -> Self {
        Node::Map {
            attrs: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Mapping built from `entries`, without attributes
    pub fn map(entries: Vec<(String, Node)>) -> Self {
        Node::Map {
            attrs: Vec::new(),
            entries,
        }
    }

    /// True for an empty mapping or list
    ///
    /// Leaves are never empty, even when their text is.
    pub fn is_empty(&self) -> bool {
        match self {
            Node::Map { attrs, entries } => attrs.is_empty() && entries.is_empty(),
            Node::List(items) => items.is_empty(),
            Node::Leaf(_) | Node::Attributed { .. } => false,
        }
    }

    /// Child entry named `key`
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Map { entries, .. } => entries
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, node)| node),
            _ => None,
        }
    }

    /// Attribute named `key`
    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            Node::Map { attrs, .. } | Node::Attributed { attrs, .. } => attrs
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    /// Text content of a scalar node
    pub fn text(&self) -> Option<&str> {
        match self {
            Node::Leaf(text) | Node::Attributed { text, .. } => Some(text.as_str()),
            Node::Map { .. } | Node::List(_) => None,
        }
    }

    /// Scalar value of field `key`, read from a child entry or else an attribute
    pub fn field(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(node) => node.text(),
            None => self.attr(key),
        }
    }

    /// Elements of a sequence
    ///
    /// A list yields its items. A mapping yields its entry values, with
    /// list values flattened in place, so an XML wrapper such as
    /// `<videos><video/><video/></videos>` reads the same as a JSON array.
    /// Scalars yield nothing.
    pub fn items(&self) -> Vec<&Node> {
        match self {
            Node::List(items) => items.iter().collect(),
            Node::Map { entries, .. } => entries
                .iter()
                .flat_map(|(_, node)| match node {
                    Node::List(items) => items.iter().collect::<Vec<_>>(),
                    other => vec![other],
                })
                .collect(),
            Node::Leaf(_) | Node::Attributed { .. } => Vec::new(),
        }
    }

    /// Converts a JSON value
    ///
    /// Numbers and booleans become their text form (`true` is `"1"`,
    /// `false` is `""`). Null object members are dropped; a null
    /// document or array item becomes an empty mapping.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Node::empty(),
            Value::Bool(true) => Node::Leaf("1".to_string()),
            Value::Bool(false) => Node::Leaf(String::new()),
            Value::Number(n) => Node::Leaf(n.to_string()),
            Value::String(s) => Node::Leaf(s),
            Value::Array(items) => Node::List(items.into_iter().map(Node::from_json).collect()),
            Value::Object(members) => Node::map(
                members
                    .into_iter()
                    .filter(|(_, v)| !v.is_null())
                    .map(|(k, v)| (k, Node::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Prefixed-key JSON rendering
    ///
    /// Attributes appear as `@name` keys and the text of an attributed
    /// leaf under `#`, which is the layout the API's XML maps to.
    pub fn to_json(&self) -> Value {
        match self {
            Node::Leaf(text) => Value::String(text.clone()),
            Node::Attributed { text, attrs } => {
                let mut object = Map::new();
                object.insert("#".to_string(), Value::String(text.clone()));
                insert_attrs(&mut object, attrs);
                Value::Object(object)
            }
            Node::Map { attrs, entries } => {
                let mut object = Map::new();
                insert_attrs(&mut object, attrs);
                for (key, node) in entries {
                    object.insert(key.clone(), node.to_json());
                }
                Value::Object(object)
            }
            Node::List(items) => Value::Array(items.iter().map(Node::to_json).collect()),
        }
    }
}

fn insert_attrs(object: &mut Map<String, Value>, attrs: &Attributes) {
    for (name, value) in attrs {
        object.insert(format!("@{}", name), Value::String(value.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(Node::from_json(json!(42)), Node::Leaf("42".to_string()));
        assert_eq!(Node::from_json(json!(4.5)), Node::Leaf("4.5".to_string()));
        assert_eq!(Node::from_json(json!(true)), Node::Leaf("1".to_string()));
        assert_eq!(Node::from_json(json!(null)), Node::empty());
    }

    #[test]
    fn test_from_json_drops_null_members() {
        let node = Node::from_json(json!({"id": null, "title": "x"}));
        assert!(node.get("id").is_none());
        assert_eq!(node.field("title"), Some("x"));
    }

    #[test]
    fn test_field_falls_back_to_attribute() {
        let node = Node::Attributed {
            text: String::new(),
            attrs: vec![("size".to_string(), "big".to_string())],
        };
        assert_eq!(node.field("size"), Some("big"));
        assert_eq!(node.field("src"), None);
    }

    #[test]
    fn test_field_ignores_nested_maps() {
        let node = Node::from_json(json!({"default_thumb": {"size": "big"}}));
        assert_eq!(node.field("default_thumb"), None);
    }

    #[test]
    fn test_items_of_list_and_wrapper_map() {
        let list = Node::from_json(json!([{"id": "a"}, {"id": "b"}]));
        assert_eq!(list.items().len(), 2);

        let wrapper = Node::map(vec![(
            "video".to_string(),
            Node::List(vec![Node::Leaf("a".into()), Node::Leaf("b".into())]),
        )]);
        assert_eq!(wrapper.items().len(), 2);

        let single = Node::map(vec![("video".to_string(), Node::Leaf("a".into()))]);
        assert_eq!(single.items(), vec![&Node::Leaf("a".into())]);

        assert!(Node::Leaf("x".into()).items().is_empty());
    }

    #[test]
    fn test_is_empty() {
        assert!(Node::empty().is_empty());
        assert!(Node::List(Vec::new()).is_empty());
        assert!(!Node::Leaf(String::new()).is_empty());
    }

    #[test]
    fn test_to_json_prefixes_attributes() {
        let node = Node::map(vec![(
            "thumb".to_string(),
            Node::Attributed {
                text: "t".to_string(),
                attrs: vec![("width".to_string(), "640".to_string())],
            },
        )]);
        assert_eq!(node.to_json(), json!({"thumb": {"#": "t", "@width": "640"}}));
    }
}
