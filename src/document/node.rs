//! In-memory document tree

/// A single attribute, kept in source order so output matches input layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name, including any namespace prefix
    pub name: String,
    /// Unescaped attribute value
    pub value: String,
}

impl Attribute {
    /// Create a new attribute
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Child content of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Nested element
    Element(Element),
    /// Character data (unescaped)
    Text(String),
    /// CDATA section
    CData(String),
    /// Comment body
    Comment(String),
    /// Processing instruction content (target and data)
    ProcessingInstruction(String),
    /// Document type declaration body (prolog only)
    DocType(String),
}

/// An element node: tag, attributes and ordered children
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Element tag name
    pub tag: String,
    /// Attributes in source order
    pub attributes: Vec<Attribute>,
    /// Child nodes in document order
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes or children
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute append
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    /// Builder-style child append
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Value of an attribute, if present
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Whether the attribute is present
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    /// Replace the value of an existing attribute.
    ///
    /// Returns the previous value, or `None` when the attribute is absent. An
    /// absent attribute is never created.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) -> Option<String> {
        self.attributes
            .iter_mut()
            .find(|a| a.name == name)
            .map(|a| std::mem::replace(&mut a.value, value.into()))
    }

    /// Attribute names in source order
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.name.as_str())
    }

    /// Child elements, skipping text and other content
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Visit this element and every descendant element in pre-order
    pub fn walk<'a, F>(&'a self, visit: &mut F)
    where
        F: FnMut(&'a Element),
    {
        visit(self);
        for child in &self.children {
            if let Node::Element(e) = child {
                e.walk(visit);
            }
        }
    }

    /// Mutable pre-order visit of this element and every descendant element
    pub fn walk_mut<F>(&mut self, visit: &mut F)
    where
        F: FnMut(&mut Element),
    {
        visit(self);
        for child in &mut self.children {
            if let Node::Element(e) = child {
                e.walk_mut(visit);
            }
        }
    }

    /// Number of elements in this subtree, including `self`
    pub fn element_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_| count += 1);
        count
    }
}

/// A parsed document: optional prolog content plus the root element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Comments, processing instructions and doctype that appear before the root
    pub prolog: Vec<Node>,
    /// Root element
    pub root: Element,
}

impl Document {
    /// Wrap a root element with an empty prolog
    pub fn new(root: Element) -> Self {
        Self {
            prolog: Vec::new(),
            root,
        }
    }
}
