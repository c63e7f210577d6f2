//! The grammar model.
//!
//! A [`Grammar`] is a list of [`Category`]s; each category lists its
//! [`NodeKind`]s, and each node kind lists its typed [`Field`]s. Order is
//! preserved everywhere and drives emission order.
//!
//! Grammars are assembled with a [`GrammarBuilder`] and validated once by
//! [`GrammarBuilder::build`]. A `Grammar` value is therefore always valid and
//! cannot be modified afterwards.

use crate::error::ModelError;
use crate::validation::validate_grammar;

/// Derives applied to generated types when none are configured.
pub const DEFAULT_DERIVES: &[&str] = &["Debug", "Clone", "PartialEq"];

/// The declared type of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Any Rust type, written as source text (`Token`, `f64`, `Vec<u8>`).
    Value(String),
    /// The base type of a category; recursion is allowed.
    Category(String),
    /// One specific node kind of a category.
    Node { category: String, kind: String },
    /// A sequence of the inner type.
    List(Box<FieldType>),
    /// The inner type or nothing.
    Optional(Box<FieldType>),
}

impl FieldType {
    pub fn value(ty: impl Into<String>) -> Self {
        FieldType::Value(ty.into())
    }

    pub fn category(name: impl Into<String>) -> Self {
        FieldType::Category(name.into())
    }

    pub fn node(category: impl Into<String>, kind: impl Into<String>) -> Self {
        FieldType::Node {
            category: category.into(),
            kind: kind.into(),
        }
    }

    /// Wrap this type in a sequence.
    pub fn list(self) -> Self {
        FieldType::List(Box::new(self))
    }

    /// Make this type optional.
    pub fn optional(self) -> Self {
        FieldType::Optional(Box::new(self))
    }

    /// The innermost type, looking through lists and optionals.
    pub fn innermost(&self) -> &FieldType {
        match self {
            FieldType::List(inner) | FieldType::Optional(inner) => inner.innermost(),
            other => other,
        }
    }

    /// The category this type points into, if any.
    pub fn referenced_category(&self) -> Option<&str> {
        match self.innermost() {
            FieldType::Category(name) => Some(name),
            FieldType::Node { category, .. } => Some(category),
            _ => None,
        }
    }
}

/// A named, typed slot on a node kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: FieldType,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Field {
            name: name.into(),
            ty,
        }
    }
}

/// One concrete variant of a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeKind {
    pub name: String,
    pub fields: Vec<Field>,
}

impl NodeKind {
    pub fn new(name: impl Into<String>, fields: impl IntoIterator<Item = Field>) -> Self {
        NodeKind {
            name: name.into(),
            fields: fields.into_iter().collect(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A group of node kinds sharing one visitor trait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub kinds: Vec<NodeKind>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Category {
            name: name.into(),
            kinds: Vec::new(),
        }
    }

    /// Append a node kind.
    pub fn node(mut self, name: impl Into<String>, fields: impl IntoIterator<Item = Field>) -> Self {
        self.kinds.push(NodeKind::new(name, fields));
        self
    }

    pub fn kind(&self, name: &str) -> Option<&NodeKind> {
        self.kinds.iter().find(|k| k.name == name)
    }
}

/// Which categories a field may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferencePolicy {
    /// Any category in the grammar.
    #[default]
    Forward,
    /// Only the field's own category or one declared before it.
    BackwardOnly,
}

/// A validated, immutable grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    categories: Vec<Category>,
    imports: Vec<String>,
    derives: Vec<String>,
    references: ReferencePolicy,
}

impl Grammar {
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::default()
    }

    /// Categories in declaration order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// `use` trees emitted at the top of every category unit.
    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    /// Derive paths applied to every generated enum and struct.
    pub fn derives(&self) -> &[String] {
        &self.derives
    }

    pub fn references(&self) -> ReferencePolicy {
        self.references
    }
}

/// Collects grammar declarations; nothing is checked until [`build`].
///
/// [`build`]: GrammarBuilder::build
#[derive(Debug, Clone)]
pub struct GrammarBuilder {
    pub(crate) categories: Vec<Category>,
    pub(crate) imports: Vec<String>,
    pub(crate) derives: Vec<String>,
    pub(crate) references: ReferencePolicy,
}

impl Default for GrammarBuilder {
    fn default() -> Self {
        GrammarBuilder {
            categories: Vec::new(),
            imports: Vec::new(),
            derives: DEFAULT_DERIVES.iter().map(|d| d.to_string()).collect(),
            references: ReferencePolicy::default(),
        }
    }
}

impl GrammarBuilder {
    pub fn category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    /// Add a `use` tree, e.g. `crate::token::Token`.
    pub fn import(mut self, import: impl Into<String>) -> Self {
        self.imports.push(import.into());
        self
    }

    /// Replace all imports.
    pub fn imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports = imports.into_iter().map(Into::into).collect();
        self
    }

    /// Add a derive path.
    pub fn derive(mut self, derive: impl Into<String>) -> Self {
        self.derives.push(derive.into());
        self
    }

    /// Replace all derives. An empty list emits no derive attribute.
    pub fn derives<I, S>(mut self, derives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.derives = derives.into_iter().map(Into::into).collect();
        self
    }

    pub fn references(mut self, policy: ReferencePolicy) -> Self {
        self.references = policy;
        self
    }

    /// Validate every invariant and freeze the grammar.
    pub fn build(self) -> Result<Grammar, ModelError> {
        validate_grammar(&self)?;
        tracing::debug!(
            categories = self.categories.len(),
            kinds = self.categories.iter().map(|c| c.kinds.len()).sum::<usize>(),
            "grammar validated"
        );
        Ok(Grammar {
            categories: self.categories,
            imports: self.imports,
            derives: self.derives,
            references: self.references,
        })
    }
}
