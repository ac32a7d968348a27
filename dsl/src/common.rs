//! Represents the values that the rewrite stages extract from structured
//! text constructs.
//!
//! These are transient: each `translate` call builds them from the text it
//! was given and discards them before returning.

/// A single declaration pulled from a `VAR ... END_VAR` block.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableBinding {
    pub name: String,
    /// The initializer expression text when the declaration has `:=`.
    /// A declaration without `:=` is present but uninitialized.
    pub initializer: Option<String>,
}

/// An ordered name to initializer mapping for one `VAR` block.
///
/// Insertion order is preserved so that emitted assignments are
/// deterministic. Inserting a name that already exists overwrites the
/// earlier value in place (last declaration wins), mirroring ordinary
/// mapping-assignment semantics.
#[derive(Debug, Default)]
pub struct Bindings(Vec<VariableBinding>);

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, initializer: Option<String>) {
        match self.0.iter_mut().find(|binding| binding.name == name) {
            Some(binding) => binding.initializer = initializer,
            None => self.0.push(VariableBinding {
                name: name.to_owned(),
                initializer,
            }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&VariableBinding> {
        self.0.iter().find(|binding| binding.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VariableBinding> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Selector pattern for one arm of a `CASE` block.
#[derive(Clone, Debug, PartialEq)]
pub enum CaseLabel {
    /// A single value, comma list or range, kept as expression text.
    Values(String),
    /// The `ELSE` arm, rendered as the wildcard pattern in the target.
    Default,
}

/// One arm of a `CASE` block: the selector pattern plus the raw statement
/// text that runs until the next arm.
#[derive(Clone, Debug, PartialEq)]
pub struct CaseArm {
    pub label: CaseLabel,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_when_duplicate_name_then_overwrites_in_place() {
        let mut bindings = Bindings::new();
        bindings.insert("a", Some("1".to_owned()));
        bindings.insert("b", Some("2".to_owned()));
        bindings.insert("a", Some("3".to_owned()));

        let order: Vec<&str> = bindings.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(vec!["a", "b"], order);
        assert_eq!(
            Some("3"),
            bindings.get("a").and_then(|b| b.initializer.as_deref())
        );
    }

    #[test]
    fn insert_when_no_initializer_then_present_but_uninitialized() {
        let mut bindings = Bindings::new();
        bindings.insert("x", None);
        assert_eq!(1, bindings.len());
        assert_eq!(None, bindings.get("x").unwrap().initializer);
    }
}
