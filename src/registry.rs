//! Component name → widget lookup.

use rustc_hash::FxHashMap;

use crate::policy::WidgetKind;

/// Maps MDX component names (`MdxTabs`, ...) to widget kinds.
///
/// The default registry knows every widget under its `Mdx*` name. Aliases
/// can be added so documents written for other component libraries
/// (`<Tabs>`, `<Callout>`) render too.
#[derive(Debug, Clone)]
pub struct Registry {
    names: FxHashMap<String, WidgetKind>,
}

impl Registry {
    /// A registry with no names at all.
    pub fn empty() -> Self {
        Self {
            names: FxHashMap::default(),
        }
    }

    /// Register `name` for `kind`, replacing any previous binding.
    pub fn register(&mut self, name: impl Into<String>, kind: WidgetKind) -> &mut Self {
        self.names.insert(name.into(), kind);
        self
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, name: impl Into<String>, kind: WidgetKind) -> Self {
        self.register(name, kind);
        self
    }

    /// Remove `name`. Returns the kind it was bound to.
    pub fn unregister(&mut self, name: &str) -> Option<WidgetKind> {
        self.names.remove(name)
    }

    /// Widget for a component name. Names are case-sensitive, like JSX.
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<WidgetKind> {
        self.names.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        let mut registry = Self::empty();
        for kind in WidgetKind::ALL {
            registry.register(kind.component_name(), kind);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_knows_all_components() {
        let registry = Registry::default();
        assert_eq!(registry.len(), WidgetKind::ALL.len());
        assert_eq!(registry.lookup("MdxTabs"), Some(WidgetKind::Tabs));
        assert_eq!(registry.lookup("MdxCardSet"), Some(WidgetKind::CardSet));
        assert_eq!(registry.lookup("mdxtabs"), None);
        assert_eq!(registry.lookup("Card"), None);
    }

    #[test]
    fn aliases() {
        let mut registry = Registry::default().with("Tabs", WidgetKind::Tabs);
        assert_eq!(registry.lookup("Tabs"), Some(WidgetKind::Tabs));
        registry.register("Tabs", WidgetKind::CardSet);
        assert_eq!(registry.lookup("Tabs"), Some(WidgetKind::CardSet));
        assert_eq!(registry.unregister("Tabs"), Some(WidgetKind::CardSet));
        assert_eq!(registry.lookup("Tabs"), None);
    }

    #[test]
    fn empty_registry() {
        assert!(Registry::empty().is_empty());
        assert_eq!(Registry::empty().lookup("MdxTabs"), None);
    }
}
