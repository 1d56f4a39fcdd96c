//! Entity factory
//!
//! Named constructors for actor kinds. The core never builds a kind
//! itself: the driver registers makers ("player", "walker") and the
//! level loader asks for them by the names it finds in spawn tables.

use std::collections::HashMap;

use super::entity::Entity;

type MakerFn = Box<dyn Fn() -> Entity>;

/// Registry of named entity constructors.
#[derive(Default)]
pub struct EntityFactory {
    makers: HashMap<String, MakerFn>,
}

impl EntityFactory {
    pub fn new() -> Self {
        Self {
            makers: HashMap::new(),
        }
    }

    /// Register a maker under a kind name. Registering the same name
    /// again replaces the maker; the later constructor wins,
    /// mirroring trait lookup.
    pub fn register<F>(&mut self, name: impl Into<String>, maker: F)
    where
        F: Fn() -> Entity + 'static,
    {
        self.makers.insert(name.into(), Box::new(maker));
    }

    pub fn knows(&self, name: &str) -> bool {
        self.makers.contains_key(name)
    }

    /// Build a fresh entity of the named kind, default traits
    /// attached. `None` if no maker is registered under the name.
    pub fn create(&self, name: &str) -> Option<Entity> {
        self.makers.get(name).map(|maker| maker())
    }

    /// Registered kind names, sorted for stable diagnostics.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.makers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Size;

    #[test]
    fn test_create_by_name() {
        let mut factory = EntityFactory::new();
        factory.register("walker", || {
            let mut e = Entity::new("walker");
            e.state_mut().size = Size::new(14.0, 14.0);
            e
        });

        assert!(factory.knows("walker"));
        let e = factory.create("walker").unwrap();
        assert_eq!(e.state().kind, "walker");
        assert_eq!(e.state().size, Size::new(14.0, 14.0));
    }

    #[test]
    fn test_unknown_name_is_none() {
        let factory = EntityFactory::new();
        assert!(factory.create("koopa").is_none());
    }

    #[test]
    fn test_reregistration_replaces() {
        let mut factory = EntityFactory::new();
        factory.register("walker", || Entity::new("walker"));
        factory.register("walker", || {
            let mut e = Entity::new("walker");
            e.state_mut().size = Size::new(20.0, 20.0);
            e
        });

        let e = factory.create("walker").unwrap();
        assert_eq!(e.state().size, Size::new(20.0, 20.0));
        assert_eq!(factory.names(), vec!["walker"]);
    }
}
