//! Registry pattern for dynamic integrator management

use super::{ExplicitEuler, Integrator, UpdateOrder, VelocityVerlet};
use crate::error::{Error, Result};
use std::collections::HashMap;

/// Resolves integrator names and aliases into integrator instances
#[derive(Debug, Clone)]
pub struct IntegratorRegistry {
    aliases: HashMap<String, String>,
    update_order: UpdateOrder,
}

impl IntegratorRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            aliases: HashMap::new(),
            update_order: UpdateOrder::default(),
        };

        // Short aliases for convenience
        registry.add_alias("euler", "explicit_euler");
        registry.add_alias("forward_euler", "explicit_euler");
        registry.add_alias("verlet", "velocity_verlet");

        registry
    }

    /// Update order handed to every integrator this registry creates
    pub fn with_update_order(mut self, update_order: UpdateOrder) -> Self {
        self.update_order = update_order;
        self
    }

    pub fn add_alias(&mut self, alias: &str, target: &str) {
        self.aliases.insert(alias.to_string(), target.to_string());
    }

    /// Canonical name for `name`, following aliases
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(|s| s.as_str()).unwrap_or(name)
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn Integrator>> {
        match self.resolve(name) {
            "explicit_euler" => Ok(Box::new(ExplicitEuler::new(self.update_order))),
            "velocity_verlet" => Ok(Box::new(VelocityVerlet::new(self.update_order))),
            _ => {
                let available = self.list_available();
                let aliases: Vec<String> = self
                    .list_aliases()
                    .into_iter()
                    .map(|(alias, _)| alias)
                    .collect();
                Err(Error::UnknownIntegrator(format!(
                    "'{}'. Available integrators: {}. Aliases: {}",
                    name,
                    available.join(", "),
                    aliases.join(", ")
                )))
            }
        }
    }

    pub fn list_available(&self) -> Vec<String> {
        vec!["explicit_euler".to_string(), "velocity_verlet".to_string()]
    }

    pub fn list_aliases(&self) -> Vec<(String, String)> {
        let mut aliases: Vec<(String, String)> = self
            .aliases
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        aliases.sort_by(|a, b| a.0.cmp(&b.0));
        aliases
    }
}

impl Default for IntegratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrator_registry() {
        let registry = IntegratorRegistry::new();

        let available = registry.list_available();
        assert!(available.contains(&"explicit_euler".to_string()));
        assert!(available.contains(&"velocity_verlet".to_string()));

        assert_eq!(registry.create("explicit_euler").unwrap().name(), "explicit_euler");
        assert_eq!(registry.create("velocity_verlet").unwrap().name(), "velocity_verlet");

        // Aliases
        assert_eq!(registry.create("euler").unwrap().name(), "explicit_euler");
        assert_eq!(registry.create("verlet").unwrap().name(), "velocity_verlet");

        let result = registry.create("runge_kutta_fourth_order");
        assert!(matches!(result, Err(Error::UnknownIntegrator(_))));
    }

    #[test]
    fn test_update_order_is_passed_through() {
        let registry = IntegratorRegistry::new().with_update_order(UpdateOrder::Sequential);
        for name in registry.list_available() {
            let integrator = registry.create(&name).unwrap();
            assert_eq!(integrator.update_order(), UpdateOrder::Sequential);
        }
    }

    #[test]
    fn test_aliases_are_sorted() {
        let aliases = IntegratorRegistry::new().list_aliases();
        let names: Vec<&str> = aliases.iter().map(|(a, _)| a.as_str()).collect();
        assert_eq!(names, vec!["euler", "forward_euler", "verlet"]);
    }
}
