//! Simulation environment capabilities
//!
//! The generator only needs a narrow slice of a simulation environment:
//! list the loaded plugins, instantiate an interface by type and name,
//! talk to that interface with text commands, and shut the environment
//! down. These traits describe that slice so the real engine binding and
//! the test doubles in [`crate::test`] are interchangeable.

mod catalog;

pub use catalog::{CatalogEnvironment, CatalogInterface};

use crate::diagnostics::EtchResult;
use crate::interface_type::InterfaceType;
use crate::plugin::PluginInfo;
use std::ops::{Deref, DerefMut};

/// A live interface instance
///
/// Dropping the value releases the instance.
pub trait Interface {
    /// Send a text command and return the textual response
    fn send_command(&mut self, command: &str) -> EtchResult<String>;

    /// Static description of the interface
    fn description(&self) -> String;
}

/// A simulation environment that can enumerate and instantiate plugins
pub trait Environment {
    /// Interface handle type produced by this environment
    type Interface: Interface;

    /// List every loaded plugin
    fn plugin_info(&self) -> EtchResult<Vec<PluginInfo>>;

    /// Instantiate the interface `name` of the given type
    fn create_interface(&mut self, kind: InterfaceType, name: &str) -> EtchResult<Self::Interface>;

    /// Shut the environment down
    fn destroy(&mut self);
}

/// Owns an environment for the length of one run
///
/// The environment is destroyed exactly once: either by [`close`] or when
/// the scope is dropped, which also covers early returns and unwinding.
///
/// [`close`]: EnvironmentScope::close
pub struct EnvironmentScope<E: Environment> {
    env: E,
    released: bool,
}

impl<E: Environment> EnvironmentScope<E> {
    /// Take ownership of an environment
    pub fn new(env: E) -> Self {
        Self {
            env,
            released: false,
        }
    }

    /// Destroy the environment now
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            tracing::debug!("destroying environment");
            self.env.destroy();
        }
    }
}

impl<E: Environment> Deref for EnvironmentScope<E> {
    type Target = E;

    fn deref(&self) -> &E {
        &self.env
    }
}

impl<E: Environment> DerefMut for EnvironmentScope<E> {
    fn deref_mut(&mut self) -> &mut E {
        &mut self.env
    }
}

impl<E: Environment> Drop for EnvironmentScope<E> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::MockEnvironment;

    #[test]
    fn test_scope_destroys_on_drop() {
        let env = MockEnvironment::new();
        let counters = env.counters();
        {
            let scope = EnvironmentScope::new(env);
            assert!(scope.plugin_info().is_ok());
        }
        assert_eq!(counters.destroyed(), 1);
    }

    #[test]
    fn test_close_destroys_once() {
        let env = MockEnvironment::new();
        let counters = env.counters();
        let scope = EnvironmentScope::new(env);
        scope.close();
        assert_eq!(counters.destroyed(), 1);
    }

    #[test]
    fn test_scope_destroys_on_unwind() {
        let env = MockEnvironment::new();
        let counters = env.counters();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _scope = EnvironmentScope::new(env);
            panic!("boom");
        }));
        assert!(result.is_err());
        assert_eq!(counters.destroyed(), 1);
    }
}
