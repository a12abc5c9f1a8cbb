//! Process-wide logger registry
//!
//! One mutex-guarded map from name to shared logger; the only true global
//! mutable state in the engine besides the dispatch mode. Ownership is
//! shared: dropping a name releases the registry's reference, while any
//! handle an application still holds keeps the logger (and its sinks)
//! alive. In-flight `log()` calls on a just-dropped logger therefore
//! complete normally.

use super::{
    error::{LoggerError, Result},
    logger::Logger,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

pub struct Registry {
    loggers: Mutex<HashMap<String, Arc<Logger>>>,
}

impl Registry {
    fn new() -> Self {
        Self {
            loggers: Mutex::new(HashMap::new()),
        }
    }

    /// The process-wide instance, created on first use.
    pub fn global() -> &'static Registry {
        static REGISTRY: OnceLock<Registry> = OnceLock::new();
        REGISTRY.get_or_init(Registry::new)
    }

    /// Register a logger under its name. Duplicate names are an error; the
    /// existing registration wins and the new logger is returned inside the
    /// error path untouched.
    pub fn register(&self, logger: Arc<Logger>) -> Result<Arc<Logger>> {
        let mut loggers = self.loggers.lock();
        let name = logger.name().to_string();
        if loggers.contains_key(&name) {
            return Err(LoggerError::DuplicateLogger { name });
        }
        loggers.insert(name, Arc::clone(&logger));
        Ok(logger)
    }

    /// Look up a logger by name.
    pub fn get(&self, name: &str) -> Result<Arc<Logger>> {
        self.loggers
            .lock()
            .get(name)
            .cloned()
            .ok_or_else(|| LoggerError::LoggerNotFound {
                name: name.to_string(),
            })
    }

    /// Return the logger registered under `name`, or build and register one
    /// via `factory`. The factory runs under the registry lock, so two
    /// concurrent calls for the same name invoke it exactly once and both
    /// receive the winner's logger. The factory must not itself touch the
    /// registry.
    pub fn get_or_create<F>(&self, name: &str, factory: F) -> Result<Arc<Logger>>
    where
        F: FnOnce() -> Result<Arc<Logger>>,
    {
        let mut loggers = self.loggers.lock();
        if let Some(existing) = loggers.get(name) {
            return Ok(Arc::clone(existing));
        }
        let logger = factory()?;
        loggers.insert(name.to_string(), Arc::clone(&logger));
        Ok(logger)
    }

    /// Release the registry's reference to `name`.
    pub fn drop(&self, name: &str) -> Result<()> {
        match self.loggers.lock().remove(name) {
            Some(_) => Ok(()),
            None => Err(LoggerError::LoggerNotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Flush and release every registered logger. Flushing happens outside
    /// the registry lock, so threads mid-`log()` are never blocked on it;
    /// they either complete against the released sinks or observe the entry
    /// gone on their next lookup.
    pub fn drop_all(&self) {
        let drained: Vec<Arc<Logger>> = {
            let mut loggers = self.loggers.lock();
            loggers.drain().map(|(_, logger)| logger).collect()
        };
        for logger in drained {
            if let Err(e) = logger.flush() {
                super::error::report(logger.name(), &e);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.loggers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.lock().is_empty()
    }
}

/// Look up a registered logger by name.
pub fn get(name: &str) -> Result<Arc<Logger>> {
    Registry::global().get(name)
}

/// Register a logger built outside the convenience factories.
pub fn register(logger: Arc<Logger>) -> Result<Arc<Logger>> {
    Registry::global().register(logger)
}

/// Get-or-atomically-create against the process registry.
pub fn get_or_create<F>(name: &str, factory: F) -> Result<Arc<Logger>>
where
    F: FnOnce() -> Result<Arc<Logger>>,
{
    Registry::global().get_or_create(name, factory)
}

/// Release the registry's reference to a named logger.
pub fn drop(name: &str) -> Result<()> {
    Registry::global().drop(name)
}

/// Flush and release every registered logger.
pub fn drop_all() {
    Registry::global().drop_all();
}
