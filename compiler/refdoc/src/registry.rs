//! Generators available to the driver, looked up by id.

use refdoc_bitcode::{BitcodeGenerator, Generator};
use refdoc_support::{format_error, Error};

/// The set of known generators.
pub struct GeneratorRegistry {
    generators: Vec<Box<dyn Generator>>,
}

impl GeneratorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        GeneratorRegistry {
            generators: Vec::new(),
        }
    }

    /// Create a registry holding every built-in generator.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.generators.push(Box::new(BitcodeGenerator));
        registry
    }

    /// Add a generator. Ids must be unique.
    pub fn insert(&mut self, generator: Box<dyn Generator>) -> Result<(), Error> {
        if self.find(generator.id()).is_some() {
            return Err(format_error!(
                "a generator with the id \"{}\" already exists",
                generator.id()
            ));
        }
        self.generators.push(generator);
        Ok(())
    }

    /// Return the generator with the given id.
    pub fn find(&self, id: &str) -> Option<&dyn Generator> {
        self.generators
            .iter()
            .find(|g| g.id() == id)
            .map(AsRef::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Generator> {
        self.generators.iter().map(AsRef::as_ref)
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
