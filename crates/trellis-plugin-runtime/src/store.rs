//! Category-indexed interceptor storage

use std::fmt;
use trellis_plugin_api::{InterceptorCategory, InterceptorInstance};

/// An interceptor together with the name it was registered under
#[derive(Debug, Clone)]
pub struct RegisteredInterceptor {
    name: &'static str,
    instance: InterceptorInstance,
}

impl RegisteredInterceptor {
    /// Pair a registered name with its live instance
    pub fn new(name: &'static str, instance: InterceptorInstance) -> Self {
        Self { name, instance }
    }

    /// Registered name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Category of the instance
    pub fn category(&self) -> InterceptorCategory {
        self.instance.category()
    }

    /// Live instance
    pub fn instance(&self) -> &InterceptorInstance {
        &self.instance
    }
}

/// Ordered interceptor lists, one per category
///
/// Entries are appended while scanning and never removed.
#[derive(Clone, Default)]
pub struct InterceptorStore {
    categories: [Vec<RegisteredInterceptor>; InterceptorCategory::COUNT],
}

impl fmt::Debug for InterceptorStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for category in self.categories() {
            let names: Vec<&str> = self.get(category).iter().map(|e| e.name).collect();
            map.entry(&category, &names);
        }
        map.finish()
    }
}

impl InterceptorStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interceptor under its own category
    pub(crate) fn push(&mut self, entry: RegisteredInterceptor) {
        self.categories[entry.category().index()].push(entry);
    }

    /// All interceptors, grouped by category in category order
    pub fn all(&self) -> Vec<&RegisteredInterceptor> {
        self.categories.iter().flatten().collect()
    }

    /// Interceptors of one category, in registration order
    pub fn get(&self, category: InterceptorCategory) -> &[RegisteredInterceptor] {
        &self.categories[category.index()]
    }

    /// Whether any interceptor is registered for `category`
    pub fn has(&self, category: InterceptorCategory) -> bool {
        !self.get(category).is_empty()
    }

    /// Visit the interceptors of `category` in order
    ///
    /// The callback receives the entry, its index and a stop flag. Once the
    /// callback sets the flag no further entries are visited.
    pub fn enumerate<F>(&self, category: InterceptorCategory, mut f: F)
    where
        F: FnMut(&RegisteredInterceptor, usize, &mut bool),
    {
        let mut stop = false;
        for (idx, entry) in self.get(category).iter().enumerate() {
            f(entry, idx, &mut stop);
            if stop {
                break;
            }
        }
    }

    /// Categories with at least one interceptor
    pub fn categories(&self) -> impl Iterator<Item = InterceptorCategory> + '_ {
        InterceptorCategory::ALL
            .into_iter()
            .filter(move |category| self.has(*category))
    }

    /// Total number of interceptors
    pub fn len(&self) -> usize {
        self.categories.iter().map(Vec::len).sum()
    }

    /// Whether the store holds no interceptors
    pub fn is_empty(&self) -> bool {
        self.categories.iter().all(Vec::is_empty)
    }
}
