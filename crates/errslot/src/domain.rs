//! Process-wide registry of error domains.

use std::fmt;
use std::sync::LazyLock;

use parking_lot::RwLock;
use string_interner::StringInterner;
use string_interner::Symbol as _;
use string_interner::backend::DefaultBackend;
use string_interner::symbol::DefaultSymbol;

/// Opaque identifier for a category of errors.
///
/// Two domains are equal iff they were obtained from the same registered name.
/// The numeric value carries no meaning beyond identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Domain(DefaultSymbol);

impl Domain {
    /// Get or create the domain registered under `name` in the global registry.
    #[inline]
    pub fn get_or_create<S>(name: S) -> Self
    where
        S: AsRef<str>,
    {
        DomainRegistry::global().get_or_create(name)
    }

    /// Resolve this domain back to its registered name.
    pub fn name(self) -> String {
        DomainRegistry::global()
            .name(self)
            .unwrap_or_else(|| format!("<domain #{}>", self.index()))
    }

    /// Registration index, for diagnostics only.
    pub fn index(self) -> usize {
        self.0.to_usize()
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = DomainRegistry::global();
        match registry.with_name(*self, |name| f.write_str(name)) {
            Some(result) => result,
            None => write!(f, "<domain #{}>", self.index()),
        }
    }
}

impl fmt::Debug for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Domain(\"{}\")", self)
    }
}

static GLOBAL_REGISTRY: LazyLock<DomainRegistry> = LazyLock::new(DomainRegistry::new);

/// Thread-safe get-or-create mapping from domain names to [`Domain`]s.
///
/// Lookups take the read lock first; only a miss upgrades to the write lock,
/// where `get_or_intern` settles any race between concurrent first lookups.
#[derive(Debug)]
pub struct DomainRegistry {
    interner: RwLock<StringInterner<DefaultBackend>>,
}

impl DomainRegistry {
    /// Create an empty registry.
    ///
    /// Domains from a private registry only resolve through that registry;
    /// `Display` and [`Domain::name`] always consult the global one.
    pub fn new() -> Self {
        Self {
            interner: RwLock::new(StringInterner::new()),
        }
    }

    /// The registry shared by the whole process.
    pub fn global() -> &'static DomainRegistry {
        &GLOBAL_REGISTRY
    }

    /// Return the domain for `name`, registering it on first use.
    pub fn get_or_create<S>(&self, name: S) -> Domain
    where
        S: AsRef<str>,
    {
        let name = name.as_ref();
        if let Some(symbol) = self.interner.read().get(name) {
            return Domain(symbol);
        }

        let symbol = self.interner.write().get_or_intern(name);
        tracing::trace!(
            domain = name,
            index = symbol.to_usize(),
            "domain registered"
        );
        Domain(symbol)
    }

    /// Return the domain for `name` if it was registered before.
    pub fn lookup<S>(&self, name: S) -> Option<Domain>
    where
        S: AsRef<str>,
    {
        self.interner.read().get(name.as_ref()).map(Domain)
    }

    /// Resolve a domain back into an owned name.
    pub fn name(&self, domain: Domain) -> Option<String> {
        self.with_name(domain, str::to_owned)
    }

    /// Resolve a domain and apply a closure while the read lock is held.
    pub fn with_name<R, F>(&self, domain: Domain, f: F) -> Option<R>
    where
        F: FnOnce(&str) -> R,
    {
        self.interner.read().resolve(domain.0).map(f)
    }

    /// Number of registered domains.
    pub fn len(&self) -> usize {
        self.interner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DomainRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Define an accessor returning a lazily registered [`Domain`].
///
/// The name is interned in the global registry at first call and cached
/// afterwards, so the accessor is cheap to call at every error site.
///
/// ```
/// errslot::define_domain! {
///     /// Errors raised by the config loader.
///     pub fn config_domain => "config-loader"
/// }
///
/// assert_eq!(config_domain(), config_domain());
/// assert_eq!(config_domain().name(), "config-loader");
/// ```
#[macro_export]
macro_rules! define_domain {
    ($(#[$meta:meta])* $vis:vis fn $accessor:ident => $name:expr $(,)?) => {
        $(#[$meta])*
        $vis fn $accessor() -> $crate::Domain {
            static DOMAIN: ::std::sync::OnceLock<$crate::Domain> = ::std::sync::OnceLock::new();
            *DOMAIN.get_or_init(|| $crate::Domain::get_or_create($name))
        }
    };
}
