//! Application context
//!
//! Owns the catalog, the cart, the batch generator and the cart store for one
//! process. Front ends build one [`AppContext`] from a resolved [`Config`] and
//! call its operations; nothing in the engine is global.

use camino::Utf8PathBuf;
use std::path::PathBuf;

use kitlabel_catalog::{ColumnMap, ExactMatch, JsonCatalogSource, ProductCatalog, ProductRecord};
use kitlabel_config::Config;
use kitlabel_template::{TemplateFileNames, TemplateSet};
use kitlabel_utils::error::{ConfigError, KitLabelError};
use kitlabel_utils::lock::with_state_lock;
use kitlabel_utils::types::KitType;

use crate::batch::{BatchGenerator, BatchOutput};
use crate::cart::{Cart, CartEntry};
use crate::expansion::LabelCounts;
use crate::persistence::{CartStore, FileCartStore};

/// Everything one kitlabel invocation works with.
#[derive(Debug)]
pub struct AppContext {
    config: Config,
    catalog: ProductCatalog,
    cart: Cart,
    generator: BatchGenerator,
    store: FileCartStore,
}

impl AppContext {
    /// Load the catalog and templates named by `config` and restore the cart.
    ///
    /// # Errors
    ///
    /// - [`KitLabelError::Config`] when no catalog path is configured or a
    ///   path is not valid UTF-8
    /// - [`KitLabelError::Load`] when the catalog cannot be read or parsed
    /// - [`KitLabelError::Render`] when a template is missing or uses an
    ///   unknown placeholder
    /// - [`KitLabelError::Persistence`] when the stored cart cannot be read
    pub fn init(config: Config) -> Result<Self, KitLabelError> {
        let catalog = load_catalog(&config)?;
        let generator = load_generator(&config)?;
        let store = FileCartStore::new(utf8_path("state_dir", config.state_dir())?);

        let mut cart = store.load()?;
        attach_listeners(&mut cart);

        tracing::info!(
            records = catalog.len(),
            cart_entries = cart.len(),
            state_dir = %store.state_dir(),
            "Context ready"
        );

        Ok(Self {
            config,
            catalog,
            cart,
            generator,
            store,
        })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn generator(&self) -> &BatchGenerator {
        &self.generator
    }

    #[must_use]
    pub fn store(&self) -> &FileCartStore {
        &self.store
    }

    /// Substring search over product codes.
    pub fn search(&self, query: &str) -> Result<Vec<&ProductRecord>, KitLabelError> {
        Ok(self.catalog.fuzzy_search(query)?)
    }

    /// Exact code lookup.
    ///
    /// # Errors
    ///
    /// [`KitLabelError::ProductNotFound`] when no code matches.
    pub fn lookup(&self, code: &str) -> Result<ExactMatch<'_>, KitLabelError> {
        self.catalog
            .exact_search(code)?
            .ok_or_else(|| KitLabelError::ProductNotFound {
                query: code.trim().to_string(),
            })
    }

    /// Look up `code` and add it to the cart.
    ///
    /// Without an explicit kit type, the type inferred from the matching code
    /// field is used.
    pub fn add_to_cart(
        &mut self,
        code: &str,
        kit_type: Option<KitType>,
        quantity: i64,
    ) -> Result<CartEntry, KitLabelError> {
        let found = self
            .catalog
            .exact_search(code)?
            .ok_or_else(|| KitLabelError::ProductNotFound {
                query: code.trim().to_string(),
            })?;
        let kit_type = kit_type.unwrap_or(found.kit_type);
        Ok(self.cart.add(found.record, kit_type, quantity)?)
    }

    pub fn remove(&mut self, id: u64) -> Result<CartEntry, KitLabelError> {
        Ok(self.cart.remove(id)?)
    }

    pub fn update_quantity(&mut self, id: u64, quantity: i64) -> Result<CartEntry, KitLabelError> {
        Ok(self.cart.update_quantity(id, quantity)?)
    }

    pub fn clear(&mut self) -> usize {
        self.cart.clear()
    }

    #[must_use]
    pub fn summary(&self) -> LabelCounts {
        self.cart.summary()
    }

    /// Render the whole cart. The cart is left unchanged.
    pub fn generate(&self) -> Result<BatchOutput, KitLabelError> {
        Ok(self.generator.generate(self.cart.entries())?)
    }

    /// Save the cart while holding the state lock.
    pub fn persist(&self) -> Result<(), KitLabelError> {
        with_state_lock(self.store.state_dir(), || {
            self.store.save(&self.cart)?;
            Ok(())
        })
    }

    /// Run a cart mutation as one read-modify-write cycle.
    ///
    /// Under the state lock the cart is reloaded from the store, `f` runs, and
    /// the cart is saved only if `f` succeeded. When `f` fails the in-memory
    /// cart is rolled back to the reloaded state.
    pub fn with_cart_transaction<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, KitLabelError>,
    ) -> Result<T, KitLabelError> {
        let state_dir = self.store.state_dir().to_path_buf();
        with_state_lock(&state_dir, || {
            let mut cart = self.store.load()?;
            attach_listeners(&mut cart);
            let committed = (cart.entries().to_vec(), cart.next_id());
            self.cart = cart;

            match f(self) {
                Ok(value) => {
                    self.store.save(&self.cart)?;
                    Ok(value)
                }
                Err(err) => {
                    let (entries, next_id) = committed;
                    let mut cart = Cart::restore(entries, next_id);
                    attach_listeners(&mut cart);
                    self.cart = cart;
                    tracing::debug!(error = %err, "Cart transaction rolled back");
                    Err(err)
                }
            }
        })
    }
}

fn load_catalog(config: &Config) -> Result<ProductCatalog, KitLabelError> {
    let path = config
        .catalog_path()
        .ok_or_else(|| ConfigError::InvalidValue {
            key: "catalog.path".to_string(),
            value: "not set (use --catalog or [catalog] path)".to_string(),
        })?;
    let columns = ColumnMap::with_overrides(&config.catalog.columns)?;

    let mut catalog = ProductCatalog::new(columns, config.skip_rows());
    catalog.load(&JsonCatalogSource::new(path))?;
    Ok(catalog)
}

/// Load the configured templates and run the placeholder check.
pub fn load_generator(config: &Config) -> Result<BatchGenerator, KitLabelError> {
    let names = TemplateFileNames {
        large: config.large_template().to_string(),
        small_fork: config.small_fork_template().to_string(),
        small_shock: config.small_shock_template().to_string(),
    };
    let templates = TemplateSet::load_from_dir(&config.templates_dir(), &names)?;
    Ok(BatchGenerator::new(templates)?)
}

fn attach_listeners(cart: &mut Cart) {
    cart.subscribe(Box::new(|event| {
        tracing::debug!(?event, "Cart changed");
        Ok(())
    }));
}

/// Convert a configured path to UTF-8 for the camino-based state helpers.
pub fn utf8_path(key: &str, path: PathBuf) -> Result<Utf8PathBuf, ConfigError> {
    Utf8PathBuf::from_path_buf(path).map_err(|p| ConfigError::InvalidValue {
        key: key.to_string(),
        value: format!("{} is not valid UTF-8", p.display()),
    })
}
