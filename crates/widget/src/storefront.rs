//! The storefront controller: application state plus the single reducer that
//! every user intent goes through.

use storefront_cart::{CartEvent, CartStorage, CartStore};
use storefront_catalog::{Catalog, CatalogSource};
use storefront_query::{QueryPage, QueryState, run};

use crate::config::WidgetConfig;
use crate::intent::Intent;
use crate::view::{CartView, CatalogView, PaginationView};

/// Cart panel visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CartPanel {
    #[default]
    Closed,
    Open,
}

impl CartPanel {
    pub fn is_open(self) -> bool {
        self == CartPanel::Open
    }
}

/// Which views a dispatch invalidated. Each flagged view is re-rendered in
/// full.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rerender {
    /// Product grid and pagination controls.
    pub catalog: bool,
    /// Cart panel, badge and total.
    pub cart: bool,
}

impl Rerender {
    pub const NONE: Rerender = Rerender {
        catalog: false,
        cart: false,
    };
    pub const CATALOG: Rerender = Rerender {
        catalog: true,
        cart: false,
    };
    pub const CART: Rerender = Rerender {
        catalog: false,
        cart: true,
    };
    pub const ALL: Rerender = Rerender {
        catalog: true,
        cart: true,
    };

    pub fn is_none(self) -> bool {
        !self.catalog && !self.cart
    }
}

/// Owns catalog, cart, query state and panel state. Nothing else mutates them.
#[derive(Debug)]
pub struct Storefront<S> {
    catalog: Catalog,
    cart: CartStore<S>,
    query: QueryState,
    panel: CartPanel,
    page_size: usize,
}

impl<S> Storefront<S>
where
    S: CartStorage,
{
    pub fn new(catalog: Catalog, cart: CartStore<S>, page_size: usize) -> Self {
        let mut storefront = Self {
            catalog,
            cart,
            query: QueryState::new(),
            panel: CartPanel::Closed,
            page_size: page_size.max(1),
        };
        storefront.cart.reconcile(&storefront.catalog);
        storefront
    }

    /// State before the catalog fetch resolves: empty catalog, restored cart.
    pub fn pending(storage: S, config: &WidgetConfig) -> Self {
        let cart = CartStore::load(storage, config.storage_key.clone());
        Self::new(Catalog::pending(), cart, config.page_size)
    }

    /// Restore the cart, fetch the catalog once, then reconcile the two.
    pub async fn bootstrap<C>(source: &C, storage: S, config: &WidgetConfig) -> Self
    where
        C: CatalogSource + ?Sized,
    {
        let mut storefront = Self::pending(storage, config);
        let catalog = Catalog::load(source).await;
        storefront.install_catalog(catalog);
        storefront
    }

    /// Swap in the fetched catalog. Cart ids the catalog does not offer are
    /// dropped (only if the catalog loaded), and the page is re-clamped.
    pub fn install_catalog(&mut self, catalog: Catalog) -> Rerender {
        self.catalog = catalog;
        let dropped = self.cart.reconcile(&self.catalog);
        if !dropped.is_empty() && self.cart.is_empty() {
            self.panel = CartPanel::Closed;
        }
        self.clamp_page();
        Rerender::ALL
    }

    /// Apply one intent and report which views need a full re-render.
    pub fn dispatch(&mut self, intent: Intent) -> Rerender {
        tracing::debug!(?intent, "dispatch");

        let rerender = match intent {
            Intent::SetSearch(search) => {
                self.query.set_search(search);
                Rerender::CATALOG
            }
            Intent::SetSort(sort) => {
                self.query.set_sort(sort);
                Rerender::CATALOG
            }
            Intent::GoToPage(page) => self.go_to_page(page),
            Intent::PrevPage => match self.query.page() {
                1 => Rerender::NONE,
                page => self.go_to_page(page - 1),
            },
            Intent::NextPage => {
                let (has_next, next) = {
                    let current = self.current_page();
                    (current.has_next(), current.page + 1)
                };
                if has_next {
                    self.go_to_page(next)
                } else {
                    Rerender::NONE
                }
            }
            Intent::ToggleCart(product_id) => {
                if !self.cart.contains(product_id) && !self.catalog.contains(product_id) {
                    tracing::debug!(%product_id, "ignoring toggle for a product not in the catalog");
                    return Rerender::NONE;
                }
                let event = self.cart.toggle(product_id);
                if matches!(event, CartEvent::ItemRemoved { .. }) && self.cart.is_empty() {
                    self.panel = CartPanel::Closed;
                }
                Rerender::ALL
            }
            Intent::OpenCart => self.set_panel(CartPanel::Open),
            Intent::CloseCart => self.set_panel(CartPanel::Closed),
        };

        self.clamp_page();
        rerender
    }

    fn go_to_page(&mut self, page: u32) -> Rerender {
        let before = self.query.page();
        self.query.set_page(page);
        self.clamp_page();
        if self.query.page() == before {
            Rerender::NONE
        } else {
            Rerender::CATALOG
        }
    }

    fn set_panel(&mut self, panel: CartPanel) -> Rerender {
        if self.panel == panel {
            return Rerender::NONE;
        }
        self.panel = panel;
        Rerender::CART
    }

    fn clamp_page(&mut self) {
        let page = self.current_page().page;
        if page != self.query.page() {
            self.query.set_page(page);
        }
    }

    /// The pipeline output for the current query.
    pub fn current_page(&self) -> QueryPage<'_> {
        run(&self.catalog, &self.query, self.page_size)
    }

    pub fn catalog_view(&self) -> CatalogView {
        CatalogView::build(&self.current_page(), &self.cart)
    }

    pub fn pagination_view(&self) -> PaginationView {
        let page = self.current_page();
        PaginationView::build(page.page, page.total_pages)
    }

    pub fn cart_view(&self) -> CartView {
        CartView::build(&self.cart, &self.catalog, self.panel)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn panel(&self) -> CartPanel {
        self.panel
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use storefront_cart::{DEFAULT_STORAGE_KEY, MemoryStorage};
    use storefront_core::{Money, ProductId};
    use storefront_catalog::Product;
    use storefront_query::SortKey;

    fn id(raw: u64) -> ProductId {
        ProductId::new(raw)
    }

    fn catalog_of(n: u64) -> Catalog {
        Catalog::from_products(
            (1..=n)
                .map(|i| {
                    Product::new(id(i), format!("Item {i:02}"), "", Money::from_cents(i * 100), "")
                })
                .collect(),
        )
    }

    fn storefront(n: u64) -> Storefront<MemoryStorage> {
        let cart = CartStore::load(MemoryStorage::new(), DEFAULT_STORAGE_KEY);
        Storefront::new(catalog_of(n), cart, 5)
    }

    #[test]
    fn search_and_sort_reset_to_first_page() {
        let mut store = storefront(12);
        store.dispatch(Intent::GoToPage(3));
        assert_eq!(store.query().page(), 3);

        assert_eq!(store.dispatch(Intent::SetSearch("item".into())), Rerender::CATALOG);
        assert_eq!(store.query().page(), 1);

        store.dispatch(Intent::GoToPage(2));
        store.dispatch(Intent::SetSort(SortKey::PriceDesc));
        assert_eq!(store.query().page(), 1);
    }

    #[test]
    fn prev_and_next_stop_at_boundaries() {
        let mut store = storefront(7);
        assert_eq!(store.dispatch(Intent::PrevPage), Rerender::NONE);
        assert_eq!(store.dispatch(Intent::NextPage), Rerender::CATALOG);
        assert_eq!(store.query().page(), 2);
        assert_eq!(store.dispatch(Intent::NextPage), Rerender::NONE);
        assert_eq!(store.query().page(), 2);
        assert_eq!(store.dispatch(Intent::PrevPage), Rerender::CATALOG);
        assert_eq!(store.query().page(), 1);
    }

    #[test]
    fn go_to_page_is_clamped() {
        let mut store = storefront(7);
        store.dispatch(Intent::GoToPage(40));
        assert_eq!(store.query().page(), 2);
        store.dispatch(Intent::GoToPage(0));
        assert_eq!(store.query().page(), 1);
    }

    #[test]
    fn narrowing_search_keeps_page_in_range() {
        let mut store = storefront(12);
        store.dispatch(Intent::GoToPage(3));
        store.dispatch(Intent::SetSearch("Item 1".into()));
        let page = store.current_page();
        assert_eq!(page.page, 1);
        assert_eq!(store.query().page(), page.page);
    }

    #[test]
    fn emptying_the_cart_closes_the_panel() {
        let mut store = storefront(3);
        store.dispatch(Intent::ToggleCart(id(1)));
        store.dispatch(Intent::ToggleCart(id(2)));
        assert_eq!(store.dispatch(Intent::OpenCart), Rerender::CART);
        assert!(store.panel().is_open());

        store.dispatch(Intent::ToggleCart(id(1)));
        assert!(store.panel().is_open());
        assert_eq!(store.dispatch(Intent::ToggleCart(id(2))), Rerender::ALL);
        assert_eq!(store.panel(), CartPanel::Closed);
    }

    #[test]
    fn panel_only_moves_on_explicit_actions() {
        let mut store = storefront(3);
        assert_eq!(store.dispatch(Intent::CloseCart), Rerender::NONE);
        assert_eq!(store.dispatch(Intent::OpenCart), Rerender::CART);
        assert_eq!(store.dispatch(Intent::OpenCart), Rerender::NONE);
        store.dispatch(Intent::ToggleCart(id(1)));
        assert!(store.panel().is_open());
        assert_eq!(store.dispatch(Intent::CloseCart), Rerender::CART);
    }

    #[test]
    fn toggle_of_unknown_product_is_ignored() {
        let mut store = storefront(3);
        assert_eq!(store.dispatch(Intent::ToggleCart(id(99))), Rerender::NONE);
        assert!(store.cart().is_empty());
    }

    #[test]
    fn pending_storefront_shows_nothing_until_catalog_arrives() {
        let storage = Arc::new(MemoryStorage::with_entry(DEFAULT_STORAGE_KEY, "[2, 9]"));
        let mut store = Storefront::pending(Arc::clone(&storage), &WidgetConfig::default());
        assert!(store.current_page().is_empty());
        assert_eq!(store.cart().len(), 2);

        assert_eq!(store.install_catalog(catalog_of(3)), Rerender::ALL);
        assert_eq!(store.cart().cart().items(), &[id(2)]);
        assert_eq!(store.current_page().items.len(), 3);
    }

    #[test]
    fn reconcile_that_empties_cart_closes_panel() {
        let storage = MemoryStorage::with_entry(DEFAULT_STORAGE_KEY, "[9]");
        let mut store = Storefront::pending(storage, &WidgetConfig::default());
        store.dispatch(Intent::OpenCart);
        store.install_catalog(catalog_of(3));
        assert!(store.cart().is_empty());
        assert_eq!(store.panel(), CartPanel::Closed);
    }

    #[tokio::test]
    async fn failed_catalog_keeps_saved_cart() {
        let storage = MemoryStorage::with_entry(DEFAULT_STORAGE_KEY, "[1, 2]");
        let source = storefront_catalog::StaticCatalogSource::new("not json");
        let store = Storefront::bootstrap(&source, storage, &WidgetConfig::default()).await;
        assert_eq!(store.catalog().status(), storefront_catalog::CatalogStatus::Failed);
        assert_eq!(store.cart().len(), 2);
        assert!(store.catalog_view().empty);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_intent() -> impl Strategy<Value = Intent> {
            prop_oneof![
                "[a-z0-9 ]{0,3}".prop_map(Intent::SetSearch),
                prop::sample::select(SortKey::ALL.to_vec()).prop_map(Intent::SetSort),
                (0u32..8).prop_map(Intent::GoToPage),
                Just(Intent::PrevPage),
                Just(Intent::NextPage),
                (1u64..=12).prop_map(|raw| Intent::ToggleCart(ProductId::new(raw))),
                Just(Intent::OpenCart),
                Just(Intent::CloseCart),
            ]
        }

        proptest! {
            /// Property: after any intent sequence the page is in range, the
            /// panel is never open over an empty cart unless opened explicitly
            /// afterwards, and the total matches the cart contents.
            #[test]
            fn invariants_hold_after_any_intent_sequence(
                intents in prop::collection::vec(arb_intent(), 0..40)
            ) {
                let mut store = storefront(12);
                for intent in intents {
                    let was_open_intent = intent == Intent::OpenCart;
                    let was_toggle = matches!(intent, Intent::ToggleCart(_));
                    store.dispatch(intent);

                    let page = store.current_page();
                    prop_assert_eq!(store.query().page(), page.page);
                    prop_assert!(page.page >= 1 && page.page <= page.total_pages);

                    if was_toggle && store.cart().is_empty() {
                        prop_assert_eq!(store.panel(), CartPanel::Closed);
                    }
                    if was_open_intent {
                        prop_assert!(store.panel().is_open());
                    }

                    let expected: Money = store
                        .cart()
                        .cart()
                        .items()
                        .iter()
                        .filter_map(|id| store.catalog().get(*id))
                        .map(|p| p.price())
                        .sum();
                    prop_assert_eq!(store.cart_view().total, expected);
                }
            }
        }
    }
}
