//! Leptos storefront component.
//!
//! All state lives in one `Storefront` inside a signal; every DOM event turns
//! into an `Intent` and goes through `Storefront::dispatch`.

use leptos::*;

use storefront_catalog::Catalog;
use storefront_query::SortKey;

use crate::config::WidgetConfig;
use crate::frontend::fetch::FetchCatalogSource;
use crate::frontend::storage::LocalStorage;
use crate::intent::Intent;
use crate::storefront::Storefront;
use crate::view::{NO_RESULTS, REMOVE_LABEL};

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
    let config = WidgetConfig::default();
    let store = create_rw_signal(Storefront::pending(LocalStorage, &config));

    let dispatch = move |intent: Intent| {
        store.update(|s| {
            let rerender = s.dispatch(intent);
            tracing::debug!(?rerender, "intent applied");
        });
    };

    let catalog_url = config.catalog_path.to_string_lossy().into_owned();
    spawn_local(async move {
        let catalog = Catalog::load(&FetchCatalogSource::new(catalog_url)).await;
        store.update(|s| {
            s.install_catalog(catalog);
        });
    });

    let catalog_view = move || store.with(|s| s.catalog_view());
    let pagination_view = move || store.with(|s| s.pagination_view());
    let cart_view = move || store.with(|s| s.cart_view());

    view! {
        <div class="storefront">
            <header class="controls">
                <input
                    id="search"
                    type="text"
                    placeholder="Search products..."
                    on:input=move |ev| dispatch(Intent::SetSearch(event_target_value(&ev)))
                />
                <select
                    id="sort"
                    on:change=move |ev| {
                        dispatch(Intent::SetSort(SortKey::from_selector(&event_target_value(&ev))))
                    }
                >
                    {SortKey::ALL
                        .iter()
                        .map(|key| view! { <option value=key.as_str()>{key.label()}</option> })
                        .collect_view()}
                </select>
                <button id="cart-btn" on:click=move |_| dispatch(Intent::OpenCart)>
                    {move || cart_view().badge}
                </button>
            </header>

            <main class="grid">
                {move || {
                    let grid = catalog_view();
                    if grid.empty {
                        view! { <p class="no-results">{NO_RESULTS}</p> }.into_view()
                    } else {
                        grid.cards
                            .into_iter()
                            .map(|card| {
                                let id = card.id;
                                view! {
                                    <div class="card">
                                        <img src=card.image alt=card.name.clone()/>
                                        <h3>{card.name}</h3>
                                        <p class="description">{card.description}</p>
                                        <p class="price">{card.price_label}</p>
                                        <button
                                            class:added=card.in_cart
                                            on:click=move |_| dispatch(Intent::ToggleCart(id))
                                        >
                                            {card.button_label}
                                        </button>
                                    </div>
                                }
                            })
                            .collect_view()
                    }
                }}
            </main>

            <nav id="pagination">
                {move || {
                    let pages = pagination_view();
                    view! {
                        <button
                            class="page-btn"
                            class:disabled=pages.prev_disabled
                            on:click=move |_| dispatch(Intent::PrevPage)
                        >
                            "Prev"
                        </button>
                        {pages
                            .pages
                            .iter()
                            .map(|button| {
                                let number = button.number;
                                view! {
                                    <button
                                        class="page-btn"
                                        class:active=button.active
                                        on:click=move |_| dispatch(Intent::GoToPage(number))
                                    >
                                        {number}
                                    </button>
                                }
                            })
                            .collect_view()}
                        <button
                            class="page-btn"
                            class:disabled=pages.next_disabled
                            on:click=move |_| dispatch(Intent::NextPage)
                        >
                            "Next"
                        </button>
                    }
                }}
            </nav>

            <aside id="cart-sidebar" class:active=move || cart_view().open>
                <button id="close-cart" on:click=move |_| dispatch(Intent::CloseCart)>
                    "×"
                </button>
                <div id="cart-items">
                    {move || {
                        cart_view()
                            .lines
                            .into_iter()
                            .map(|line| {
                                let id = line.id;
                                view! {
                                    <div class="cart-item" class:unavailable=!line.available>
                                        <img src=line.image alt=line.name.clone()/>
                                        <div class="cart-item-info">
                                            <h4>{line.name}</h4>
                                            <p>{line.price_label}</p>
                                        </div>
                                        <button on:click=move |_| dispatch(Intent::ToggleCart(id))>
                                            {REMOVE_LABEL}
                                        </button>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                </div>
                <p id="total">{move || cart_view().total_label}</p>
            </aside>
        </div>
    }
}
