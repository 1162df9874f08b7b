//! Static HTML rendering of the view models.
//!
//! Produces the same fragments and class names the storefront stylesheet
//! targets (`.card`, `.page-btn`, `.active`, `.disabled`, `.added`,
//! `.cart-item`). All catalog text is escaped.

use std::fmt::Write;

use storefront_query::SortKey;

use crate::view::{CartView, CatalogView, NO_RESULTS, PaginationView, REMOVE_LABEL};

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn class_list(base: &str, flags: &[(&str, bool)]) -> String {
    let mut classes = base.to_string();
    for (name, on) in flags {
        if *on {
            classes.push(' ');
            classes.push_str(name);
        }
    }
    classes
}

pub fn render_catalog(view: &CatalogView) -> String {
    let mut html = String::from("<div class=\"grid\">");
    if view.empty {
        let _ = write!(html, "<p class=\"no-results\">{NO_RESULTS}</p>");
    }
    for card in &view.cards {
        let _ = write!(
            html,
            concat!(
                "<div class=\"card\">",
                "<img src=\"{image}\" alt=\"{name}\">",
                "<h3>{name}</h3>",
                "<p class=\"description\">{description}</p>",
                "<p class=\"price\">{price}</p>",
                "<button class=\"{class}\" data-id=\"{id}\">{label}</button>",
                "</div>"
            ),
            image = escape(&card.image),
            name = escape(&card.name),
            description = escape(&card.description),
            price = escape(&card.price_label),
            class = class_list("cart-toggle", &[("added", card.in_cart)]),
            id = card.id,
            label = card.button_label,
        );
    }
    html.push_str("</div>");
    html
}

pub fn render_pagination(view: &PaginationView) -> String {
    let mut html = String::from("<div id=\"pagination\">");
    let _ = write!(
        html,
        "<button class=\"{}\" data-action=\"prev\">Prev</button>",
        class_list("page-btn", &[("disabled", view.prev_disabled)])
    );
    for button in &view.pages {
        let _ = write!(
            html,
            "<button class=\"{}\" data-page=\"{n}\">{n}</button>",
            class_list("page-btn", &[("active", button.active)]),
            n = button.number
        );
    }
    let _ = write!(
        html,
        "<button class=\"{}\" data-action=\"next\">Next</button>",
        class_list("page-btn", &[("disabled", view.next_disabled)])
    );
    html.push_str("</div>");
    html
}

pub fn render_cart(view: &CartView) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<button id=\"cart-btn\">{}</button>",
        escape(&view.badge)
    );
    let _ = write!(
        html,
        "<aside id=\"cart-sidebar\" class=\"{}\">",
        class_list("cart-sidebar", &[("active", view.open)])
    );
    html.push_str("<button id=\"close-cart\">&times;</button><div id=\"cart-items\">");
    for line in &view.lines {
        let _ = write!(
            html,
            concat!(
                "<div class=\"{class}\">",
                "<img src=\"{image}\" alt=\"{name}\">",
                "<div class=\"cart-item-info\"><h4>{name}</h4><p>{price}</p></div>",
                "<button data-id=\"{id}\">{label}</button>",
                "</div>"
            ),
            class = class_list("cart-item", &[("unavailable", !line.available)]),
            image = escape(&line.image),
            name = escape(&line.name),
            price = escape(&line.price_label),
            id = line.id,
            label = REMOVE_LABEL,
        );
    }
    let _ = write!(
        html,
        "</div><p id=\"total\">{}</p></aside>",
        escape(&view.total_label)
    );
    html
}

/// Search box and sort selector, with the current values selected.
pub fn render_controls(search: &str, sort: SortKey) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<input id=\"search\" type=\"text\" placeholder=\"Search products...\" value=\"{}\">",
        escape(search)
    );
    html.push_str("<select id=\"sort\">");
    for key in SortKey::ALL {
        let selected = if key == sort { " selected" } else { "" };
        let _ = write!(
            html,
            "<option value=\"{}\"{selected}>{}</option>",
            key.as_str(),
            key.label()
        );
    }
    html.push_str("</select>");
    html
}

/// The whole widget.
pub fn render_widget(
    search: &str,
    sort: SortKey,
    catalog: &CatalogView,
    pagination: &PaginationView,
    cart: &CartView,
) -> String {
    let mut html = String::from("<div class=\"storefront\">");
    html.push_str(&render_controls(search, sort));
    html.push_str(&render_catalog(catalog));
    html.push_str(&render_pagination(pagination));
    html.push_str(&render_cart(cart));
    html.push_str("</div>");
    html
}
