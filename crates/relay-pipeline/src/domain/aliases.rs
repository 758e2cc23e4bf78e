//! Event name alias table.
//!
//! Storefront themes and legacy clients send the same lifecycle event under
//! many spellings. Lookup ignores case, surrounding whitespace, and the choice
//! of separator (space, `-` or `_`).

/// Canonical name for cart additions.
pub const ADDED_PRODUCT_TO_CART: &str = "added product to cart";
/// Canonical name for product views.
pub const VIEWED_PRODUCT: &str = "viewed product";
/// Canonical name for checkout starts.
pub const STARTED_CHECKOUT: &str = "started checkout";
/// Canonical name for placed orders.
pub const PLACED_ORDER: &str = "placed order";
/// Canonical name for paid orders.
pub const PAID_FOR_ORDER: &str = "paid for order";
/// Canonical name for refunded orders.
pub const ORDER_REFUNDED: &str = "order refunded";
/// Canonical name for fulfilled orders.
pub const ORDER_FULFILLED: &str = "order fulfilled";
/// Canonical name for canceled orders.
pub const ORDER_CANCELED: &str = "order canceled";

/// Schema version applied by default to order-lifecycle events.
pub const ORDER_EVENT_VERSION: &str = "v2";

const ALIASES: &[(&str, &str)] = &[
    ("add_to_cart", ADDED_PRODUCT_TO_CART),
    ("added_to_cart", ADDED_PRODUCT_TO_CART),
    ("addtocart", ADDED_PRODUCT_TO_CART),
    ("cart_add", ADDED_PRODUCT_TO_CART),
    ("added_product_to_cart", ADDED_PRODUCT_TO_CART),
    ("view_product", VIEWED_PRODUCT),
    ("viewed_product", VIEWED_PRODUCT),
    ("product_viewed", VIEWED_PRODUCT),
    ("begin_checkout", STARTED_CHECKOUT),
    ("checkout_started", STARTED_CHECKOUT),
    ("started_checkout", STARTED_CHECKOUT),
    ("start_checkout", STARTED_CHECKOUT),
    ("order_placed", PLACED_ORDER),
    ("placed_order", PLACED_ORDER),
    ("place_order", PLACED_ORDER),
    ("order_paid", PAID_FOR_ORDER),
    ("paid_for_order", PAID_FOR_ORDER),
    ("order_refunded", ORDER_REFUNDED),
    ("refunded_order", ORDER_REFUNDED),
    ("order_fulfilled", ORDER_FULFILLED),
    ("fulfilled_order", ORDER_FULFILLED),
    ("order_canceled", ORDER_CANCELED),
    ("order_cancelled", ORDER_CANCELED),
    ("canceled_order", ORDER_CANCELED),
    ("cancelled_order", ORDER_CANCELED),
];

const ORDER_LIFECYCLE: &[&str] = &[
    PLACED_ORDER,
    PAID_FOR_ORDER,
    ORDER_REFUNDED,
    ORDER_FULFILLED,
    ORDER_CANCELED,
];

fn lookup_key(raw: &str) -> String {
    raw.split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Resolves a client-supplied event name to its canonical form.
///
/// Unknown names pass through trimmed. Returns `None` when the name is blank.
#[must_use]
pub fn canonical_event_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let key = lookup_key(trimmed);
    let canonical = ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map_or(trimmed, |&(_, canonical)| canonical);
    Some(canonical.to_owned())
}

/// Default `eventVersion` for a canonical event name.
#[must_use]
pub fn default_event_version(canonical_name: &str) -> Option<&'static str> {
    ORDER_LIFECYCLE
        .contains(&canonical_name)
        .then_some(ORDER_EVENT_VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_lookup_ignores_case() {
        assert_eq!(
            canonical_event_name("Add_To_Cart").as_deref(),
            Some(ADDED_PRODUCT_TO_CART)
        );
    }

    #[test]
    fn test_alias_lookup_ignores_whitespace_and_separators() {
        assert_eq!(
            canonical_event_name("  order  placed ").as_deref(),
            Some(PLACED_ORDER)
        );
        assert_eq!(
            canonical_event_name("Order-Cancelled").as_deref(),
            Some(ORDER_CANCELED)
        );
    }

    #[test]
    fn test_canonical_names_resolve_to_themselves() {
        assert_eq!(
            canonical_event_name("Added Product To Cart").as_deref(),
            Some(ADDED_PRODUCT_TO_CART)
        );
        assert_eq!(
            canonical_event_name("paid for order").as_deref(),
            Some(PAID_FOR_ORDER)
        );
    }

    #[test]
    fn test_unknown_name_passes_through_trimmed() {
        assert_eq!(
            canonical_event_name("  wishlist shared ").as_deref(),
            Some("wishlist shared")
        );
    }

    #[test]
    fn test_blank_name_is_none() {
        assert_eq!(canonical_event_name(""), None);
        assert_eq!(canonical_event_name("   \t"), None);
    }

    #[test]
    fn test_order_lifecycle_events_default_to_v2() {
        for name in ORDER_LIFECYCLE {
            assert_eq!(default_event_version(name), Some(ORDER_EVENT_VERSION));
        }
        assert_eq!(default_event_version(ADDED_PRODUCT_TO_CART), None);
        assert_eq!(default_event_version("wishlist shared"), None);
    }
}
