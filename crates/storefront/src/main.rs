use anyhow::Context;
use frostcart_events::Event;
use frostcart_storefront::{Storefront, StorefrontConfig};

fn main() -> anyhow::Result<()> {
    let config = StorefrontConfig::from_env().context("loading storefront configuration")?;
    frostcart_observability::init_with(config.log_format);

    let mut store = Storefront::seeded(config);
    let events = store.subscribe();

    // Optional first argument mirrors the `?category=` query.
    if let Some(category) = std::env::args().nth(1) {
        if store.apply_query_category(&category).is_err() {
            tracing::warn!(%category, "showing all products");
        }
    }

    let heading = store.catalog().filters().heading();
    let first = {
        let products = store.filtered_products();
        tracing::info!(heading, count = products.len(), "catalog");
        for product in &products {
            tracing::info!(
                id = %product.id,
                name = %product.name,
                price = %product.price,
                rating = %product.rating,
                "product"
            );
        }
        products.first().map(|p| p.id.clone())
    };

    if let Some(id) = first {
        store.add_to_cart(&id, None, 1)?;
    }

    let summary = store.order_summary();
    tracing::info!(
        items = summary.item_count,
        subtotal = %summary.subtotal,
        tax = %summary.tax,
        total = %summary.total,
        free_delivery = summary.free_delivery,
        "order summary"
    );

    for envelope in events.drain() {
        tracing::info!(
            sequence = envelope.sequence_number(),
            store = envelope.store(),
            event_type = envelope.payload().event_type(),
            "store event"
        );
    }

    Ok(())
}
