//! Human-readable products list.

use crate::config::MergeConfig;
use crate::domain::CustomerRecord;

/// Builds the `products` cell for one customer: the display labels of every
/// purchased catalog product, in catalog order, joined with `" | "`. Catalog
/// entries without a label are flag-only and never appear here. No
/// purchases yields an empty string.
pub fn build_products_label(customer: &CustomerRecord, config: &MergeConfig) -> String {
    let labels: Vec<&str> = config
        .products
        .iter()
        .filter(|product| {
            customer
                .product_flags
                .get(&product.code)
                .copied()
                .unwrap_or(false)
        })
        .filter_map(|product| product.label.as_deref())
        .collect();

    labels.join(" | ")
}
