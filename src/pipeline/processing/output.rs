//! Output table rendering.
//!
//! Re-renders merged customers as a caller-facing table: phones in their
//! canonical display form, boolean flags sparse (`1` or blank — only
//! positive purchases are marked), `products` always the last column, and
//! the `description` column present only when the input carried one.

use crate::config::MergeConfig;
use crate::domain::CustomerRecord;
use crate::pipeline::ingestion::{
    Table, COL_DESCRIPTION, COL_NAME, COL_NO_PRODUCT, COL_PHONE, COL_PRODUCTS, COL_SALES_REP,
};
use crate::pipeline::processing::phone::format_phone;

/// Renders the merged customers into the output table. `product_labels`
/// must be aligned index-for-index with `customers`; callers are expected
/// to keep input order, so rows come out in ascending first appearance.
pub fn render_output(
    customers: &[CustomerRecord],
    product_labels: &[String],
    config: &MergeConfig,
    with_description: bool,
) -> Table {
    let mut columns: Vec<String> = vec![
        COL_PHONE.to_string(),
        COL_NAME.to_string(),
        COL_SALES_REP.to_string(),
    ];
    columns.extend(config.product_codes().map(|c| c.to_string()));
    columns.push(COL_NO_PRODUCT.to_string());
    if with_description {
        columns.push(COL_DESCRIPTION.to_string());
    }
    columns.push(COL_PRODUCTS.to_string());

    let mut table = Table::new(columns);
    for (customer, label) in customers.iter().zip(product_labels) {
        let mut row = vec![
            format_phone(&customer.phone_key),
            customer.display_name.clone(),
            customer.sales_rep.clone().unwrap_or_default(),
        ];
        for code in config.product_codes() {
            let purchased = customer.product_flags.get(code).copied().unwrap_or(false);
            row.push(sparse_flag(purchased));
        }
        row.push(sparse_flag(customer.has_no_product));
        if with_description {
            row.push(customer.description.clone().unwrap_or_default());
        }
        row.push(label.clone());
        table.rows.push(row);
    }
    table
}

/// Sparse boolean cell: `1` when set, blank otherwise.
fn sparse_flag(value: bool) -> String {
    if value {
        "1".to_string()
    } else {
        String::new()
    }
}
