//! Terminal rendering of the cart.

use vortex_cart::{Cart, CartChange, CartObserver, Notice};

use crate::output::{count_badge, Output};

const COLUMN_WIDTHS: [usize; 6] = [2, 12, 24, 10, 4, 10];

/// Observer that turns store activity into terminal output.
pub struct TerminalRenderer {
    output: Output,
    show_cart_on_change: bool,
}

impl TerminalRenderer {
    pub fn new(output: Output, show_cart_on_change: bool) -> Self {
        Self {
            output,
            show_cart_on_change,
        }
    }
}

impl CartObserver for TerminalRenderer {
    fn cart_changed(&mut self, change: &CartChange, cart: &Cart) {
        self.output.debug(&format!(
            "{} -> {}",
            describe_change(change),
            count_badge(cart.count())
        ));
        if self.show_cart_on_change {
            render_cart(&self.output, cart);
        }
    }

    fn notice(&mut self, notice: &Notice) {
        self.output.notice(notice);
    }
}

fn describe_change(change: &CartChange) -> String {
    match change {
        CartChange::ItemAdded { id, quantity } => format!("added {id} (now {quantity})"),
        CartChange::ItemRemoved { id } => format!("removed {id}"),
        CartChange::QuantityChanged { id, quantity } => format!("{id} set to {quantity}"),
        CartChange::Emptied => "emptied".to_string(),
        CartChange::CheckedOut { order } => format!("checked out as {order}"),
        CartChange::Reloaded => "reloaded".to_string(),
    }
}

/// Print the cart as a table with a pricing summary.
pub fn render_cart(output: &Output, cart: &Cart) {
    if output.is_json() {
        output.json(&cart.pricing());
        return;
    }

    output.header(&format!("Cart ({})", count_badge(cart.count())));
    if cart.is_empty() {
        output.info("Your cart is empty");
        return;
    }

    output.table_row(&["", "ID", "Product", "Price", "Qty", "Subtotal"], &COLUMN_WIDTHS);
    for line in cart.lines() {
        let price = line.price.to_string();
        let quantity = line.quantity.to_string();
        let subtotal = line.subtotal().to_string();
        output.table_row(
            &[
                line.icon.as_str(),
                line.id.as_str(),
                line.name.as_str(),
                price.as_str(),
                quantity.as_str(),
                subtotal.as_str(),
            ],
            &COLUMN_WIDTHS,
        );
    }

    let pricing = cart.pricing();
    println!();
    output.kv("Subtotal", &pricing.subtotal.to_string());
    output.kv("Shipping", &pricing.shipping_total.to_string());
    output.kv("Total", &pricing.grand_total.to_string());
}
