//! Cart editing commands.

use anyhow::Result;
use vortex_cart::{ProductId, ProductRef};

use super::{parse_quantity, AddArgs, LineArgs, SetArgs};
use crate::context::Context;
use crate::render::render_cart;

/// Add one unit of a product.
pub fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let product = ProductRef {
        id: args.id,
        name: args.name,
        price: args.price,
        icon: args.icon,
    };

    let line = store.add_item(&product)?;
    if ctx.output.is_json() {
        ctx.output.json(&line);
    }
    Ok(())
}

/// Remove a product's line.
pub fn remove(args: LineArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let removed = store.remove_item(&ProductId::new(args.id.as_str()));

    if removed.is_none() {
        ctx.output.debug(&format!("{} is not in the cart", args.id));
    }
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "removed": removed }));
    }
    Ok(())
}

/// Set a line's quantity.
pub fn set(args: SetArgs, ctx: &Context) -> Result<()> {
    let requested = parse_quantity(&args.quantity)?;
    let mut store = ctx.open_store()?;
    let id = ProductId::new(args.id);

    let quantity = store.set_quantity(&id, requested);
    report_quantity(ctx, &id, quantity.map(|q| q.get()));
    Ok(())
}

/// One more of a line.
pub fn increment(args: LineArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let id = ProductId::new(args.id);

    let quantity = store.increment(&id);
    report_quantity(ctx, &id, quantity.map(|q| q.get()));
    Ok(())
}

/// One fewer of a line.
pub fn decrement(args: LineArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let id = ProductId::new(args.id);

    let quantity = store.decrement(&id);
    report_quantity(ctx, &id, quantity.map(|q| q.get()));
    Ok(())
}

/// Remove every line.
pub fn empty(ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let emptied = store.empty_cart();

    if !emptied {
        ctx.output.debug("Cart was already empty");
    }
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "emptied": emptied }));
    }
    Ok(())
}

/// Print the cart.
pub fn show(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    render_cart(&ctx.output, store.cart());
    Ok(())
}

fn report_quantity(ctx: &Context, id: &ProductId, quantity: Option<u8>) {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "id": id, "quantity": quantity }));
        return;
    }
    match quantity {
        Some(q) => ctx.output.kv(id.as_str(), &q.to_string()),
        None => ctx.output.debug(&format!("{id} is not in the cart")),
    }
}
