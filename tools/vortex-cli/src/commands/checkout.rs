//! Checkout command.

use std::str::FromStr;

use anyhow::{anyhow, Result};
use dialoguer::{theme::ColorfulTheme, Input, Select};
use vortex_cart::checkout::{OrderConfirmation, OrderForm, PaymentMethod};

use super::CheckoutArgs;
use crate::context::Context;
use crate::render::render_cart;

/// Run the checkout command.
pub fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let interactive = !args.no_input && !ctx.output.is_json() && console::user_attended();

    if interactive {
        render_cart(&ctx.output, store.cart());
    }

    let form = collect_form(args, interactive)?;
    let confirmation = store.checkout(&form)?;
    print_confirmation(ctx, &confirmation);

    Ok(())
}

fn collect_form(args: CheckoutArgs, interactive: bool) -> Result<OrderForm> {
    let mut form = OrderForm {
        name: args.name,
        email: args.email,
        address: args.address,
        city: args.city,
        payment: args.payment.filter(|p| !p.trim().is_empty()),
    };

    if let Some(ref payment) = form.payment {
        let method = PaymentMethod::from_str(payment).map_err(|e| anyhow!(e))?;
        form.payment = Some(method.as_str().to_string());
    }

    if !interactive {
        return Ok(form);
    }

    let theme = ColorfulTheme::default();
    for field in form.missing_fields() {
        let value = match field {
            "payment" => {
                let labels = PaymentMethod::ALL.map(|m| m.display_name());
                let selected = Select::with_theme(&theme)
                    .with_prompt("Payment method")
                    .items(&labels[..])
                    .default(0)
                    .interact()?;
                PaymentMethod::ALL[selected].as_str().to_string()
            }
            _ => Input::<String>::with_theme(&theme)
                .with_prompt(prompt_for(field))
                .allow_empty(true)
                .interact_text()?,
        };

        match field {
            "name" => form.name = Some(value),
            "email" => form.email = Some(value),
            "address" => form.address = Some(value),
            "city" => form.city = Some(value),
            _ => form.payment = Some(value),
        }
    }

    Ok(form)
}

fn prompt_for(field: &str) -> &'static str {
    match field {
        "name" => "Full name",
        "email" => "Email",
        "address" => "Street and number",
        "city" => "City and postal code",
        _ => "Value",
    }
}

fn print_confirmation(ctx: &Context, confirmation: &OrderConfirmation) {
    if ctx.output.is_json() {
        ctx.output.json(confirmation);
        return;
    }

    ctx.output.header("Order confirmation");
    ctx.output.kv("Order", confirmation.id.as_str());
    ctx.output.kv("Customer", &confirmation.customer);
    ctx.output.kv("Email", &confirmation.email);
    ctx.output.kv("Payment", &confirmation.payment);
    ctx.output.kv("Items", &confirmation.item_count.to_string());
    ctx.output.kv("Subtotal", &confirmation.subtotal.to_string());
    ctx.output.kv("Shipping", &confirmation.shipping_total.to_string());
    ctx.output.kv("Total", &confirmation.grand_total.to_string());
    ctx.output.kv(
        "Placed",
        &confirmation.placed_at.format("%Y-%m-%d %H:%M UTC").to_string(),
    );
}
