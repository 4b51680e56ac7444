use std::sync::Arc;

use clap::Args;
use cortado::{
    cart::CartStore,
    checkout::{CheckoutContact, CheckoutFlow, CheckoutSummary},
    config::BackendConfig,
    context::AppContext,
    money,
};

#[derive(Debug, Args)]
pub(crate) struct PlaceArgs {
    /// Items to order, by menu id, with an optional quantity suffix
    #[arg(required = true, value_name = "ITEM[xQTY]")]
    items: Vec<String>,

    /// Name to attach to the order
    #[arg(long, default_value = "")]
    name: String,

    /// Contact email for the order
    #[arg(long)]
    email: String,

    /// Special instructions for one line, as ITEM=TEXT
    #[arg(long = "note", value_name = "ITEM=TEXT")]
    notes: Vec<String>,

    #[command(flatten)]
    backend: BackendConfig,
}

pub(crate) async fn run(args: PlaceArgs) -> Result<(), String> {
    let context = AppContext::from_config(&args.backend)
        .map_err(|error| format!("failed to initialize services: {error}"))?;

    let catalog = context
        .menu
        .list_items()
        .await
        .map_err(|error| format!("failed to fetch the menu: {error}"))?;

    let mut cart = CartStore::new();

    for spec in &args.items {
        let (id, quantity) = parse_item_spec(spec);

        if quantity == 0 {
            return Err(format!("quantity must be at least 1: {spec}"));
        }

        let item = catalog
            .iter()
            .find(|item| item.id == id)
            .ok_or_else(|| format!("unknown item: {id}"))?;

        for _ in 0..quantity {
            cart.add_item(item);
        }
    }

    for note in &args.notes {
        let (id, text) = note
            .split_once('=')
            .ok_or_else(|| format!("expected ITEM=TEXT, got: {note}"))?;

        if !cart.lines().iter().any(|line| line.item_id == id) {
            return Err(format!("note for an item that is not in the order: {id}"));
        }

        cart.set_instructions(id, Some(text.to_string()));
    }

    let summary = CheckoutSummary::of(&cart);
    println!(
        "subtotal {}, tax {}, total with tax {}",
        money::format_amount(summary.subtotal),
        money::format_amount(summary.tax),
        money::format_amount(summary.total),
    );

    let flow = CheckoutFlow::new(Arc::clone(&context.orders));
    let contact = CheckoutContact {
        name: args.name,
        email: args.email,
    };

    let confirmation = flow
        .submit(&mut cart, &contact)
        .await
        .map_err(|error| format!("failed to place the order: {error}"))?;

    println!("order #{} placed", confirmation.order_id);
    println!("placed at: {}", confirmation.order.order_date);
    println!("for: {}", confirmation.order.for_email);

    for line in &confirmation.order.items {
        match line.notes.is_empty() {
            true => println!("  {} x {}", line.quantity, line.item_name),
            false => println!("  {} x {} ({})", line.quantity, line.item_name, line.notes),
        }
    }

    println!("order total: {}", money::format_amount(confirmation.order.total));

    Ok(())
}

/// Splits `flat-whitex2` into `("flat-white", 2)`. A spec without a
/// numeric `x` suffix is a single item.
fn parse_item_spec(spec: &str) -> (&str, u32) {
    if let Some((id, digits)) = spec.rsplit_once('x')
        && !id.is_empty()
        && let Ok(quantity) = digits.parse::<u32>()
    {
        return (id, quantity);
    }

    (spec, 1)
}
