use clap::Args;
use cortado::{config::BackendConfig, context::AppContext, money, orders::Order};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

#[derive(Debug, Args)]
pub(crate) struct OrdersArgs {
    #[command(flatten)]
    backend: BackendConfig,
}

pub(crate) async fn run(args: OrdersArgs) -> Result<(), String> {
    let context = AppContext::from_config(&args.backend)
        .map_err(|error| format!("failed to initialize services: {error}"))?;

    let orders = context
        .orders
        .list_orders()
        .await
        .map_err(|error| format!("failed to fetch orders: {error}"))?;

    println!("{}", render_orders(&orders));

    Ok(())
}

pub(crate) fn render_orders(orders: &[Order]) -> String {
    if orders.is_empty() {
        return "no orders yet".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["ID", "For", "Status", "Total", "Placed", "Items"]);

    for order in orders {
        let id = order.id.to_string();
        let status = order.status.to_string();
        let total = money::format_amount(order.total);
        let items = order.items.len().to_string();
        builder.push_record([
            id.as_str(),
            order.for_name.as_str(),
            status.as_str(),
            total.as_str(),
            order.order_date.as_str(),
            items.as_str(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..4), Alignment::right());

    table.to_string()
}
