use clap::Args;
use cortado::{config::BackendConfig, context::AppContext, money};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

#[derive(Debug, Args)]
pub(crate) struct MenuArgs {
    #[command(flatten)]
    backend: BackendConfig,
}

pub(crate) async fn run(args: MenuArgs) -> Result<(), String> {
    let context = AppContext::from_config(&args.backend)
        .map_err(|error| format!("failed to initialize services: {error}"))?;

    let items = context
        .menu
        .list_items()
        .await
        .map_err(|error| format!("failed to fetch the menu: {error}"))?;

    if items.is_empty() {
        println!("the menu is empty");
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "Cost", "Category"]);

    for item in &items {
        let cost = money::format_amount(item.cost);
        builder.push_record([
            item.id.as_str(),
            item.name.as_str(),
            cost.as_str(),
            item.category.as_str(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..3), Alignment::right());

    println!("{table}");

    Ok(())
}
