use clap::{Parser, Subcommand};

mod menu;
mod orders;
mod place;
mod watch;

#[derive(Debug, Parser)]
#[command(name = "cortado", about = "Café ordering client", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Menu(menu::MenuArgs),
    Orders(orders::OrdersArgs),
    Place(place::PlaceArgs),
    Watch(watch::WatchArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Menu(args) => menu::run(args).await,
            Commands::Orders(args) => orders::run(args).await,
            Commands::Place(args) => place::run(args).await,
            Commands::Watch(args) => watch::run(args).await,
        }
    }
}
