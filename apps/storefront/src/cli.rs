use clap::{Args, Parser, Subcommand};
use client_core::SortOrder;

#[derive(Parser, Debug)]
#[command(name = "storefront", about = "Browse and manage a product catalog")]
pub struct Cli {
    #[arg(long, global = true)]
    pub api_base: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct ListingArgs {
    #[arg(long)]
    pub sort_by: Option<String>,
    #[arg(long, default_value = "asc")]
    pub order: SortOrder,
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub page: i64,
    #[arg(long)]
    pub page_size: Option<usize>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long)]
    pub price: f64,
    #[arg(long, default_value_t = 0.0)]
    pub discount_percentage: f64,
    #[arg(long, default_value_t = 0.0)]
    pub rating: f64,
    #[arg(long)]
    pub stock: Option<i64>,
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub thumbnail: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Products {
        #[arg(long)]
        category: Option<String>,
        #[arg(long, short)]
        query: Option<String>,
        #[command(flatten)]
        listing: ListingArgs,
    },
    Search {
        query: String,
        #[command(flatten)]
        listing: ListingArgs,
    },
    Category {
        slug: String,
        #[command(flatten)]
        listing: ListingArgs,
    },
    Categories,
    Featured,
    Product {
        id: i64,
    },
    Add(AddArgs),
    Delete {
        id: i64,
    },
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    Register {
        username: String,
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    Logout,
    Whoami,
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum WishlistAction {
    Add { id: i64 },
    List,
}
