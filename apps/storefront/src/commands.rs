use std::io::Write;

use anyhow::{anyhow, Context, Result};
use client_core::{
    refresh_listing, CatalogApi, ProductSource, RegisterForm, ResultList, SessionStore, Settings,
    SortKey, StoredSession, WishlistStore,
};
use shared::{
    domain::ProductId,
    protocol::{NewProduct, PLACEHOLDER_THUMBNAIL},
};
use tracing::{info, warn};

use crate::{
    cli::{AddArgs, Command, ListingArgs, WishlistAction},
    render,
};

pub struct AppContext<'a, A: ?Sized> {
    pub api: &'a A,
    pub session: &'a SessionStore,
    pub wishlist: &'a WishlistStore,
    pub settings: &'a Settings,
}

pub async fn run<A, W>(command: Command, ctx: &AppContext<'_, A>, out: &mut W) -> Result<()>
where
    A: CatalogApi + ?Sized,
    W: Write,
{
    match command {
        Command::Products {
            category,
            query,
            listing,
        } => {
            let source = ProductSource::from_params(category.as_deref(), query.as_deref());
            show_listing(ctx, source, &listing, out).await
        }
        Command::Search { query, listing } => {
            let source = ProductSource::from_params(None, Some(query.as_str()));
            if source == ProductSource::All {
                writeln!(out, "Please enter a search term")?;
                return Ok(());
            }
            show_listing(ctx, source, &listing, out).await
        }
        Command::Category { slug, listing } => {
            let source = ProductSource::from_params(Some(slug.as_str()), None);
            show_listing(ctx, source, &listing, out).await
        }
        Command::Categories => {
            let categories = ctx.api.categories_or_fallback().await;
            render::categories(out, &categories)?;
            Ok(())
        }
        Command::Featured => {
            let products = ctx
                .api
                .featured_products()
                .await
                .context("Failed to load featured products")?;
            render::product_grid(out, &products)?;
            Ok(())
        }
        Command::Product { id } => {
            let product = ctx
                .api
                .product(ProductId(id))
                .await
                .with_context(|| format!("Failed to load product #{id}"))?;
            render::product_details(out, &product)?;
            Ok(())
        }
        Command::Add(args) => {
            let new_product = new_product(args)?;
            let created = ctx
                .api
                .add_product(&new_product)
                .await
                .context("Failed to add product")?;
            match created.id {
                Some(id) => writeln!(out, "Product added successfully! (id {id})")?,
                None => writeln!(out, "Product added successfully!")?,
            }
            Ok(())
        }
        Command::Delete { id } => {
            if !ctx.session.is_authenticated() {
                return Err(anyhow!("Please sign in to delete products"));
            }
            let deleted = ctx
                .api
                .delete_product(ProductId(id))
                .await
                .context("Failed to delete product")?;
            writeln!(out, "Product #{} deleted successfully!", deleted.id)?;
            Ok(())
        }
        Command::Login { username, password } => {
            let login = ctx
                .api
                .login(&username, &password)
                .await
                .context("Sign in failed")?;
            let session = StoredSession::from_login(login)
                .ok_or_else(|| anyhow!("Sign in failed: no token in response"))?;
            ctx.session.save(&session)?;
            writeln!(out, "Successfully signed in as {}!", session.user.username)?;
            Ok(())
        }
        Command::Register {
            username,
            email,
            password,
            confirm_password,
        } => {
            let form = RegisterForm {
                username,
                email,
                password,
                confirm_password,
            };
            ctx.api
                .register(&form)
                .await
                .context("Registration failed")?;
            writeln!(out, "Account created successfully! Please sign in.")?;
            Ok(())
        }
        Command::Logout => {
            if ctx.session.clear()? {
                writeln!(out, "Signed out.")?;
            } else {
                writeln!(out, "No active session.")?;
            }
            Ok(())
        }
        Command::Whoami => {
            match ctx.session.load()? {
                Some(session) => writeln!(out, "Signed in as {}", session.user.username)?,
                None => writeln!(out, "Not signed in")?,
            }
            Ok(())
        }
        Command::Wishlist { action } => run_wishlist(ctx, action, out).await,
    }
}

async fn run_wishlist<A, W>(
    ctx: &AppContext<'_, A>,
    action: WishlistAction,
    out: &mut W,
) -> Result<()>
where
    A: CatalogApi + ?Sized,
    W: Write,
{
    match action {
        WishlistAction::Add { id } => {
            if !ctx.session.is_authenticated() {
                return Err(anyhow!("Please sign in to add items to wishlist"));
            }
            if ctx.wishlist.add(ProductId(id))? {
                writeln!(out, "Added to wishlist!")?;
            } else {
                writeln!(out, "Already in wishlist!")?;
            }
        }
        WishlistAction::List => {
            let ids = ctx.wishlist.load()?;
            if ids.is_empty() {
                writeln!(out, "Your wishlist is empty.")?;
            }
            for id in ids {
                match ctx.api.product(id).await {
                    Ok(product) => render::product_card(out, &product)?,
                    Err(err) => {
                        warn!(product_id = id.0, error = %err, "wishlist product unavailable");
                        writeln!(out, "#{id} (unavailable)")?;
                    }
                }
            }
        }
    }
    Ok(())
}

async fn show_listing<A, W>(
    ctx: &AppContext<'_, A>,
    source: ProductSource,
    listing: &ListingArgs,
    out: &mut W,
) -> Result<()>
where
    A: CatalogApi + ?Sized,
    W: Write,
{
    let page_size = listing.page_size.unwrap_or(ctx.settings.page_size);
    let mut list = ResultList::new(page_size).context("invalid --page-size")?;

    refresh_listing(ctx.api, &mut list, &source, ctx.settings.fetch_limit)
        .await
        .context("Failed to load products. Please check your internet connection and try again.")?;

    if let Some(sort_by) = &listing.sort_by {
        list.sort_by(&SortKey::parse(sort_by), listing.order);
    }
    list.go_to_page(listing.page);
    info!(
        total = list.len(),
        page = list.current_page(),
        pages = list.total_pages(),
        "listing ready"
    );

    if listing.json {
        serde_json::to_writer_pretty(&mut *out, &list.snapshot(ctx.settings.page_window))?;
        writeln!(out)?;
    } else {
        render::listing(out, &source, &list, ctx.settings.page_window)?;
    }
    Ok(())
}

fn new_product(args: AddArgs) -> Result<NewProduct> {
    if args.title.trim().is_empty() {
        return Err(anyhow!("product title must not be empty"));
    }
    if !args.price.is_finite() || args.price < 0.0 {
        return Err(anyhow!("price must be a non-negative number"));
    }
    Ok(NewProduct {
        title: args.title.trim().to_string(),
        description: args.description,
        price: args.price,
        discount_percentage: args.discount_percentage,
        rating: args.rating,
        stock: args.stock,
        brand: args.brand,
        category: args.category,
        thumbnail: args
            .thumbnail
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| PLACEHOLDER_THUMBNAIL.to_string()),
    })
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
