use std::io::{self, Write};

use client_core::{ProductSource, ResultList};
use shared::domain::{Category, Product};

pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

pub fn star_rating(rating: f64) -> String {
    let clamped = rating.clamp(0.0, 5.0);
    let full = clamped.floor() as usize;
    let half = full < 5 && clamped.fract() >= 0.5;
    let empty = 5 - full - usize::from(half);

    let mut stars = "★".repeat(full);
    if half {
        stars.push('½');
    }
    stars.push_str(&"☆".repeat(empty));
    format!("{stars} ({rating})")
}

pub fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `home-decoration` becomes `Home Decoration`.
pub fn format_category(slug: &str) -> String {
    slug.split('-')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn product_card(out: &mut impl Write, product: &Product) -> io::Result<()> {
    match product.id {
        Some(id) => writeln!(out, "#{id} {}", product.title())?,
        None => writeln!(out, "{}", product.title())?,
    }
    let mut details = vec![
        star_rating(product.rating().unwrap_or_default()),
        format_price(product.price().unwrap_or_default()),
        product.brand().unwrap_or("No Brand").to_string(),
        format_category(product.category().unwrap_or_default()),
    ];
    if let Some(discount) = product.discount_percentage().filter(|d| *d != 0.0) {
        details.push(format!("{discount}% OFF"));
    }
    writeln!(out, "    {}", details.join("  |  "))
}

pub fn product_details(out: &mut impl Write, product: &Product) -> io::Result<()> {
    writeln!(out, "{}", product.title())?;
    if let Some(description) = product.description() {
        writeln!(out, "{description}")?;
    }
    writeln!(
        out,
        "Price:    {}",
        format_price(product.price().unwrap_or_default())
    )?;
    if let Some(discount) = product.discount_percentage().filter(|d| *d != 0.0) {
        writeln!(out, "Discount: {discount}% OFF")?;
    }
    writeln!(
        out,
        "Rating:   {}",
        star_rating(product.rating().unwrap_or_default())
    )?;
    if let Some(stock) = product.stock() {
        writeln!(out, "Stock:    {stock}")?;
    }
    writeln!(out, "Brand:    {}", product.brand().unwrap_or("No Brand"))?;
    writeln!(
        out,
        "Category: {}",
        format_category(product.category().unwrap_or_default())
    )
}

pub fn product_grid(out: &mut impl Write, products: &[Product]) -> io::Result<()> {
    if products.is_empty() {
        writeln!(out, "No Products Found")?;
        return writeln!(
            out,
            "We couldn't find any products matching your criteria."
        );
    }
    for product in products {
        product_card(out, product)?;
    }
    Ok(())
}

pub fn listing_header(
    out: &mut impl Write,
    source: &ProductSource,
    list: &ResultList<Product>,
) -> io::Result<()> {
    match source {
        ProductSource::Search(query) if list.is_empty() => {
            writeln!(out, "No products found for \"{query}\"")
        }
        ProductSource::Search(query) => {
            writeln!(out, "Found {} products for \"{query}\"", list.len())
        }
        ProductSource::Category(slug) => writeln!(
            out,
            "{} Products ({})",
            format_category(slug),
            list.len()
        ),
        ProductSource::All => writeln!(out, "Products ({})", list.len()),
    }
}

pub fn pagination(
    out: &mut impl Write,
    list: &ResultList<Product>,
    max_buttons: usize,
) -> io::Result<()> {
    let mut parts = Vec::new();
    if list.has_previous() {
        parts.push("← Previous".to_string());
    }
    for page in list.page_window(max_buttons) {
        if page == list.current_page() {
            parts.push(format!("[{page}]"));
        } else {
            parts.push(page.to_string());
        }
    }
    if list.has_next() {
        parts.push("Next →".to_string());
    }
    writeln!(out, "{}", parts.join("  "))?;
    writeln!(
        out,
        "Page {} of {}",
        list.current_page(),
        list.total_pages()
    )
}

pub fn listing(
    out: &mut impl Write,
    source: &ProductSource,
    list: &ResultList<Product>,
    max_buttons: usize,
) -> io::Result<()> {
    listing_header(out, source, list)?;
    writeln!(out)?;
    product_grid(out, list.current_page_items())?;
    writeln!(out)?;
    pagination(out, list, max_buttons)
}

pub fn categories(out: &mut impl Write, categories: &[Category]) -> io::Result<()> {
    if categories.is_empty() {
        writeln!(out, "No Categories Available")?;
        return writeln!(out, "Categories will be available soon.");
    }
    for category in categories {
        writeln!(
            out,
            "{:<24} {}",
            format_category(category.slug()),
            category.slug()
        )?;
    }
    Ok(())
}
