//! First-run seed catalog.

use albarka_core::{Price, ProductId, Rating};
use rust_decimal::dec;

use crate::models::Product;

fn rating(value: f32) -> Option<Rating> {
    Rating::new(value).ok()
}

/// The products a fresh store starts with.
///
/// Used when nothing usable is stored under the catalog key (first run or
/// corrupt content) and seeding is enabled in the config.
#[must_use]
pub fn products() -> Vec<Product> {
    let entries = [
        (
            1,
            "Wireless Headphones",
            "Over-ear headphones with active noise cancellation and 30-hour battery life.",
            "electronics",
            dec!(89.99),
            12,
            4.5,
            128,
        ),
        (
            2,
            "Mechanical Keyboard",
            "Tenkeyless mechanical keyboard with hot-swappable switches.",
            "electronics",
            dec!(74.50),
            8,
            4.7,
            86,
        ),
        (
            3,
            "Ceramic Pour-Over Set",
            "Hand-glazed ceramic dripper with matching carafe.",
            "home",
            dec!(32.00),
            15,
            4.8,
            54,
        ),
        (
            4,
            "Linen Throw Blanket",
            "Stonewashed linen blanket, 130x170cm.",
            "home",
            dec!(45.00),
            20,
            4.3,
            41,
        ),
        (
            5,
            "Canvas Weekender Bag",
            "Waxed canvas duffel with leather trim and brass hardware.",
            "accessories",
            dec!(120.00),
            5,
            4.6,
            73,
        ),
        (
            6,
            "Insulated Water Bottle",
            "750ml double-walled stainless bottle, keeps drinks cold for 24 hours.",
            "accessories",
            dec!(24.95),
            30,
            4.4,
            210,
        ),
        (
            7,
            "Organic Cotton Tee",
            "Mid-weight crew neck tee in organic cotton.",
            "clothing",
            dec!(18.00),
            40,
            4.2,
            95,
        ),
        (
            8,
            "Merino Beanie",
            "Ribbed merino wool beanie, one size.",
            "clothing",
            dec!(22.50),
            25,
            4.5,
            38,
        ),
    ];

    entries
        .into_iter()
        .map(
            |(id, name, description, category, price, quantity, stars, reviews)| Product {
                id: ProductId::new(id),
                name: name.to_owned(),
                description: description.to_owned(),
                category: category.to_owned(),
                price: Price::new(price),
                quantity,
                picture: None,
                rating: rating(stars),
                review_count: Some(reviews),
            },
        )
        .collect()
}
