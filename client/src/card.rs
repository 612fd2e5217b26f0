//! View model for a catalogue card

use uuid::Uuid;

use crate::labels::{format_price, stars};
use crate::models::{Listing, UserProfile};

pub const PLACEHOLDER_IMAGE: &str = "assets/no-image.jpg";
const DEFAULT_SELLER_INITIAL: char = 'П';
const DEFAULT_SELLER_NAME: &str = "Продавец";

/// Everything a product card renders, already formatted
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub id: Uuid,
    pub title: String,
    /// e.g. `1 500 ₽`
    pub price_label: String,
    pub category_label: &'static str,
    pub rarity_label: &'static str,
    pub condition_label: &'static str,
    pub year_label: Option<String>,
    pub image: String,
    pub seller_id: Uuid,
    pub seller_name: String,
    pub seller_initial: char,
    pub seller_stars: String,
    pub seller_rating: String,
    pub seller_reviews_count: i32,
    pub is_favorite: bool,
    /// The viewer owns the listing and may edit or delete it
    pub show_owner_actions: bool,
    /// `https://t.me/<username>` when the seller has a public username
    pub contact_link: Option<String>,
}

impl ProductCard {
    pub fn new(listing: &Listing, viewer: Option<&UserProfile>) -> Self {
        let product = &listing.product;
        let seller = &listing.seller;

        let first_name = seller.first_name.trim();
        let seller_name = if first_name.is_empty() {
            DEFAULT_SELLER_NAME.to_string()
        } else {
            match seller.last_name.as_deref().map(str::trim) {
                Some(last) if !last.is_empty() => format!("{} {}", first_name, last),
                _ => first_name.to_string(),
            }
        };

        Self {
            id: product.id,
            title: product.title.clone(),
            price_label: format!("{} ₽", format_price(product.price)),
            category_label: product.category.label(),
            rarity_label: product.rarity.label(),
            condition_label: product.condition.label(),
            year_label: product.year.map(|year| format!("{} г.", year)),
            image: product
                .images
                .first()
                .filter(|url| !url.trim().is_empty())
                .cloned()
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            seller_id: seller.id,
            seller_name,
            seller_initial: first_name.chars().next().unwrap_or(DEFAULT_SELLER_INITIAL),
            seller_stars: stars(seller.rating),
            seller_rating: format!("{:.2}", seller.rating),
            seller_reviews_count: seller.reviews_count,
            is_favorite: viewer.is_some() && listing.is_favorite,
            show_owner_actions: viewer.is_some_and(|user| user.id == seller.id),
            contact_link: seller
                .username
                .as_deref()
                .map(|name| name.trim().trim_start_matches('@'))
                .filter(|name| !name.is_empty())
                .map(|name| format!("https://t.me/{}", name)),
        }
    }
}
