//! Plain-text rendering of cards, histograms and statistics

use recos_core::{CatalogItem, CategoryCount, PriceStats};
use recos_session::{format_price_stats, ItemCard, EMPTY_HINT, EMPTY_RESULTS};

const BAR_WIDTH: u64 = 40;

pub fn print_cards(items: &[CatalogItem]) {
    if items.is_empty() {
        println!("{}", EMPTY_RESULTS);
        println!("  {}", EMPTY_HINT);
        return;
    }

    for (position, item) in items.iter().enumerate() {
        print_card(position + 1, &ItemCard::from_item(item));
    }
}

pub fn print_card(position: usize, card: &ItemCard) {
    println!("{:>2}. {}  [{}]", position, card.title, card.badge);
    if !card.subtitle.is_empty() {
        println!("    {}", card.subtitle);
    }
    if let Some(image) = &card.image {
        println!("    {}", image);
    }
    println!("    id: {}", card.id);
}

pub fn print_histogram(counts: &[CategoryCount]) {
    println!("Products by Category");
    if counts.is_empty() {
        println!("  (no categories)");
        return;
    }

    let widest = counts.iter().map(|c| c.label.chars().count()).max().unwrap_or(0);
    let largest = counts.iter().map(|c| c.count).max().unwrap_or(0).max(1);

    for entry in counts {
        let bar = "#".repeat((entry.count * BAR_WIDTH / largest) as usize);
        println!("  {:<width$}  {:>6}  {}", entry.label, entry.count, bar, width = widest);
    }
}

pub fn print_price_stats(stats: &PriceStats) {
    println!();
    println!("Price Summary");
    println!("{}", format_price_stats(stats));
}
