#![allow(dead_code)]

use chrono::NaiveDate;
use std::io::Write;
use tempfile::NamedTempFile;
use tuckshop::domain::cart::{Cart, LineDetails};
use tuckshop::domain::menu::MenuItem;
use tuckshop::infrastructure::seed::default_menu;

pub const CART_HEADER: &str = "menu_id,quantity,student,room,delivery_date,customizations,notes";

/// Writes a cart CSV with the standard header followed by `rows`.
pub fn cart_file(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", CART_HEADER).unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    file.flush().unwrap();
    file
}

pub fn menu_item(id: u32) -> MenuItem {
    default_menu().into_iter().find(|item| item.id == id).unwrap()
}

pub fn delivery_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 20).unwrap()
}

/// A cart holding `quantity` of menu item `id` with the given customizations.
pub fn cart_of(id: u32, quantity: i32, customizations: &[&str]) -> Cart {
    let mut cart = Cart::default();
    cart.add(
        &menu_item(id),
        quantity,
        LineDetails::new("Eroh Chae", "Room 01", delivery_date())
            .with_customizations(customizations.iter().copied()),
    )
    .unwrap();
    cart
}
