//! Built-in menu and sample orders, used when no order file is given.

use crate::domain::cart::{Cart, LineDetails};
use crate::domain::customer::CustomerInfo;
use crate::domain::menu::MenuItem;
use crate::domain::money::Money;
use crate::domain::order::Order;
use crate::error::{OrderError, Result};
use chrono::NaiveDate;

pub fn default_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new(1, "California Roll", "Sushi", Money::from_cents(250)),
        MenuItem::new(2, "Salmon Plain Roll", "Sushi", Money::from_cents(150)),
        MenuItem::new(3, "Prawn Rice and Seaweed ball", "Sushi", Money::from_cents(350)),
        MenuItem::new(4, "Salmon Sushi Mix Platter", "Sushi", Money::from_cents(5499)),
    ]
}

struct DemoOrder {
    student: &'static str,
    room: &'static str,
    school: &'static str,
    date: &'static str,
    menu_id: u32,
    quantity: i32,
    customizations: &'static [&'static str],
}

const DEMO_ORDERS: &[DemoOrder] = &[
    DemoOrder {
        student: "Tim Serrano",
        room: "Room 420 - Serena Serrano",
        school: "Kelston Boys High School",
        date: "2025-10-02",
        menu_id: 4,
        quantity: 3,
        customizations: &["Extra Kewpie Mayo Sauce"],
    },
    DemoOrder {
        student: "Eroh Chae",
        room: "Room 01 - Carol Chae",
        school: "Equippers School",
        date: "2025-10-20",
        menu_id: 3,
        quantity: 1,
        customizations: &["No Prawns"],
    },
];

/// Two already-paid orders against [`default_menu`].
pub fn demo_orders() -> Result<Vec<Order>> {
    let menu = default_menu();
    DEMO_ORDERS
        .iter()
        .enumerate()
        .map(|(i, demo)| {
            let item = menu
                .iter()
                .find(|item| item.id == demo.menu_id)
                .ok_or(OrderError::UnknownMenuItem(demo.menu_id))?;
            let date: NaiveDate = demo.date.parse()?;

            let mut cart = Cart::default();
            cart.add(
                item,
                demo.quantity,
                LineDetails::new(demo.student, demo.room, date)
                    .with_customizations(demo.customizations.iter().copied()),
            )?;
            Order::freeze(
                &cart,
                CustomerInfo::default(),
                format!("demo_{}", i + 1),
                Some(demo.school.to_string()),
                date,
            )
        })
        .collect()
}
