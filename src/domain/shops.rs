/// Shops suggested to users who want to keep spending down.
pub const BUDGET_FRIENDLY_SHOPS: [&str; 4] = [
    "Shop Smart",
    "Budget Bazaar",
    "Thrifty Mart",
    "SaveMore Superstore",
];
