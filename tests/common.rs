//! Common test utilities for building specification snapshots and events.
use nagare::prelude::*;

/// Welcome -> List <-> Add Item. No dead ends, no orphans, one cycle.
#[allow(dead_code)]
pub fn todo_spec() -> SpecSnapshot {
    SpecSnapshot::new()
        .screen("welcome", "Welcome", Some("entry"), &["start"])
        .screen("list", "List", None, &["add"])
        .screen("add", "Add Item", Some("form"), &["save"])
        .transition("Welcome", "start", "List")
        .transition("List", "add", "Add Item")
        .transition("Add Item", "save", "List")
}

/// Home -> Detail, where Detail exposes no actions at all.
#[allow(dead_code)]
pub fn dead_end_spec() -> SpecSnapshot {
    SpecSnapshot::new()
        .screen("home", "Home", None, &["open"])
        .screen("detail", "Detail", None, &[])
        .transition("Home", "open", "Detail")
}

/// A single screen with no transitions.
#[allow(dead_code)]
pub fn single_screen_spec() -> SpecSnapshot {
    SpecSnapshot::new().screen("only", "Only", None, &[])
}

/// Eight screens across several kinds, enough to trigger clustered placement.
#[allow(dead_code)]
pub fn shop_spec() -> SpecSnapshot {
    SpecSnapshot::new()
        .screen("login", "Login", Some("entry"), &["login"])
        .screen("home", "Home", Some("navigation"), &["browse", "cart"])
        .screen("catalog", "Catalog", Some("list"), &["open"])
        .screen("product", "Product", Some("detail"), &["add to cart"])
        .screen("cart", "Cart", Some("content"), &["checkout"])
        .screen("address", "Address", Some("form"), &["confirm"])
        .screen("payment", "Payment", Some("form"), &["pay"])
        .screen("thanks", "Thanks", Some("success"), &["home"])
        .transition("Login", "login", "Home")
        .transition("Home", "browse", "Catalog")
        .transition("Home", "cart", "Cart")
        .transition("Catalog", "open", "Product")
        .transition("Product", "add to cart", "Cart")
        .transition("Cart", "checkout", "Address")
        .transition("Address", "confirm", "Payment")
        .transition("Payment", "pay", "Thanks")
        .transition("Thanks", "home", "Home")
}

#[allow(dead_code)]
pub fn build(spec: SpecSnapshot) -> Graph {
    Graph::builder(spec).build().expect("fixture spec should build")
}

#[allow(dead_code)]
pub fn interaction(action: &str, from: &str, to: &str, timestamp: u64) -> InteractionEvent {
    InteractionEvent {
        action_label: action.to_string(),
        from_screen: from.to_string(),
        to_screen: to.to_string(),
        timestamp,
    }
}
