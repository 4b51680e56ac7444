//! Shopping cart store.

use std::fmt;

use rust_decimal::Decimal;

use crate::menu::MenuItem;

/// One cart line, keyed by catalog item id.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item_id: String,
    pub name: String,
    pub unit_cost: Decimal,
    pub quantity: u32,
    pub special_instructions: Option<String>,
}

/// Snapshot handed to watchers after every mutation.
#[derive(Debug)]
pub struct CartView<'a> {
    pub lines: &'a [CartLine],
    pub total_items: u32,
    pub total_price: Decimal,
}

/// Handle for a registered cart watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartWatcherId(u64);

type Watcher = Box<dyn FnMut(&CartView<'_>) + Send>;

/// In-memory cart for the active session.
///
/// Totals are derived on every read, never cached, and nothing is
/// persisted; the cart dies with the session.
#[derive(Default)]
pub struct CartStore {
    lines: Vec<CartLine>,
    watchers: Vec<(CartWatcherId, Watcher)>,
    next_watcher: u64,
}

impl CartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `item`, merging into an existing line.
    pub fn add_item(&mut self, item: &MenuItem) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.item_id == item.id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine {
                item_id: item.id.clone(),
                name: item.name.clone(),
                unit_cost: item.cost,
                quantity: 1,
                special_instructions: None,
            });
        }

        self.notify();
    }

    /// Removes the line for `item_id` if present.
    pub fn remove_item(&mut self, item_id: &str) {
        self.lines.retain(|line| line.item_id != item_id);
        self.notify();
    }

    /// Sets a line's quantity exactly. Zero removes the line; unknown ids
    /// are ignored.
    pub fn update_quantity(&mut self, item_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove_item(item_id);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.item_id == item_id) {
            line.quantity = quantity;
        }

        self.notify();
    }

    /// Attaches note text to a line; unknown ids are ignored.
    pub fn set_instructions(&mut self, item_id: &str, instructions: Option<String>) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.item_id == item_id) {
            line.special_instructions = instructions;
        }

        self.notify();
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.notify();
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of line quantities.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Sum of unit cost times quantity over all lines.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines
            .iter()
            .map(|line| line.unit_cost * Decimal::from(line.quantity))
            .sum()
    }

    /// Registers a watcher invoked synchronously after every mutation.
    pub fn watch(&mut self, watcher: impl FnMut(&CartView<'_>) + Send + 'static) -> CartWatcherId {
        let id = CartWatcherId(self.next_watcher);
        self.next_watcher += 1;
        self.watchers.push((id, Box::new(watcher)));

        id
    }

    /// Drops a watcher; unknown handles are ignored.
    pub fn unwatch(&mut self, id: CartWatcherId) {
        self.watchers.retain(|(watcher_id, _)| *watcher_id != id);
    }

    fn notify(&mut self) {
        let total_items = self.total_items();
        let total_price = self.total_price();

        let view = CartView {
            lines: &self.lines,
            total_items,
            total_price,
        };

        for (_, watcher) in &mut self.watchers {
            watcher(&view);
        }
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .field("watchers", &self.watchers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rust_decimal_macros::dec;

    use super::*;

    fn espresso() -> MenuItem {
        MenuItem {
            id: "espresso".to_string(),
            name: "Espresso".to_string(),
            description: "Double shot".to_string(),
            cost: dec!(2.50),
            category: "coffee".to_string(),
            image: "espresso.jpg".to_string(),
        }
    }

    fn croissant() -> MenuItem {
        MenuItem {
            id: "croissant".to_string(),
            name: "Croissant".to_string(),
            description: "Plain butter croissant".to_string(),
            cost: dec!(3.10),
            category: "pastry".to_string(),
            image: "croissant.jpg".to_string(),
        }
    }

    #[test]
    fn adding_the_same_item_twice_merges_lines() {
        let mut cart = CartStore::new();

        cart.add_item(&espresso());
        cart.add_item(&espresso());

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn distinct_items_get_their_own_lines() {
        let mut cart = CartStore::new();

        cart.add_item(&espresso());
        cart.add_item(&croissant());

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn totals_are_exact_decimal_sums() {
        let mut cart = CartStore::new();
        let mut cheap = espresso();
        cheap.id = "tap-water".to_string();
        cheap.cost = dec!(0.10);
        let mut cheaper = croissant();
        cheaper.id = "biscuit".to_string();
        cheaper.cost = dec!(0.20);

        cart.add_item(&cheap);
        cart.add_item(&cheaper);

        assert_eq!(cart.total_price(), dec!(0.30));
    }

    #[test]
    fn update_quantity_sets_exactly() {
        let mut cart = CartStore::new();

        cart.add_item(&espresso());
        cart.update_quantity("espresso", 5);

        assert_eq!(cart.lines()[0].quantity, 5);
        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.total_price(), dec!(12.50));
    }

    #[test]
    fn update_quantity_to_zero_removes_the_line() {
        let mut cart = CartStore::new();

        cart.add_item(&espresso());
        cart.update_quantity("espresso", 0);

        assert!(cart.is_empty());
    }

    #[test]
    fn update_quantity_for_unknown_item_is_a_no_op() {
        let mut cart = CartStore::new();

        cart.add_item(&espresso());
        cart.update_quantity("ristretto", 4);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn remove_item_deletes_the_line() {
        let mut cart = CartStore::new();

        cart.add_item(&espresso());
        cart.add_item(&croissant());
        cart.remove_item("espresso");

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].item_id, "croissant");
    }

    #[test]
    fn set_instructions_attaches_to_the_line() {
        let mut cart = CartStore::new();

        cart.add_item(&espresso());
        cart.set_instructions("espresso", Some("extra hot".to_string()));

        assert_eq!(
            cart.lines()[0].special_instructions.as_deref(),
            Some("extra hot")
        );
    }

    #[test]
    fn clear_empties_everything() {
        let mut cart = CartStore::new();

        cart.add_item(&espresso());
        cart.add_item(&croissant());
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), Decimal::ZERO);
    }

    #[test]
    fn watchers_see_every_mutation_synchronously() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut cart = CartStore::new();
        cart.watch(move |view| {
            sink.lock()
                .expect("seen lock")
                .push((view.total_items, view.total_price));
        });

        cart.add_item(&espresso());
        cart.add_item(&espresso());
        cart.remove_item("espresso");

        let seen = seen.lock().expect("seen lock");
        assert_eq!(
            *seen,
            vec![
                (1, dec!(2.50)),
                (2, dec!(5.00)),
                (0, Decimal::ZERO),
            ]
        );
    }

    #[test]
    fn unwatch_stops_notifications() {
        let count = Arc::new(Mutex::new(0u32));
        let sink = Arc::clone(&count);

        let mut cart = CartStore::new();
        let id = cart.watch(move |_| *sink.lock().expect("count lock") += 1);

        cart.add_item(&espresso());
        cart.unwatch(id);
        cart.add_item(&espresso());

        assert_eq!(*count.lock().expect("count lock"), 1);
    }
}
