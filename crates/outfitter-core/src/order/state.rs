use crate::roster::GuestRecord;
use crate::{Error, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderState {
    /// Guests are being added to the cart
    Accumulating,
    /// Shipping details are being filled in
    CheckingOut,
    /// Shipping step done; waiting for the operator to confirm the address
    AwaitingBilling,
    /// Order submitted
    Complete,
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderState::Accumulating => "accumulating",
            OrderState::CheckingOut => "checking out",
            OrderState::AwaitingBilling => "awaiting billing",
            OrderState::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// What happened when a guest joined the cart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOutcome {
    /// First guest of a new order
    pub first_in_order: bool,
    /// A checkout was waiting for billing and has been dropped
    pub abandoned_checkout: bool,
}

/// The cart being assembled plus where the current order stands
#[derive(Debug, Clone)]
pub struct OrderProgress {
    state: OrderState,
    cart: Vec<GuestRecord>,
    last_index: Option<usize>,
}

impl Default for OrderProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderProgress {
    pub fn new() -> Self {
        Self {
            state: OrderState::Accumulating,
            cart: Vec::new(),
            last_index: None,
        }
    }

    pub fn state(&self) -> OrderState {
        self.state
    }

    pub fn cart(&self) -> &[GuestRecord] {
        &self.cart
    }

    /// Roster position of the most recently added guest, across orders
    pub fn last_index(&self) -> Option<usize> {
        self.last_index
    }

    /// Record a resolved roster row so `next` moves past it even if the
    /// guest never makes it into the cart
    pub fn mark_visited(&mut self, index: usize) {
        self.last_index = Some(index);
    }

    pub fn add_guest(&mut self, guest: GuestRecord) -> AddOutcome {
        let abandoned_checkout = self.state == OrderState::AwaitingBilling;
        if self.state != OrderState::Accumulating {
            tracing::debug!("Starting a new order (was {})", self.state);
            self.state = OrderState::Accumulating;
        }

        self.last_index = Some(guest.index);
        self.cart.push(guest);

        AddOutcome {
            first_in_order: self.cart.len() == 1,
            abandoned_checkout,
        }
    }

    /// Move to checkout, returning the guests whose names go on the order
    pub fn begin_checkout(&mut self) -> Result<Vec<GuestRecord>> {
        if self.cart.is_empty() {
            return Err(Error::InvalidState(
                "cart is empty; add a guest before checking out".to_string(),
            ));
        }
        if self.state != OrderState::Accumulating {
            return Err(Error::InvalidState(format!(
                "cannot check out while {}",
                self.state
            )));
        }

        self.state = OrderState::CheckingOut;
        Ok(self.cart.clone())
    }

    /// Shipping step filled; the cart starts over for the next order
    pub fn checkout_succeeded(&mut self) {
        self.cart.clear();
        self.state = OrderState::AwaitingBilling;
    }

    /// Shipping step failed; the cart is kept so checkout can be retried
    pub fn checkout_failed(&mut self) {
        self.state = OrderState::Accumulating;
    }

    /// Completion is only allowed after a checkout in this session
    pub fn ensure_can_complete(&self) -> Result<()> {
        match self.state {
            OrderState::AwaitingBilling => Ok(()),
            state => Err(Error::InvalidState(format!(
                "no checkout in progress (order is {})",
                state
            ))),
        }
    }

    pub fn completion_succeeded(&mut self) {
        self.state = OrderState::Complete;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::GearSizes;

    fn guest(index: usize, name: &str) -> GuestRecord {
        GuestRecord {
            index,
            reservation: 10 + index as u64,
            name: name.to_string(),
            address: String::new(),
            country: "USA".to_string(),
            sex: "Men".to_string(),
            sizes: GearSizes::default(),
            notes: None,
            gear_ordered: None,
        }
    }

    #[test]
    fn test_full_order_cycle() {
        let mut progress = OrderProgress::new();
        assert_eq!(progress.state(), OrderState::Accumulating);

        let first = progress.add_guest(guest(3, "A A"));
        assert!(first.first_in_order);
        let second = progress.add_guest(guest(4, "B B"));
        assert!(!second.first_in_order);
        assert_eq!(progress.last_index(), Some(4));

        let guests = progress.begin_checkout().unwrap();
        assert_eq!(guests.len(), 2);
        assert_eq!(progress.state(), OrderState::CheckingOut);

        progress.checkout_succeeded();
        assert!(progress.cart().is_empty());
        assert_eq!(progress.state(), OrderState::AwaitingBilling);

        progress.ensure_can_complete().unwrap();
        progress.completion_succeeded();
        assert_eq!(progress.state(), OrderState::Complete);

        // The next guest opens a new order and keeps the roster position
        let next = progress.add_guest(guest(5, "C C"));
        assert!(next.first_in_order);
        assert!(!next.abandoned_checkout);
        assert_eq!(progress.state(), OrderState::Accumulating);
        assert_eq!(progress.last_index(), Some(5));
    }

    #[test]
    fn test_visited_guest_moves_position_without_joining_cart() {
        let mut progress = OrderProgress::new();
        progress.mark_visited(2);

        assert_eq!(progress.last_index(), Some(2));
        assert!(progress.cart().is_empty());
        assert_eq!(progress.state(), OrderState::Accumulating);
    }

    #[test]
    fn test_checkout_requires_guests() {
        let mut progress = OrderProgress::new();
        assert!(progress.begin_checkout().is_err());
        assert_eq!(progress.state(), OrderState::Accumulating);
    }

    #[test]
    fn test_complete_requires_checkout() {
        let mut progress = OrderProgress::new();
        assert!(progress.ensure_can_complete().is_err());

        progress.add_guest(guest(0, "A A"));
        let err = progress.ensure_can_complete().unwrap_err();
        assert!(err.to_string().contains("no checkout in progress"));
    }

    #[test]
    fn test_failed_checkout_keeps_cart() {
        let mut progress = OrderProgress::new();
        progress.add_guest(guest(0, "A A"));
        progress.begin_checkout().unwrap();
        progress.checkout_failed();

        assert_eq!(progress.state(), OrderState::Accumulating);
        assert_eq!(progress.cart().len(), 1);
        assert!(progress.begin_checkout().is_ok());
    }

    #[test]
    fn test_adding_guest_abandons_pending_billing() {
        let mut progress = OrderProgress::new();
        progress.add_guest(guest(0, "A A"));
        progress.begin_checkout().unwrap();
        progress.checkout_succeeded();

        let outcome = progress.add_guest(guest(1, "B B"));
        assert!(outcome.abandoned_checkout);
        assert!(outcome.first_in_order);
        assert!(progress.ensure_can_complete().is_err());
    }
}
