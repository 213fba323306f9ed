//! The order-entry loop's state and command handling.
//!
//! One controller owns the roster, the cart being assembled and the
//! connection to the store. Each typed line becomes a [`Command`], and each
//! command yields an [`Outcome`] for the console to report. Only a failed
//! browser step or bad configuration produce [`Outcome::Failed`]; the loop
//! keeps going either way.

use crate::desktop::Desktop;
use outfitter_browser::Storefront;
use outfitter_core::checkout::{CheckoutForm, parse_confirmation_code};
use outfitter_core::config::Config;
use outfitter_core::order::{Command, OrderProgress, OrderState};
use outfitter_core::roster::{CartLine, GuestRecord, Lookup, Roster};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    GuestAdded {
        name: String,
        reservation: u64,
        items: usize,
        /// Reservation page shown for the first guest of an order
        opened_reference: bool,
        abandoned_checkout: bool,
    },
    NotFound(String),
    Ambiguous { name: String, count: usize },
    EndOfRoster,
    /// Shipping filled in; the operator verifies the address next
    CheckoutReady { guests: Vec<String> },
    OrderCompleted { code: String, copied: bool },
    /// Command not valid in the current state
    Rejected(String),
    Failed(String),
    Quit,
}

pub struct OrderController<S, D> {
    roster: Roster,
    config: Config,
    storefront: S,
    desktop: D,
    progress: OrderProgress,
}

impl<S: Storefront, D: Desktop> OrderController<S, D> {
    pub fn new(roster: Roster, config: Config, storefront: S, desktop: D) -> Self {
        Self {
            roster,
            config,
            storefront,
            desktop,
            progress: OrderProgress::new(),
        }
    }

    pub fn state(&self) -> OrderState {
        self.progress.state()
    }

    pub fn cart(&self) -> &[GuestRecord] {
        self.progress.cart()
    }

    pub async fn handle_line(&mut self, line: &str) -> Outcome {
        self.handle(Command::parse(line)).await
    }

    pub async fn handle(&mut self, command: Command) -> Outcome {
        match command {
            Command::Checkout => self.checkout().await,
            Command::Complete => self.complete().await,
            Command::Next => match self.roster.next_after(self.progress.last_index()) {
                Some(guest) => {
                    let guest = guest.clone();
                    self.add_guest(guest).await
                }
                None => Outcome::EndOfRoster,
            },
            Command::Quit => Outcome::Quit,
            Command::Guest(name) => match self.roster.lookup(&name) {
                Lookup::Found(guest) => {
                    let guest = guest.clone();
                    self.add_guest(guest).await
                }
                Lookup::NotFound => Outcome::NotFound(name),
                Lookup::Ambiguous(count) => Outcome::Ambiguous { name, count },
            },
        }
    }

    async fn add_guest(&mut self, guest: GuestRecord) -> Outcome {
        self.progress.mark_visited(guest.index);

        // Resolve every product page first so a config gap leaves the cart untouched
        let lines = match self.resolve_pages(&guest) {
            Ok(lines) => lines,
            Err(message) => return Outcome::Failed(message),
        };

        let added = self.progress.add_guest(guest.clone());
        if added.abandoned_checkout {
            tracing::warn!("Dropping the checkout that was waiting for billing");
        }

        let mut opened_reference = false;
        if added.first_in_order {
            let url = self.config.reservation_url(guest.reservation);
            match self.desktop.open_reference(&url) {
                Ok(()) => opened_reference = true,
                Err(e) => tracing::warn!("Could not open reservation page: {:#}", e),
            }
        }

        for (line, page) in &lines {
            if let Err(e) = self.storefront.add_to_cart(page, &line.size_code).await {
                return Outcome::Failed(format!(
                    "Adding {} ({}) for {} failed: {}",
                    line.category, line.size_code, guest.name, e
                ));
            }
            tracing::info!("Added {} ({}) for {}", line.category, line.size_code, guest.name);
        }

        Outcome::GuestAdded {
            name: guest.name,
            reservation: guest.reservation,
            items: lines.len(),
            opened_reference,
            abandoned_checkout: added.abandoned_checkout,
        }
    }

    fn resolve_pages(&self, guest: &GuestRecord) -> Result<Vec<(CartLine, Url)>, String> {
        guest
            .cart_lines()
            .into_iter()
            .map(|line| match self.config.product_page(&line.page_key) {
                Some(page) => Ok((line, page.clone())),
                None => Err(format!(
                    "No product page configured for '{}' (needed for {})",
                    line.page_key, guest.name
                )),
            })
            .collect()
    }

    async fn checkout(&mut self) -> Outcome {
        let guests = match self.progress.begin_checkout() {
            Ok(guests) => guests,
            Err(e) => return Outcome::Rejected(e.to_string()),
        };

        let prepared = CheckoutForm::build(&guests, &self.config)
            .and_then(|form| Ok((form, self.config.cart_url()?)));
        let (form, cart_url) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => {
                self.progress.checkout_failed();
                return Outcome::Failed(e.to_string());
            }
        };

        if let Err(e) = self.storefront.fill_shipping(&cart_url, &form).await {
            self.progress.checkout_failed();
            return Outcome::Failed(format!("Checkout failed: {}", e));
        }

        self.progress.checkout_succeeded();
        Outcome::CheckoutReady {
            guests: guests.into_iter().map(|g| g.name).collect(),
        }
    }

    async fn complete(&mut self) -> Outcome {
        if let Err(e) = self.progress.ensure_can_complete() {
            return Outcome::Rejected(e.to_string());
        }

        let text = match self.storefront.complete_order(&self.config.billing).await {
            Ok(text) => text,
            Err(e) => return Outcome::Failed(format!("Completing the order failed: {}", e)),
        };

        // Submitted either way; never allow a second submit of the same checkout
        self.progress.completion_succeeded();

        let Some(code) = parse_confirmation_code(&text) else {
            return Outcome::Failed(format!(
                "Order submitted but no confirmation code found in '{}'",
                text.trim()
            ));
        };

        let copied = match self.desktop.copy_to_clipboard(&code) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("{:#}", e);
                false
            }
        };

        Outcome::OrderCompleted { code, copied }
    }
}
