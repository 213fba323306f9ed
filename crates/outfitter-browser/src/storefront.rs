//! Driving the store's product, cart and checkout pages.

use crate::{Error, Result};
use async_trait::async_trait;
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use outfitter_core::checkout::CheckoutForm;
use outfitter_core::config::{BillingAddress, Timings};
use std::fmt;
use std::time::Duration;
use tokio::time::{Instant, sleep};
use url::Url;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Saved-address dropdown options: any other saved address, then "new address".
/// Switching away first makes the store clear the form fields.
const OTHER_SAVED_ADDRESS: &str = "4";
const NEW_ADDRESS: &str = "5";

const BILLING_COUNTRY: &str = "US";

/// The store operations an order needs
#[async_trait]
pub trait Storefront: Send {
    /// Open a product page, pick a size and wait for the cart drawer
    async fn add_to_cart(&mut self, product_page: &Url, size_code: &str) -> Result<()>;

    /// Go to checkout and fill everything up to the shipping address
    async fn fill_shipping(&mut self, cart_url: &Url, form: &CheckoutForm) -> Result<()>;

    /// Enter the billing address, submit, and return the confirmation text
    async fn complete_order(&mut self, billing: &BillingAddress) -> Result<String>;
}

/// How to find an element on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Css(String),
    XPath(String),
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    pub fn xpath(expression: impl Into<String>) -> Self {
        Locator::XPath(expression.into())
    }

    pub fn by_name(name: &str) -> Self {
        Locator::Css(format!("[name=\"{}\"]", name))
    }

    pub fn by_id(id: &str) -> Self {
        Locator::Css(format!("[id=\"{}\"]", id))
    }

    /// Clickable wrapper around the size radio button with this value
    pub fn size_option(size_code: &str) -> Self {
        Locator::XPath(format!("//input[@value=\"{}\"]/..", size_code))
    }

    /// Label wrapping a span with exactly this text
    pub fn label_for_span(text: &str) -> Self {
        Locator::XPath(format!("//span[text()=\"{}\"]/../..", text))
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(s) => write!(f, "css `{}`", s),
            Locator::XPath(x) => write!(f, "xpath `{}`", x),
        }
    }
}

/// [`Storefront`] over a CDP page
pub struct CdpStorefront {
    page: Page,
    timings: Timings,
}

impl CdpStorefront {
    pub fn new(page: Page, timings: Timings) -> Self {
        Self { page, timings }
    }

    /// Poll for an element until the implicit wait runs out
    async fn find(&self, locator: &Locator) -> Result<Element> {
        let deadline = Instant::now() + self.timings.implicit_wait();
        loop {
            let found = match locator {
                Locator::Css(selector) => self.page.find_element(selector.clone()).await,
                Locator::XPath(expression) => self.page.find_xpath(expression.clone()).await,
            };

            match found {
                Ok(element) => return Ok(element),
                Err(e) if Instant::now() >= deadline => {
                    return Err(Error::ElementNotFound {
                        locator: locator.to_string(),
                        reason: e.to_string(),
                    });
                }
                Err(_) => sleep(POLL_INTERVAL).await,
            }
        }
    }

    async fn click(&self, locator: &Locator) -> Result<()> {
        tracing::debug!("click {}", locator);
        self.find(locator).await?.click().await?;
        Ok(())
    }

    async fn type_into(&self, locator: &Locator, text: &str) -> Result<()> {
        tracing::debug!("type into {}", locator);
        let element = self.find(locator).await?;
        element.click().await?;
        element.type_str(text).await?;
        Ok(())
    }

    /// Set a `<select>` the way a user would, so the page's change handlers run
    async fn select_value(&self, locator: &Locator, value: &str) -> Result<()> {
        tracing::debug!("select '{}' in {}", value, locator);
        let element = self.find(locator).await?;
        let function = format!(
            "function() {{
                const setter = Object.getOwnPropertyDescriptor(HTMLSelectElement.prototype, 'value').set;
                setter.call(this, {value});
                this.dispatchEvent(new Event('input', {{ bubbles: true }}));
                this.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return this.value;
            }}",
            value = serde_json::to_string(value).map_err(|e| Error::Script(e.to_string()))?
        );

        let returned = element.call_js_fn(function, false).await?;
        let selected = returned
            .result
            .value
            .as_ref()
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        if selected != value {
            return Err(Error::Page(format!(
                "option '{}' not available in {}",
                value, locator
            )));
        }
        Ok(())
    }

    /// The saved-address dropdown is found through the label around its caption
    async fn reset_saved_address(&self) -> Result<()> {
        let label_locator = Locator::label_for_span("Saved addresses");
        let label = self.find(&label_locator).await?;
        let select_id = label.attribute("for").await?.ok_or_else(|| {
            Error::Page("saved address label has no 'for' attribute".to_string())
        })?;

        let select = Locator::by_id(&select_id);
        self.select_value(&select, OTHER_SAVED_ADDRESS).await?;
        self.select_value(&select, NEW_ADDRESS).await
    }

    async fn goto(&self, url: &Url) -> Result<()> {
        tracing::debug!("navigate to {}", url);
        self.page.goto(url.as_str()).await?;
        Ok(())
    }
}

#[async_trait]
impl Storefront for CdpStorefront {
    async fn add_to_cart(&mut self, product_page: &Url, size_code: &str) -> Result<()> {
        self.goto(product_page).await?;
        sleep(self.timings.page_load_wait()).await;

        self.click(&Locator::size_option(size_code)).await?;
        sleep(self.timings.add_to_cart_wait()).await;

        self.click(&Locator::by_id("addToCart-product")).await?;
        // The drawer opening is the store's acknowledgement
        self.find(&Locator::css(".cart-dropdown.is-open")).await?;
        sleep(self.timings.cart_process_wait()).await;

        Ok(())
    }

    async fn fill_shipping(&mut self, cart_url: &Url, form: &CheckoutForm) -> Result<()> {
        self.goto(cart_url).await?;
        self.click(&Locator::by_name("checkout")).await?;
        self.page.wait_for_navigation().await?;

        self.reset_saved_address().await?;
        self.select_value(&Locator::by_name("countryCode"), &form.country_code)
            .await?;

        self.type_into(&Locator::by_name("firstName"), &form.first_names)
            .await?;
        self.type_into(&Locator::by_name("lastName"), &form.last_names)
            .await?;

        let discount = self.find(&Locator::by_name("reductions")).await?;
        discount.click().await?;
        discount.type_str(&form.discount_code).await?;
        discount.press_key("Enter").await?;

        self.type_into(&Locator::by_id("shipping-address1"), &form.address)
            .await
    }

    async fn complete_order(&mut self, billing: &BillingAddress) -> Result<String> {
        self.click(&Locator::by_id("billing_address_selector-custom"))
            .await?;

        self.reset_saved_address().await?;
        self.select_value(&Locator::by_name("countryCode"), BILLING_COUNTRY)
            .await?;

        self.type_into(&Locator::by_name("firstName"), &billing.first_name)
            .await?;
        self.type_into(&Locator::by_name("lastName"), &billing.last_name)
            .await?;
        self.type_into(&Locator::by_name("company"), &billing.company)
            .await?;
        self.type_into(&Locator::by_id("billing-address1"), &billing.address)
            .await?;
        self.type_into(&Locator::by_name("city"), &billing.city).await?;
        self.select_value(&Locator::by_name("zone"), &billing.state)
            .await?;
        self.type_into(&Locator::by_name("postalCode"), &billing.zip_code)
            .await?;

        self.click(&Locator::xpath("//span[text()=\"Complete order\"]/.."))
            .await?;

        let confirmation = self
            .find(&Locator::xpath(
                "//p[contains(text(), \"Confirmation #\")]",
            ))
            .await?;
        confirmation
            .inner_text()
            .await?
            .ok_or_else(|| Error::Page("confirmation paragraph has no text".to_string()))
    }
}
