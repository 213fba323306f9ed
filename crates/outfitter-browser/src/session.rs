use crate::{Error, Result};
use chromiumoxide::browser::Browser;
use chromiumoxide::page::Page;
use futures::StreamExt;
use outfitter_core::handoff::SessionHandoff;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_RETRY_DELAY: Duration = Duration::from_millis(500);
const PAGE_DISCOVERY_TIMEOUT: Duration = Duration::from_secs(5);
const PAGE_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A live connection to a Chrome that some other process started.
///
/// Dropping the session disconnects but leaves Chrome and its pages running.
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    endpoint: String,
    handler_task: JoinHandle<()>,
}

impl BrowserSession {
    /// Reattach to the page recorded in a handoff file
    pub async fn attach(handoff: &SessionHandoff) -> Result<Self> {
        let (mut browser, handler_task) = connect(&handoff.endpoint).await?;

        // Tabs opened before this connection are only tracked once fetched
        let targets = browser.fetch_targets().await?;
        tracing::debug!("Browser reports {} targets", targets.len());

        let deadline = Instant::now() + PAGE_DISCOVERY_TIMEOUT;
        let page = loop {
            let pages = browser.pages().await?;
            let ids: Vec<&str> = pages.iter().map(|p| p.target_id().inner().as_str()).collect();

            match choose_page(&ids, &handoff.session_id, Instant::now() >= deadline) {
                PageChoice::Saved(i) => break pages[i].clone(),
                PageChoice::Fallback(i) => {
                    tracing::warn!(
                        "Page {} is gone, using the first open page instead",
                        handoff.session_id
                    );
                    break pages[i].clone();
                }
                PageChoice::Wait => {
                    tracing::debug!("Waiting for page {} ({} attached)", handoff.session_id, ids.len());
                    tokio::time::sleep(PAGE_POLL_INTERVAL).await;
                }
                PageChoice::NoPages => {
                    handler_task.abort();
                    return Err(Error::Attach(format!("no open pages at {}", handoff.endpoint)));
                }
            }
        };

        tracing::info!("Attached to page {}", page.target_id().inner());

        Ok(Self {
            browser,
            page,
            endpoint: handoff.endpoint.clone(),
            handler_task,
        })
    }

    /// Connect to a freshly launched Chrome and open `url` in its first tab
    pub async fn open(endpoint: &str, url: &str) -> Result<Self> {
        let (mut browser, handler_task) = connect(endpoint).await?;

        // Chrome creates its initial tab shortly after the debugger is up
        tokio::time::sleep(CONNECT_RETRY_DELAY).await;
        browser.fetch_targets().await?;

        let page = match browser.pages().await?.into_iter().next() {
            Some(page) => {
                page.goto(url).await?;
                page
            }
            None => browser.new_page(url).await?,
        };

        Ok(Self {
            browser,
            page,
            endpoint: endpoint.to_string(),
            handler_task,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// What another process needs to find this same page again
    pub fn handoff(&self) -> SessionHandoff {
        SessionHandoff::new(self.endpoint.clone(), self.page.target_id().inner().clone())
    }

    pub fn websocket_address(&self) -> &str {
        self.browser.websocket_address()
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}

#[derive(Debug, PartialEq, Eq)]
enum PageChoice {
    /// The page named in the handoff file
    Saved(usize),
    /// Saved page never showed up; use this one
    Fallback(usize),
    /// Pages are still being attached
    Wait,
    NoPages,
}

/// Pick among the currently attached page ids. Pages of an existing browser
/// attach one by one, so the fallback only applies once `timed_out`.
fn choose_page(ids: &[&str], wanted: &str, timed_out: bool) -> PageChoice {
    if let Some(i) = ids.iter().position(|id| *id == wanted) {
        PageChoice::Saved(i)
    } else if !timed_out {
        PageChoice::Wait
    } else if ids.is_empty() {
        PageChoice::NoPages
    } else {
        PageChoice::Fallback(0)
    }
}

/// Connect with retries (Chrome may still be starting) and spawn the CDP
/// handler, which must keep running for any page command to complete.
async fn connect(endpoint: &str) -> Result<(Browser, JoinHandle<()>)> {
    let mut attempts_left = CONNECT_ATTEMPTS;
    let (browser, mut handler) = loop {
        tracing::debug!("Connecting to {}...", endpoint);
        match Browser::connect(endpoint).await {
            Ok(connected) => break connected,
            Err(e) => {
                attempts_left -= 1;
                if attempts_left == 0 {
                    return Err(Error::Attach(format!(
                        "{} unreachable after {} attempts: {}",
                        endpoint, CONNECT_ATTEMPTS, e
                    )));
                }
                tracing::debug!("Connection failed, retrying ({} left)", attempts_left);
                tokio::time::sleep(CONNECT_RETRY_DELAY).await;
            }
        }
    };

    let handler_task = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                tracing::debug!("CDP handler event error (continuing): {}", e);
            }
        }
    });

    tracing::info!("Connected to browser at {}", endpoint);
    Ok((browser, handler_task))
}
