use crate::controller::{OrderController, Outcome};
use crate::desktop::SystemDesktop;
use anyhow::{Context, Result};
use console::style;
use outfitter_browser::{BrowserSession, CdpStorefront};
use outfitter_core::config::Config;
use outfitter_core::handoff::SessionHandoff;
use outfitter_core::roster::RosterReader;
use std::io::{self, Write};
use std::path::Path;

const PROMPT: &str = "Enter name / enter to check out / \"c\" to complete order / \"n\" for next name / \"q\" to quit:";

/// Attach to the launched browser and run the order-entry loop
pub fn execute(config_path: &Path, roster_path: &Path, handoff_path: &Path) -> Result<()> {
    let config = Config::from_file(config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;
    let roster = RosterReader::from_file(roster_path)
        .with_context(|| format!("Failed to load roster from {}", roster_path.display()))?;
    let handoff = SessionHandoff::read(handoff_path).with_context(|| {
        format!(
            "Failed to read session from {} (run `outfitter open` first)",
            handoff_path.display()
        )
    })?;

    println!("📋 Loaded {} guests", roster.len());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(async {
        let session = BrowserSession::attach(&handoff).await?;
        println!("🔗 Attached to {} (page {})", handoff.endpoint, handoff.session_id);

        let storefront = CdpStorefront::new(session.page().clone(), config.timings.clone());
        let desktop = SystemDesktop::new(config.reference_browser.clone());
        let mut controller = OrderController::new(roster, config, storefront, desktop);

        while let Some(line) = read_command().await? {
            let outcome = controller.handle_line(&line).await;
            if outcome == Outcome::Quit {
                break;
            }
            if let Some(message) = render(&outcome) {
                println!("{}\n", message);
            }
        }

        // The session (and its CDP handler) must outlive the loop
        drop(session);
        println!("👋 Bye");
        Ok::<_, anyhow::Error>(())
    });

    runtime.shutdown_timeout(std::time::Duration::from_millis(100));
    result
}

/// Prompt and read one line; `None` at end of input
async fn read_command() -> Result<Option<String>> {
    println!("{}", style(PROMPT).bold());
    io::stdout().flush()?;

    let line = tokio::task::spawn_blocking(|| {
        let mut input = String::new();
        let read = io::stdin().read_line(&mut input)?;
        Ok::<_, io::Error>((read > 0).then_some(input))
    })
    .await??;

    Ok(line)
}

/// Console text for an outcome
pub fn render(outcome: &Outcome) -> Option<String> {
    let text = match outcome {
        Outcome::GuestAdded {
            name,
            reservation,
            items,
            opened_reference,
            abandoned_checkout,
        } => {
            let mut lines = Vec::new();
            if *abandoned_checkout {
                lines.push(format!(
                    "{} Pending checkout dropped; starting a new order",
                    style("⚠️ ").yellow()
                ));
            }
            lines.push(format!("✅ Name found: {}", style(name).bold()));
            if *opened_reference {
                lines.push(format!("🌐 Opened page for reservation number: {}", reservation));
            }
            lines.push(format!("🛒 Added all items to cart ({})", items));
            lines.join("\n")
        }
        Outcome::NotFound(name) => {
            format!("❌ Name not found: '{}'. Try again", name)
        }
        Outcome::Ambiguous { name, count } => {
            format!("❌ {} guests are named '{}'. Try again", count, name)
        }
        Outcome::EndOfRoster => "❌ No more names in the roster".to_string(),
        Outcome::CheckoutReady { guests } => format!(
            "📦 Checkout filled for {}.\n   Verify the shipping address in the browser, then enter \"c\"",
            guests.join(", ")
        ),
        Outcome::OrderCompleted { code, copied } => {
            if *copied {
                format!("🎉 Copied confirmation # {}", style(code).green().bold())
            } else {
                format!(
                    "🎉 Confirmation # {} (clipboard unavailable)",
                    style(code).green().bold()
                )
            }
        }
        Outcome::Rejected(reason) => format!("⚠️  {}", reason),
        Outcome::Failed(reason) => format!("{} {}", style("Error:").red().bold(), reason),
        Outcome::Quit => return None,
    };

    Some(text)
}
