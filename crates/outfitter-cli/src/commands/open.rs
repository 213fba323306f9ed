use anyhow::{Context, Result};
use console::style;
use outfitter_browser::{BrowserSession, ChromeFinder, ChromeLauncher, ProfileManager};
use outfitter_core::config::{Config, DEFAULT_STORE_URL};
use std::path::{Path, PathBuf};

pub struct OpenOptions {
    pub config: PathBuf,
    pub handoff: PathBuf,
    pub chrome_path: Option<PathBuf>,
    pub profile: Option<String>,
    pub temp: bool,
    pub port: u16,
    pub url: Option<String>,
}

/// Launch Chrome on the store and write the handoff file for `outfitter order`
pub fn execute(options: OpenOptions) -> Result<()> {
    let store_url = match options.url.clone() {
        Some(url) => url,
        None => store_url_from_config(&options.config),
    };

    println!("🔍 Locating Chrome...");
    let chrome_binary = ChromeFinder::new(options.chrome_path.clone()).find()?;
    println!("✅ Found Chrome at: {}", chrome_binary.display());

    let profile = if options.temp {
        if options.profile.is_some() {
            println!("⚠️  --temp given, ignoring --profile");
        }
        ProfileManager::temporary()?
    } else {
        let name = options
            .profile
            .as_deref()
            .unwrap_or(outfitter_browser::DEFAULT_PROFILE);
        ProfileManager::named(name)?
    };
    println!("📁 Using profile: {}", profile.path().display());
    if profile.is_temporary() {
        println!("   Temporary profile: the store login will not be remembered");
    }

    let launcher = ChromeLauncher::new(chrome_binary, profile.path().to_path_buf(), store_url.clone())
        .with_port(options.port);

    println!("🚀 Launching Chrome...");
    let chrome = launcher.launch()?;
    tracing::debug!("Chrome running with pid {}", chrome.id());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(async {
        let session = BrowserSession::open(&launcher.endpoint(), &store_url).await?;
        let handoff = session.handoff();
        handoff.write(&options.handoff)?;

        println!("✅ Chrome is up at {}", style(&handoff.endpoint).cyan());
        println!("   Debugger: {}", session.websocket_address());
        println!("   Page id:  {}", handoff.session_id);
        println!(
            "📝 Session saved to {}",
            style(options.handoff.display()).bold()
        );
        Ok::<_, anyhow::Error>(())
    });

    runtime.shutdown_timeout(std::time::Duration::from_millis(100));
    result.context("Chrome started but the session could not be saved")?;

    println!();
    println!(
        "{}",
        style("Log in to the store, wait for the pop-up and close it.").yellow().bold()
    );
    println!("Then run `outfitter order` in another terminal. Chrome keeps running.");

    Ok(())
}

fn store_url_from_config(path: &Path) -> String {
    match Config::from_file(path) {
        Ok(config) => config.store_url.to_string(),
        Err(e) => {
            tracing::warn!(
                "Could not read {} ({}); opening {}",
                path.display(),
                e,
                DEFAULT_STORE_URL
            );
            DEFAULT_STORE_URL.to_string()
        }
    }
}
