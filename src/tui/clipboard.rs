//! Clipboard hand-off for ingestion ids.

use anyhow::Result;
use std::sync::mpsc as std_mpsc;
use std::sync::OnceLock;
use std::time::Duration;

// Single writer thread; X11 clipboard owners must outlive the paste request,
// so each copied value is held for a grace period before the next is taken.
static COPY_TX: OnceLock<std_mpsc::Sender<String>> = OnceLock::new();

const HOLD_PERIOD: Duration = Duration::from_secs(2);

fn writer() -> Result<&'static std_mpsc::Sender<String>> {
    let tx = COPY_TX.get_or_init(|| {
        let (tx, rx) = std_mpsc::channel::<String>();
        std::thread::spawn(move || {
            for value in rx {
                if let Ok(mut clipboard) = arboard::Clipboard::new() {
                    if clipboard.set_text(&value).is_ok() {
                        std::thread::sleep(HOLD_PERIOD);
                    }
                }
            }
        });
        tx
    });
    Ok(tx)
}

/// Queue a value for the clipboard without blocking the UI thread.
pub(crate) fn copy_text(value: &str) -> Result<()> {
    writer()?
        .send(value.to_string())
        .map_err(|_| anyhow::anyhow!("clipboard writer stopped"))
}
