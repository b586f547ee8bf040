//! Tracing installation for applications embedding `tideui`.
//!
//! The library only emits events through [`tracing`]; nothing is printed
//! unless the application installs a subscriber. [`install`] sets up a
//! sensible default: a `fmt` layer filtered by `RUST_LOG` (falling back to
//! `info`), plus a panic hook that reports panics as `error` events before the
//! previous hook runs.
//!
//! The common `tracing` macros are re-exported so applications can log
//! without a direct dependency.

use std::panic::{self, PanicHookInfo};
use std::sync::Once;
use std::thread;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

pub use tracing::{Level, debug, error, info, trace, warn};

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::INFO;

static PANIC_HOOK_INSTALLED: Once = Once::new();
static TRACING_INSTALLED: Once = Once::new();

/// Installs the tracing subscriber and the panic hook (idempotent).
pub fn install() {
    install_tracing(None);
    install_panic_hook();
}

/// Installs the tracing subscriber with explicit filter directives, such as
/// `"tideui_overlay=debug,info"` (idempotent; the first call wins).
///
/// Invalid directives fall back to the `info` level.
pub fn install_with_filter(directives: &str) {
    install_tracing(Some(directives));
    install_panic_hook();
}

fn install_tracing(directives: Option<&str>) {
    TRACING_INSTALLED.call_once(|| {
        let filter = match directives {
            Some(directives) => EnvFilter::try_new(directives).ok(),
            None => EnvFilter::try_from_default_env().ok(),
        }
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL.to_string()));

        let console = fmt::layer().with_target(true).with_filter(filter);

        if tracing_subscriber::registry().with(console).try_init().is_err() {
            eprintln!("tideui: a global tracing subscriber is already installed");
        }
    });
}

fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            report_panic(info);
            previous(info);
        }));
    });
}

fn report_panic(info: &PanicHookInfo<'_>) {
    let message = panic_message(info);
    let thread_name = thread::current().name().unwrap_or("unnamed").to_string();
    let location = info
        .location()
        .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
        .unwrap_or_default();

    tracing::error!(
        target: "tideui::panic",
        message = %message,
        thread = %thread_name,
        location = %location
    );
}

fn panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
