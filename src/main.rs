// InternDesk - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation (debug mode support)
// 3. Session context resolution and API client construction
// 4. Session restore and eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` can use
// `crate::app::...`, `crate::core::...` etc.
pub use interndesk::app;

pub use interndesk::core;
pub use interndesk::platform;
pub use interndesk::ui;
pub use interndesk::util;

use app::context::{self, ContextResolution, SessionContext};
use app::fetch::FetchManager;
use clap::Parser;
use platform::api::{HttpPortalApi, PortalApi};
use platform::config::AppConfig;
use std::path::PathBuf;
use std::sync::Arc;
use util::error::{ConfigError, InternDeskError};

/// Configure fonts for the egui context.
///
/// On Windows, Segoe UI and Segoe UI Emoji are put ahead of the egui
/// built-ins so the notification and status glyphs render. Elsewhere the
/// egui defaults are used unchanged.
fn configure_fonts(ctx: &egui::Context) {
    #[cfg(target_os = "windows")]
    {
        let mut fonts = egui::FontDefinitions::default();
        let candidates: &[(&str, &str)] = &[
            ("Segoe UI", r"C:\Windows\Fonts\segoeui.ttf"),
            ("Segoe UI Emoji", r"C:\Windows\Fonts\seguiemj.ttf"),
        ];

        let mut loaded_names: Vec<&str> = Vec::new();
        for (name, path) in candidates {
            match std::fs::read(path) {
                Ok(data) => {
                    fonts
                        .font_data
                        .insert((*name).to_owned(), egui::FontData::from_owned(data).into());
                    loaded_names.push(name);
                }
                Err(e) => {
                    tracing::warn!(font = name, error = %e, "Failed to load Windows system font");
                }
            }
        }

        if !loaded_names.is_empty() {
            if let Some(proportional) = fonts.families.get_mut(&egui::FontFamily::Proportional) {
                for (i, name) in loaded_names.iter().enumerate() {
                    proportional.insert(i, (*name).to_owned());
                }
            }
            ctx.set_fonts(fonts);
            tracing::info!(fonts = ?loaded_names, "Windows system fonts configured");
        }
    }

    #[cfg(not(target_os = "windows"))]
    let _ = ctx;
}

/// InternDesk - company portal for internship programs.
///
/// Shows the company dashboard, the current interns roster and the
/// notification feed from the portal API.
#[derive(Parser, Debug)]
#[command(name = "InternDesk", version, about)]
struct Cli {
    /// Company user id to sign in as (overrides [session] user_id).
    #[arg(short = 'u', long = "user")]
    user: Option<String>,

    /// Company id (overrides [session] company_id; looked up from the
    /// user's profile when omitted everywhere).
    #[arg(short = 'c', long = "company")]
    company: Option<String>,

    /// Portal API base URL (overrides [api] base_url).
    #[arg(long = "api")]
    api: Option<String>,

    /// Explicit config file; must exist and parse.
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

/// Build the API client and work out who we are acting as.
fn connect(
    cli: &Cli,
    config: &AppConfig,
) -> util::error::Result<(Arc<dyn PortalApi>, SessionContext)> {
    let api = HttpPortalApi::new(&config.api)?;

    let session = match context::resolve(cli.user.clone(), cli.company.clone(), config) {
        ContextResolution::Complete(ctx) => ctx,
        ContextResolution::NeedsCompany { user_id } => {
            tracing::info!(user = %user_id, "No company id given, looking it up");
            context::discover_company(&api, &user_id)?
        }
        ContextResolution::MissingUser => {
            return Err(InternDeskError::Config(ConfigError::MissingValue {
                field: "session.user_id".to_string(),
                hint: "Pass --user <ID> or set user_id under [session] in config.toml.".to_string(),
            }))
        }
    };

    Ok((Arc::new(api), session))
}

fn main() {
    let cli = Cli::parse();

    // Config carries the log level, so it is read before logging starts.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (mut config, config_warnings) = match cli.config {
        Some(ref path) => match platform::config::load_config_file(path) {
            Ok(loaded) => loaded,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(2);
            }
        },
        None => platform::config::load_config(&platform_paths.config_dir),
    };

    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "InternDesk starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    if let Some(ref base_url) = cli.api {
        if let Err(e) = config.override_base_url(base_url) {
            tracing::error!(error = %e, "Rejected --api override");
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    }

    let (api, session) = match connect(&cli, &config) {
        Ok(connected) => connected,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!(
        user = %session.user_id,
        company = %session.company_id,
        api = %config.api.base_url,
        "Session ready"
    );

    // Create application state, restore the previous UI session, then queue
    // the first loads so the dashboard uses the restored chart year.
    let today = chrono::Local::now().date_naive();
    let mut state =
        app::state::AppState::new(session.clone(), today, config.animations, config.dark_mode);
    state.warnings = config_warnings;

    let session_path = app::session::session_path(&platform_paths.data_dir);
    if let Some(saved) = app::session::load(&session_path) {
        saved.restore(&mut state);
    }
    state.refresh_all(today);

    let fetch = FetchManager::new(api, session);
    let dark_mode = config.dark_mode;
    let font_size = config.font_size;
    let api_base = config.api.base_url.clone();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            configure_fonts(&cc.egui_ctx);
            ui::theme::apply(&cc.egui_ctx, dark_mode, font_size);
            Ok(Box::new(gui::InternDeskApp::new(
                state,
                fetch,
                session_path,
                api_base,
                font_size,
            )))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch InternDesk GUI: {e}");
        std::process::exit(1);
    }
}
