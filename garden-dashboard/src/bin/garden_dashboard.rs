/// Garden Interchain Dashboard
///
/// Terminal view of swap durations, anomaly thresholds and anomalous orders
/// served by the Garden analytics backend. Tables are split into Bitcoin and
/// non-Bitcoin chain pairs.
use std::{
    error::Error,
    fs::File,
    io,
    sync::Arc,
    time::Instant,
};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use garden_dashboard::{
    render, render_dashboard, Controller, DashboardConfig, DashboardError, HttpBackend,
    SystemClipboard, UiAction, UiState,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

/// Initialize logging into the configured file
fn init_logging(config: &DashboardConfig) -> Result<(), DashboardError> {
    let file = File::create(&config.log_path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = DashboardConfig::from_env()?;
    init_logging(&config)?;
    info!(backend = %config.backend_url, "Starting Garden dashboard");

    // Setup panic hook to restore terminal on crash
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let controller = Controller::new(
        HttpBackend::new(config.clone()),
        Arc::new(SystemClipboard),
        config.copied_reset,
    );

    let initial = controller.snapshot().await;
    let mut ui = UiState::new(&initial.start_time, &initial.end_time);

    // Initial load
    controller.spawn_fetch();

    let tick_rate = config.tick_rate;
    let mut last_tick = Instant::now();

    loop {
        let state = controller.snapshot().await;
        let view = render(&state, &ui);
        ui.clamp_cursor(&view);
        terminal.draw(|f| render_dashboard(f, &view, &ui))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match ui.handle_key(key, &view) {
                    Some(UiAction::Submit { start, end }) => {
                        controller.set_time_range(start, end).await;
                        controller.spawn_fetch();
                    }
                    Some(UiAction::Copy(order_id)) => {
                        let controller = controller.clone();
                        tokio::spawn(async move {
                            controller.copy_to_clipboard(&order_id).await;
                        });
                    }
                    Some(UiAction::Quit) => break,
                    None => {}
                }
            }
        }
        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    info!("Garden dashboard stopped");
    Ok(())
}
