//! ESP32 JVS I/O board rotary input bring-up.
//!
//! This is the board-side entry point for the spinner input. It:
//! - Configures the A/B GPIOs and runs `init_rotary()`
//! - Runs the decode step from a periodic esp_timer callback at the configured
//!   poll rate, so the idle task and the report loop still get scheduled
//! - Emulates the host-communication loop on the main thread, reading the
//!   position at a JVS-like report cadence
//!
//! # Build
//!
//! ```bash
//! cargo build --release --features esp32 --bin esp32_main
//!
//! # Spinner with 4 transitions per click
//! ROTARY_TICKS_PER_DETENT=4 cargo build --release --features esp32 --bin esp32_main
//! ```

use esp_idf_hal::peripherals::Peripherals;
use esp_idf_svc::timer::EspTaskTimerService;
use jvs_rotary::hal::esp32::{pins, Esp32Clock, Esp32QuadraturePins};
use jvs_rotary::{Config, RotaryChannel, RotaryConfig, RotaryDriver, RotaryShared, RotaryStatus};
use std::thread;
use std::time::Duration;

/// Host report cadence in milliseconds (JVS hosts poll at roughly 60Hz)
const REPORT_INTERVAL_MS: u64 = 16;

/// Shortest period esp_timer accepts for a periodic timer
const MIN_TIMER_PERIOD_US: u32 = 50;

static SPINNER: RotaryShared = RotaryShared::new();

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    // =========================================================================
    // Configuration
    // =========================================================================
    let ticks_per_detent = option_env!("ROTARY_TICKS_PER_DETENT")
        .and_then(|s| s.parse::<u8>().ok())
        .unwrap_or(1);
    let config = Config::default().with_rotary(
        RotaryConfig::default()
            .with_channel(
                RotaryChannel::new(pins::ROTARY_A, pins::ROTARY_B)
                    .with_label(option_env!("ROTARY_LABEL").unwrap_or("spinner")),
            )
            .with_ticks_per_detent(ticks_per_detent),
    );
    log::info!(
        "{}: rotary on GPIO{}/{}",
        config.device.name,
        pins::ROTARY_A,
        pins::ROTARY_B
    );

    let poll_interval_us = config.sampling.poll_interval_us;
    anyhow::ensure!(
        poll_interval_us >= MIN_TIMER_PERIOD_US,
        "poll interval {}us is below the {}us esp_timer minimum",
        poll_interval_us,
        MIN_TIMER_PERIOD_US
    );

    let peripherals = Peripherals::take()?;

    // =========================================================================
    // Initialize Rotary (A/B on GPIO6/7)
    // =========================================================================
    let rotary_pins = Esp32QuadraturePins::new(peripherals.pins.gpio6, peripherals.pins.gpio7)?;
    let clock = Esp32Clock::new();
    let mut driver = RotaryDriver::new(rotary_pins, &SPINNER, &config);

    let status = driver.init_with(&clock);
    if status != RotaryStatus::Success {
        // The host still gets a defined value; keep reporting it
        log::error!("rotary init failed: {:?}", driver.last_fault());
    }

    let mut reader = driver.reader();

    // =========================================================================
    // Decode Timer
    // =========================================================================
    // Sub-tick periods are below the FreeRTOS tick, so a sleeping thread
    // cannot keep up; the timer task blocks between callbacks instead.
    let timer_service = EspTaskTimerService::new()?;
    let decode_timer = timer_service.timer(move || {
        driver.poll_with(&clock);
    })?;
    decode_timer.every(config.sampling.poll_period())?;
    log::info!("rotary decode every {}us", poll_interval_us);

    // =========================================================================
    // Host Report Loop
    // =========================================================================
    let mut last_status = reader.status();
    loop {
        let delta = reader.read_delta();
        if delta != 0 {
            log::debug!("rotary: {} ({:+})", reader.rotary_value(), delta);
        }

        let status = reader.status();
        if status != last_status {
            log::warn!("rotary status {} -> {}", last_status.as_str(), status.as_str());
            last_status = status;
        }

        thread::sleep(Duration::from_millis(REPORT_INTERVAL_MS));
    }
}
