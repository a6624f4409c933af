use crate::settings::Settings;
use battery::units::ratio::percent;
use std::time::Instant;
use sysinfo::{Components, Networks, System};

const KB: f64 = 1024.0;
const MB: f64 = 1024.0 * 1024.0;

/// Instantaneous throughput derived from consecutive counter readings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetSpeed {
    pub sent_bps: f64,
    pub recv_bps: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryInfo {
    pub percent: f32,
    pub plugged: bool,
}

/// One computed set of metric values for a single sampling tick.
///
/// Fields for disabled categories are left unset; `None` on an enabled
/// category means the sensor is unavailable and renders as "N/A".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub cpu_percent: Option<f32>,
    pub ram_percent: Option<f32>,
    pub temp: Option<f32>,
    pub net: Option<NetSpeed>,
    pub battery: Option<BatteryInfo>,
    pub clock: Option<String>,
}

/// Format a speed in bits/sec, scaled by magnitude in binary steps.
///
/// One decimal place above the MB threshold, none below, right-aligned to
/// width 4 so consecutive renders line up.
pub fn format_speed(bits_per_sec: f64) -> String {
    let bytes = bits_per_sec / 8.0;
    if bytes < KB {
        format!("{bytes:>4.0} B/s")
    } else if bytes < MB {
        format!("{:>4.0} KB/s", bytes / KB)
    } else {
        format!("{:>4.1} MB/s", bytes / MB)
    }
}

/// Throughput from one counter delta, in bits/sec for sent and received.
///
/// Returns `None` when the elapsed interval is not strictly positive, so
/// callers retain the previous speeds instead of dividing by zero.
pub fn compute_speed(
    prev: (u64, u64),
    cur: (u64, u64),
    elapsed_secs: f64,
) -> Option<NetSpeed> {
    if elapsed_secs <= 0.0 {
        return None;
    }
    Some(NetSpeed {
        sent_bps: cur.0.saturating_sub(prev.0) as f64 * 8.0 / elapsed_secs,
        recv_bps: cur.1.saturating_sub(prev.1) as f64 * 8.0 / elapsed_secs,
    })
}

/// Polls OS counters and derives per-tick metric snapshots.
///
/// Owns the previous network counter reading; no other history is kept.
pub struct Sampler {
    system: System,
    networks: Networks,
    components: Components,
    battery: Option<battery::Manager>,
    last_net: (u64, u64, Instant),
    last_speed: Option<NetSpeed>,
}

fn net_totals(networks: &Networks) -> (u64, u64) {
    let mut sent = 0u64;
    let mut recv = 0u64;
    for (_, data) in networks.iter() {
        sent += data.total_transmitted();
        recv += data.total_received();
    }
    (sent, recv)
}

impl Sampler {
    pub fn new() -> Self {
        let battery = match battery::Manager::new() {
            Ok(m) => Some(m),
            Err(e) => {
                tracing::warn!("battery manager unavailable: {e}");
                None
            }
        };
        // Prime the counters so the first tick already has a delta to
        // derive speeds from.
        let networks = Networks::new_with_refreshed_list();
        let (sent, recv) = net_totals(&networks);
        Self {
            system: System::new(),
            networks,
            components: Components::new_with_refreshed_list(),
            battery,
            last_net: (sent, recv, Instant::now()),
            last_speed: None,
        }
    }

    /// Query every category enabled in `settings` and return the snapshot.
    /// Disabled categories are skipped entirely.
    pub fn sample(&mut self, settings: &Settings) -> Snapshot {
        let mut snap = Snapshot::default();
        if settings.show_cpu {
            self.system.refresh_cpu_usage();
            snap.cpu_percent = Some(self.system.global_cpu_usage());
        }
        if settings.show_ram {
            self.system.refresh_memory();
            let total = self.system.total_memory();
            if total > 0 {
                snap.ram_percent =
                    Some(self.system.used_memory() as f32 / total as f32 * 100.0);
            }
        }
        if settings.show_temp {
            snap.temp = self.cpu_temperature();
        }
        if settings.show_network {
            snap.net = self.net_speed();
        }
        if settings.show_battery {
            snap.battery = self.battery_info();
        }
        if settings.show_time {
            let now = chrono::Local::now();
            snap.clock = Some(now.format(settings.clock_format.strftime()).to_string());
        }
        snap
    }

    fn cpu_temperature(&mut self) -> Option<f32> {
        self.components.refresh(true);
        self.components
            .iter()
            .find(|c| {
                let label = c.label().to_lowercase();
                label.contains("cpu") || label.contains("core")
            })
            .and_then(|c| c.temperature())
    }

    /// Throughput from the delta of cumulative counters, summed over all
    /// interfaces. A non-positive elapsed interval retains the previous
    /// speeds instead of recomputing.
    fn net_speed(&mut self) -> Option<NetSpeed> {
        self.networks.refresh(true);
        let (sent, recv) = net_totals(&self.networks);
        let now = Instant::now();
        let (prev_sent, prev_recv, prev_time) = self.last_net;
        let elapsed = now.duration_since(prev_time).as_secs_f64();
        if let Some(speed) = compute_speed((prev_sent, prev_recv), (sent, recv), elapsed) {
            self.last_speed = Some(speed);
            self.last_net = (sent, recv, now);
        }
        self.last_speed
    }

    fn battery_info(&self) -> Option<BatteryInfo> {
        let manager = self.battery.as_ref()?;
        let bat = manager.batteries().ok()?.next()?.ok()?;
        let plugged = matches!(
            bat.state(),
            battery::State::Charging | battery::State::Full
        );
        Some(BatteryInfo {
            percent: bat.state_of_charge().get::<percent>(),
            plugged,
        })
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}
