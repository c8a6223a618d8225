//! System resource sampling using the sysinfo crate
//!
//! These functions provide real resource monitoring when the metrics
//! feature is enabled; without it they return zero values.

#[cfg(feature = "metrics")]
use once_cell::sync::Lazy;
#[cfg(feature = "metrics")]
use sysinfo::{Disks, System};

use super::types::ResourceSnapshot;

#[cfg(feature = "metrics")]
static SYSTEM: Lazy<parking_lot::Mutex<System>> =
    Lazy::new(|| parking_lot::Mutex::new(System::new_all()));

#[cfg(feature = "metrics")]
static DISKS: Lazy<parking_lot::Mutex<Disks>> =
    Lazy::new(|| parking_lot::Mutex::new(Disks::new_with_refreshed_list()));

/// Take a point-in-time resource snapshot
pub fn resource_snapshot() -> ResourceSnapshot {
    let (memory_used_bytes, memory_total_bytes) = memory_usage();
    ResourceSnapshot {
        cpu_percent: cpu_percent(),
        memory_percent: percent_of(memory_used_bytes, memory_total_bytes),
        memory_used_bytes,
        memory_total_bytes,
        disk_percent: disk_percent(),
    }
}

#[cfg(feature = "metrics")]
fn cpu_percent() -> f64 {
    let mut sys = SYSTEM.lock();
    sys.refresh_cpu_usage();
    sys.global_cpu_usage() as f64
}

#[cfg(not(feature = "metrics"))]
fn cpu_percent() -> f64 {
    0.0
}

#[cfg(feature = "metrics")]
fn memory_usage() -> (u64, u64) {
    let mut sys = SYSTEM.lock();
    sys.refresh_memory();
    (sys.used_memory(), sys.total_memory())
}

#[cfg(not(feature = "metrics"))]
fn memory_usage() -> (u64, u64) {
    (0, 0)
}

#[cfg(feature = "metrics")]
fn disk_percent() -> f64 {
    let mut disks = DISKS.lock();
    disks.refresh_list();
    let (mut used, mut total) = (0u64, 0u64);
    for disk in disks.iter() {
        total += disk.total_space();
        used += disk.total_space() - disk.available_space();
    }
    percent_of(used, total)
}

#[cfg(not(feature = "metrics"))]
fn disk_percent() -> f64 {
    0.0
}

fn percent_of(used: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        used as f64 / total as f64 * 100.0
    }
}
