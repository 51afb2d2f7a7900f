use embassy_time::Duration;

/// Low time of `ON_OFF#` pin to trigger module switch on from power off mode
pub const fn pwr_on_time() -> Duration {
    Duration::from_secs(5)
}

/// Time to wait for the module to boot after a power on, before it answers AT
/// commands
pub const fn boot_time() -> Duration {
    Duration::from_secs(10)
}
