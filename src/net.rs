//! Connectivity probing
//!
//! A [`ServiceCallTask`](crate::core::task::ServiceCallTask) consults a
//! [`Connectivity`] probe once before its first attempt; an offline answer
//! fails the call without touching the network. The default
//! [`InterfaceProbe`] asks the OS for its interface table, which is cheap
//! enough to run per call and needs no privileges.

use network_interface::{Addr, NetworkInterface, NetworkInterfaceConfig};
use std::net::IpAddr;

/// A boolean "is a network path available" probe.
pub trait Connectivity: Send + Sync {
    fn is_available(&self) -> bool;
}

/// Reports online if any non-loopback interface carries a usable address.
///
/// Enumeration failure is treated as offline; the failure is logged since a
/// broken interface table usually means something worse than "no network".
pub struct InterfaceProbe;

impl Connectivity for InterfaceProbe {
    fn is_available(&self) -> bool {
        match NetworkInterface::show() {
            Ok(interfaces) => interfaces.iter().any(|interface| {
                interface.addr.iter().any(|addr| {
                    let ip: IpAddr = match addr {
                        Addr::V4(v4) => IpAddr::V4(v4.ip),
                        Addr::V6(v6) => IpAddr::V6(v6.ip),
                    };
                    !ip.is_loopback() && !ip.is_unspecified()
                })
            }),
            Err(err) => {
                tracing::warn!("failed to enumerate network interfaces: {err}");
                false
            }
        }
    }
}

/// Probe that always reports online, for hosts that gate connectivity
/// themselves and for tests.
pub struct AlwaysOnline;

impl Connectivity for AlwaysOnline {
    fn is_available(&self) -> bool {
        true
    }
}
