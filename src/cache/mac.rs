// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use tracing::debug;

use crate::{encoding::format_mac, models::error::NodeIdError};

/// Source of the hardware MAC address behind [`IdentitySource::Default`].
///
/// [`IdentitySource::Default`]: crate::models::source::IdentitySource::Default
pub trait MacProvider: Send + Sync {
    fn hardware_mac(&self) -> Result<[u8; 6], NodeIdError>;
}

/// Reads the MAC of the first non-loopback interface.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemMac;

impl MacProvider for SystemMac {
    fn hardware_mac(&self) -> Result<[u8; 6], NodeIdError> {
        match mac_address::get_mac_address() {
            Ok(Some(mac)) => {
                let bytes = mac.bytes();
                debug!(mac = %format_mac(bytes), "read hardware MAC");
                Ok(bytes)
            },
            Ok(None) => Err(NodeIdError::HardwareUnavailable(
                "no network interface with a MAC address".to_string(),
            )),
            Err(e) => Err(NodeIdError::HardwareUnavailable(e.to_string())),
        }
    }
}

/// A MAC supplied up front, for hosts where the interface list is not the
/// right source (or in tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedMac(pub [u8; 6]);

impl MacProvider for FixedMac {
    fn hardware_mac(&self) -> Result<[u8; 6], NodeIdError> {
        Ok(self.0)
    }
}

impl<P: MacProvider + ?Sized> MacProvider for &P {
    fn hardware_mac(&self) -> Result<[u8; 6], NodeIdError> {
        (**self).hardware_mac()
    }
}
