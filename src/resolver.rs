// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/resolver.rs - Name resolution for classified PCI ID queries.
 *  Copyright (C) 2026  Forest Crossman <cyrozap@gmail.com>
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  You should have received a copy of the GNU General Public License
 *  along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

/*!
 * # `resolver` Module
 *
 * This module resolves a classified [Query] into the names recorded in the
 * database, one name per level, and formats the result as a `|`-joined line.
 *
 * ## Usage Example
 *
 * ```no_run
 * use pcilookup::db::PciDatabase;
 * use pcilookup::query::Query;
 * use pcilookup::resolver::Resolution;
 *
 * fn main() -> Result<(), Box<dyn std::error::Error>> {
 *     let db = PciDatabase::open(None)?;
 *     let query = Query::from_arg("8086,1237")?;
 *
 *     let resolution = Resolution::from_query(&query, &db)?;
 *     println!("{}", resolution);
 *
 *     Ok(())
 * }
 * ```
 */

use std::fmt;

use crate::db::PciDatabase;
use crate::query::{Level, Query};

/// Read-only name lookup over a PCI ID database.
///
/// The resolver is written against this trait rather than [PciDatabase]
/// directly so it can be exercised with an in-memory stand-in.
pub trait PciLookup {
    /// Returns the vendor name for `vid`, if known.
    fn vendor_name(&self, vid: u16) -> Option<&str>;
    /// Returns the device name for `did` under vendor `vid`, if known.
    fn device_name(&self, vid: u16, did: u16) -> Option<&str>;
    /// Returns the subsystem name for `(svid, sdid)` under the given vendor
    /// and device, if known.
    fn subsystem_name(&self, vid: u16, did: u16, svid: u16, sdid: u16) -> Option<&str>;
}

impl PciLookup for PciDatabase {
    fn vendor_name(&self, vid: u16) -> Option<&str> {
        self.vendor(vid).map(|vendor| vendor.name.as_str())
    }

    fn device_name(&self, vid: u16, did: u16) -> Option<&str> {
        self.vendor(vid)?
            .device(did)
            .map(|device| device.name.as_str())
    }

    fn subsystem_name(&self, vid: u16, did: u16, svid: u16, sdid: u16) -> Option<&str> {
        self.vendor(vid)?.device(did)?.subsystem(svid, sdid)
    }
}

/// The resolved names for one query, present up to the query's level.
#[derive(Debug)]
pub struct Resolution {
    /// The vendor name.
    pub vendor: String,
    /// The device name, for Device-level and deeper queries.
    pub device: Option<String>,
    /// The subsystem name, for SubVendorDevice-level queries.
    pub subsystem: Option<String>,
}

impl Resolution {
    /// Resolves a query against the database, stage by stage.
    ///
    /// Each stage of the hierarchy is looked up in turn; a miss at any stage
    /// is an error naming the unknown id(s) in 4-digit lowercase hex.
    ///
    /// # Arguments
    ///
    /// * `query` - The classified query to resolve.
    /// * `db` - The database to resolve against.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Resolution` or an error.
    pub fn from_query(
        query: &Query,
        db: &impl PciLookup,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let vendor = db
            .vendor_name(query.vendor)
            .ok_or_else(|| format!("unknown vendor id: {:04x}", query.vendor))?
            .to_string();
        if query.level == Level::Vendor {
            return Ok(Self {
                vendor,
                device: None,
                subsystem: None,
            });
        }

        let device = db
            .device_name(query.vendor, query.device)
            .ok_or_else(|| format!("unknown device id: {:04x}", query.device))?
            .to_string();
        if query.level == Level::Device {
            return Ok(Self {
                vendor,
                device: Some(device),
                subsystem: None,
            });
        }

        let subsystem = db
            .subsystem_name(query.vendor, query.device, query.sub_vendor, query.sub_device)
            .ok_or_else(|| {
                format!(
                    "unknown sub-vendor and sub-device id: {:04x}.{:04x}",
                    query.sub_vendor, query.sub_device
                )
            })?
            .to_string();

        Ok(Self {
            vendor,
            device: Some(device),
            subsystem: Some(subsystem),
        })
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.vendor)?;
        if let Some(device) = &self.device {
            write!(f, "|{device}")?;
        }
        if let Some(subsystem) = &self.subsystem {
            write!(f, "|{subsystem}")?;
        }

        Ok(())
    }
}
