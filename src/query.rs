// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/query.rs - Parser for PCI ID query strings.
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
 * # `query` Module
 *
 * This module parses the compact PCI ID notation `VID[,DID[.SVID.SDID]]`
 * into a classified [Query]. Each field is an unprefixed hexadecimal value
 * in the range [0, ffff].
 *
 * ## Usage Example
 *
 * ```
 * use pcilookup::query::{Level, Query};
 *
 * fn main() -> Result<(), Box<dyn std::error::Error>> {
 *     let query = Query::from_arg("8086,1237.8086.1237")?;
 *     assert_eq!(query.level, Level::SubVendorDevice);
 *     assert_eq!(query.vendor, 0x8086);
 *
 *     Ok(())
 * }
 * ```
 */

use std::num::IntErrorKind;

/// The granularity of a lookup query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Vendor id only.
    Vendor,
    /// Vendor and device ids.
    Device,
    /// Vendor, device, sub-vendor, and sub-device ids.
    SubVendorDevice,
}

/// A parsed and classified PCI ID query.
///
/// Fields beyond the query's [Level] are zero and carry no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query {
    /// The granularity of the query.
    pub level: Level,
    /// The vendor id.
    pub vendor: u16,
    /// The device id.
    pub device: u16,
    /// The sub-vendor id.
    pub sub_vendor: u16,
    /// The sub-device id.
    pub sub_device: u16,
}

impl Query {
    /// Parses one query argument.
    ///
    /// The string is split at the first `,` into vendor and remainder, the
    /// remainder at the first `.` into device and sub-id pair, and the sub-id
    /// pair at the next `.` into sub-vendor and sub-device. A comma-free
    /// string is never split on `.`. A sub-vendor without a sub-device is an
    /// error.
    ///
    /// # Arguments
    ///
    /// * `arg` - The query string, e.g. `"8086"` or `"8086,1237.8086.1237"`.
    ///
    /// # Returns
    ///
    /// A `Result` containing the classified `Query` or an error.
    pub fn from_arg(arg: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let Some((vendor_field, rest)) = arg.split_once(',') else {
            return Ok(Self {
                level: Level::Vendor,
                vendor: parse_id(arg)?,
                device: 0,
                sub_vendor: 0,
                sub_device: 0,
            });
        };

        let vendor = parse_id(vendor_field)?;
        let Some((device_field, rest)) = rest.split_once('.') else {
            return Ok(Self {
                level: Level::Device,
                vendor,
                device: parse_id(rest)?,
                sub_vendor: 0,
                sub_device: 0,
            });
        };

        let device = parse_id(device_field)?;
        let Some((sub_vendor_field, sub_device_field)) = rest.split_once('.') else {
            return Err(format!(
                "found what looks like a sub-vendor id but not a sub-device id: {rest}"
            )
            .into());
        };

        Ok(Self {
            level: Level::SubVendorDevice,
            vendor,
            device,
            sub_vendor: parse_id(sub_vendor_field)?,
            sub_device: parse_id(sub_device_field)?,
        })
    }
}

/// Parses one ID field as base-16, consuming the whole field, with the value
/// restricted to [0, ffff].
pub fn parse_id(field: &str) -> Result<u16, Box<dyn std::error::Error>> {
    let value = match i64::from_str_radix(field, 16) {
        Ok(value) => value,
        // A token too long for i64 is still a number, just a huge one.
        Err(error) if matches!(
            error.kind(),
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow
        ) =>
        {
            return Err(format!("value is outside the valid range [0, ffff]: {field}").into());
        }
        Err(_) => {
            return Err(format!("invalid pci id, not a valid number: {field}").into());
        }
    };
    if !(0..=0xffff).contains(&value) {
        return Err(format!("value is outside the valid range [0, ffff]: {value}").into());
    }

    Ok(value as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_level() {
        let query = Query::from_arg("8086").unwrap();
        assert_eq!(query.level, Level::Vendor);
        assert_eq!(query.vendor, 0x8086);
    }

    #[test]
    fn test_device_level() {
        let query = Query::from_arg("8086,1237").unwrap();
        assert_eq!(query.level, Level::Device);
        assert_eq!(query.vendor, 0x8086);
        assert_eq!(query.device, 0x1237);
    }

    #[test]
    fn test_subvd_level() {
        let query = Query::from_arg("8086,1237.1028.4f13").unwrap();
        assert_eq!(query.level, Level::SubVendorDevice);
        assert_eq!(query.vendor, 0x8086);
        assert_eq!(query.device, 0x1237);
        assert_eq!(query.sub_vendor, 0x1028);
        assert_eq!(query.sub_device, 0x4f13);
    }

    #[test]
    fn test_not_hex() {
        let error = Query::from_arg("12g4").unwrap_err();
        assert!(error.to_string().contains("12g4"));
    }

    #[test]
    fn test_out_of_range() {
        let error = Query::from_arg("10000").unwrap_err();
        assert!(error.to_string().contains("65536"));
    }

    #[test]
    fn test_value_overflowing_i64() {
        let error = Query::from_arg("ffffffffffffffffff").unwrap_err();
        let message = error.to_string();
        assert!(message.contains("outside the valid range"));
        assert!(message.contains("ffffffffffffffffff"));
    }

    #[test]
    fn test_negative_value() {
        let error = Query::from_arg("-5").unwrap_err();
        assert!(error.to_string().contains("-5"));
    }

    // A comma-free string is never split on period, so the whole string is
    // the vendor token and fails hex parsing.
    #[test]
    fn test_period_without_comma() {
        let error = Query::from_arg("1234.5678").unwrap_err();
        assert!(error.to_string().contains("1234.5678"));
    }

    // Only the first comma splits; trailing text stays in the device token.
    #[test]
    fn test_trailing_comma_in_device_token() {
        let error = Query::from_arg("abcd,1,").unwrap_err();
        assert!(error.to_string().contains("1,"));
    }

    #[test]
    fn test_sub_vendor_without_sub_device() {
        let error = Query::from_arg("abcd,1234.5").unwrap_err();
        assert!(error.to_string().contains("sub-device"));
    }

    #[test]
    fn test_empty_fields() {
        assert!(Query::from_arg("").is_err());
        assert!(Query::from_arg(",").is_err());
        assert!(Query::from_arg("abcd,").is_err());
        assert!(Query::from_arg("abcd,1234.").is_err());
    }

    #[test]
    fn test_range_boundaries() {
        assert_eq!(Query::from_arg("0").unwrap().vendor, 0);
        assert_eq!(Query::from_arg("ffff").unwrap().vendor, 0xffff);
    }
}
