// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/db.rs - Loader for the pci.ids database.
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
 * # `db` Module
 *
 * This module loads the `pci.ids` text database, plain or gzip-compressed,
 * into an in-memory vendor → device → subsystem hierarchy.
 *
 * The file format is line-based, with indentation indicating nesting:
 *
 * ```text
 * # comment
 * vvvv  vendor name
 * <TAB>dddd  device name
 * <TAB><TAB>ssss dddd  subsystem name
 * C 0c  class name (device-class section, not loaded)
 * ```
 *
 * ## Usage Example
 *
 * ```no_run
 * use pcilookup::db::PciDatabase;
 *
 * fn main() -> Result<(), Box<dyn std::error::Error>> {
 *     // Probe the conventional install locations
 *     let db = PciDatabase::open(None)?;
 *
 *     if let Some(vendor) = db.vendor(0x8086) {
 *         println!("Vendor: {}", vendor.name);
 *     }
 *
 *     Ok(())
 * }
 * ```
 */

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::io::prelude::*;
use std::path::Path;

use flate2::read::GzDecoder;

/// Conventional install locations for the database, probed in order.
const SEARCH_PATHS: [&str; 4] = [
    "/usr/share/hwdata/pci.ids",
    "/usr/share/misc/pci.ids",
    "/usr/share/hwdata/pci.ids.gz",
    "/usr/share/misc/pci.ids.gz",
];

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// A device entry under a vendor.
#[derive(Debug)]
pub struct Device {
    /// The name of the device.
    pub name: String,
    /// Subsystem names keyed by (sub-vendor id, sub-device id).
    pub subsystems: HashMap<(u16, u16), String>,
}

impl Device {
    /// Looks up a subsystem name by sub-vendor and sub-device id.
    pub fn subsystem(&self, svid: u16, sdid: u16) -> Option<&str> {
        self.subsystems.get(&(svid, sdid)).map(String::as_str)
    }
}

/// A vendor entry and the devices it defines.
#[derive(Debug)]
pub struct Vendor {
    /// The name of the vendor.
    pub name: String,
    /// Device entries keyed by device id.
    pub devices: HashMap<u16, Device>,
}

impl Vendor {
    /// Looks up a device entry by device id.
    pub fn device(&self, did: u16) -> Option<&Device> {
        self.devices.get(&did)
    }
}

/// An in-memory pci.ids database. Read-only after loading.
#[derive(Debug)]
pub struct PciDatabase {
    /// Vendor entries keyed by vendor id.
    pub vendors: HashMap<u16, Vendor>,
}

impl PciDatabase {
    /// Parses raw database bytes, decompressing first if they are gzipped.
    ///
    /// # Arguments
    ///
    /// * `data` - The raw bytes of a pci.ids file, plain or gzip-compressed.
    ///
    /// # Returns
    ///
    /// A `Result` containing the loaded `PciDatabase` or an error.
    pub fn from_bytes(data: &[u8]) -> Result<Self, Box<dyn std::error::Error>> {
        let text = if data.starts_with(&GZIP_MAGIC) {
            let decompressed = decompress(data)?;
            String::from_utf8_lossy(&decompressed).to_string()
        } else {
            String::from_utf8_lossy(data).to_string()
        };

        let mut vendors: HashMap<u16, Vendor> = HashMap::new();
        let mut current_vendor: Option<u16> = None;
        let mut current_device: Option<u16> = None;

        for (index, line) in text.lines().enumerate() {
            let number = index + 1;
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // The device-class section follows all vendor data.
            if line.starts_with("C ") {
                break;
            }

            if let Some(rest) = line.strip_prefix("\t\t") {
                let (svid_field, rest) = split_field(rest);
                let (sdid_field, name) = split_field(rest);
                let svid = parse_db_id(svid_field, number)?;
                let sdid = parse_db_id(sdid_field, number)?;

                let device = current_vendor
                    .and_then(|vid| vendors.get_mut(&vid))
                    .and_then(|vendor| {
                        current_device.and_then(|did| vendor.devices.get_mut(&did))
                    })
                    .ok_or_else(|| {
                        format!("line {number}: subsystem entry before any device")
                    })?;
                device.subsystems.insert((svid, sdid), name.to_string());
            } else if let Some(rest) = line.strip_prefix('\t') {
                let (did_field, name) = split_field(rest);
                let did = parse_db_id(did_field, number)?;

                let vendor = current_vendor
                    .and_then(|vid| vendors.get_mut(&vid))
                    .ok_or_else(|| format!("line {number}: device entry before any vendor"))?;
                vendor.devices.insert(
                    did,
                    Device {
                        name: name.to_string(),
                        subsystems: HashMap::new(),
                    },
                );
                current_device = Some(did);
            } else {
                let (vid_field, name) = split_field(line);
                let vid = parse_db_id(vid_field, number)?;

                vendors.insert(
                    vid,
                    Vendor {
                        name: name.to_string(),
                        devices: HashMap::new(),
                    },
                );
                current_vendor = Some(vid);
                current_device = None;
            }
        }

        Ok(Self { vendors })
    }

    /// Loads the database from a file.
    pub fn from_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;

        Self::from_bytes(&buffer)
    }

    /// Opens the database from an explicit path, or probes the conventional
    /// install locations when no path is given.
    pub fn open(path: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(path) = path {
            return Self::from_path(path);
        }

        for candidate in SEARCH_PATHS {
            let candidate = Path::new(candidate);
            if candidate.exists() {
                return Self::from_path(candidate);
            }
        }

        Err("no pci.ids database found in the default locations".into())
    }

    /// Looks up a vendor entry by vendor id.
    pub fn vendor(&self, vid: u16) -> Option<&Vendor> {
        self.vendors.get(&vid)
    }
}

fn decompress(data: &[u8]) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut decoder = GzDecoder::new(data);
    let mut buffer = Vec::new();
    decoder.read_to_end(&mut buffer)?;
    Ok(buffer)
}

fn split_field(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((field, rest)) => (field, rest.trim_start()),
        None => (line, ""),
    }
}

fn parse_db_id(field: &str, number: usize) -> Result<u16, Box<dyn std::error::Error>> {
    u16::from_str_radix(field, 16)
        .map_err(|_| format!("line {number}: invalid id: {field}").into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_IDS: &str = "\
# Sample database
0001  First Vendor
8086  Intel Corporation
\t1237  440FX - 82441FX PMC [Natoma]
\t\t8086 1237  Reference board
\t\t1028 0123  OEM variant
\t7113  82371AB/EB/MB PIIX4 ACPI
C 06  Bridge
\t00  Host bridge
";

    #[test]
    fn test_vendor_lookup() {
        let db = PciDatabase::from_bytes(SAMPLE_IDS.as_bytes()).unwrap();
        assert_eq!(db.vendor(0x0001).unwrap().name, "First Vendor");
        assert_eq!(db.vendor(0x8086).unwrap().name, "Intel Corporation");
        assert!(db.vendor(0xffff).is_none());
    }

    #[test]
    fn test_device_lookup() {
        let db = PciDatabase::from_bytes(SAMPLE_IDS.as_bytes()).unwrap();
        let vendor = db.vendor(0x8086).unwrap();
        assert_eq!(
            vendor.device(0x1237).unwrap().name,
            "440FX - 82441FX PMC [Natoma]"
        );
        assert_eq!(vendor.device(0x7113).unwrap().name, "82371AB/EB/MB PIIX4 ACPI");
        assert!(vendor.device(0x0000).is_none());
    }

    #[test]
    fn test_subsystem_lookup() {
        let db = PciDatabase::from_bytes(SAMPLE_IDS.as_bytes()).unwrap();
        let device = db.vendor(0x8086).unwrap().device(0x1237).unwrap();
        assert_eq!(device.subsystem(0x8086, 0x1237).unwrap(), "Reference board");
        assert_eq!(device.subsystem(0x1028, 0x0123).unwrap(), "OEM variant");
        assert!(device.subsystem(0x8086, 0xffff).is_none());
    }

    #[test]
    fn test_class_section_not_loaded() {
        let db = PciDatabase::from_bytes(SAMPLE_IDS.as_bytes()).unwrap();
        assert_eq!(db.vendors.len(), 2);
        assert!(db.vendor(0x0006).is_none());
        assert!(db.vendor(0x0000).is_none());
    }

    #[test]
    fn test_gzipped_input() {
        use flate2::Compression;
        use flate2::write::GzEncoder;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(SAMPLE_IDS.as_bytes()).unwrap();
        let compressed = encoder.finish().unwrap();

        let db = PciDatabase::from_bytes(&compressed).unwrap();
        assert_eq!(db.vendor(0x8086).unwrap().name, "Intel Corporation");
    }

    #[test]
    fn test_device_before_vendor() {
        let result = PciDatabase::from_bytes(b"\t1234  Orphan device\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_subsystem_before_device() {
        let result = PciDatabase::from_bytes(b"8086  Intel Corporation\n\t\t8086 1237  Orphan\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_id_field() {
        let result = PciDatabase::from_bytes(b"80g6  Bad Vendor\n");
        assert!(result.unwrap_err().to_string().contains("line 1"));
    }
}
