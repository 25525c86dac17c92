// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/lib.rs - Library for resolving PCI IDs to names.
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
 * # `pcilookup` Crate
 *
 * A library for resolving PCI vendor, device, and subsystem IDs to the names
 * recorded in the `pci.ids` database.
 *
 * This crate provides a full pipeline for turning a compact ID string into
 * human-readable names:
 *
 * 1. [db]: Loads the pci.ids database, plain or gzip-compressed.
 * 2. [query]: Parses `VID[,DID[.SVID.SDID]]` into a classified query.
 * 3. [resolver]: Resolves the query into names, one per level.
 *
 * ## Usage Example
 *
 * ```no_run
 * use pcilookup::db::PciDatabase;
 * use pcilookup::query::Query;
 * use pcilookup::resolver::Resolution;
 *
 * fn main() -> Result<(), Box<dyn std::error::Error>> {
 *     // Open the database from its conventional location
 *     let db = PciDatabase::open(None)?;
 *
 *     // Parse the ID string
 *     let query = Query::from_arg("8086,1237.8086.1237")?;
 *
 *     // Resolve the query
 *     let resolution = Resolution::from_query(&query, &db)?;
 *
 *     // Prints e.g. "Intel Corporation|440FX - 82441FX PMC [Natoma]|..."
 *     println!("{}", resolution);
 *
 *     Ok(())
 * }
 * ```
 */

pub mod db;
pub mod query;
pub mod resolver;
