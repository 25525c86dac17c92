// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/main.rs - Command-line tool to look up PCI IDs.
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

use std::path::PathBuf;
use std::process;

use clap::Parser;

use pcilookup::db::PciDatabase;
use pcilookup::query::Query;
use pcilookup::resolver::Resolution;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a pci.ids database, plain or gzip-compressed.
    #[arg(long)]
    db: Option<PathBuf>,

    /// PCI IDs to resolve, each as VID[,DID[.SVID.SDID]] in hex.
    ids: Vec<String>,
}

fn main() {
    let args = Args::parse();

    // Checked here instead of via clap so the exit code is 1, not 2.
    if args.ids.is_empty() {
        eprintln!("at least one pci id argument is required");
        process::exit(1);
    }

    let db = match PciDatabase::open(args.db.as_deref()) {
        Ok(db) => db,
        Err(error) => {
            eprintln!("failed to open pci database: {error}");
            process::exit(1);
        }
    };

    for arg in &args.ids {
        let query = match Query::from_arg(arg) {
            Ok(query) => query,
            Err(error) => {
                eprintln!("{error}");
                process::exit(1);
            }
        };

        match Resolution::from_query(&query, &db) {
            Ok(resolution) => println!("{resolution}"),
            Err(error) => {
                eprintln!("{error}");
                process::exit(1);
            }
        }
    }
}
