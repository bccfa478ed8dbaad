// Copyright (c) Saverly.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::store;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap();
    let out = sub.get_one::<String>("out").unwrap();

    let txns = store::load_transactions(conn, user)?;

    let mut wtr = csv::Writer::from_path(out)?;
    wtr.write_record(["id", "type", "amount", "description", "date"])?;
    for t in &txns {
        wtr.write_record([
            t.id.as_str(),
            t.kind.as_str(),
            &t.amount.to_string(),
            t.description.as_str(),
            &t.date.to_rfc3339(),
        ])?;
    }
    wtr.flush()?;
    println!("Exported {} transactions to {}", txns.len(), out);
    Ok(())
}
