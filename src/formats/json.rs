//! JSON cheatcodes.
//!
//! A file may hold a single cheatcode object, an array of them, or one object per line
//! (JSON Lines).

use crate::cheatcode::Cheatcode;
use crate::error::{Error, Result};
use crate::formats::Format;

/// Cheatcodes serialised with serde's JSON representation of [`Cheatcode`].
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &'static str {
        "json"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json", "jsonl"]
    }

    fn parse(&self, id: &str, source: &str) -> Result<Vec<Cheatcode>> {
        let trimmed = source.trim_start();

        if trimmed.starts_with('[') {
            // Array format: [{cheatcode1}, {cheatcode2}]
            return Ok(serde_json::from_str::<Vec<Cheatcode>>(source)?);
        }

        let whole = match serde_json::from_str::<Cheatcode>(source) {
            Ok(cheatcode) => return Ok(vec![cheatcode]),
            Err(e) => e,
        };
        // Well-formed JSON with the wrong shape is one object, not JSON Lines.
        if whole.is_data() {
            return Err(Error::parse(id, whole.to_string()));
        }

        // Newline-delimited objects
        source
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(number, line)| {
                serde_json::from_str::<Cheatcode>(line).map_err(|e| {
                    Error::parse(id, format!("line {}: {e}", number + 1))
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../tests/json.rs"]
mod tests;
