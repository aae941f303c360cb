// This file contains the benchmark database structs and related definitions.
#![forbid(unsafe_code)]

use poem_openapi::Object;
use serde::Serialize;

// ---------------------------------------------------------------------------
// World:
// ---------------------------------------------------------------------------
/** A row in the World table.  The column is named "randomnumber" in the
 * store but the benchmark wire format spells the field "randomNumber".
 */
#[derive(Object, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct World {
    pub id: i32,
    #[oai(rename = "randomNumber")]
    #[serde(rename = "randomNumber")]
    pub random_number: i32,
}

impl World {
    pub fn new(id: i32, random_number: i32) -> Self {
        Self { id, random_number }
    }
}

// ---------------------------------------------------------------------------
// Fortune:
// ---------------------------------------------------------------------------
/** A row in the Fortune table.  Read-only from this system's perspective;
 * the one synthetic record appended per request is never persisted.
 */
#[derive(Object, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Fortune {
    pub id: i32,
    pub message: String,
}

impl Fortune {
    pub fn new(id: i32, message: String) -> Self {
        Self { id, message }
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_wire_format() {
        // The mutable field serializes camel-cased even though the column is
        // all lowercase.
        let w = World::new(42, 7321);
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, r#"{"id":42,"randomNumber":7321}"#);
    }

    #[test]
    fn fortune_wire_format() {
        let f = Fortune::new(11, "A computer program does what you tell it to do.".to_string());
        let json = serde_json::to_string(&f).unwrap();
        assert_eq!(json, r#"{"id":11,"message":"A computer program does what you tell it to do."}"#);
    }
}
