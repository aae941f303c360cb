#![forbid(unsafe_code)]

use poem::Request;
use rand::Rng;

use log::{debug, LevelFilter};

// ***************************************************************************
//                                Constants
// ***************************************************************************
// The World table is populated externally with ids 1..=MAX_WORLD_ID.  This is
// a deployment constant, never computed from the store.
pub const MAX_WORLD_ID: i32 = 10_000;

// Bounds applied to the "queries" url parameter.
pub const MIN_QUERIES: usize = 1;
pub const MAX_QUERIES: usize = 500;

// ***************************************************************************
//                           GENERAL PUBLIC FUNCTIONS
// ***************************************************************************
// ---------------------------------------------------------------------------
// random_world_id:
// ---------------------------------------------------------------------------
/** Draw an integer uniformly from the closed World id range.  The same
 * helper supplies the replacement randomnumber values written by the
 * update endpoint, so both draws share one bound.
 */
pub fn random_world_id() -> i32 {
    rand::thread_rng().gen_range(1..=MAX_WORLD_ID)
}

// ---------------------------------------------------------------------------
// clamp_queries:
// ---------------------------------------------------------------------------
/** Derive the effective fetch count from the raw "queries" url parameter.
 * A missing or non-numeric value becomes 1; numeric values are clamped to
 * the nearest bound of [MIN_QUERIES, MAX_QUERIES].
 */
pub fn clamp_queries(raw: Option<&str>) -> usize {
    let parsed = match raw {
        Some(s) => parse_queries(s.trim()),
        None => MIN_QUERIES as i64,
    };
    parsed.clamp(MIN_QUERIES as i64, MAX_QUERIES as i64) as usize
}

// ---------------------------------------------------------------------------
// parse_queries:
// ---------------------------------------------------------------------------
/** Parse the trimmed parameter value.  Integers wider than i64 are still
 * integers, so they saturate toward the bound on their side of the range
 * instead of degrading to the default the way garbage input does.
 */
fn parse_queries(s: &str) -> i64 {
    match s.parse::<i64>() {
        Ok(n) => n,
        Err(_) => {
            let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                if s.starts_with('-') { i64::MIN } else { i64::MAX }
            } else {
                MIN_QUERIES as i64
            }
        },
    }
}

// ***************************************************************************
//                                  Traits
// ***************************************************************************
pub trait RequestDebug {
    type Req;
    fn get_request_info(&self) -> String;
}

// ---------------------------------------------------------------------------
// debug_request:
// ---------------------------------------------------------------------------
// Dump http request information to the log.
pub fn debug_request(http_req: &Request, req: &impl RequestDebug) {
    // Check that debug or higher logging is in effect.
    let level = log::max_level();
    if level < LevelFilter::Debug {
        return;
    }

    // Accumulate the output.
    let mut s = "\n".to_string();

    // Restate the URI.
    let uri = http_req.uri();
    s += format!("  URI: {:?}\n", uri).as_str();

    // Accumulate the headers.
    let it = http_req.headers().iter();
    for v in it {
        s += format!("  Header: {} = {:?} \n", v.0, v.1).as_str();
    }

    // List query parameters.
    if let Some(q) = uri.query() {
        s += format!("  Query Parameters: {:?}\n", q).as_str();
    }

    // Add the request-specific information.
    s += req.get_request_info().as_str();

    // Log the request particulars.
    debug!("{}", s);
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_missing_defaults_to_one() {
        assert_eq!(clamp_queries(None), 1);
    }

    #[test]
    fn clamp_non_numeric_defaults_to_one() {
        assert_eq!(clamp_queries(Some("")), 1);
        assert_eq!(clamp_queries(Some("foo")), 1);
        assert_eq!(clamp_queries(Some("12abc")), 1);
        assert_eq!(clamp_queries(Some("3.7")), 1);
    }

    #[test]
    fn clamp_out_of_range_hits_nearest_bound() {
        assert_eq!(clamp_queries(Some("0")), 1);
        assert_eq!(clamp_queries(Some("-3")), 1);
        assert_eq!(clamp_queries(Some("501")), 500);
        assert_eq!(clamp_queries(Some("999999999999")), 500);
    }

    #[test]
    fn clamp_overflowing_integers_saturate() {
        // Wider than i64 but still numeric, so the upper bound applies.
        assert_eq!(clamp_queries(Some("99999999999999999999")), 500);
        assert_eq!(clamp_queries(Some("+99999999999999999999")), 500);
        assert_eq!(clamp_queries(Some("-99999999999999999999")), 1);
    }

    #[test]
    fn clamp_in_range_passes_through() {
        assert_eq!(clamp_queries(Some("1")), 1);
        assert_eq!(clamp_queries(Some("20")), 20);
        assert_eq!(clamp_queries(Some(" 500 ")), 500);
    }

    #[test]
    fn random_ids_stay_in_range() {
        for _ in 0..1000 {
            let id = random_world_id();
            assert!((1..=MAX_WORLD_ID).contains(&id), "id {} out of range", id);
        }
    }
}
