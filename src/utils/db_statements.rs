// This file contains all SQL statements issued by bench_server.
//
// The benchmark schema is pre-existing and case-sensitive, so the table
// names must be double-quoted exactly as created ("World", "Fortune").
#![forbid(unsafe_code)]

// ========================= World table ===========================
pub const GET_WORLD: &str = concat!(
    "SELECT id, randomnumber ",
    "FROM \"World\" WHERE id = $1",
);

pub const UPDATE_WORLD: &str = concat!(
    "UPDATE \"World\" SET randomnumber = $1 WHERE id = $2",
);

// ========================= Fortune table =========================
pub const LIST_FORTUNES: &str = concat!(
    "SELECT id, message ",
    "FROM \"Fortune\"",
);
