#![forbid(unsafe_code)]

use std::sync::Arc;

use anyhow::{anyhow, Result};
use futures::stream::{FuturesUnordered, StreamExt};
use poem::Request;
use poem_openapi::{param::Query, payload::Json, ApiResponse, OpenApi};

use log::error;

use crate::utils::bench_utils::{self, clamp_queries, random_world_id, RequestDebug};
use crate::utils::config::RuntimeCtx;
use crate::utils::db;
use crate::utils::db_types::World;
use crate::utils::errors::HttpResult;

// ***************************************************************************
//                          Request/Response Definitions
// ***************************************************************************
pub struct QueriesApi {
    pub ctx: Arc<RuntimeCtx>,
}

struct ReqQueries {
    queries: Option<String>,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqQueries {
    type Req = ReqQueries;
    fn get_request_info(&self) -> String {
        let mut s = String::with_capacity(64);
        s.push_str("  Request parameters:");
        s.push_str("\n    queries: ");
        s.push_str(self.queries.as_deref().unwrap_or("<missing>"));
        s
    }
}

// ------------------- HTTP Status Codes -------------------
#[derive(Debug, ApiResponse)]
enum BenchResponse {
    #[oai(status = 200)]
    Http200(Json<Vec<World>>),
    #[oai(status = 500)]
    Http500(Json<HttpResult>),
}

fn make_http_200(worlds: Vec<World>) -> BenchResponse {
    BenchResponse::Http200(Json(worlds))
}
fn make_http_500(msg: String) -> BenchResponse {
    BenchResponse::Http500(Json(HttpResult::new(500.to_string(), msg)))
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl QueriesApi {
    /** The parameter is declared as a raw string so malformed values fall
     * back to the default count instead of being rejected by the framework.
     */
    #[oai(path = "/dbs", method = "get")]
    async fn get_queries(&self, http_req: &Request, queries: Query<Option<String>>) -> BenchResponse {
        let req = ReqQueries { queries: queries.0 };

        // -------------------- Process Request ----------------------
        match self.process(http_req, &req).await {
            Ok(r) => r,
            Err(e) => {
                let msg = "ERROR: ".to_owned() + e.to_string().as_str();
                error!("{}", msg);
                make_http_500(msg)
            },
        }
    }
}

// ***************************************************************************
//                          Request/Response Methods
// ***************************************************************************
impl QueriesApi {
    /// Process the request.
    async fn process(&self, http_req: &Request, req: &ReqQueries) -> Result<BenchResponse> {
        // Conditional logging depending on log level.
        bench_utils::debug_request(http_req, req);

        // Issue the fetches concurrently, each with an independently drawn
        // id.  The response array follows completion order, which is not
        // stable across runs.
        let count = clamp_queries(req.queries.as_deref());
        let mut fetches: FuturesUnordered<_> =
            (0..count).map(|_| fetch_random_world(&self.ctx)).collect();

        let mut worlds: Vec<World> = Vec::with_capacity(count);
        while let Some(world) = fetches.next().await {
            worlds.push(world?);
        }

        Ok(make_http_200(worlds))
    }
}

// ***************************************************************************
//                             Public Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// fetch_random_world:
// ---------------------------------------------------------------------------
/** Fetch one World row by a freshly drawn random id.  A missing row is an
 * error here since every drawn id lies in the populated range.
 */
pub async fn fetch_random_world(ctx: &RuntimeCtx) -> Result<World> {
    let id = random_world_id();
    db::get_world_by_id(ctx, id)
        .await?
        .ok_or_else(|| anyhow!("World row {} not found.", id))
}
