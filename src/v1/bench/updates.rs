#![forbid(unsafe_code)]

use std::sync::Arc;

use anyhow::Result;
use futures::stream::{FuturesUnordered, StreamExt};
use poem::Request;
use poem_openapi::{param::Query, payload::Json, ApiResponse, OpenApi};

use log::error;

use crate::utils::bench_utils::{self, clamp_queries, random_world_id, RequestDebug};
use crate::utils::config::RuntimeCtx;
use crate::utils::db;
use crate::utils::db_types::World;
use crate::utils::errors::HttpResult;
use crate::v1::bench::queries::fetch_random_world;

// ***************************************************************************
//                          Request/Response Definitions
// ***************************************************************************
pub struct UpdatesApi {
    pub ctx: Arc<RuntimeCtx>,
}

struct ReqUpdates {
    queries: Option<String>,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqUpdates {
    type Req = ReqUpdates;
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
impl UpdatesApi {
    #[oai(path = "/updates", method = "get")]
    async fn get_updates(&self, http_req: &Request, queries: Query<Option<String>>) -> BenchResponse {
        let req = ReqUpdates { queries: queries.0 };

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
impl UpdatesApi {
    /// Process the request.
    async fn process(&self, http_req: &Request, req: &ReqUpdates) -> Result<BenchResponse> {
        // Conditional logging depending on log level.
        bench_utils::debug_request(http_req, req);

        // Fetch the victim rows concurrently, each by an independently
        // drawn id, collected in completion order.
        let count = clamp_queries(req.queries.as_deref());
        let mut fetches: FuturesUnordered<_> =
            (0..count).map(|_| fetch_random_world(&self.ctx)).collect();

        let mut worlds: Vec<World> = Vec::with_capacity(count);
        while let Some(world) = fetches.next().await {
            worlds.push(world?);
        }

        // Assign each row a replacement value from the same bounded draw
        // used for id selection, then persist all of them concurrently.
        for world in worlds.iter_mut() {
            world.random_number = random_world_id();
        }
        let updates: Vec<(i32, i32)> =
            worlds.iter().map(|w| (w.id, w.random_number)).collect();
        db::update_worlds(&self.ctx, &updates).await?;

        Ok(make_http_200(worlds))
    }
}
