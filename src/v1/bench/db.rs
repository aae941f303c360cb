#![forbid(unsafe_code)]

use std::sync::Arc;

use anyhow::Result;
use poem_openapi::{payload::Json, ApiResponse, OpenApi};

use log::error;

use crate::utils::bench_utils::random_world_id;
use crate::utils::config::RuntimeCtx;
use crate::utils::db;
use crate::utils::db_types::World;
use crate::utils::errors::HttpResult;

// ***************************************************************************
//                          Request/Response Definitions
// ***************************************************************************
pub struct DbApi {
    pub ctx: Arc<RuntimeCtx>,
}

// ------------------- HTTP Status Codes -------------------
#[derive(Debug, ApiResponse)]
enum BenchResponse {
    #[oai(status = 200)]
    Http200(Json<World>),
    #[oai(status = 404)]
    Http404(Json<HttpResult>),
    #[oai(status = 500)]
    Http500(Json<HttpResult>),
}

fn make_http_200(world: World) -> BenchResponse {
    BenchResponse::Http200(Json(world))
}
fn make_http_404(msg: String) -> BenchResponse {
    BenchResponse::Http404(Json(HttpResult::new(404.to_string(), msg)))
}
fn make_http_500(msg: String) -> BenchResponse {
    BenchResponse::Http500(Json(HttpResult::new(500.to_string(), msg)))
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl DbApi {
    #[oai(path = "/db", method = "get")]
    async fn get_db(&self) -> BenchResponse {
        match self.process().await {
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
impl DbApi {
    /// Process the request.
    async fn process(&self) -> Result<BenchResponse> {
        // Ids are uniform over the configured valid range, so a miss means
        // the store is not populated as expected.  We surface that as an
        // explicit 404 rather than serializing a null body.
        let id = random_world_id();
        match db::get_world_by_id(&self.ctx, id).await? {
            Some(world) => Ok(make_http_200(world)),
            None => Ok(make_http_404(format!("World row {} not found.", id))),
        }
    }
}
