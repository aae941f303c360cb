#![forbid(unsafe_code)]

use std::sync::Arc;

use clap::Parser;
use log::info;
use poem::middleware::SetHeader;
use poem::{listener::TcpListener, EndpointExt, Route};
use poem_openapi::OpenApiService;

// Benchmark utilities.
use crate::utils::config::{init_log, init_runtime_context, BenchArgs};
use crate::utils::errors::Errors;
use crate::v1::bench::db::DbApi;
use crate::v1::bench::fortunes::FortunesApi;
use crate::v1::bench::json::JsonApi;
use crate::v1::bench::plaintext::PlaintextApi;
use crate::v1::bench::queries::QueriesApi;
use crate::v1::bench::updates::UpdatesApi;

// Modules
mod utils;
mod v1;

// ***************************************************************************
//                                Constants
// ***************************************************************************
const SERVER_NAME: &str = "BenchServer"; // for poem logging

// Fixed value of the Server header set on every response.
const SERVER_HEADER: &str = "poem";

// ---------------------------------------------------------------------------
// main:
// ---------------------------------------------------------------------------
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // --------------- Initialize Benchmark ------------
    // Announce ourselves.
    println!("Starting bench_server!");

    // Read the command line and configure logging.
    let args = BenchArgs::parse();
    init_log(&args);

    // Build the runtime context, which connects the database pool.  The
    // context is passed to every endpoint rather than living in global state.
    let ctx = Arc::new(init_runtime_context(&args).await);
    info!("{}", Errors::InputParms(format!("{:#?}", ctx.parms)));

    // --------------- Main Loop Set Up ---------------
    // Assign base URL.
    let bench_url = format!("http://{}:{}", ctx.parms.http_addr, ctx.parms.http_port);

    // Create a tuple with all the benchmark endpoint structs.
    let endpoints = (
        JsonApi,
        PlaintextApi,
        DbApi { ctx: ctx.clone() },
        QueriesApi { ctx: ctx.clone() },
        FortunesApi { ctx: ctx.clone() },
        UpdatesApi { ctx: ctx.clone() },
    );
    let api_service =
        OpenApiService::new(endpoints, "Benchmark Server", "0.1.0").server(bench_url);

    // Allow the generated openapi specs to be retrieved from the server.
    let spec = api_service.spec_endpoint();
    let spec_yaml = api_service.spec_endpoint_yaml();

    // Create the routes and run the server.  The benchmark paths live at the
    // url root; every response advertises the serving framework.
    let addr = format!("{}:{}", ctx.parms.http_addr, ctx.parms.http_port);
    let ui = api_service.swagger_ui();
    let app = Route::new()
        .nest("/", api_service)
        .nest("/docs", ui)
        .at("/spec", spec)
        .at("/spec_yaml", spec_yaml)
        .with(SetHeader::new().overriding("Server", SERVER_HEADER));

    // ------------------ Main Loop -------------------
    poem::Server::new(TcpListener::bind(addr))
        .name(SERVER_NAME)
        .run(app)
        .await
}
