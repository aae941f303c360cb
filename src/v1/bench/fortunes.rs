#![forbid(unsafe_code)]

use std::sync::Arc;

use anyhow::Result;
use lazy_static::lazy_static;
use poem_openapi::{payload::Html, payload::Json, ApiResponse, OpenApi};
use tera::{Context, Tera};

use log::error;

use crate::utils::config::RuntimeCtx;
use crate::utils::db;
use crate::utils::db_types::Fortune;
use crate::utils::errors::HttpResult;

// ***************************************************************************
//                                Constants
// ***************************************************************************
// The one non-persisted record appended to every response.
pub const SYNTHETIC_FORTUNE_ID: i32 = 0;
pub const SYNTHETIC_FORTUNE_MESSAGE: &str = "Additional fortune added at request time.";

// The .html suffix turns on tera's autoescaping, which the benchmark
// requires since fortune messages contain markup.
const FORTUNES_TEMPLATE_NAME: &str = "fortunes.html";
const FORTUNES_TEMPLATE: &str = concat!(
    "<!DOCTYPE html><html><head><title>Fortunes</title></head><body>",
    "<table><tr><th>id</th><th>message</th></tr>",
    "{% for fortune in fortunes %}",
    "<tr><td>{{ fortune.id }}</td><td>{{ fortune.message }}</td></tr>",
    "{% endfor %}",
    "</table></body></html>",
);

// ***************************************************************************
//                             Static Variables
// ***************************************************************************
lazy_static! {
    static ref TEMPLATES: Tera = {
        let mut tera = Tera::default();
        tera.add_raw_template(FORTUNES_TEMPLATE_NAME, FORTUNES_TEMPLATE)
            .expect("FAILED to register the fortunes template.");
        tera
    };
}

// ***************************************************************************
//                          Request/Response Definitions
// ***************************************************************************
pub struct FortunesApi {
    pub ctx: Arc<RuntimeCtx>,
}

// ------------------- HTTP Status Codes -------------------
#[derive(Debug, ApiResponse)]
enum BenchResponse {
    #[oai(status = 200)]
    Http200(Html<String>),
    #[oai(status = 500)]
    Http500(Json<HttpResult>),
}

fn make_http_200(page: String) -> BenchResponse {
    BenchResponse::Http200(Html(page))
}
fn make_http_500(msg: String) -> BenchResponse {
    BenchResponse::Http500(Json(HttpResult::new(500.to_string(), msg)))
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl FortunesApi {
    #[oai(path = "/fortunes", method = "get")]
    async fn get_fortunes(&self) -> BenchResponse {
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
impl FortunesApi {
    /// Process the request.
    async fn process(&self) -> Result<BenchResponse> {
        let fortunes = db::get_all_fortunes(&self.ctx).await?;
        let fortunes = prepare_fortunes(fortunes);
        Ok(make_http_200(render_fortunes(&fortunes)?))
    }
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// prepare_fortunes:
// ---------------------------------------------------------------------------
/** Append the synthetic record and sort ascending by message.  The sort is
 * stable, so equal messages keep their relative order.
 */
fn prepare_fortunes(mut fortunes: Vec<Fortune>) -> Vec<Fortune> {
    fortunes.push(Fortune::new(SYNTHETIC_FORTUNE_ID, SYNTHETIC_FORTUNE_MESSAGE.to_string()));
    fortunes.sort_by(|a, b| a.message.cmp(&b.message));
    fortunes
}

// ---------------------------------------------------------------------------
// render_fortunes:
// ---------------------------------------------------------------------------
fn render_fortunes(fortunes: &[Fortune]) -> Result<String> {
    let mut context = Context::new();
    context.insert("fortunes", fortunes);
    Ok(TEMPLATES.render(FORTUNES_TEMPLATE_NAME, &context)?)
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fortunes() -> Vec<Fortune> {
        vec![
            Fortune::new(1, "fortune: No such file or directory".to_string()),
            Fortune::new(2, "A computer scientist is someone who fixes things that aren't broken.".to_string()),
            Fortune::new(3, "<script>alert(\"This should not be displayed\");</script>".to_string()),
        ]
    }

    #[test]
    fn synthetic_fortune_appears_exactly_once() {
        let prepared = prepare_fortunes(sample_fortunes());
        let count = prepared.iter().filter(|f| f.id == SYNTHETIC_FORTUNE_ID).count();
        assert_eq!(count, 1);
        assert_eq!(prepared.len(), 4);
        let synthetic = prepared.iter().find(|f| f.id == SYNTHETIC_FORTUNE_ID).unwrap();
        assert_eq!(synthetic.message, SYNTHETIC_FORTUNE_MESSAGE);
    }

    #[test]
    fn fortunes_sorted_by_message() {
        let prepared = prepare_fortunes(sample_fortunes());
        for pair in prepared.windows(2) {
            assert!(pair[0].message <= pair[1].message);
        }
    }

    #[test]
    fn empty_table_still_yields_the_synthetic_record() {
        let prepared = prepare_fortunes(Vec::new());
        assert_eq!(prepared.len(), 1);
        assert_eq!(prepared[0].id, SYNTHETIC_FORTUNE_ID);
    }

    #[test]
    fn rendering_escapes_markup() {
        let prepared = prepare_fortunes(sample_fortunes());
        let page = render_fortunes(&prepared).unwrap();
        assert!(page.contains("<tr><th>id</th><th>message</th></tr>"));
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>alert"));
        assert!(page.contains(SYNTHETIC_FORTUNE_MESSAGE));
    }
}
