#![forbid(unsafe_code)]

use poem_openapi::{payload::PlainText, OpenApi};

use crate::v1::bench::json::HELLO_MESSAGE;

// ***************************************************************************
//                          Request/Response Definitions
// ***************************************************************************
pub struct PlaintextApi;

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl PlaintextApi {
    #[oai(path = "/plaintext", method = "get")]
    async fn get_plaintext(&self) -> PlainText<String> {
        PlainText(HELLO_MESSAGE.to_string())
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use poem::test::TestClient;
    use poem_openapi::OpenApiService;

    use super::*;

    #[tokio::test]
    async fn plaintext_returns_the_exact_bytes() {
        let service = OpenApiService::new(PlaintextApi, "Benchmark Server", "0.1.0");
        let cli = TestClient::new(service);

        let resp = cli.get("/plaintext").send().await;
        resp.assert_status_is_ok();
        resp.assert_content_type("text/plain; charset=utf-8");
        resp.assert_text(HELLO_MESSAGE).await;
    }

    #[tokio::test]
    async fn plaintext_is_idempotent() {
        let service = OpenApiService::new(PlaintextApi, "Benchmark Server", "0.1.0");
        let cli = TestClient::new(service);

        for _ in 0..3 {
            let resp = cli.get("/plaintext").send().await;
            resp.assert_status_is_ok();
            resp.assert_text(HELLO_MESSAGE).await;
        }
    }
}
