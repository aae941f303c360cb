#![forbid(unsafe_code)]

use poem_openapi::{payload::Json, Object, OpenApi};

// The constant greeting returned by this endpoint and /plaintext.
pub const HELLO_MESSAGE: &str = "Hello, World!";

// ***************************************************************************
//                          Request/Response Definitions
// ***************************************************************************
pub struct JsonApi;

#[derive(Object)]
struct RespHello {
    message: String,
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl JsonApi {
    #[oai(path = "/json", method = "get")]
    async fn get_json(&self) -> Json<RespHello> {
        Json(RespHello { message: HELLO_MESSAGE.to_string() })
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
    async fn json_returns_the_exact_greeting() {
        let service = OpenApiService::new(JsonApi, "Benchmark Server", "0.1.0");
        let cli = TestClient::new(service);

        let resp = cli.get("/json").send().await;
        resp.assert_status_is_ok();
        resp.assert_text(r#"{"message":"Hello, World!"}"#).await;
    }

    #[tokio::test]
    async fn json_is_idempotent() {
        let service = OpenApiService::new(JsonApi, "Benchmark Server", "0.1.0");
        let cli = TestClient::new(service);

        // Repeated requests yield byte-identical responses.
        for _ in 0..3 {
            let resp = cli.get("/json").send().await;
            resp.assert_status_is_ok();
            resp.assert_text(r#"{"message":"Hello, World!"}"#).await;
        }
    }
}
