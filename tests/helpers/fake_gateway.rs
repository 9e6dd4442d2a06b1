// Fake Daraja Gateway
//
// Serves the two Daraja endpoints the relay calls, over real HTTP via
// actix-test. Responses are scripted per test and every call is recorded.

use std::sync::{Arc, Mutex};

use actix_web::{web, App, HttpRequest, HttpResponse};
use serde_json::{json, Value};

pub use actix_test::TestServer;

/// Scripted response for one endpoint
#[derive(Debug, Clone)]
pub struct ScriptedResponse {
    pub status: u16,
    pub body: String,
}

impl ScriptedResponse {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

/// Request observed by the fake gateway
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub authorization: Option<String>,
    pub query: String,
    pub body: Option<Value>,
}

#[derive(Debug)]
pub struct FakeGatewayState {
    pub token_response: Mutex<ScriptedResponse>,
    pub stk_response: Mutex<ScriptedResponse>,
    pub token_calls: Mutex<Vec<RecordedCall>>,
    pub stk_calls: Mutex<Vec<RecordedCall>>,
}

impl FakeGatewayState {
    pub fn token_call_count(&self) -> usize {
        self.token_calls.lock().unwrap().len()
    }

    pub fn stk_call_count(&self) -> usize {
        self.stk_calls.lock().unwrap().len()
    }

    pub fn last_token_call(&self) -> RecordedCall {
        self.token_calls
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("token endpoint was never called")
    }

    pub fn last_stk_call(&self) -> RecordedCall {
        self.stk_calls
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("STK push endpoint was never called")
    }

    pub fn set_token_response(&self, response: ScriptedResponse) {
        *self.token_response.lock().unwrap() = response;
    }

    pub fn set_stk_response(&self, response: ScriptedResponse) {
        *self.stk_response.lock().unwrap() = response;
    }
}

/// Running fake gateway plus its shared state
pub struct FakeGateway {
    pub server: TestServer,
    pub state: Arc<FakeGatewayState>,
}

impl FakeGateway {
    /// Base URL to hand to `DarajaConfig::base_url`
    pub fn base_url(&self) -> String {
        format!("http://{}", self.server.addr())
    }
}

pub const FAKE_ACCESS_TOKEN: &str = "fake-access-token-c9SQxWWhmdVRlyh0zh8gZDTkubVF";

/// Token body in the shape Daraja returns (expires_in is a string)
pub fn default_token_body() -> Value {
    json!({
        "access_token": FAKE_ACCESS_TOKEN,
        "expires_in": "3599"
    })
}

/// STK push acceptance body in the shape Daraja returns
pub fn default_stk_body() -> Value {
    json!({
        "MerchantRequestID": "29115-34620561-1",
        "CheckoutRequestID": "ws_CO_191220191020363925",
        "ResponseCode": "0",
        "ResponseDescription": "Success. Request accepted for processing",
        "CustomerMessage": "Success. Request accepted for processing"
    })
}

fn record(req: &HttpRequest, body: Option<Value>) -> RecordedCall {
    RecordedCall {
        authorization: req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_string()),
        query: req.query_string().to_string(),
        body,
    }
}

fn respond(scripted: &ScriptedResponse) -> HttpResponse {
    let status = actix_web::http::StatusCode::from_u16(scripted.status)
        .expect("scripted status must be valid");
    HttpResponse::build(status)
        .content_type("application/json")
        .body(scripted.body.clone())
}

async fn generate_token(
    state: web::Data<FakeGatewayState>,
    req: HttpRequest,
) -> HttpResponse {
    state.token_calls.lock().unwrap().push(record(&req, None));
    let scripted = state.token_response.lock().unwrap().clone();
    respond(&scripted)
}

async fn process_request(
    state: web::Data<FakeGatewayState>,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    let parsed = serde_json::from_slice::<Value>(&body).ok();
    state.stk_calls.lock().unwrap().push(record(&req, parsed));
    let scripted = state.stk_response.lock().unwrap().clone();
    respond(&scripted)
}

/// Spawn a fake gateway that accepts every call
pub fn spawn_fake_gateway() -> FakeGateway {
    spawn_fake_gateway_with(
        ScriptedResponse::json(200, default_token_body()),
        ScriptedResponse::json(200, default_stk_body()),
    )
}

/// Spawn a fake gateway with scripted token and STK push responses
pub fn spawn_fake_gateway_with(
    token_response: ScriptedResponse,
    stk_response: ScriptedResponse,
) -> FakeGateway {
    let state = Arc::new(FakeGatewayState {
        token_response: Mutex::new(token_response),
        stk_response: Mutex::new(stk_response),
        token_calls: Mutex::new(Vec::new()),
        stk_calls: Mutex::new(Vec::new()),
    });

    let data = web::Data::from(state.clone());
    let server = actix_test::start(move || {
        App::new()
            .app_data(data.clone())
            .route("/oauth/v1/generate", web::get().to(generate_token))
            .route(
                "/mpesa/stkpush/v1/processrequest",
                web::post().to(process_request),
            )
    });

    FakeGateway { server, state }
}
