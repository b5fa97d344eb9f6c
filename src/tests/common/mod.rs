// src/tests/common/mod.rs
pub use axum::Router;
pub use tokio::task::JoinHandle;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use reqwest::Client;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

/// Per-hit response logic for one mock SOAP operation: (hit index, request
/// body) -> (status, response body).
pub type Responder = Arc<dyn Fn(usize, &str) -> (StatusCode, String) + Send + Sync>;

pub fn respond_with<F>(f: F) -> Responder
where
    F: Fn(usize, &str) -> (StatusCode, String) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// GetToken responder issuing token-1, token-2, ... per hit.
pub fn serial_tokens() -> Responder {
    respond_with(|hit, _| (StatusCode::OK, get_token_response(&format!("token-{}", hit + 1))))
}

/// A fake FreeWebService endpoint dispatching on the SOAPAction header.
pub struct MockUpstream {
    pub addr: SocketAddr,
    pub handle: JoinHandle<()>,
    token_hits: Arc<AtomicUsize>,
    search_hits: Arc<AtomicUsize>,
}

impl MockUpstream {
    pub fn url(&self) -> String {
        format!("http://{}/FreeWebService.svc", self.addr)
    }

    pub fn token_hits(&self) -> usize {
        self.token_hits.load(Ordering::SeqCst)
    }

    pub fn search_hits(&self) -> usize {
        self.search_hits.load(Ordering::SeqCst)
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn spawn_soap_upstream(token: Responder, search: Responder) -> MockUpstream {
    let token_hits = Arc::new(AtomicUsize::new(0));
    let search_hits = Arc::new(AtomicUsize::new(0));

    let handler = {
        let token_hits = token_hits.clone();
        let search_hits = search_hits.clone();
        move |headers: HeaderMap, body: String| {
            let token = token.clone();
            let search = search.clone();
            let token_hits = token_hits.clone();
            let search_hits = search_hits.clone();
            async move {
                let action = headers
                    .get("SOAPAction")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("");
                if action.ends_with("GetToken") {
                    let hit = token_hits.fetch_add(1, Ordering::SeqCst);
                    token(hit, &body)
                } else {
                    let hit = search_hits.fetch_add(1, Ordering::SeqCst);
                    search(hit, &body)
                }
            }
        }
    };

    let router = Router::new().route(
        "/FreeWebService.svc",
        post(handler).get(|| async { "<wsdl:definitions/>" }),
    );
    let (handle, addr) = spawn_axum(router).await;

    MockUpstream { addr, handle, token_hits, search_hits }
}

pub fn get_token_response(token: &str) -> String {
    format!(
        "<s:Envelope xmlns:s=\"http://schemas.xmlsoap.org/soap/envelope/\"><s:Body>\
         <GetTokenResponse xmlns=\"http://tempuri.org/\"><GetTokenResult>{token}</GetTokenResult></GetTokenResponse>\
         </s:Body></s:Envelope>"
    )
}

pub fn lege_fragment(title: &str, date: &str, id: u32) -> String {
    format!(
        "<a:Lege><a:Titlu>{title}</a:Titlu><a:Numar>1</a:Numar><a:TipAct>LEGE</a:TipAct>\
         <a:Emitent>PARLAMENTUL</a:Emitent><a:DataVigoare>{date}</a:DataVigoare>\
         <a:Publicatie>M.Of.</a:Publicatie><a:Text>text {id}</a:Text>\
         <a:LinkDetaliiDocument>https://legislatie.just.ro/Public/DetaliiDocument/{id}</a:LinkDetaliiDocument>\
         </a:Lege>"
    )
}

pub fn search_response(fragments: &[String]) -> String {
    format!(
        "<s:Envelope xmlns:s=\"http://schemas.xmlsoap.org/soap/envelope/\"><s:Body>\
         <SearchResponse xmlns=\"http://tempuri.org/\"><SearchResult \
         xmlns:a=\"http://schemas.datacontract.org/2004/07/FreeWebService\">\
         <a:Legi>{}</a:Legi></SearchResult></SearchResponse>\
         </s:Body></s:Envelope>",
        fragments.concat()
    )
}
