//! The call-control document handed to the telephony provider.
//!
//! Answering a call with this document makes the provider speak a short wait
//! message, then connect the call leg to the `/socket` endpoint as 16-bit
//! linear PCM at 16 kHz, which is how a live call becomes a listener.

use serde::Serialize;

use crate::server::ServerConfig;

/// One action in the provider call-control document.
#[derive(Debug, Serialize)]
pub struct NccoAction {
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "eventUrl", skip_serializing_if = "Vec::is_empty")]
    pub event_url: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub endpoint: Vec<NccoEndpoint>,
}

#[derive(Debug, Serialize)]
pub struct NccoEndpoint {
    #[serde(rename = "type")]
    pub kind: String,
    pub uri: String,
    #[serde(rename = "content-type")]
    pub content_type: String,
    pub headers: NccoHeaders,
}

#[derive(Debug, Serialize)]
pub struct NccoHeaders {
    pub app: String,
    pub cli: String,
}

/// Build the answer document: greet the caller, then connect the leg to the
/// listener socket.
pub fn answer_ncco(config: &ServerConfig) -> Vec<NccoAction> {
    vec![
        NccoAction {
            action: "talk".into(),
            text: Some("Please wait while we connect you".into()),
            event_url: Vec::new(),
            from: None,
            endpoint: Vec::new(),
        },
        NccoAction {
            action: "connect".into(),
            text: None,
            event_url: vec![format!("http://{}/event", config.public_host)],
            from: (!config.cli.is_empty()).then(|| config.cli.clone()),
            endpoint: vec![NccoEndpoint {
                kind: "websocket".into(),
                uri: format!("ws://{}/socket", config.public_host),
                content_type: "audio/l16;rate=16000".into(),
                headers: NccoHeaders {
                    app: "soundbridge".into(),
                    cli: config.cli.clone(),
                },
            }],
        },
    ]
}
