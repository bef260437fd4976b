use serde::{Deserialize, Serialize};

use crate::contract::{
    ActivateResponse, ExtensionRequest, ExtensionResponse, RenderItem, RenderListResponse,
};
use crate::controller::{ExtensionController, ServiceError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidJson,
    ItemNotFound,
    Activation,
    Source,
    Config,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransportResponse {
    Ok { response: ExtensionResponse },
    Err { error: ErrorResponse },
}

pub fn handle_request(
    controller: &mut ExtensionController,
    request: ExtensionRequest,
) -> TransportResponse {
    match request {
        ExtensionRequest::Query(request) => {
            let records = controller.handle_query(&request.query);
            let items = records.iter().map(RenderItem::from).collect();
            TransportResponse::Ok {
                response: ExtensionResponse::RenderList(RenderListResponse { items }),
            }
        }
        ExtensionRequest::Activate(request) => match controller.handle_activation(request.id) {
            Ok(command) => TransportResponse::Ok {
                response: ExtensionResponse::Activate(ActivateResponse {
                    activated: true,
                    command,
                }),
            },
            Err(error) => TransportResponse::Err {
                error: map_service_error(error),
            },
        },
    }
}

pub fn handle_json(controller: &mut ExtensionController, payload: &str) -> String {
    let response = match serde_json::from_str::<ExtensionRequest>(payload) {
        Ok(request) => handle_request(controller, request),
        Err(error) => TransportResponse::Err {
            error: ErrorResponse {
                code: ErrorCode::InvalidJson,
                message: error.to_string(),
            },
        },
    };

    serde_json::to_string(&response).expect("transport response should serialize")
}

fn map_service_error(error: ServiceError) -> ErrorResponse {
    match error {
        ServiceError::ItemNotFound(id) => ErrorResponse {
            code: ErrorCode::ItemNotFound,
            message: format!("window not found: {id}"),
        },
        ServiceError::Activation(message) => ErrorResponse {
            code: ErrorCode::Activation,
            message: message.to_string(),
        },
        ServiceError::Source(message) => ErrorResponse {
            code: ErrorCode::Source,
            message: message.to_string(),
        },
        ServiceError::Config(message) => ErrorResponse {
            code: ErrorCode::Config,
            message,
        },
    }
}
