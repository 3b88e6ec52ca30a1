// SPDX-License-Identifier: Apache-2.0

use crate::error_mapping::API_ERROR_SCHEMA_REF;
use crate::ApiErrorCode;
use serde_json::{json, Value};

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {"application/json": {"schema": {"$ref": API_ERROR_SCHEMA_REF}}}
    })
}

fn json_body(schema: &str) -> Value {
    json!({
        "required": true,
        "content": {"application/json": {"schema": {"$ref": format!("#/components/schemas/{schema}")}}}
    })
}

fn path_param(name: &str) -> Value {
    json!({"name": name, "in": "path", "required": true, "schema": {"type": "string"}})
}

/// Schemaless collection: list, create, and optionally update/delete by id.
fn collection_paths(label: &str) -> (Value, Value) {
    let list = json!({
        "get": {"responses": {"200": {"description": format!("all {label} records in insertion order")}}},
        "post": {
            "requestBody": json_body("Record"),
            "responses": {
                "201": {"description": format!("created {label} record with generated id")},
                "400": error_response("malformed body"),
                "503": error_response("store unavailable")
            }
        }
    });
    let item = json!({
        "parameters": [path_param("id")],
        "put": {
            "requestBody": json_body("Record"),
            "responses": {
                "200": {"description": format!("{label} replaced")},
                "404": error_response("no record with this id")
            }
        },
        "delete": {
            "responses": {
                "200": {"description": "deleted", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Success"}}}},
                "404": error_response("no record with this id")
            }
        }
    });
    (list, item)
}

#[must_use]
pub fn openapi_v1_spec() -> Value {
    let error_codes = ApiErrorCode::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>();
    let (providers, provider) = collection_paths("provider");
    let (reguladores, regulador) = collection_paths("regulador");
    let (waitinglist, mut waiting_item) = collection_paths("waiting list");
    waiting_item["put"]["requestBody"] = json_body("WaitingListPatch");
    let (bloqueio_providers, mut bloqueio_provider) = collection_paths("bloqueio provider");
    if let Some(ops) = bloqueio_provider.as_object_mut() {
        ops.remove("delete");
    }
    let (bloqueio_alteracoes, _) = collection_paths("bloqueio alteracao");

    json!({
      "openapi": "3.0.3",
      "info": {"title": "regdesk API", "version": "v1"},
      "paths": {
        "/": {"get": {"responses": {"200": {"description": "front-end index page"}, "404": {"description": "no static directory configured"}}}},
        "/favicon.ico": {"get": {"responses": {"204": {"description": "no icon"}}}},
        "/healthz": {"get": {"responses": {"200": {"description": "ok"}}}},
        "/api/openapi.json": {"get": {"responses": {"200": {"description": "this document"}}}},
        "/api/login": {
          "post": {
            "requestBody": json_body("LoginRequest"),
            "responses": {
              "200": {"description": "cpf is allow-listed"},
              "401": error_response("cpf not allow-listed")
            }
          }
        },
        "/api/users": {
          "get": {"responses": {"200": {"description": "allow-listed cpfs"}}},
          "post": {
            "requestBody": json_body("LoginRequest"),
            "responses": {
              "201": {"description": "cpf added"},
              "400": error_response("missing or duplicate cpf")
            }
          }
        },
        "/api/users/{cpf}": {
          "parameters": [path_param("cpf")],
          "delete": {"responses": {"200": {"description": "cpf removed"}, "404": error_response("cpf not allow-listed")}}
        },
        "/api/waitinglist": waitinglist,
        "/api/waitinglist/{id}": waiting_item,
        "/api/providers": providers,
        "/api/providers/{id}": provider,
        "/api/providers/{id}/execution": {
          "parameters": [path_param("id")],
          "put": {
            "requestBody": json_body("ExecutionUpdate"),
            "responses": {
              "200": {"description": "month written"},
              "400": error_response("missing monthKey or data"),
              "404": error_response("unknown provider")
            }
          }
        },
        "/api/providers/{id}/execution/{monthKey}": {
          "parameters": [path_param("id"), path_param("monthKey")],
          "delete": {"responses": {"200": {"description": "month removed"}, "404": error_response("unknown provider or month")}}
        },
        "/api/reports": {
          "get": {"responses": {"200": {"description": "report metadata"}}},
          "post": {
            "requestBody": {
              "required": true,
              "content": {"multipart/form-data": {"schema": {
                "type": "object",
                "required": ["report_pdf", "name", "description"],
                "properties": {
                  "report_pdf": {"type": "string", "format": "binary"},
                  "name": {"type": "string"},
                  "description": {"type": "string"}
                }
              }}}
            },
            "responses": {
              "201": {"description": "report stored"},
              "400": error_response("missing file or field"),
              "413": error_response("upload too large")
            }
          }
        },
        "/api/reports/{id}": {
          "parameters": [path_param("id")],
          "delete": {"responses": {"200": {"description": "report and file removed"}, "404": error_response("unknown report")}}
        },
        "/api/uploads/{filename}": {
          "parameters": [path_param("filename")],
          "get": {
            "responses": {
              "200": {"description": "raw file bytes", "content": {"application/pdf": {}, "application/octet-stream": {}}},
              "400": error_response("filename is not a single path component"),
              "404": error_response("no such upload")
            }
          }
        },
        "/api/reguladores": reguladores,
        "/api/reguladores/{id}": regulador,
        "/api/etiquetas": {
          "get": {"responses": {"200": {"description": "series keyed by type"}}},
          "post": {
            "requestBody": json_body("EtiquetaUpdate"),
            "responses": {
              "200": {"description": "series advanced"},
              "400": error_response("unknown type or missing field")
            }
          }
        },
        "/api/bloqueio/providers": bloqueio_providers,
        "/api/bloqueio/providers/{id}": bloqueio_provider,
        "/api/bloqueio/alteracoes": bloqueio_alteracoes
      },
      "components": {
        "schemas": {
          "ApiError": {
            "type": "object",
            "additionalProperties": false,
            "required": ["code", "message", "details"],
            "properties": {
              "code": {"type": "string", "enum": error_codes},
              "message": {"type": "string"},
              "details": {"type": "object"}
            }
          },
          "EtiquetaUpdate": {
            "type": "object",
            "required": ["type", "entry", "next_start"],
            "properties": {
              "type": {"type": "string", "enum": ["aih-mac", "aih-faec", "apac-mac", "apac-faec"]},
              "entry": {},
              "next_start": {"type": "string"}
            }
          },
          "ExecutionUpdate": {
            "type": "object",
            "required": ["monthKey", "data"],
            "properties": {"monthKey": {"type": "string"}, "data": {}}
          },
          "LoginRequest": {
            "type": "object",
            "required": ["cpf"],
            "properties": {"cpf": {"type": "string"}}
          },
          "Record": {"type": "object", "additionalProperties": true},
          "Success": {
            "type": "object",
            "required": ["success"],
            "properties": {"success": {"type": "boolean"}}
          },
          "WaitingListPatch": {
            "type": "object",
            "description": "Absent keys keep their stored value; values are stored as sent.",
            "properties": {"name": {}, "count": {}}
          }
        }
      }
    })
}

/// Paths in the document, `{param}` style.
#[must_use]
pub fn documented_paths() -> Vec<String> {
    openapi_v1_spec()
        .get("paths")
        .and_then(Value::as_object)
        .map(|paths| paths.keys().cloned().collect())
        .unwrap_or_default()
}
