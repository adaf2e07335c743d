//! JSON-RPC 2.0 message handling for the MCP tool surface.
//!
//! Transport-agnostic: both the stdio loop and the HTTP route hand raw messages to
//! [`handle_message`] and write back whatever response it produces.
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::format_error_message;
use crate::tools::{ToolName, Toolbox};

pub const SERVER_NAME: &str = "tv-recommender-mcp-server";
pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;

#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    /// `None` only when the message has no `id` key; an explicit `null` id is a request.
    #[serde(skip)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl Response {
    fn ok(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn err(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

/// Reply for input that is not JSON at all.
pub fn parse_error() -> Response {
    Response::err(Value::Null, PARSE_ERROR, "Parse error")
}

/// Parses one raw message and dispatches it. `None` means nothing should be written back.
pub async fn handle_message(toolbox: &Toolbox, raw: &str) -> Option<Response> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            warn!("Unparseable message: {}", e);
            return Some(parse_error());
        }
    };
    handle_value(toolbox, value).await
}

pub async fn handle_value(toolbox: &Toolbox, value: Value) -> Option<Response> {
    let id = value.get("id").cloned();
    match serde_json::from_value::<Request>(value) {
        Ok(mut request) => {
            request.id = id;
            dispatch(toolbox, request).await
        }
        Err(e) => Some(Response::err(
            id.unwrap_or(Value::Null),
            INVALID_REQUEST,
            format!("Invalid request: {}", e),
        )),
    }
}

pub async fn dispatch(toolbox: &Toolbox, request: Request) -> Option<Response> {
    debug!(method = %request.method, "Dispatching");
    let Some(id) = request.id else {
        // Notifications, including notifications/initialized, get no reply.
        return None;
    };

    let response = match request.method.as_str() {
        "initialize" => Response::ok(id, initialize_result()),
        "ping" => Response::ok(id, json!({})),
        "tools/list" => Response::ok(id, json!({ "tools": tool_definitions() })),
        "tools/call" => call_tool(toolbox, id, request.params).await,
        other => Response::err(id, METHOD_NOT_FOUND, format!("Method not found: {}", other)),
    };
    Some(response)
}

async fn call_tool(toolbox: &Toolbox, id: Value, params: Value) -> Response {
    let params: CallParams = match serde_json::from_value(params) {
        Ok(p) => p,
        Err(e) => return Response::err(id, INVALID_PARAMS, format!("Invalid params: {}", e)),
    };
    let Ok(tool) = params.name.parse::<ToolName>() else {
        return Response::err(id, INVALID_PARAMS, format!("Unknown tool: {}", params.name));
    };

    let (text, is_error) = match toolbox.call(tool, params.arguments).await {
        Ok(output) => (output.into_text(), false),
        Err(e) => {
            warn!(tool = tool.as_str(), code = e.code(), "Tool failed: {}", e);
            (format_error_message(&e), true)
        }
    };
    Response::ok(
        id,
        json!({
            "content": [{ "type": "text", "text": text }],
            "isError": is_error,
        }),
    )
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": { "listChanged": false } },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        },
    })
}

pub fn tool_definitions() -> Vec<Value> {
    ToolName::ALL
        .iter()
        .map(|tool| {
            let (description, schema) = describe(*tool);
            json!({
                "name": tool.as_str(),
                "description": description,
                "inputSchema": schema,
            })
        })
        .collect()
}

fn string_arg(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

fn page_arg() -> Value {
    json!({ "type": "integer", "minimum": 1, "description": "页码，默认为 1" })
}

fn object_schema(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

fn describe(tool: ToolName) -> (&'static str, Value) {
    match tool {
        ToolName::RecommendationsByGenre => (
            "根据类型推荐高分剧集",
            object_schema(
                json!({ "genre": string_arg("剧集类型，例如：喜剧、科幻、Drama") }),
                &["genre"],
            ),
        ),
        ToolName::SimilarShows => (
            "查找与指定剧集相似的剧集",
            object_schema(json!({ "show_title": string_arg("剧集名称") }), &["show_title"]),
        ),
        ToolName::ShowDetails => (
            "获取剧集的详细信息",
            object_schema(json!({ "show_title": string_arg("剧集名称") }), &["show_title"]),
        ),
        ToolName::ShowReviews => (
            "获取剧集的用户评论",
            object_schema(
                json!({ "show_title": string_arg("剧集名称"), "page": page_arg() }),
                &["show_title"],
            ),
        ),
        ToolName::ShowVideos => (
            "获取剧集的预告片和相关视频",
            object_schema(json!({ "show_title": string_arg("剧集名称") }), &["show_title"]),
        ),
        ToolName::WatchProviders => (
            "查询剧集在指定地区的观看平台",
            object_schema(
                json!({
                    "show_title": string_arg("剧集名称"),
                    "country_code": string_arg("ISO 3166-1 国家代码，默认为 US"),
                }),
                &["show_title"],
            ),
        ),
        ToolName::ActorInfo => (
            "获取演员的个人信息和参演剧集",
            object_schema(json!({ "actor_name": string_arg("演员姓名") }), &["actor_name"]),
        ),
        ToolName::ShowsByPerson => (
            "查找某人参演的所有剧集",
            object_schema(json!({ "person_name": string_arg("人物姓名") }), &["person_name"]),
        ),
        ToolName::RecommendationsByActor => (
            "推荐某位演员评分最高的剧集",
            object_schema(
                json!({
                    "actor_name": string_arg("演员姓名"),
                    "limit": { "type": "integer", "minimum": 1, "description": "返回数量，默认为 10" },
                }),
                &["actor_name"],
            ),
        ),
        ToolName::PopularShows => (
            "获取当前热门剧集",
            object_schema(json!({ "page": page_arg() }), &[]),
        ),
        ToolName::TrendingShows => (
            "获取按日或按周统计的趋势剧集",
            object_schema(
                json!({
                    "time_window": { "type": "string", "enum": ["day", "week"], "description": "统计周期" },
                    "page": page_arg(),
                }),
                &["time_window"],
            ),
        ),
        ToolName::DiscoverShows => (
            "按类型、年份、评分、关键词等多个条件发现剧集",
            object_schema(
                json!({
                    "with_genres": { "type": "array", "items": { "type": "string" }, "description": "类型名称（中文或英文）" },
                    "first_air_date_year": { "type": "integer", "description": "首播年份（精确匹配）" },
                    "vote_average_gte": { "type": "number", "description": "最低评分" },
                    "with_networks": { "type": "array", "items": { "type": "integer" }, "description": "电视网 ID" },
                    "with_keywords": { "type": "array", "items": { "type": "string" }, "description": "关键词" },
                    "sort_by": string_arg("排序方式，默认为 popularity.desc"),
                    "page": page_arg(),
                    "with_original_language": string_arg("原始语言，例如 en、zh"),
                    "include_adult": { "type": "boolean" },
                    "include_null_first_air_dates": { "type": "boolean" },
                    "with_origin_country": string_arg("出品国家代码"),
                    "with_status": string_arg("剧集状态"),
                    "screened_theatrically": { "type": "boolean" },
                    "timezone": string_arg("时区"),
                    "watch_region": string_arg("观看地区"),
                    "with_companies": string_arg("制作公司 ID"),
                    "with_watch_providers": string_arg("观看平台 ID"),
                    "with_watch_monetization_types": string_arg("付费方式，例如 flatrate|rent"),
                }),
                &[],
            ),
        ),
        ToolName::TvGenres => (
            "列出所有剧集类型",
            object_schema(json!({}), &[]),
        ),
    }
}
