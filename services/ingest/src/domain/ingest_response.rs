/// 呼び出し元へのレスポンス
///
/// 汎用的なクラウド関数トリガーの`{statusCode, body}`形式。
use serde::{Deserialize, Serialize};

/// 正常応答のステータスコード（年齢が範囲外の場合も含む）
pub const STATUS_OK: u16 = 200;

/// 不正な入力に対するステータスコード
pub const STATUS_BAD_REQUEST: u16 = 400;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    pub status_code: u16,
    pub body: String,
}

impl IngestResponse {
    /// 200レスポンス（bodyはシリアライズ済みイベント）
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: STATUS_OK,
            body: body.into(),
        }
    }

    /// 400レスポンス（bodyはエラーメッセージ）
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status_code: STATUS_BAD_REQUEST,
            body: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_response() {
        let response = IngestResponse::ok(r#"{"Id":1,"Age":70}"#);
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, r#"{"Id":1,"Age":70}"#);
    }

    #[test]
    fn test_bad_request_response() {
        let response = IngestResponse::bad_request("Age must be a number");
        assert_eq!(response.status_code, 400);
        assert_eq!(response.body, "Age must be a number");
    }

    #[test]
    fn test_serializes_with_camel_case_status_code() {
        let response = IngestResponse::ok("{}");

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"statusCode": 200, "body": "{}"})
        );
    }
}
