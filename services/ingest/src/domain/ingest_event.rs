/// 取り込みイベントのスキーマと境界バリデーション
///
/// 受信したJSONペイロードを型付きの`IngestEvent`に変換する。
/// 必須フィールドは`Id`と`Age`のみで、それ以外のフィールドは検証せずそのまま保持する。
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Number, Value};
use thiserror::Error;

/// IDフィールド名
pub const FIELD_ID: &str = "Id";

/// 年齢フィールド名
pub const FIELD_AGE: &str = "Age";

/// 保存オブジェクトの拡張子
const OBJECT_KEY_SUFFIX: &str = ".json";

/// ペイロードのバリデーションエラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// ペイロードがJSONオブジェクトでない
    #[error("event must be a JSON object")]
    NotAnObject,
    /// 必須フィールドが欠落
    #[error("missing required field: {0}")]
    MissingField(String),
    /// Idが整数または空でない文字列でない
    #[error("Id must be an integer or a non-empty string")]
    InvalidId,
    /// Ageが数値でない
    #[error("Age must be a number")]
    InvalidAge,
}

/// イベントID
///
/// オブジェクト名にそのまま使用される。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventId {
    /// 整数ID（例: 123456）
    Integer(Number),
    /// 文字列ID（例: "user-1"）
    Text(String),
}

impl EventId {
    /// JSON値からIDを読み取る
    ///
    /// 小数・真偽値・null・空文字列は受け付けない。
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        match value {
            Value::Number(n) if n.is_i64() || n.is_u64() => Ok(EventId::Integer(n.clone())),
            Value::String(s) if !s.is_empty() => Ok(EventId::Text(s.clone())),
            _ => Err(ValidationError::InvalidId),
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::Integer(n) => write!(f, "{}", n),
            EventId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// 取り込みイベント
///
/// シリアライズ時は`Id`、`Age`、パススルーフィールドの順に出力する。
/// パススルーフィールドは受信時の順序を保持する。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestEvent {
    #[serde(rename = "Id")]
    id: EventId,
    #[serde(rename = "Age")]
    age: Number,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl IngestEvent {
    /// 受信ペイロードを検証して`IngestEvent`を作成
    ///
    /// # チェック内容
    /// - ペイロードがJSONオブジェクトである
    /// - `Id`と`Age`が存在する
    /// - `Id`が整数または空でない文字列
    /// - `Age`が数値（範囲チェックは`AgePolicy`で行う）
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = value.as_object().ok_or(ValidationError::NotAnObject)?;

        let id = match obj.get(FIELD_ID) {
            Some(value) => EventId::from_value(value)?,
            None => return Err(ValidationError::MissingField(FIELD_ID.to_string())),
        };

        let age = match obj.get(FIELD_AGE) {
            Some(Value::Number(n)) => n.clone(),
            Some(_) => return Err(ValidationError::InvalidAge),
            None => return Err(ValidationError::MissingField(FIELD_AGE.to_string())),
        };

        let attributes = obj
            .iter()
            .filter(|(key, _)| key.as_str() != FIELD_ID && key.as_str() != FIELD_AGE)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(Self {
            id,
            age,
            attributes,
        })
    }

    pub fn id(&self) -> &EventId {
        &self.id
    }

    pub fn age(&self) -> &Number {
        &self.age
    }

    /// Id・Age以外のパススルーフィールド
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// 保存先のオブジェクト名（`"<Id>.json"`）
    pub fn object_key(&self) -> String {
        format!("{}{}", self.id, OBJECT_KEY_SUFFIX)
    }

    /// イベント全体をコンパクトなJSON文字列にシリアライズ
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl TryFrom<&Value> for IngestEvent {
    type Error = ValidationError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}
